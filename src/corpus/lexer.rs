//! Word tokenizer for raw text using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"\s+")]
pub enum Token<'s> {
    /// Letters and digits, with inner apostrophes or hyphens ("don't", "x-ray")
    #[regex(r"[\p{L}\p{N}]+(['\-][\p{L}\p{N}]+)*", |lex| lex.slice())]
    Word(&'s str),
}

/// Lex input text into words with spans; punctuation and symbols are dropped
pub fn lex(input: &str) -> impl Iterator<Item = (&str, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| match tok {
            Ok(Token::Word(word)) => Some((word, span)),
            Err(_) => None,
        })
}

/// Lower-cased words of `input`, in order
pub fn words(input: &str) -> impl Iterator<Item = String> + '_ {
    lex(input).map(|(word, _)| word.to_lowercase())
}
