//! SVG generation from layout results

use crate::layout::{LayoutResult, PlacedWord, Rect};
use crate::palette::Color;
use crate::surface::{BlockFont, FontError};

use super::SvgConfig;

/// Outline color for occupied regions in debug output
const REGION_OUTLINE: &str = "#2196f3";

/// Outline color for masks in debug output
const MASK_OUTLINE: &str = "#f44336";

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    outlines: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            outlines: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle covering the whole canvas
    pub fn add_background(&mut self, width: u32, height: u32, color: Color) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect class="{}background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            prefix,
            width,
            height,
            color
        ));
    }

    /// Add a word as the glyph blocks it inks, grouped under its text
    pub fn add_word(&mut self, word: &PlacedWord, blocks: &[Rect]) {
        let prefix = self.prefix();
        let inner = self.indent_str();
        let nl = self.newline();
        let mut group = format!(
            r#"{}<g class="{}word" fill="{}"><title>{}</title>{}"#,
            inner,
            prefix,
            word.color,
            escape_xml(&word.text),
            nl
        );
        for block in blocks {
            group.push_str(&format!(
                r#"{}{}<rect x="{}" y="{}" width="{}" height="{}"/>{}"#,
                inner,
                if self.config.pretty_print { "  " } else { "" },
                block.left,
                block.bottom,
                block.width(),
                block.height(),
                nl
            ));
        }
        group.push_str(&format!("{}</g>", inner));
        self.elements.push(group);
    }

    /// Add an unfilled outline rectangle (debug output)
    pub fn add_outline(&mut self, rect: &Rect, class: &str, stroke: &str) {
        let prefix = self.prefix();
        self.outlines.push(format!(
            r#"{}<rect class="{}{}" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
            self.indent_str(),
            prefix,
            class,
            rect.left,
            rect.bottom,
            rect.width(),
            rect.height(),
            stroke
        ));
    }

    /// Build the final SVG string
    pub fn build(self, width: u32, height: u32) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        // Outlines (rendered on top)
        for outline in &self.outlines {
            svg.push_str(outline);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a LayoutResult to an SVG string.
///
/// Words are drawn with the same block glyphs the layout measured and
/// rasterized, so the SVG shows exactly the ink the collision index saw.
/// With `debug` set, every mask and every region a word registered in the
/// collision index is outlined.
pub fn render_svg(
    result: &LayoutResult,
    font: &BlockFont,
    config: &SvgConfig,
    debug: bool,
) -> Result<String, FontError> {
    let mut builder = SvgBuilder::new(config.clone());

    builder.add_background(result.width, result.height, result.background);
    for word in &result.words {
        let face = font.face(word.font_size)?;
        let blocks = face.glyph_blocks(&word.text, word.position.x, word.position.y, 0.5, 0.5);
        builder.add_word(word, &blocks);
    }

    if debug {
        for mask in &result.masks {
            builder.add_outline(mask, "mask", MASK_OUTLINE);
        }
        for word in &result.words {
            for region in &word.regions {
                builder.add_outline(region, "region", REGION_OUTLINE);
            }
        }
    }

    Ok(builder.build(result.width, result.height))
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Point;

    fn word(text: &str) -> PlacedWord {
        let position = Point::new(50.0, 40.0);
        let bounds = Rect::centered(position, 30.0, 15.0);
        PlacedWord {
            text: text.to_string(),
            count: 3,
            position,
            font_size: 10.0,
            height: 15.0,
            color: Color::rgb(0xff, 0, 0),
            bounds,
            regions: vec![bounds],
        }
    }

    fn result_with(words: Vec<PlacedWord>, masks: Vec<Rect>) -> LayoutResult {
        let mut result = LayoutResult::new(100, 80, Color::WHITE, masks);
        result.words = words;
        result
    }

    fn render(result: &LayoutResult, config: &SvgConfig, debug: bool) -> String {
        render_svg(result, &BlockFont::default(), config, debug).expect("valid font sizes")
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_render_empty_layout() {
        let svg = render(&result_with(vec![], vec![]), &SvgConfig::default(), false);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 100 80""#));
        assert!(svg.contains(r##"class="wc-background" x="0" y="0" width="100" height="80" fill="#ffffff""##));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("wc-word"));
    }

    #[test]
    fn test_render_word_as_glyph_blocks() {
        let svg = render(&result_with(vec![word("hi")], vec![]), &SvgConfig::default(), false);
        assert!(svg.contains(r##"<g class="wc-word" fill="#ff0000"><title>hi</title>"##));
        // Size 10 em box spans x 44..56 and y 35..45; "i" is full height
        assert!(svg.contains(r#"<rect x="45" y="35" width="4" height="10"/>"#));
        assert!(svg.contains(r#"<rect x="51" y="35" width="4" height="10"/>"#));
        assert!(!svg.contains("<text"));
        assert!(!svg.contains("wc-region"));
    }

    #[test]
    fn test_short_glyphs_keep_upper_band_empty() {
        let svg = render(&result_with(vec![word("o")], vec![]), &SvgConfig::default(), false);
        // x-height ink of a size 10 "o" spans y 39..45 only
        assert!(svg.contains(r#"<rect x="48" y="39" width="4" height="6"/>"#));
    }

    #[test]
    fn test_render_escapes_word() {
        let svg = render(&result_with(vec![word("a&b")], vec![]), &SvgConfig::default(), false);
        assert!(svg.contains("<title>a&amp;b</title>"));
    }

    #[test]
    fn test_invalid_font_size_is_an_error() {
        let mut bad = word("go");
        bad.font_size = 0.0;
        let result = render_svg(
            &result_with(vec![bad], vec![]),
            &BlockFont::default(),
            &SvgConfig::default(),
            false,
        );
        assert!(matches!(result, Err(FontError::InvalidSize(_))));
    }

    #[test]
    fn test_debug_outlines() {
        let mask = Rect::new(0.0, 10.0, 0.0, 20.0);
        let svg = render(&result_with(vec![word("go")], vec![mask]), &SvgConfig::default(), true);
        assert!(svg.contains(r#"class="wc-mask" x="0" y="0" width="10" height="20""#));
        assert!(svg.contains(r#"class="wc-region" x="35" y="32.5" width="30" height="15""#));
    }

    #[test]
    fn test_compact_output() {
        let config = SvgConfig::new()
            .with_standalone(false)
            .with_pretty_print(false)
            .without_class_prefix();
        let svg = render(&result_with(vec![word("go")], vec![]), &config, false);
        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains('\n'));
        assert!(svg.contains(r#"<g class="word""#));
    }
}
