//! Wordcloud CLI
//!
//! Usage:
//!   wordcloud [OPTIONS] [INPUT]
//!
//! Reads a JSON object of word counts (or raw text with `--text`) and writes
//! the rendered cloud as SVG.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use wordcloud::{render_with_config, FrequencyList, LayoutConfig, Palette, RenderConfig};

#[derive(Parser)]
#[command(name = "wordcloud")]
#[command(about = "Render word frequencies as an SVG word cloud")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Treat the input as raw text and count its words
    #[arg(long)]
    text: bool,

    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Palette file for word and background colors (TOML format)
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Block font metrics file (TOML format)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Seed for colors and random placement
    #[arg(long)]
    seed: Option<u64>,

    /// Place words at random positions instead of spiraling from the center
    #[arg(long)]
    random: bool,

    /// Debug mode: outline occupied regions and masks
    #[arg(short, long)]
    debug: bool,

    /// Number of search workers
    #[arg(long)]
    workers: Option<usize>,

    /// Only lay out the N most frequent words
    #[arg(short = 'n', long)]
    max_words: Option<usize>,
}

fn fail(message: String) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Load layout configuration
    let mut layout = match &cli.config {
        Some(path) => LayoutConfig::from_file(path).unwrap_or_else(|e| {
            fail(format!("loading config '{}': {}", path.display(), e))
        }),
        None => LayoutConfig::default(),
    };

    if let Some(path) = &cli.palette {
        let palette = Palette::from_file(path).unwrap_or_else(|e| {
            fail(format!("loading palette '{}': {}", path.display(), e))
        });
        layout = layout.with_palette(palette);
    }

    // Command-line flags override the file
    if cli.width.is_some() || cli.height.is_some() {
        let width = cli.width.unwrap_or(layout.width);
        let height = cli.height.unwrap_or(layout.height);
        layout = layout.with_size(width, height);
    }
    if let Some(font) = cli.font {
        layout = layout.with_font_file(font);
    }
    if let Some(seed) = cli.seed {
        layout = layout.with_seed(seed);
    }
    if let Some(workers) = cli.workers {
        layout = layout.with_workers(workers);
    }
    if let Some(limit) = cli.max_words {
        layout = layout.with_max_words(limit);
    }
    if cli.random {
        layout = layout.with_random_placement(true);
    }
    if cli.debug {
        layout = layout.with_debug(true);
    }

    // Read input
    let source = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path.display(), e))),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                fail(format!("reading from stdin: {}", e));
            }
            buffer
        }
    };

    let words = if cli.text {
        FrequencyList::from_text(&source)
    } else {
        FrequencyList::from_json(&source).unwrap_or_else(|e| fail(e.to_string()))
    };

    let config = RenderConfig::new().with_layout(layout);
    let svg = render_with_config(&words, config).unwrap_or_else(|e| fail(e.to_string()));

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, svg) {
                fail(format!("writing '{}': {}", path.display(), e));
            }
        }
        None => println!("{}", svg),
    }
}
