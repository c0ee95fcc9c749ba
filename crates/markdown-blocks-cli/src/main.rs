use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use markdown_blocks_config::Config;
use markdown_blocks_engine::{
    Block, BlockStyle, Converter, KeyGenerator, ParseOptions, PulldownMarkdownParser, RandomKeys,
    Span, TextBlock, check_json, compute_stats, extract_headings,
};
use serde::Serialize;
use std::{
    io::{self, Read},
    path::{Path, PathBuf},
    process,
};

#[derive(Debug, Parser)]
#[command(name = "markdown-blocks", version, about = "Convert Markdown into structured blocks")]
struct Cli {
    /// Config file to use instead of ~/.config/markdown-blocks/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print single-line JSON regardless of the config file
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a Markdown file (or `-` for stdin) into blocks
    Convert { input: PathBuf },
    /// Print the heading outline of a Markdown file
    Outline { input: PathBuf },
    /// Print block statistics of a Markdown file
    Stats { input: PathBuf },
    /// Check a JSON block array; exits non-zero when invalid
    Validate { input: PathBuf },
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let pretty = config.output.pretty && !cli.compact;
    let converter = Converter::with_parts(
        PulldownMarkdownParser::with_options(parse_options(&config)),
        RandomKeys,
    );

    match cli.command {
        Command::Convert { input } => {
            let source = read_input(&input)?;
            let blocks = match converter.convert(&source) {
                Ok(blocks) => blocks,
                Err(e) if config.output.fallback_on_error => {
                    log::warn!("{e}, emitting the source as a single paragraph");
                    fallback_blocks(&source, &RandomKeys)
                }
                Err(e) => return Err(e).context(format!("Converting {}", input.display())),
            };
            print_json(&blocks, pretty)
        }
        Command::Outline { input } => {
            let blocks = convert_file(&converter, &input)?;
            print_json(&extract_headings(&blocks), pretty)
        }
        Command::Stats { input } => {
            let blocks = convert_file(&converter, &input)?;
            print_json(&compute_stats(&blocks), pretty)
        }
        Command::Validate { input } => {
            let source = read_input(&input)?;
            let value: serde_json::Value = serde_json::from_str(&source)
                .with_context(|| format!("Parsing JSON from {}", input.display()))?;
            match check_json(&value) {
                Ok(()) => {
                    println!("valid");
                    Ok(())
                }
                Err(e) => {
                    println!("invalid: {e}");
                    process::exit(2);
                }
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file not found: {}", path.display()))?,
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Config::load()?.unwrap_or_default()
        }
    };
    Ok(config)
}

fn parse_options(config: &Config) -> ParseOptions {
    ParseOptions {
        tables: config.parser.tables,
        strikethrough: config.parser.strikethrough,
        smart_punctuation: config.parser.smart_punctuation,
    }
}

fn convert_file(
    converter: &Converter<PulldownMarkdownParser, RandomKeys>,
    input: &Path,
) -> Result<Vec<Block>> {
    let source = read_input(input)?;
    converter
        .convert(&source)
        .with_context(|| format!("Converting {}", input.display()))
}

/// A single paragraph holding the raw source, for when conversion fails.
fn fallback_blocks(source: &str, keys: &dyn KeyGenerator) -> Vec<Block> {
    let key = keys.next_key();
    vec![Block::Text(TextBlock::new(
        key,
        BlockStyle::Normal,
        vec![Span::new(keys.next_key(), source)],
    ))]
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Reading stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(input).with_context(|| format!("Reading {}", input.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
