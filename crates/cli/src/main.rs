//! CLI tool for building venue recommendation decks.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deck_blob::{Access, BlobConfig, BlobUploader, VercelBlobClient};
use deck_core::{deck_filename, InputParser, ParsedInput};
use deck_pptx::{DeckOptions, DeckReader, DeckRenderer};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Build venue recommendation decks from plain-text input.
#[derive(Parser, Debug)]
#[command(name = "venue-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON file overriding deck branding and page size
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the parsed input as JSON
    Parse {
        /// Input text file, or `-` for stdin
        input: PathBuf,
    },

    /// Write the deck to a local .pptx file
    Build {
        /// Input text file, or `-` for stdin
        input: PathBuf,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the deck and upload it to blob storage
    Upload {
        /// Input text file, or `-` for stdin
        input: PathBuf,

        /// Store the deck with private access
        #[arg(long)]
        private: bool,
    },

    /// Print the text of each slide in a .pptx file
    Inspect {
        /// Deck to read
        deck: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let renderer = DeckRenderer::new().with_options(load_options(args.options.as_deref())?);

    match &args.command {
        Command::Parse { input } => {
            let parsed = parse_input(input)?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Command::Build { input, output } => {
            let parsed = parse_input(input)?;
            let bytes = renderer.render(&parsed).context("Failed to build deck")?;
            let output_path = get_output_path(&parsed, output.as_deref())?;
            write_output(&output_path, &bytes)?;
            if args.verbose {
                eprintln!("Written to: {}", output_path.display());
            }
            println!("{}", output_path.display());
        }
        Command::Upload { input, private } => {
            let parsed = parse_input(input)?;
            let bytes = renderer.render(&parsed).context("Failed to build deck")?;
            let access = if *private { Access::Private } else { Access::Public };
            let url = upload(&deck_filename(&parsed.heading), bytes, access)?;
            println!("{}", url);
        }
        Command::Inspect { deck } => {
            let file =
                File::open(deck).with_context(|| format!("Failed to open {}", deck.display()))?;
            let slides = DeckReader::new()
                .read(BufReader::new(file))
                .with_context(|| format!("Failed to read {}", deck.display()))?;

            if args.verbose {
                eprintln!("  Found {} slides", slides.len());
            }

            for slide in slides {
                println!("--- Slide {} ---", slide.number);
                for text in &slide.texts {
                    println!("{}", text);
                }
            }
        }
    }

    Ok(())
}

/// Read and parse an input file (`-` reads stdin).
fn parse_input(input: &Path) -> Result<ParsedInput> {
    let text = read_input(input)?;
    let parsed = InputParser::new()
        .parse(&text)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    log::debug!(
        "Parsed '{}' with {} recommendation(s)",
        parsed.heading,
        parsed.record_count
    );
    Ok(parsed)
}

fn read_input(input: &Path) -> Result<String> {
    let mut text = String::new();
    if input.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
    } else {
        File::open(input)
            .and_then(|mut f| f.read_to_string(&mut text))
            .with_context(|| format!("Failed to read {}", input.display()))?;
    }
    Ok(text)
}

fn load_options(path: Option<&Path>) -> Result<DeckOptions> {
    let Some(path) = path else {
        return Ok(DeckOptions::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid deck options in {}", path.display()))
}

fn upload(filename: &str, bytes: Vec<u8>, access: Access) -> Result<String> {
    let config = BlobConfig::from_env().context("Blob storage is not configured")?;
    let client = VercelBlobClient::new(config);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let blob = runtime
        .block_on(client.upload(filename, bytes, access))
        .with_context(|| format!("Failed to upload {}", filename))?;
    Ok(blob.url)
}

/// Deck filename safe to join onto a local directory: path separators in the
/// heading become underscores so the file stays inside the output directory.
fn local_filename(heading: &str) -> String {
    deck_filename(heading).replace(['/', '\\'], "_")
}

/// Determine the output path for a built deck.
fn get_output_path(parsed: &ParsedInput, output_dir: Option<&Path>) -> Result<PathBuf> {
    let output_filename = local_filename(&parsed.heading);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => PathBuf::from(output_filename),
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
