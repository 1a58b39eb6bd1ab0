use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::info;
use pdf_adapter::table::TableInput;
use pdf_adapter::{samples, OutputMode, PdfConfig, PdfDocument, PdfOutput};

/// Renders PDF documents through the pdf_adapter crate.
///
/// Fonts must be present under `assets/fonts` next to the binary or in the
/// crate directory, or provided via the `PDF_ADAPTER_FONTS_DIR` environment
/// variable. Set `RUST_LOG=debug` to trace layout decisions.
#[derive(Parser)]
#[command(author, version, about = "Command-line front end for pdf_adapter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the demonstration document.
    Sample(OutputArgs),

    /// Render a table described by a JSON file.
    Table {
        /// JSON file with `headers`, `rows` and `options`.
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// JSON document configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file, also used as download name for response modes.
    #[arg(long, short, default_value = "doc.pdf")]
    output: String,

    /// Output mode: S, F, I, D, FI or FD.
    #[arg(long, short, default_value = "F", value_parser = parse_mode)]
    mode: OutputMode,

    /// Document title, overriding the configuration.
    #[arg(long)]
    title: Option<String>,
}

impl OutputArgs {
    fn load_config(&self) -> Result<PdfConfig, Box<dyn Error>> {
        let config = match &self.config {
            Some(path) => PdfConfig::from_json(&read_to_string(path)?)?,
            None => PdfConfig::new(),
        };
        Ok(match &self.title {
            Some(title) => config.with_title(title.clone()),
            None => config,
        })
    }

    fn deliver(&self, document: PdfDocument) -> Result<(), Box<dyn Error>> {
        match document.output(&self.output, self.mode)? {
            PdfOutput::Bytes(bytes) => println!("Rendered {} bytes", bytes.len()),
            PdfOutput::Saved { path, len } => {
                println!("Generated {} ({} bytes)", path.display(), len)
            }
            PdfOutput::Response(response) => {
                println!("HTTP {}", response.status);
                for (name, value) in &response.headers {
                    println!("{name}: {value}");
                }
            }
        }
        Ok(())
    }
}

fn parse_mode(value: &str) -> Result<OutputMode, String> {
    value.parse().map_err(|err: pdf_adapter::Error| err.to_string())
}

fn read_to_string(path: &Path) -> Result<String, Box<dyn Error>> {
    fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err).into())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Sample(args) => {
            let document = samples::sample_document(args.load_config()?)?;
            args.deliver(document)
        }
        Commands::Table { input, output } => {
            let table = TableInput::from_json(&read_to_string(&input)?)?;
            info!(
                "Loaded table with {} columns from {}",
                table.headers.len(),
                input.display()
            );
            let mut document = PdfDocument::new(output.load_config()?)?;
            document.add_table(table)?;
            output.deliver(document)
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
