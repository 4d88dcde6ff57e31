use clap::Parser;
use std::path::PathBuf;

use progress_note_pdf::{LayoutConfig, LayoutEngine, ProgressNote};

#[derive(Parser)]
#[command(name = "progress-note-pdf", about = "Render a progress note (JSON) as a paginated PDF")]
struct Args {
    /// Input progress note JSON file
    input: PathBuf,
    /// Output PDF file (defaults to input with .pdf extension)
    output: Option<PathBuf>,
    /// Wrap budget in characters for address and contact fields
    #[arg(long, default_value_t = 55)]
    narrow_width: usize,
    /// Wrap budget in characters for narrative sections
    #[arg(long, default_value_t = 65)]
    wide_width: usize,
    /// Vertical distance between lines, in points
    #[arg(long, default_value_t = 20)]
    line_height: i32,
    /// Print the positioned lines as JSON instead of writing a PDF
    #[arg(long)]
    dump_layout: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !args.input.is_file() {
        eprintln!("Error: not a file: {}", args.input.display());
        std::process::exit(1);
    }

    let config = LayoutConfig {
        narrow_chars: args.narrow_width,
        wide_chars: args.wide_width,
        line_height: args.line_height,
        ..LayoutConfig::default()
    };
    let engine = match LayoutEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    if args.dump_layout {
        if let Err(e) = dump_layout(&engine, &args.input) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("pdf"));

    if let Err(e) = progress_note_pdf::convert_note_to_pdf(&engine, &args.input, &output) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    log::info!("wrote {}", output.display());
}

fn dump_layout(engine: &LayoutEngine, input: &std::path::Path) -> Result<(), progress_note_pdf::Error> {
    let json = std::fs::read_to_string(input)?;
    let report = ProgressNote::from_json(&json)?.to_report()?;
    let layout = engine.render(&report);
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}
