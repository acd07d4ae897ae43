//! steamguide - Notion HTML export to Steam guide BBCode converter

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use steamguide::{ImageMap, convert_bytes};

#[derive(Parser)]
#[command(name = "steamguide")]
#[command(version, about = "Convert Notion HTML exports to Steam guide BBCode", long_about = None)]
#[command(after_help = "EXAMPLES:
    steamguide              Convert every .html file in the current directory
    steamguide export/      Convert an exported directory
    steamguide -m ids.csv   Use an explicit image-ID manifest")]
struct Cli {
    /// Directory containing Notion-exported HTML files
    #[arg(value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Image-ID manifest CSV (defaults to *_steam_guide_images.csv in DIR)
    #[arg(short, long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Suppress per-file messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> steamguide::Result<()> {
    let images = load_image_map(cli)?;
    if images.is_empty() && !cli.quiet {
        eprintln!("warning: no image-ID manifest found; images fall back to raw [img] embeds");
    }

    for input in html_files(&cli.dir)? {
        let html = fs::read(&input)?;
        let bbcode = convert_bytes(&html, &images);
        let output = input.with_extension("txt");
        fs::write(&output, &bbcode)?;
        if !cli.quiet {
            println!("converted: {} -> {}", input.display(), output.display());
        }
    }
    Ok(())
}

fn load_image_map(cli: &Cli) -> steamguide::Result<ImageMap> {
    match &cli.map {
        Some(path) => ImageMap::from_csv_path(path),
        None => Ok(ImageMap::discover(&cli.dir)?.unwrap_or_default()),
    }
}

/// HTML files in `dir`, sorted for a deterministic processing order.
fn html_files(dir: &Path) -> steamguide::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_html = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.to_lowercase().ends_with(".html"));
        if is_html && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
