//! Print the OpenAPI document as JSON, or write it to `--output`.

use std::io::Write;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use chirp::doc::ApiDoc;
use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Emit the Chirp OpenAPI document", version)]
struct CliArgs {
    /// File to write instead of stdout.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
}

fn write_document(path: &Path, json: &str) -> color_eyre::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("output path {} has no file name", path.display()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("open {}", parent.display()))?;
    dir.write(file_name, json)
        .wrap_err_with(|| format!("write {}", path.display()))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let json = ApiDoc::openapi().to_pretty_json()?;
    match args.output {
        Some(path) => write_document(&path, &json),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
            Ok(())
        }
    }
}
