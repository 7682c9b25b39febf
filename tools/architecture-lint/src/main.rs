//! Check the Chirp backend's layer boundaries.
//!
//! Usage: `architecture-lint [BACKEND_DIR]`. Without an argument the backend
//! crate next to this tool in the workspace is linted.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

fn backend_dir() -> PathBuf {
    std::env::args_os().nth(1).map_or_else(
        || {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("../..")
                .join("backend")
        },
        PathBuf::from,
    )
}

fn main() -> ExitCode {
    let dir = backend_dir();
    match architecture_lint::lint_backend_sources(&dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "{}: {err}", dir.display());
            ExitCode::FAILURE
        }
    }
}
