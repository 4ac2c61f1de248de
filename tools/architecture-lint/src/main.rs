//! Runs the layer boundary lint.
//!
//! With no argument the sibling `dashboard` crate of this workspace is
//! checked; otherwise the first argument names the crate directory.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let crate_dir = std::env::args_os().nth(1).map_or_else(
        || Path::new(env!("CARGO_MANIFEST_DIR")).join("../../dashboard"),
        PathBuf::from,
    );
    let outcome = architecture_lint::lint_dashboard_sources(&crate_dir);
    let mut stderr = io::stderr().lock();
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Nothing useful remains to do if stderr itself is gone.
            drop(writeln!(stderr, "{err}"));
            ExitCode::FAILURE
        }
    }
}
