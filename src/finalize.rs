//! Finalize Module
//!
//! Writes the generated declaration module and runs the external formatter.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::error::{GenerateError, Result};

/// Overwrite `path` with `contents`.
pub fn write_declarations(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| GenerateError::io(path, e))
}

/// Run `formatter <path>` and discard any failure. Returns whether the
/// formatter ran and exited successfully.
pub fn run_formatter(formatter: &[String], path: &Path) -> bool {
    let Some((program, args)) = formatter.split_first() else {
        return false;
    };

    let status = Command::new(program)
        .args(args)
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => {
            debug!("formatted {} with {}", path.display(), program);
            true
        }
        Ok(status) => {
            warn!("formatter {} exited with {}, output left unformatted", program, status);
            false
        }
        Err(e) => {
            warn!("could not run formatter {}: {}", program, e);
            false
        }
    }
}
