//! Pager discovery and output paging.
//!
//! Every table the explorer shows goes through a terminal pager, so a usable
//! pager program is a hard startup requirement. Discovery only inspects the
//! filesystem; nothing is spawned until output is actually paged.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Result;

use crate::probe::ProbeError;

/// Options handed to `less`; `F` makes it quit when output fits one screen.
const LESS_OPTIONS: &str = "-FMXSR";

/// Pagers probed after the config override and `$PAGER`.
const WELL_KNOWN_PAGERS: [&str; 2] = ["less", "more"];

/// A resolved pager program, held for the life of the process.
#[derive(Debug, Clone)]
pub struct Pager {
    program: PathBuf,
    args: Vec<String>,
}

impl Pager {
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Pipe `text` through the pager and wait for it to exit.
    ///
    /// Falls back to plain stdout when the pager cannot be spawned, so a
    /// pager that disappears after startup never loses output.
    pub fn page(&self, text: &str) -> Result<()> {
        let mut child = match Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                tracing::warn!(
                    "failed to spawn pager {}: {err}; writing to stdout",
                    self.program.display()
                );
                print!("{text}");
                return Ok(());
            }
        };
        if let Some(mut stdin) = child.stdin.take() {
            // A write error here means the user quit the pager early; the
            // remaining output is intentionally dropped.
            if let Err(err) = stdin.write_all(text.as_bytes()) {
                tracing::debug!("pager closed its input early: {err}");
            }
        }
        child.wait()?;
        Ok(())
    }
}

/// Locate a usable pager program.
///
/// Candidates are tried in order: the explorer config's `pager` setting,
/// `$PAGER`, then the well-known pagers, each searched across `path_dirs`.
pub fn find_pager(
    configured: Option<&str>,
    pager_var: Option<&str>,
    path_dirs: &[PathBuf],
) -> Result<Pager, ProbeError> {
    let mut candidates: Vec<&str> = Vec::new();
    if let Some(name) = configured.filter(|s| !s.is_empty()) {
        candidates.push(name);
    }
    if let Some(name) = pager_var.filter(|s| !s.is_empty()) {
        candidates.push(name);
    }
    candidates.extend(WELL_KNOWN_PAGERS);

    for name in &candidates {
        if let Some(program) = locate(name, path_dirs) {
            let args = pager_args(&program);
            tracing::debug!("pager resolved: {}", program.display());
            return Ok(Pager { program, args });
        }
    }
    Err(ProbeError::new(format!(
        "no pager found (tried {}) in {} PATH entries",
        candidates.join(", "),
        path_dirs.len()
    )))
}

/// `less` gets its full option set; anything else runs bare.
fn pager_args(program: &Path) -> Vec<String> {
    match program.file_name().and_then(|n| n.to_str()) {
        Some("less") => vec![LESS_OPTIONS.to_string()],
        _ => Vec::new(),
    }
}

fn locate(name: &str, path_dirs: &[PathBuf]) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        // An explicit path is used as-is, not searched.
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    path_dirs
        .iter()
        .map(|dir| dir.join(name))
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
