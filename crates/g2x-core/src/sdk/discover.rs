//! Locate an installed SDK on disk.
//!
//! Discovery only looks at the filesystem; no code is loaded here. That
//! split keeps the layout decision table testable without a real SDK.

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};

use crate::probe::{resolve_first, CapabilityProbe, ExhaustedError, ProbeError, Resolved};

use super::COMPONENTS;

/// Stem of the modern single-library layout (`libG2.so` on Linux).
pub const MODERN_STEM: &str = "G2";

/// Default install locations probed after `$G2_SDK_PATH`.
const DEFAULT_LIB_DIRS: [&str; 2] = ["/opt/g2/lib", "/usr/lib/g2"];

/// Installed SDK layouts, in probe order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkLayout {
    /// One shared library exposing every component.
    Modern,
    /// One shared library per component, all in the same directory.
    Legacy,
}

impl SdkLayout {
    pub fn name(self) -> &'static str {
        match self {
            SdkLayout::Modern => "modern",
            SdkLayout::Legacy => "legacy",
        }
    }
}

/// A discovered, not-yet-loaded SDK installation.
#[derive(Debug, Clone)]
pub struct SdkInstall {
    pub layout: SdkLayout,
    /// Modern: exactly one path. Legacy: one path per component, in
    /// [`COMPONENTS`](super::COMPONENTS) order.
    pub libraries: Vec<PathBuf>,
}

impl SdkInstall {
    /// The library a diagnostic message should name: the single modern
    /// library, or the legacy install directory.
    pub fn location(&self) -> &Path {
        let first = self
            .libraries
            .first()
            .map(PathBuf::as_path)
            .unwrap_or_else(|| Path::new(""));
        match self.layout {
            SdkLayout::Modern => first,
            SdkLayout::Legacy => first.parent().unwrap_or(first),
        }
    }
}

/// Platform file name for a library stem (`G2` -> `libG2.so` on Linux).
pub fn library_file_name(stem: &str) -> String {
    format!("{DLL_PREFIX}{stem}{DLL_SUFFIX}")
}

/// Build the ordered library search path: explorer-config directories first,
/// then colon-separated `$G2_SDK_PATH` entries, then the default install
/// locations.
pub fn search_paths(config_dirs: &[PathBuf], sdk_path_var: Option<&str>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = config_dirs.to_vec();
    if let Some(raw) = sdk_path_var {
        paths.extend(
            raw.split(':')
                .filter(|part| !part.is_empty())
                .map(PathBuf::from),
        );
    }
    paths.extend(DEFAULT_LIB_DIRS.iter().map(PathBuf::from));
    paths
}

/// Probe the search path for an installed SDK, modern layout first.
pub fn discover(paths: &[PathBuf]) -> Result<Resolved<SdkInstall>, ExhaustedError> {
    resolve_first(
        "entity-resolution SDK",
        vec![
            CapabilityProbe::new("modern", || probe_modern(paths)),
            CapabilityProbe::new("legacy", || probe_legacy(paths)),
        ],
    )
}

fn probe_modern(paths: &[PathBuf]) -> Result<SdkInstall, ProbeError> {
    let file = library_file_name(MODERN_STEM);
    for dir in paths {
        let candidate = dir.join(&file);
        if candidate.is_file() {
            return Ok(SdkInstall {
                layout: SdkLayout::Modern,
                libraries: vec![candidate],
            });
        }
    }
    Err(ProbeError::new(format!(
        "{file} not found in {} search path(s)",
        paths.len()
    )))
}

fn probe_legacy(paths: &[PathBuf]) -> Result<SdkInstall, ProbeError> {
    for dir in paths {
        let libraries: Vec<PathBuf> = COMPONENTS
            .iter()
            .map(|component| dir.join(library_file_name(component.stem)))
            .collect();
        if libraries.iter().all(|path| path.is_file()) {
            return Ok(SdkInstall {
                layout: SdkLayout::Legacy,
                libraries,
            });
        }
    }
    Err(ProbeError::new(format!(
        "per-component libraries not found together in {} search path(s)",
        paths.len()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, stem: &str) {
        fs::write(dir.join(library_file_name(stem)), b"").unwrap();
    }

    fn legacy_install(dir: &Path) {
        for component in &COMPONENTS {
            touch(dir, component.stem);
        }
    }

    #[test]
    fn modern_layout_wins_when_present() {
        let dir = tempdir().unwrap();
        touch(dir.path(), MODERN_STEM);
        let resolved = discover(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(resolved.provider, "modern");
        assert_eq!(resolved.value.layout, SdkLayout::Modern);
        assert_eq!(resolved.value.libraries.len(), 1);
    }

    #[test]
    fn modern_preferred_over_complete_legacy_install() {
        let dir = tempdir().unwrap();
        touch(dir.path(), MODERN_STEM);
        legacy_install(dir.path());
        let resolved = discover(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(resolved.value.layout, SdkLayout::Modern);
    }

    #[test]
    fn legacy_layout_used_when_modern_missing() {
        let dir = tempdir().unwrap();
        legacy_install(dir.path());
        let resolved = discover(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(resolved.provider, "legacy");
        assert_eq!(resolved.value.layout, SdkLayout::Legacy);
        assert_eq!(resolved.value.libraries.len(), COMPONENTS.len());
    }

    #[test]
    fn incomplete_legacy_install_does_not_resolve() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "G2Engine");
        touch(dir.path(), "G2Product");
        let err = discover(&[dir.path().to_path_buf()]).unwrap_err();
        assert_eq!(err.attempts.len(), 2);
    }

    #[test]
    fn empty_search_path_exhausts_both_probes() {
        let err = discover(&[]).unwrap_err();
        assert_eq!(err.capability, "entity-resolution SDK");
        assert_eq!(err.attempts[0].0, "modern");
        assert_eq!(err.attempts[1].0, "legacy");
    }

    #[test]
    fn earlier_search_path_entry_wins() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        touch(first.path(), MODERN_STEM);
        touch(second.path(), MODERN_STEM);
        let resolved = discover(&[first.path().to_path_buf(), second.path().to_path_buf()])
            .unwrap();
        assert!(resolved.value.libraries[0].starts_with(first.path()));
    }

    #[test]
    fn search_paths_orders_config_env_then_defaults() {
        let paths = search_paths(
            &[PathBuf::from("/cfg/lib")],
            Some("/from/env:/from/env2"),
        );
        assert_eq!(paths[0], PathBuf::from("/cfg/lib"));
        assert_eq!(paths[1], PathBuf::from("/from/env"));
        assert_eq!(paths[2], PathBuf::from("/from/env2"));
        assert_eq!(paths[3], PathBuf::from(DEFAULT_LIB_DIRS[0]));
        assert_eq!(paths[4], PathBuf::from(DEFAULT_LIB_DIRS[1]));
    }

    #[test]
    fn search_paths_skips_empty_env_segments() {
        let paths = search_paths(&[], Some(":/only:"));
        assert_eq!(paths[0], PathBuf::from("/only"));
        assert_eq!(paths.len(), 1 + DEFAULT_LIB_DIRS.len());
    }

    #[test]
    fn location_names_dir_for_legacy() {
        let dir = tempdir().unwrap();
        legacy_install(dir.path());
        let resolved = discover(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(resolved.value.location(), dir.path());
    }
}
