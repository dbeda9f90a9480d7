//! Startup capability resolution.
//!
//! Startup either leaves the process fully ready, with every optional and
//! required capability bound in one [`Capabilities`] bundle, or rejected
//! with a fixed remediation message and exit status 1. The sequence is
//! strictly linear: pager probe (fatal), border-style refinement
//! (degradable), SDK discovery (fatal when both layouts fail). Nothing here
//! prints or exits; the binary owns that, which keeps the decision table
//! testable.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::config::G2xConfig;
use crate::probe::{ExhaustedError, ProbeError};
use crate::render::{self, TableRenderer};
use crate::sdk::{self, SdkInstall};
use crate::settings;

/// Snapshot of everything the startup probes read from the process
/// environment. Tests build these synthetically.
#[derive(Debug, Clone, Default)]
pub struct StartupEnv {
    pub path_dirs: Vec<PathBuf>,
    pub pager_var: Option<String>,
    pub lc_all: Option<String>,
    pub lc_ctype: Option<String>,
    pub lang: Option<String>,
    pub sdk_path_var: Option<String>,
    pub settings_json_var: Option<String>,
}

impl StartupEnv {
    /// Capture the real process environment.
    pub fn from_process() -> Self {
        Self {
            path_dirs: env::var_os("PATH")
                .map(|path| env::split_paths(&path).collect())
                .unwrap_or_default(),
            pager_var: env::var("PAGER").ok(),
            lc_all: env::var("LC_ALL").ok(),
            lc_ctype: env::var("LC_CTYPE").ok(),
            lang: env::var("LANG").ok(),
            sdk_path_var: env::var("G2_SDK_PATH").ok(),
            settings_json_var: env::var(settings::SETTINGS_ENV_VAR).ok(),
        }
    }

    pub fn unicode_locale(&self) -> bool {
        render::unicode_locale(
            self.lc_all.as_deref(),
            self.lc_ctype.as_deref(),
            self.lang.as_deref(),
        )
    }
}

/// Everything the explorer needs after startup, resolved exactly once.
#[derive(Debug)]
pub struct Capabilities {
    pub renderer: TableRenderer,
    /// Discovered SDK install; loaded into bindings immediately after
    /// resolution and held for the life of the process.
    pub sdk: SdkInstall,
}

pub const RENDERER_REMEDIATION: &str = "\nPlease install a terminal pager (apt install less)\n";
pub const SDK_REMEDIATION: &str =
    "\nPlease export G2_SDK_PATH=<path to the SDK library directory>\n";

/// Unrecoverable startup failure.
#[derive(Debug)]
pub enum StartupError {
    RendererUnavailable { probe: ProbeError },
    SdkUnavailable(ExhaustedError),
}

impl StartupError {
    /// Exit status for any unrecoverable startup failure.
    pub const EXIT_CODE: i32 = 1;

    /// Fixed, actionable text for stdout; never internal error detail.
    pub fn remediation(&self) -> &'static str {
        match self {
            StartupError::RendererUnavailable { .. } => RENDERER_REMEDIATION,
            StartupError::SdkUnavailable(_) => SDK_REMEDIATION,
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::RendererUnavailable { probe } => {
                write!(f, "table renderer unavailable: {probe}")
            }
            StartupError::SdkUnavailable(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StartupError {}

/// Resolve all startup capabilities.
pub fn resolve(config: &G2xConfig, env: &StartupEnv) -> Result<Capabilities, StartupError> {
    // Step 1: pager. Without it no table can be shown, so this is fatal and
    // nothing further is attempted.
    let pager = render::find_pager(
        config.pager.as_deref(),
        env.pager_var.as_deref(),
        &env.path_dirs,
    )
    .map_err(|probe| StartupError::RendererUnavailable { probe })?;

    // Step 2: border-style refinement. Best effort; the base renderer stays
    // usable with ASCII borders.
    let unicode_ok = env.unicode_locale();
    if !unicode_ok {
        tracing::debug!("extended border styles unavailable (locale is not UTF-8)");
    }
    let renderer = TableRenderer::new(pager, config.table_style, unicode_ok);

    // Step 3: SDK discovery, modern layout then legacy.
    let paths = sdk::search_paths(&config.sdk_lib_dirs, env.sdk_path_var.as_deref());
    let resolved = sdk::discover(&paths).map_err(StartupError::SdkUnavailable)?;
    tracing::info!(
        "SDK resolved via {} layout at {}",
        resolved.value.layout.name(),
        resolved.value.location().display()
    );

    Ok(Capabilities {
        renderer,
        sdk: resolved.value,
    })
}
