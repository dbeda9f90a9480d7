//! Startup flow: resolve capabilities, bring up the SDK, report readiness.
//!
//! The interactive explorer session begins where this flow ends; its command
//! loop lives outside this crate. Any unrecoverable startup failure exits 1,
//! printing the fixed remediation text for capability failures or the error
//! itself for SDK/settings bring-up failures.

use std::fs;
use std::io::Write;

use anyhow::{bail, Context, Result};
use g2x_core::config::{self, G2xConfig};
use g2x_core::settings::{self, SettingsSource};
use g2x_core::startup::{self, Capabilities, StartupEnv, StartupError};

use super::Cli;

const SPLASH: &str = r"
  ____|  __ \     \
  __|    |   |   _ \    G2X
  |      |   |  ___ \   Exploratory Data Analysis
 _____| ____/ _/    _\
";

pub(super) fn run(args: Cli) -> Result<()> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    if let Some(path) = &args.snapshot_file {
        if !path.is_file() {
            bail!("snapshot file not found: {}", path.display());
        }
    }
    if let Some(path) = &args.audit_file {
        if !path.is_file() {
            bail!("audit file not found: {}", path.display());
        }
    }

    let env = StartupEnv::from_process();
    let caps = resolve_or_exit(&cfg, &env);

    println!("{SPLASH}");
    bring_up(&caps, &args, &env)
}

/// Run the startup resolver; on failure print the fixed remediation message
/// to stdout and terminate immediately with status 1. No partial state
/// survives for callers.
fn resolve_or_exit(cfg: &G2xConfig, env: &StartupEnv) -> Capabilities {
    match startup::resolve(cfg, env) {
        Ok(caps) => caps,
        Err(err) => {
            tracing::error!("startup failed: {err}");
            println!("{}", err.remediation());
            std::process::exit(StartupError::EXIT_CODE);
        }
    }
}

fn bring_up(caps: &Capabilities, args: &Cli, env: &StartupEnv) -> Result<()> {
    let bindings = caps.sdk.load().context("loading SDK libraries")?;

    let version_json = bindings
        .product
        .version_json()
        .context("reading SDK version")?;
    debug_echo(args.debug_output.as_deref(), "version", &version_json)?;
    let version = version_field(&version_json);

    let engine_settings = settings::resolve(
        args.config_file.as_deref(),
        env.settings_json_var.as_deref(),
        &settings::default_candidates(),
    )
    .context("resolving engine settings")?;
    tracing::info!("engine settings from {}", engine_settings.source);

    bindings
        .engine
        .init("g2x", &engine_settings.json, args.debug_trace)
        .context("initializing engine")?;
    bindings
        .config_manager
        .init("g2x", &engine_settings.json, false)
        .context("initializing config manager")?;
    let config_id = bindings
        .config_manager
        .default_config_id()
        .context("reading default config id")?;
    bindings
        .config_manager
        .destroy()
        .context("shutting down config manager")?;

    report(caps, &version, config_id, &engine_settings.source)?;

    bindings.engine.destroy().context("shutting down engine")?;
    Ok(())
}

/// Pull the VERSION member out of the product's version document.
fn version_field(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|doc| {
            doc.get("VERSION")
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Readiness report: what got resolved and how. The interactive session
/// would pick up from here.
fn report(
    caps: &Capabilities,
    version: &str,
    config_id: i64,
    source: &SettingsSource,
) -> Result<()> {
    let styles = if caps.renderer.style_presets_available() {
        format!("{} (extended styles available)", caps.renderer.style().name())
    } else {
        format!("{} (extended styles unavailable)", caps.renderer.style().name())
    };
    let rows = vec![
        row("SDK version", version),
        row("SDK layout", caps.sdk.layout.name()),
        row("SDK location", &caps.sdk.location().display().to_string()),
        row("Engine settings", &source.to_string()),
        row("Default config id", &config_id.to_string()),
        row("Table style", &styles),
        row("Pager", &caps.renderer.pager().program().display().to_string()),
    ];
    let table = caps.renderer.render(&["Capability", "Value"], &rows);
    caps.renderer.page(&table)
}

fn row(name: &str, value: &str) -> Vec<String> {
    vec![name.to_string(), value.to_string()]
}

/// Echo a raw SDK JSON response to the debug target: `screen` prints it,
/// anything else is treated as a file to append to.
fn debug_echo(target: Option<&str>, api: &str, payload: &str) -> Result<()> {
    let Some(target) = target else {
        return Ok(());
    };
    if target == "screen" {
        println!("{api}: {payload}");
    } else {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(target)
            .with_context(|| format!("opening debug output file {target}"))?;
        writeln!(file, "{api}: {payload}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_field_reads_the_version_member() {
        let raw = r#"{"PRODUCT_NAME": "g2", "VERSION": "3.10.1", "BUILD_NUMBER": "2024_05"}"#;
        assert_eq!(version_field(raw), "3.10.1");
    }

    #[test]
    fn version_field_tolerates_junk() {
        assert_eq!(version_field("not json"), "unknown");
        assert_eq!(version_field("{}"), "unknown");
        assert_eq!(version_field(r#"{"VERSION": 3}"#), "unknown");
    }

    #[test]
    fn debug_echo_appends_to_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.txt");
        let target = path.to_string_lossy().into_owned();
        debug_echo(Some(&target), "version", "{}").unwrap();
        debug_echo(Some(&target), "version", "{}").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with("version: {}"));
    }

    #[test]
    fn debug_echo_without_target_is_a_no_op() {
        debug_echo(None, "version", "{}").unwrap();
    }
}
