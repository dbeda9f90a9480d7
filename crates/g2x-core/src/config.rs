use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::render::TableStyle;

/// Global configuration loaded from `~/.config/g2x/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct G2xConfig {
    /// Preferred table border style. Unicode styles fall back to ascii when
    /// the locale cannot display them.
    #[serde(default)]
    pub table_style: Option<TableStyle>,
    /// Pager program override (default search: $PAGER, then less, then more).
    #[serde(default)]
    pub pager: Option<String>,
    /// Extra directories searched for the SDK libraries, before $G2_SDK_PATH.
    #[serde(default)]
    pub sdk_lib_dirs: Vec<PathBuf>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("g2x")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<G2xConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = G2xConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: G2xConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_overrides() {
        let cfg = G2xConfig::default();
        assert!(cfg.table_style.is_none());
        assert!(cfg.pager.is_none());
        assert!(cfg.sdk_lib_dirs.is_empty());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = G2xConfig {
            table_style: Some(TableStyle::Markdown),
            pager: Some("most".to_string()),
            sdk_lib_dirs: vec![PathBuf::from("/opt/custom/lib")],
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: G2xConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.table_style, cfg.table_style);
        assert_eq!(parsed.pager, cfg.pager);
        assert_eq!(parsed.sdk_lib_dirs, cfg.sdk_lib_dirs);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            table_style = "unicode-condensed"
            pager = "less"
            sdk_lib_dirs = ["/srv/g2/lib"]
        "#;
        let cfg: G2xConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.table_style, Some(TableStyle::UnicodeCondensed));
        assert_eq!(cfg.pager.as_deref(), Some("less"));
        assert_eq!(cfg.sdk_lib_dirs, vec![PathBuf::from("/srv/g2/lib")]);
    }

    #[test]
    fn config_toml_empty_file_uses_defaults() {
        let cfg: G2xConfig = toml::from_str("").unwrap();
        assert!(cfg.table_style.is_none());
        assert!(cfg.pager.is_none());
        assert!(cfg.sdk_lib_dirs.is_empty());
    }
}
