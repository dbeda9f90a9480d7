//! Table border styles and the locale refinement that gates the Unicode ones.

use comfy_table::presets;
use serde::{Deserialize, Serialize};

/// Border style applied to rendered tables.
///
/// The Unicode variants draw box characters and are only honored when the
/// locale can display them; see [`unicode_locale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableStyle {
    #[default]
    Unicode,
    UnicodeCondensed,
    Markdown,
    Ascii,
}

impl TableStyle {
    /// The comfy-table preset string for this style.
    pub fn preset(self) -> &'static str {
        match self {
            TableStyle::Unicode => presets::UTF8_FULL,
            TableStyle::UnicodeCondensed => presets::UTF8_FULL_CONDENSED,
            TableStyle::Markdown => presets::ASCII_MARKDOWN,
            TableStyle::Ascii => presets::ASCII_FULL,
        }
    }

    /// Whether this style draws with Unicode box characters.
    pub fn needs_unicode(self) -> bool {
        matches!(self, TableStyle::Unicode | TableStyle::UnicodeCondensed)
    }

    pub fn name(self) -> &'static str {
        match self {
            TableStyle::Unicode => "unicode",
            TableStyle::UnicodeCondensed => "unicode-condensed",
            TableStyle::Markdown => "markdown",
            TableStyle::Ascii => "ascii",
        }
    }
}

/// Best-effort check that the locale can display Unicode box drawing.
///
/// Follows the usual precedence: `LC_ALL` overrides `LC_CTYPE` overrides
/// `LANG`. An unset locale is treated as not Unicode-capable.
pub fn unicode_locale(
    lc_all: Option<&str>,
    lc_ctype: Option<&str>,
    lang: Option<&str>,
) -> bool {
    let effective = lc_all
        .filter(|s| !s.is_empty())
        .or_else(|| lc_ctype.filter(|s| !s.is_empty()))
        .or_else(|| lang.filter(|s| !s.is_empty()));
    match effective {
        Some(locale) => {
            let lower = locale.to_ascii_lowercase();
            lower.contains("utf-8") || lower.contains("utf8")
        }
        None => false,
    }
}
