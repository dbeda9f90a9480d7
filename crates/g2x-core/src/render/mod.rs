//! Table rendering: comfy-table construction, border styles, pager output.

mod pager;
mod style;

pub use pager::{find_pager, Pager};
pub use style::{unicode_locale, TableStyle};

use comfy_table::{ContentArrangement, Table};

/// Renderer bundle resolved at startup; immutable afterward.
#[derive(Debug)]
pub struct TableRenderer {
    pager: Pager,
    style: TableStyle,
    style_presets_available: bool,
}

impl TableRenderer {
    /// A requested style that needs Unicode is only honored when the locale
    /// refinement succeeded; otherwise rendering degrades to ASCII borders.
    pub fn new(pager: Pager, requested: Option<TableStyle>, unicode_ok: bool) -> Self {
        let requested = requested.unwrap_or_default();
        let style = if requested.needs_unicode() && !unicode_ok {
            TableStyle::Ascii
        } else {
            requested
        };
        Self {
            pager,
            style,
            style_presets_available: unicode_ok,
        }
    }

    pub fn style(&self) -> TableStyle {
        self.style
    }

    /// Whether the extended (Unicode) border presets are usable.
    pub fn style_presets_available(&self) -> bool {
        self.style_presets_available
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Render one table with the active border preset.
    pub fn render(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table
            .load_preset(self.style.preset())
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(headers.to_vec());
        for row in rows {
            table.add_row(row.clone());
        }
        table.to_string()
    }

    /// Render and pipe through the pager.
    pub fn page(&self, text: &str) -> anyhow::Result<()> {
        self.pager.page(text)
    }
}
