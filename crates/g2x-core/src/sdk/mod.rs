//! Native entity-resolution SDK: discovery of an installed layout and
//! process-lifetime bindings to its components.
//!
//! The SDK ships in one of two layouts. The modern layout is a single shared
//! library exposing every component's entry points; the legacy layout has one
//! shared library per component. Discovery probes modern first and never
//! touches legacy when modern resolves. Loading happens once, after
//! discovery, and the resulting [`SdkBindings`] bundle is identical either
//! way.

mod bindings;
mod discover;
mod error;

pub use bindings::{Component, SdkBindings};
pub use discover::{
    discover, library_file_name, search_paths, SdkInstall, SdkLayout, MODERN_STEM,
};
pub use error::SdkError;

/// One SDK component: the library stem it lives in under the legacy layout,
/// the prefix its C entry points carry, and the entry points that must
/// resolve at load time.
pub(crate) struct ComponentDef {
    pub stem: &'static str,
    pub prefix: &'static str,
    pub required: &'static [&'static str],
}

/// Component set of the SDK, in a fixed order shared by discovery and
/// loading. The engine's entry points carry the bare `G2` prefix.
pub(crate) const COMPONENTS: [ComponentDef; 5] = [
    ComponentDef {
        stem: "G2Engine",
        prefix: "G2",
        required: &["init", "destroy"],
    },
    ComponentDef {
        stem: "G2ConfigMgr",
        prefix: "G2ConfigMgr",
        required: &["init", "destroy", "getDefaultConfigID"],
    },
    ComponentDef {
        stem: "G2Diagnostic",
        prefix: "G2Diagnostic",
        required: &["init", "destroy"],
    },
    ComponentDef {
        stem: "G2Product",
        prefix: "G2Product",
        required: &["version"],
    },
    ComponentDef {
        stem: "G2Database",
        prefix: "G2Database",
        required: &[],
    },
];
