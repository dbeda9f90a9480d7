//! Loaded SDK bindings: one handle per component, bound once at startup and
//! held for the life of the process.
//!
//! Symbol presence is verified when the libraries are loaded; the individual
//! call wrappers re-resolve their entry point on use, which keeps the handle
//! types free of self-referential lifetimes.

use std::ffi::{c_char, c_longlong, CStr, CString};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::{Library, Symbol};

use super::discover::{SdkInstall, SdkLayout};
use super::{SdkError, COMPONENTS};

type InitFn = unsafe extern "C" fn(*const c_char, *const c_char, c_longlong) -> c_longlong;
type DestroyFn = unsafe extern "C" fn() -> c_longlong;
type VersionFn = unsafe extern "C" fn() -> *const c_char;
type ConfigIdFn = unsafe extern "C" fn(*mut c_longlong) -> c_longlong;

/// One component's handle: the library it lives in and its entry-point
/// prefix (`G2` for the engine, `G2ConfigMgr` for the config manager, ...).
pub struct Component {
    library: Arc<Library>,
    path: PathBuf,
    prefix: &'static str,
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("path", &self.path)
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl Component {
    fn api_name(&self, entry: &str) -> String {
        format!("{}_{entry}", self.prefix)
    }

    fn get<T>(&self, entry: &str) -> Result<Symbol<'_, T>, SdkError> {
        let symbol = self.api_name(entry);
        let mut bytes = symbol.clone().into_bytes();
        bytes.push(0);
        unsafe { self.library.get(&bytes) }.map_err(|_| SdkError::MissingSymbol {
            path: self.path.clone(),
            symbol,
        })
    }

    fn c_string(&self, api: &str, value: &str) -> Result<CString, SdkError> {
        CString::new(value).map_err(|_| SdkError::Argument {
            api: api.to_string(),
            reason: "embedded NUL byte".to_string(),
        })
    }

    /// Initialize the component with a module name and the engine settings
    /// JSON document.
    pub fn init(&self, module_name: &str, settings_json: &str, verbose: bool) -> Result<(), SdkError> {
        let api = self.api_name("init");
        let entry: Symbol<'_, InitFn> = self.get("init")?;
        let module_name = self.c_string(&api, module_name)?;
        let settings = self.c_string(&api, settings_json)?;
        let code = unsafe { entry(module_name.as_ptr(), settings.as_ptr(), verbose as c_longlong) };
        if code != 0 {
            return Err(SdkError::Call { api, code });
        }
        Ok(())
    }

    /// Release the component. Safe to call once per component.
    pub fn destroy(&self) -> Result<(), SdkError> {
        let api = self.api_name("destroy");
        let entry: Symbol<'_, DestroyFn> = self.get("destroy")?;
        let code = unsafe { entry() };
        if code != 0 {
            return Err(SdkError::Call { api, code });
        }
        Ok(())
    }

    /// Version document (JSON) from the product component.
    pub fn version_json(&self) -> Result<String, SdkError> {
        let api = self.api_name("version");
        let entry: Symbol<'_, VersionFn> = self.get("version")?;
        let raw = unsafe { entry() };
        if raw.is_null() {
            return Err(SdkError::Empty { api });
        }
        Ok(unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned())
    }

    /// Identifier of the repository's default configuration.
    pub fn default_config_id(&self) -> Result<i64, SdkError> {
        let api = self.api_name("getDefaultConfigID");
        let entry: Symbol<'_, ConfigIdFn> = self.get("getDefaultConfigID")?;
        let mut id: c_longlong = 0;
        let code = unsafe { entry(&mut id) };
        if code != 0 {
            return Err(SdkError::Call { api, code });
        }
        Ok(id)
    }
}

/// The capability bundle the explorer holds after startup.
#[derive(Debug)]
pub struct SdkBindings {
    pub engine: Component,
    pub config_manager: Component,
    pub diagnostic: Component,
    pub product: Component,
    pub database: Component,
}

impl SdkInstall {
    /// Load the discovered libraries and verify that every component's
    /// required entry points resolve.
    pub fn load(&self) -> Result<SdkBindings, SdkError> {
        let mut components = Vec::with_capacity(COMPONENTS.len());
        match self.layout {
            SdkLayout::Modern => {
                let path = self.libraries.first().cloned().unwrap_or_default();
                let library = Arc::new(open_library(&path)?);
                for def in &COMPONENTS {
                    components.push(Component {
                        library: Arc::clone(&library),
                        path: path.clone(),
                        prefix: def.prefix,
                    });
                }
            }
            SdkLayout::Legacy => {
                for (def, path) in COMPONENTS.iter().zip(&self.libraries) {
                    let library = Arc::new(open_library(path)?);
                    components.push(Component {
                        library,
                        path: path.clone(),
                        prefix: def.prefix,
                    });
                }
            }
        }

        for (def, component) in COMPONENTS.iter().zip(&components) {
            for &entry in def.required {
                // Type is irrelevant here; only presence is checked.
                component.get::<InitFn>(entry)?;
            }
        }

        let mut components = components.into_iter();
        let mut next = || {
            components.next().ok_or_else(|| SdkError::Empty {
                api: "component set".to_string(),
            })
        };
        Ok(SdkBindings {
            engine: next()?,
            config_manager: next()?,
            diagnostic: next()?,
            product: next()?,
            database: next()?,
        })
    }
}

fn open_library(path: &Path) -> Result<Library, SdkError> {
    tracing::debug!("loading SDK library {}", path.display());
    unsafe { Library::new(path) }.map_err(|source| SdkError::Load {
        path: path.to_path_buf(),
        source,
    })
}
