//! Ordered capability probes.
//!
//! A capability (pager, SDK install, ...) may be supplied by more than one
//! provider. Probes for one capability run in priority order and resolution
//! short-circuits on the first success; when every probe fails the caller
//! gets the full list of attempts for diagnostics.

use std::fmt;

/// Why a single provider probe failed.
#[derive(Debug, Clone)]
pub struct ProbeError {
    pub reason: String,
}

impl ProbeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for ProbeError {}

/// A named attempt to acquire a capability from one provider.
pub struct CapabilityProbe<'a, T> {
    name: &'static str,
    run: Box<dyn FnOnce() -> Result<T, ProbeError> + 'a>,
}

impl<'a, T> CapabilityProbe<'a, T> {
    pub fn new(name: &'static str, run: impl FnOnce() -> Result<T, ProbeError> + 'a) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Successful resolution: the acquired value and the provider that won.
#[derive(Debug)]
pub struct Resolved<T> {
    pub value: T,
    pub provider: &'static str,
}

/// Every probe for a capability failed.
#[derive(Debug)]
pub struct ExhaustedError {
    pub capability: &'static str,
    /// `(provider, failure)` pairs in the order the probes ran.
    pub attempts: Vec<(&'static str, ProbeError)>,
}

impl fmt::Display for ExhaustedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no provider for {}", self.capability)?;
        for (name, err) in &self.attempts {
            write!(f, "; {name}: {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ExhaustedError {}

/// Run `probes` strictly in order, returning the first success.
///
/// Probes after the winning one are never executed.
pub fn resolve_first<'a, T>(
    capability: &'static str,
    probes: Vec<CapabilityProbe<'a, T>>,
) -> Result<Resolved<T>, ExhaustedError> {
    let mut attempts = Vec::new();
    for probe in probes {
        let name = probe.name;
        match (probe.run)() {
            Ok(value) => {
                tracing::debug!("{capability}: resolved via {name}");
                return Ok(Resolved {
                    value,
                    provider: name,
                });
            }
            Err(err) => {
                tracing::debug!("{capability}: {name} probe failed: {err}");
                attempts.push((name, err));
            }
        }
    }
    Err(ExhaustedError {
        capability,
        attempts,
    })
}
