//! Explicit backend registration and selection.
//!
//! The application owns a [`BackendRegistry`], probes each backend it can
//! offer once, and selects from what registered.

use crate::backend::RenderBackend;
use crate::{BackendType, RenderError, RenderResult};

/// Backends that passed their capability probe, in registration order.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    available: Vec<BackendType>,
}

impl BackendRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe `backend` and register it if the probe succeeds.
    ///
    /// A backend type is probed at most once; later calls return the first
    /// result for registered types without probing again.
    pub fn register<B: RenderBackend>(&mut self, backend: &B) -> bool {
        let kind = backend.backend_type();
        if self.is_available(kind) {
            return true;
        }
        if backend.probe() {
            tracing::debug!("Registered {:?} backend", kind);
            self.available.push(kind);
            true
        } else {
            tracing::warn!("{:?} backend failed its capability probe; not registered", kind);
            false
        }
    }

    /// Whether `kind` registered.
    #[must_use]
    pub fn is_available(&self, kind: BackendType) -> bool {
        self.available.contains(&kind)
    }

    /// Registered backends in registration order.
    #[must_use]
    pub fn available(&self) -> &[BackendType] {
        &self.available
    }

    /// Pick `preferred` if registered, otherwise the first registered backend.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoBackend`] if nothing registered.
    pub fn select(&self, preferred: BackendType) -> RenderResult<BackendType> {
        if self.is_available(preferred) {
            return Ok(preferred);
        }
        match self.available.first() {
            Some(&fallback) => {
                tracing::warn!("{:?} unavailable, falling back to {:?}", preferred, fallback);
                Ok(fallback)
            }
            None => Err(RenderError::NoBackend(format!(
                "no backend registered (wanted {preferred:?})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::RecordingBackend;

    #[test]
    fn failed_probe_does_not_register() {
        let mut registry = BackendRegistry::new();
        assert!(!registry.register(&RecordingBackend::unavailable()));
        assert!(registry.available().is_empty());
        assert!(matches!(
            registry.select(BackendType::Recording),
            Err(RenderError::NoBackend(_))
        ));
    }

    #[test]
    fn registers_once() {
        let mut registry = BackendRegistry::new();
        assert!(registry.register(&RecordingBackend::new()));
        assert!(registry.register(&RecordingBackend::new()));
        assert_eq!(registry.available(), &[BackendType::Recording]);
    }

    #[test]
    fn select_falls_back_to_first_registered() {
        let mut registry = BackendRegistry::new();
        registry.register(&RecordingBackend::new());
        assert_eq!(
            registry.select(BackendType::Canvas2D).expect("fallback"),
            BackendType::Recording
        );
        assert_eq!(
            registry.select(BackendType::Recording).expect("preferred"),
            BackendType::Recording
        );
    }
}
