//! Document: named surfaces plus the style registry they are styled by.

use super::surface::SurfaceHandle;
use crate::config::TargetRef;
use crate::error::AnimatorError;
use crate::style::StyleRegistry;
use std::collections::HashMap;

/// The space animators resolve targets in and inject styles into.
///
/// Surface identifiers and style identifiers share one namespace, the way
/// element ids do in a web page.
#[derive(Debug, Clone, Default)]
pub struct Document {
    surfaces: HashMap<String, SurfaceHandle>,
    registry: StyleRegistry,
}

impl Document {
    /// Create a document with its own isolated style registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document that injects styles into `registry`.
    ///
    /// Pass [`StyleRegistry::global`] to share styles process-wide.
    pub fn with_registry(registry: StyleRegistry) -> Self {
        Self {
            surfaces: HashMap::new(),
            registry,
        }
    }

    /// The style registry.
    pub const fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Create and register a new empty surface, replacing any previous one
    /// under `id`.
    pub fn create_surface(&mut self, id: impl Into<String>) -> SurfaceHandle {
        let handle = SurfaceHandle::new();
        self.surfaces.insert(id.into(), handle.clone());
        handle
    }

    /// Register an existing surface under `id`.
    pub fn insert_surface(&mut self, id: impl Into<String>, handle: SurfaceHandle) {
        self.surfaces.insert(id.into(), handle);
    }

    /// Remove a surface from the document. Existing handles keep working.
    pub fn remove_surface(&mut self, id: &str) -> Option<SurfaceHandle> {
        self.surfaces.remove(id)
    }

    /// Look up a surface by id.
    pub fn surface(&self, id: &str) -> Option<SurfaceHandle> {
        self.surfaces.get(id).cloned()
    }

    /// Whether any surface or style sheet uses `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.surfaces.contains_key(id) || self.registry.contains(id)
    }

    /// Resolve a target reference to a surface.
    pub fn resolve(&self, target: &TargetRef) -> Result<SurfaceHandle, AnimatorError> {
        match target {
            TargetRef::Handle(handle) => Ok(handle.clone()),
            TargetRef::Id(id) => self.surface(id).ok_or_else(|| AnimatorError::TargetNotFound {
                target: id.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_id() {
        let mut document = Document::new();
        let surface = document.create_surface("output");
        let resolved = document.resolve(&TargetRef::id("output"));
        assert!(resolved.is_ok_and(|handle| handle.same_surface(&surface)));
    }

    #[test]
    fn test_resolve_missing_id() {
        let document = Document::new();
        let err = document.resolve(&TargetRef::id("nope")).unwrap_err();
        assert_eq!(
            err,
            AnimatorError::TargetNotFound {
                target: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_handle_needs_no_registration() {
        let document = Document::new();
        let handle = SurfaceHandle::new();
        let resolved = document.resolve(&TargetRef::Handle(handle.clone()));
        assert!(resolved.is_ok_and(|h| h.same_surface(&handle)));
    }

    #[test]
    fn test_contains_id_covers_surfaces() {
        let mut document = Document::new();
        assert!(!document.contains_id("main"));
        document.create_surface("main");
        assert!(document.contains_id("main"));
        assert!(document.remove_surface("main").is_some());
        assert!(!document.contains_id("main"));
    }

    #[test]
    fn test_insert_existing_surface() {
        let mut document = Document::new();
        let handle = SurfaceHandle::new();
        document.insert_surface("log", handle.clone());

        let resolved = document.resolve(&TargetRef::id("log"));
        assert!(resolved.is_ok_and(|h| h.same_surface(&handle)));
        assert!(document.contains_id("log"));
    }
}
