//! StyleRegistry: the shared identifier → style sheet table.
//!
//! Insertion is idempotent per identifier and removal is explicit. There is
//! no reference counting: when several animators share an identifier, only
//! the one that injected the sheet can remove it, and callers coordinate
//! teardown themselves.

use super::sheet::{FadeRule, StyleOwner, StyleSheet};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Cloneable handle to a shared style table.
///
/// Clones refer to the same table. [`StyleRegistry::global`] is the
/// process-wide instance; [`StyleRegistry::new`] creates an isolated one.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    sheets: Arc<Mutex<Vec<Arc<StyleSheet>>>>,
}

impl StyleRegistry {
    /// Create an empty, isolated registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<StyleRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<StyleSheet>>> {
        self.sheets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a sheet is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.lock().iter().any(|sheet| sheet.id() == id)
    }

    /// Register `sheet` unless its identifier is taken.
    ///
    /// Returns `true` if the sheet was inserted.
    pub fn insert_if_absent(&self, sheet: StyleSheet) -> bool {
        let mut sheets = self.lock();
        if sheets.iter().any(|existing| existing.id() == sheet.id()) {
            return false;
        }
        sheets.push(Arc::new(sheet));
        true
    }

    /// Look up a sheet.
    pub fn get(&self, id: &str) -> Option<Arc<StyleSheet>> {
        self.lock().iter().find(|sheet| sheet.id() == id).cloned()
    }

    /// Remove the sheet under `id` if `owner` injected it.
    ///
    /// Returns `true` if a sheet was removed.
    pub fn remove_owned(&self, id: &str, owner: StyleOwner) -> bool {
        let mut sheets = self.lock();
        let before = sheets.len();
        sheets.retain(|sheet| !(sheet.id() == id && sheet.owner() == owner));
        sheets.len() != before
    }

    /// Remove the sheet under `id` regardless of owner.
    pub fn remove(&self, id: &str) -> Option<Arc<StyleSheet>> {
        let mut sheets = self.lock();
        let index = sheets.iter().position(|sheet| sheet.id() == id)?;
        Some(sheets.remove(index))
    }

    /// Number of registered sheets.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no sheets are registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Fade rules in cascade order (later sheets win).
    pub fn fade_rules(&self) -> Vec<FadeRule> {
        self.lock().iter().map(|sheet| sheet.rule().clone()).collect()
    }

    /// Concatenated CSS of every sheet, in registration order.
    pub fn css(&self) -> String {
        self.lock()
            .iter()
            .map(|sheet| sheet.css())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
