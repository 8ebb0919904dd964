//! The render surface boundary.
//!
//! The core never builds HTML. Everything user-visible goes through this
//! trait as structured calls, and the embedder decides what a table or
//! an alert tile looks like. `NullSurface` is for headless embedders and
//! tests that only care about state.

use crate::alerts::AlertLevel;

/// External collaborator the console writes its output into.
///
/// Implementations must treat every call as idempotent display work;
/// the console re-clears and re-renders regions rather than patching
/// them.
pub trait RenderSurface {
    /// Wipe the alert region ahead of a redraw cycle.
    fn clear_alerts(&mut self);

    /// Show one alert tile. Called newest-first within a cycle.
    fn show_alert(&mut self, level: AlertLevel, message: &str);

    /// Show the logged-in user and platform version in the banner.
    fn show_identity(&mut self, user: &str, version: &str);

    /// Wipe the main content region ahead of a page or view change.
    fn clear_content(&mut self);

    /// Render a titled table into the content region.
    fn show_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]);
}

/// Surface that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn clear_alerts(&mut self) {}
    fn show_alert(&mut self, _level: AlertLevel, _message: &str) {}
    fn show_identity(&mut self, _user: &str, _version: &str) {}
    fn clear_content(&mut self) {}
    fn show_table(&mut self, _title: &str, _headers: &[&str], _rows: &[Vec<String>]) {}
}
