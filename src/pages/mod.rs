//! Pages and the view cursor.
//!
//! Every page exposes the same three capabilities: it is told when it
//! becomes the active page (`set_selected`), when it stops being the
//! active page (`set_idle`), and it can re-render itself from cached
//! state (`render`). The trait replaces the duck-typing a dynamic UI
//! would get away with; here the contract is checked at compile time.

use async_trait::async_trait;

use crate::alerts::AlertQueue;
use crate::authority::Authority;
use crate::error::Result;
use crate::render::RenderSurface;
use crate::topo::TopologyCache;

mod actions;
mod dashboard;
mod terminal;

pub use actions::ActionsPage;
pub use dashboard::Dashboard;
pub use terminal::Terminal;

/// Top-level pages of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPage {
    /// Uninitialized; only valid before the first transition.
    #[default]
    None,
    Dashboard,
    Terminal,
    Actions,
}

/// Sub-views of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Sectors,
    Assets,
    Actions,
    Signals,
}

/// Transient UI cursor. Not persisted; dies with the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub active_page: AppPage,
    pub active_view: DashboardView,
    /// Sector currently drilled into, when the dashboard is in
    /// drill-down mode.
    pub active_sector: Option<String>,
}

/// Everything a page may touch while handling a transition. Borrowed
/// from the console root for the duration of one call; pages hold no
/// references of their own.
pub struct PageContext<'a> {
    pub authority: &'a dyn Authority,
    pub alerts: &'a mut AlertQueue,
    pub cache: &'a mut TopologyCache,
    pub surface: &'a mut dyn RenderSurface,
    pub view: &'a mut ViewState,
}

/// The three capabilities every page must provide.
#[async_trait(?Send)]
pub trait Page {
    /// The page just became active. Typically refreshes the cache and
    /// draws an initial view.
    async fn set_selected(&mut self, cx: &mut PageContext<'_>) -> Result<()>;

    /// The page is about to be navigated away from.
    fn set_idle(&mut self, cx: &mut PageContext<'_>);

    /// Redraw from already-cached state; no fetches.
    fn render(&self, cx: &mut PageContext<'_>) -> Result<()>;
}
