//! The console root.
//!
//! `Console` owns every component: the session guard, the alert queue,
//! the topology cache, the pages, the view cursor, and the handles to
//! the two external collaborators (remote authority, render surface).
//! There are no globals; everything is injected at construction and
//! borrowed down into pages for the duration of one call.
//!
//! All work runs on one logical timeline. Authority calls are awaited
//! to completion before the caller proceeds, so state read immediately
//! after an await is the post-call state, and no two mutations can be
//! in flight at once.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::alerts::{AlertQueue, QueueState};
use crate::authority::Authority;
use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};
use crate::pages::{
    ActionsPage, AppPage, Dashboard, DashboardView, Page, PageContext, Terminal, ViewState,
};
use crate::proto::{ActionType, SignalTrigger, Topology};
use crate::render::RenderSurface;
use crate::session::SessionGuard;
use crate::topo::TopologyCache;

/// Where the embedder should navigate after `quit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// Session was valid; go through the logout flow.
    Logout,
    /// Session was already dead; straight to the landing page.
    Home,
}

/// Builds one `PageContext` from the console's fields. Field borrows
/// must stay disjoint from the page being called, so this cannot be a
/// method.
macro_rules! page_cx {
    ($self:ident) => {
        PageContext {
            authority: $self.authority.as_ref(),
            alerts: &mut $self.alerts,
            cache: &mut $self.cache,
            surface: $self.surface.as_mut(),
            view: &mut $self.view,
        }
    };
}

/// The application controller.
pub struct Console {
    authority: Arc<dyn Authority>,
    surface: Box<dyn RenderSurface>,
    session: SessionGuard,
    alerts: AlertQueue,
    cache: TopologyCache,
    view: ViewState,
    dashboard: Dashboard,
    terminal: Terminal,
    actions: ActionsPage,
}

impl Console {
    pub fn new(
        config: ConsoleConfig,
        authority: Arc<dyn Authority>,
        surface: Box<dyn RenderSurface>,
    ) -> Self {
        Self {
            authority,
            surface,
            session: SessionGuard::new(),
            alerts: AlertQueue::new(config.alerts.clone()),
            cache: TopologyCache::new(),
            view: ViewState::default(),
            dashboard: Dashboard,
            terminal: Terminal,
            actions: ActionsPage::default(),
        }
    }

    /// Validate the session and land on the dashboard. The usual first
    /// call after construction.
    pub async fn boot(&mut self) -> Result<()> {
        self.load_page(AppPage::Dashboard).await
    }

    /// Re-validate the session against the authority. On success the
    /// identity banner is refreshed; on failure the caller is expected
    /// to navigate away.
    pub async fn auth(&mut self) -> Result<()> {
        if self.session.validate(self.authority.as_ref()).await {
            self.surface
                .show_identity(self.session.user(), self.session.version());
            Ok(())
        } else {
            warn!("unauthorized session detected");
            Err(ConsoleError::SessionInvalid)
        }
    }

    /// Transition to `target`. Loading the page that is already active
    /// is a no-op; everything else re-validates the session first and
    /// aborts the transition when it no longer stands.
    pub async fn load_page(&mut self, target: AppPage) -> Result<()> {
        if self.view.active_page == target {
            return Ok(());
        }
        self.force_load_page(target).await
    }

    /// Run the transition even onto the already-active page. Used after
    /// mutations to rebuild the page from fresh cache state.
    pub async fn force_load_page(&mut self, target: AppPage) -> Result<()> {
        if target == AppPage::None {
            return Err(ConsoleError::logic("cannot load the uninitialized page"));
        }

        self.auth().await?;

        let outgoing = self.view.active_page;
        if outgoing != AppPage::None {
            let mut cx = page_cx!(self);
            match outgoing {
                AppPage::Dashboard => self.dashboard.set_idle(&mut cx),
                AppPage::Terminal => self.terminal.set_idle(&mut cx),
                AppPage::Actions => self.actions.set_idle(&mut cx),
                AppPage::None => {}
            }
        }

        debug!(?outgoing, incoming = ?target, "page transition");
        self.view.active_page = target;
        self.surface.clear_content();

        let mut cx = page_cx!(self);
        match target {
            AppPage::Dashboard => self.dashboard.set_selected(&mut cx).await,
            AppPage::Terminal => self.terminal.set_selected(&mut cx).await,
            AppPage::Actions => self.actions.set_selected(&mut cx).await,
            AppPage::None => Err(ConsoleError::logic("cannot load the uninitialized page")),
        }
    }

    /// Switch dashboard sub-views from the cached topology; no refetch.
    pub fn change_view(&mut self, view: DashboardView) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard.change_view(&mut cx, view)
    }

    /// Drill into one sector's assets.
    pub fn select_sector(&mut self, name: &str) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard.select_sector(&mut cx, name)
    }

    /// Back out of sector drill-down to the sector list.
    pub fn leave_sector(&mut self) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard.leave_sector(&mut cx)
    }

    // ── Mutations (dashboard flows) ────────────────────────────────

    pub async fn add_sector(&mut self, name: &str, description: &str) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard.add_sector(&mut cx, name, description).await
    }

    pub async fn delete_sector(&mut self, name: &str) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard.delete_sector(&mut cx, name).await
    }

    pub async fn add_asset(&mut self, name: &str, description: &str) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard.add_asset(&mut cx, name, description).await
    }

    pub async fn delete_asset(&mut self, name: &str) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard.delete_asset(&mut cx, name).await
    }

    pub async fn add_signal(
        &mut self,
        name: &str,
        description: &str,
        trigger: SignalTrigger,
    ) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard
            .add_signal(&mut cx, name, description, trigger)
            .await
    }

    pub async fn delete_signal(&mut self, name: &str) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard.delete_signal(&mut cx, name).await
    }

    pub async fn add_action(
        &mut self,
        name: &str,
        description: &str,
        kind: ActionType,
        info: &str,
    ) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard
            .add_action(&mut cx, name, description, kind, info)
            .await
    }

    pub async fn delete_action(&mut self, name: &str) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard.delete_action(&mut cx, name).await
    }

    pub async fn assign_mapping(&mut self, signal: &str, actions: Vec<String>) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard.assign_mapping(&mut cx, signal, actions).await
    }

    pub async fn clear_mapping(&mut self, signal: &str) -> Result<()> {
        self.require_dashboard()?;
        let mut cx = page_cx!(self);
        self.dashboard.clear_mapping(&mut cx, signal).await
    }

    // ── Alerts ─────────────────────────────────────────────────────

    /// Drive the alert cycle until the queue drains. There is only ever
    /// one of these running: the queue's cycling flag refuses a second
    /// driver and `&mut self` refuses a concurrent one.
    pub async fn pump_alerts(&mut self) {
        while self.alerts.is_cycling() {
            if self.alerts.tick(self.surface.as_mut()) == QueueState::Idle {
                break;
            }
            tokio::time::sleep(self.alerts.interval()).await;
        }
    }

    /// One manual display cycle, for embedders that own the clock.
    pub fn tick_alerts(&mut self) -> QueueState {
        self.alerts.tick(self.surface.as_mut())
    }

    // ── Shutdown ───────────────────────────────────────────────────

    /// Shut the console down and tell the embedder where to navigate.
    pub fn quit(&mut self) -> NavTarget {
        self.alerts.warn("logging out");
        if self.session.is_valid() {
            self.session.quit();
            NavTarget::Logout
        } else {
            NavTarget::Home
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn topology(&self) -> &Topology {
        self.cache.topology()
    }

    pub fn session(&self) -> &SessionGuard {
        &self.session
    }

    pub fn alerts(&self) -> &AlertQueue {
        &self.alerts
    }

    pub fn action_files(&self) -> &[String] {
        self.actions.files()
    }

    fn require_dashboard(&mut self) -> Result<()> {
        if self.view.active_page == AppPage::Dashboard {
            Ok(())
        } else {
            self.alerts.error("Internal error: not on the dashboard");
            Err(ConsoleError::logic("dashboard operation off-dashboard"))
        }
    }
}
