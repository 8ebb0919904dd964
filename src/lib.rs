//! Client-side state and synchronization core for the AMP automation
//! console.
//!
//! The platform organizes the world into sectors, assets, signals, and
//! actions; this crate keeps a browser-session-scoped mirror of that
//! topology and keeps it honest:
//!
//! - [`session::SessionGuard`] gates every page transition against the
//!   remote authority and rejects any session whose identity drifts
//!   from its bootstrapped values.
//! - [`alerts::AlertQueue`] shows and expires user-facing notifications
//!   on a fixed display cycle, with at most one redraw driver alive.
//! - [`topo::TopologyCache`] mirrors the authority's configuration tree
//!   and pushes create/delete mutations through a uniform envelope,
//!   reconciling by full refetch after every write.
//! - [`app::Console`] is the page/view state machine orchestrating the
//!   three, with all output going through a [`render::RenderSurface`].
//!
//! Nothing here renders HTML, persists state, or navigates; those are
//! the embedder's concerns.

pub mod alerts;
pub mod app;
pub mod authority;
pub mod config;
pub mod error;
pub mod pages;
pub mod proto;
pub mod render;
pub mod session;
pub mod topo;

pub use alerts::{Alert, AlertLevel, AlertQueue, CyclePolicy, QueueState};
pub use app::{Console, NavTarget};
pub use authority::{Authority, HttpAuthority};
pub use config::ConsoleConfig;
pub use error::{ConsoleError, Result};
pub use pages::{AppPage, DashboardView, ViewState};
pub use proto::{
    ActionType, ApiOp, ApiSubject, Envelope, Header, SessionStatus, SignalTrigger, Topology,
};
pub use render::{NullSurface, RenderSurface};
pub use session::SessionGuard;
pub use topo::TopologyCache;
