//! Topology cache and mutation dispatcher.
//!
//! The cache is a read-through mirror of the authority's topology tree:
//! it is replaced wholesale on every refetch and never patched locally.
//! Mutations go out through a uniform envelope; a successful mutation
//! always triggers a full refetch, so consistency comes from
//! read-after-write rather than speculative local application. Failures
//! leave the cache at its last successfully refreshed state and report
//! through the notification queue.

use tracing::{debug, warn};

use crate::alerts::AlertQueue;
use crate::authority::Authority;
use crate::error::Result;
use crate::proto::{ApiOp, ApiSubject, Asset, Envelope, Sector, Topology};

/// Client-side mirror of the authority's configuration tree.
#[derive(Debug, Default)]
pub struct TopologyCache {
    topo: Topology,
}

impl TopologyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last successfully refreshed topology. Empty until the first
    /// refresh completes.
    pub fn topology(&self) -> &Topology {
        &self.topo
    }

    /// Refetch the full tree and replace the mirror atomically. On
    /// failure the previous mirror stays in place and an error alert is
    /// posted.
    pub async fn refresh(
        &mut self,
        authority: &dyn Authority,
        alerts: &mut AlertQueue,
    ) -> Result<()> {
        match authority.fetch_topology().await {
            Ok(topo) => {
                self.topo = topo;
                debug!(
                    sectors = self.topo.sectors.len(),
                    signals = self.topo.signals.len(),
                    actions = self.topo.actions.len(),
                    "topology mirror updated"
                );
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "topology refresh failed");
                alerts.error("Failed to retrieve topology");
                Err(err)
            }
        }
    }

    /// Post one mutation envelope and, on acceptance, refetch
    /// unconditionally. The mutation is never applied locally. On
    /// failure an error alert names the attempted operation and subject
    /// and the mirror is left untouched.
    pub async fn dispatch(
        &mut self,
        authority: &dyn Authority,
        alerts: &mut AlertQueue,
        op: ApiOp,
        subject: ApiSubject,
        data: impl Into<String>,
    ) -> Result<()> {
        self.submit(authority, alerts, op, subject, data).await?;
        self.refresh(authority, alerts).await
    }

    /// Post one mutation envelope without the follow-up refetch. Ok
    /// means the authority accepted the write; the mirror is stale
    /// until the next `refresh`. Callers that need state changes
    /// between acceptance and read-back use this directly.
    pub async fn submit(
        &mut self,
        authority: &dyn Authority,
        alerts: &mut AlertQueue,
        op: ApiOp,
        subject: ApiSubject,
        data: impl Into<String>,
    ) -> Result<()> {
        let envelope = Envelope::new(op, subject, data);
        match authority.mutate(&envelope).await {
            Ok(()) => {
                debug!(op = op.verb(), subject = subject.noun(), "mutation accepted");
                Ok(())
            }
            Err(err) => {
                warn!(
                    error = %err,
                    op = op.verb(),
                    subject = subject.noun(),
                    "mutation rejected"
                );
                alerts.error(format!("Failed to {} {}", op.verb(), subject.noun()));
                Err(err)
            }
        }
    }

    // ── Name-keyed lookups over the mirror ─────────────────────────

    pub fn sector(&self, name: &str) -> Option<&Sector> {
        self.topo
            .sectors
            .iter()
            .find(|sector| sector.header.name == name)
    }

    pub fn asset_in_sector(&self, sector: &str, asset: &str) -> Option<&Asset> {
        self.sector(sector)?
            .assets
            .iter()
            .find(|a| a.header.name == asset)
    }

    /// A signal is in use when the signal map binds at least one action
    /// to it.
    pub fn signal_in_use(&self, signal: &str) -> bool {
        self.topo
            .signal_map
            .get(signal)
            .is_some_and(|actions| !actions.is_empty())
    }

    /// The signal an action is bound to, if any.
    pub fn assigned_signal(&self, action: &str) -> Option<&str> {
        self.topo
            .signal_map
            .iter()
            .find(|(_, actions)| actions.iter().any(|a| a == action))
            .map(|(signal, _)| signal.as_str())
    }
}
