//! The dashboard: topology tables and create/delete flows.
//!
//! The dashboard renders one sub-view at a time (sectors, assets,
//! actions, signals) from the cached topology, and owns the drill-down
//! into a single sector. All mutations go through the cache's
//! dispatcher; the dashboard never edits the mirror, it re-renders from
//! whatever the post-mutation refetch brought back.

use tracing::debug;

use crate::error::{ConsoleError, Result};
use crate::proto::{
    ActionType, ApiOp, ApiSubject, Asset, AssetCud, Header, MappingCud, Sector, Signal,
    SignalTrigger,
};

use super::{DashboardView, Page, PageContext};
use async_trait::async_trait;

/// Dashboard page. Sub-view and drill-down state live in `ViewState`;
/// the page itself is stateless between renders.
#[derive(Debug, Default)]
pub struct Dashboard;

#[async_trait(?Send)]
impl Page for Dashboard {
    async fn set_selected(&mut self, cx: &mut PageContext<'_>) -> Result<()> {
        debug!("dashboard selected");
        cx.view.active_view = DashboardView::Sectors;
        cx.view.active_sector = None;
        // A failed refresh has already posted its alert; an empty or
        // stale mirror still renders.
        let _ = cx.cache.refresh(cx.authority, cx.alerts).await;
        self.render(cx)
    }

    fn set_idle(&mut self, cx: &mut PageContext<'_>) {
        debug!("dashboard idle");
        cx.view.active_sector = None;
    }

    fn render(&self, cx: &mut PageContext<'_>) -> Result<()> {
        cx.surface.clear_content();
        if let Some(sector) = cx.view.active_sector.clone() {
            return self.render_sector(cx, &sector);
        }
        match cx.view.active_view {
            DashboardView::Sectors => self.render_sectors(cx),
            DashboardView::Assets => self.render_assets(cx),
            DashboardView::Actions => self.render_actions(cx),
            DashboardView::Signals => self.render_signals(cx),
        }
        Ok(())
    }
}

impl Dashboard {
    /// Switch sub-views and re-populate from the cache; no refetch.
    pub fn change_view(&self, cx: &mut PageContext<'_>, view: DashboardView) -> Result<()> {
        cx.view.active_view = view;
        cx.view.active_sector = None;
        self.render(cx)
    }

    /// Drill into one sector's asset list.
    pub fn select_sector(&self, cx: &mut PageContext<'_>, name: &str) -> Result<()> {
        if cx.cache.sector(name).is_none() {
            cx.alerts.error(format!("Unknown sector {name}"));
            return Err(ConsoleError::logic(format!("unknown sector {name}")));
        }
        cx.view.active_sector = Some(name.to_string());
        self.render(cx)
    }

    /// Leave drill-down mode and show the sector list again.
    pub fn leave_sector(&self, cx: &mut PageContext<'_>) -> Result<()> {
        cx.view.active_sector = None;
        cx.view.active_view = DashboardView::Sectors;
        self.render(cx)
    }

    // ── Mutations ──────────────────────────────────────────────────

    pub async fn add_sector(
        &self,
        cx: &mut PageContext<'_>,
        name: &str,
        description: &str,
    ) -> Result<()> {
        let sector = Sector {
            header: Header::new(name, description),
            assets: Vec::new(),
        };
        let data = serde_json::to_string(&sector)?;
        cx.cache
            .dispatch(cx.authority, cx.alerts, ApiOp::Add, ApiSubject::Sector, data)
            .await?;
        cx.alerts.info("Sector added");
        self.render(cx)
    }

    pub async fn delete_sector(&self, cx: &mut PageContext<'_>, name: &str) -> Result<()> {
        cx.cache
            .submit(cx.authority, cx.alerts, ApiOp::Del, ApiSubject::Sector, name)
            .await?;
        // Deleting the sector we are drilled into resets the cursor to
        // the sector list. The sector is gone remotely once the write
        // is accepted, so the reset happens before the read-back: a
        // failed refetch must not leave the cursor on a dead sector.
        if cx.view.active_sector.as_deref() == Some(name) {
            cx.view.active_sector = None;
            cx.view.active_view = DashboardView::Sectors;
        }
        cx.cache.refresh(cx.authority, cx.alerts).await?;
        cx.alerts.info("Sector deleted");
        self.render(cx)
    }

    /// Add an asset to the sector currently drilled into.
    pub async fn add_asset(
        &self,
        cx: &mut PageContext<'_>,
        name: &str,
        description: &str,
    ) -> Result<()> {
        let Some(sector) = cx.view.active_sector.clone() else {
            cx.alerts.error("No active sector selected");
            return Err(ConsoleError::logic("asset mutation outside a sector"));
        };
        let data = serde_json::to_string(&AssetCud {
            sector,
            asset: Asset {
                header: Header::new(name, description),
            },
        })?;
        cx.cache
            .dispatch(cx.authority, cx.alerts, ApiOp::Add, ApiSubject::Asset, data)
            .await?;
        cx.alerts.info("Asset added");
        self.render(cx)
    }

    pub async fn delete_asset(&self, cx: &mut PageContext<'_>, name: &str) -> Result<()> {
        let Some(sector) = cx.view.active_sector.clone() else {
            cx.alerts.error("No active sector selected");
            return Err(ConsoleError::logic("asset mutation outside a sector"));
        };
        let data = serde_json::to_string(&AssetCud {
            sector,
            asset: Asset {
                header: Header::new(name, ""),
            },
        })?;
        cx.cache
            .dispatch(cx.authority, cx.alerts, ApiOp::Del, ApiSubject::Asset, data)
            .await?;
        cx.alerts.info("Asset deleted");
        self.render(cx)
    }

    pub async fn add_signal(
        &self,
        cx: &mut PageContext<'_>,
        name: &str,
        description: &str,
        trigger: SignalTrigger,
    ) -> Result<()> {
        let signal = Signal {
            header: Header::new(name, description),
            trigger,
        };
        let data = serde_json::to_string(&signal)?;
        cx.cache
            .dispatch(cx.authority, cx.alerts, ApiOp::Add, ApiSubject::Signal, data)
            .await?;
        cx.alerts.info("Signal added");
        self.render(cx)
    }

    pub async fn delete_signal(&self, cx: &mut PageContext<'_>, name: &str) -> Result<()> {
        cx.cache
            .dispatch(cx.authority, cx.alerts, ApiOp::Del, ApiSubject::Signal, name)
            .await?;
        cx.alerts.info("Signal deleted");
        self.render(cx)
    }

    pub async fn add_action(
        &self,
        cx: &mut PageContext<'_>,
        name: &str,
        description: &str,
        kind: ActionType,
        info: &str,
    ) -> Result<()> {
        let action = crate::proto::Action {
            header: Header::new(name, description),
            kind,
            info: info.to_string(),
        };
        let data = serde_json::to_string(&action)?;
        cx.cache
            .dispatch(cx.authority, cx.alerts, ApiOp::Add, ApiSubject::Action, data)
            .await?;
        cx.alerts.info("Action added");
        self.render(cx)
    }

    pub async fn delete_action(&self, cx: &mut PageContext<'_>, name: &str) -> Result<()> {
        cx.cache
            .dispatch(cx.authority, cx.alerts, ApiOp::Del, ApiSubject::Action, name)
            .await?;
        cx.alerts.info("Action deleted");
        self.render(cx)
    }

    /// Bind a signal to the actions it should drive.
    pub async fn assign_mapping(
        &self,
        cx: &mut PageContext<'_>,
        signal: &str,
        actions: Vec<String>,
    ) -> Result<()> {
        let data = serde_json::to_string(&MappingCud {
            signal: signal.to_string(),
            actions,
        })?;
        cx.cache
            .dispatch(cx.authority, cx.alerts, ApiOp::Add, ApiSubject::Mapping, data)
            .await?;
        cx.alerts.info("Mapping updated");
        self.render(cx)
    }

    pub async fn clear_mapping(&self, cx: &mut PageContext<'_>, signal: &str) -> Result<()> {
        cx.cache
            .dispatch(cx.authority, cx.alerts, ApiOp::Del, ApiSubject::Mapping, signal)
            .await?;
        cx.alerts.info("Mapping cleared");
        self.render(cx)
    }

    // ── Sub-view tables ────────────────────────────────────────────

    fn render_sectors(&self, cx: &mut PageContext<'_>) {
        let rows: Vec<Vec<String>> = cx
            .cache
            .topology()
            .sectors
            .iter()
            .map(|sector| {
                vec![
                    sector.header.name.clone(),
                    sector.assets.len().to_string(),
                    sector.header.description.clone(),
                ]
            })
            .collect();
        cx.surface
            .show_table("sectors", &["Sector Name", "Assets", "Description"], &rows);
    }

    fn render_sector(&self, cx: &mut PageContext<'_>, name: &str) -> Result<()> {
        let Some(sector) = cx.cache.sector(name) else {
            // The sector vanished under us (deleted elsewhere); fall
            // back to the list.
            cx.view.active_sector = None;
            cx.view.active_view = DashboardView::Sectors;
            self.render_sectors(cx);
            return Ok(());
        };
        let rows: Vec<Vec<String>> = sector
            .assets
            .iter()
            .map(|asset| {
                vec![
                    asset.header.name.clone(),
                    asset.header.description.clone(),
                ]
            })
            .collect();
        cx.surface
            .show_table(name, &["Asset Name", "Description"], &rows);
        Ok(())
    }

    fn render_assets(&self, cx: &mut PageContext<'_>) {
        let rows: Vec<Vec<String>> = cx
            .cache
            .topology()
            .sectors
            .iter()
            .flat_map(|sector| sector.assets.iter())
            .map(|asset| {
                vec![
                    asset.header.name.clone(),
                    asset.header.description.clone(),
                ]
            })
            .collect();
        cx.surface
            .show_table("assets", &["Asset Name", "Description"], &rows);
    }

    fn render_actions(&self, cx: &mut PageContext<'_>) {
        let rows: Vec<Vec<String>> = cx
            .cache
            .topology()
            .actions
            .iter()
            .map(|action| {
                let assigned = cx
                    .cache
                    .assigned_signal(&action.header.name)
                    .unwrap_or("-")
                    .to_string();
                vec![
                    action.header.name.clone(),
                    assigned,
                    action.header.description.clone(),
                ]
            })
            .collect();
        cx.surface.show_table(
            "actions",
            &["Action Name", "Assigned", "Description"],
            &rows,
        );
    }

    fn render_signals(&self, cx: &mut PageContext<'_>) {
        let rows: Vec<Vec<String>> = cx
            .cache
            .topology()
            .signals
            .iter()
            .map(|signal| {
                let in_use = if cx.cache.signal_in_use(&signal.header.name) {
                    "yes"
                } else {
                    "no"
                };
                vec![
                    signal.header.name.clone(),
                    in_use.to_string(),
                    signal.header.description.clone(),
                ]
            })
            .collect();
        cx.surface.show_table(
            "signals",
            &["Signal Name", "In-Use", "Description"],
            &rows,
        );
    }
}
