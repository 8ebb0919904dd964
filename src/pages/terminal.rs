//! The terminal page.
//!
//! Passive view: renders a summary of the cached topology and issues no
//! fetches of its own.

use tracing::debug;

use crate::error::Result;

use super::{Page, PageContext};
use async_trait::async_trait;

#[derive(Debug, Default)]
pub struct Terminal;

#[async_trait(?Send)]
impl Page for Terminal {
    async fn set_selected(&mut self, cx: &mut PageContext<'_>) -> Result<()> {
        debug!("terminal selected");
        self.render(cx)
    }

    fn set_idle(&mut self, _cx: &mut PageContext<'_>) {
        debug!("terminal idle");
    }

    fn render(&self, cx: &mut PageContext<'_>) -> Result<()> {
        cx.surface.clear_content();
        let topo = cx.cache.topology();
        let asset_count: usize = topo.sectors.iter().map(|s| s.assets.len()).sum();
        let rows = vec![
            vec!["Sectors".to_string(), topo.sectors.len().to_string()],
            vec!["Assets".to_string(), asset_count.to_string()],
            vec!["Signals".to_string(), topo.signals.len().to_string()],
            vec!["Actions".to_string(), topo.actions.len().to_string()],
        ];
        cx.surface.show_table("terminal", &["Subject", "Count"], &rows);
        Ok(())
    }
}
