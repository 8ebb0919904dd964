//! The actions page.
//!
//! Shows the action files stored on the authority next to the actions
//! defined in the topology. The file list is the one piece of state
//! fetched outside the topology mirror; it is refetched each time the
//! page is selected.

use tracing::{debug, warn};

use crate::error::Result;

use super::{Page, PageContext};
use async_trait::async_trait;

#[derive(Debug, Default)]
pub struct ActionsPage {
    files: Vec<String>,
}

#[async_trait(?Send)]
impl Page for ActionsPage {
    async fn set_selected(&mut self, cx: &mut PageContext<'_>) -> Result<()> {
        debug!("actions page selected");
        let _ = cx.cache.refresh(cx.authority, cx.alerts).await;
        match cx.authority.action_files().await {
            Ok(files) => self.files = files,
            Err(err) => {
                warn!(error = %err, "action file list fetch failed");
                cx.alerts.error("Failed to retrieve action files");
            }
        }
        self.render(cx)
    }

    fn set_idle(&mut self, _cx: &mut PageContext<'_>) {
        debug!("actions page idle");
    }

    fn render(&self, cx: &mut PageContext<'_>) -> Result<()> {
        cx.surface.clear_content();

        let file_rows: Vec<Vec<String>> =
            self.files.iter().map(|f| vec![f.clone()]).collect();
        cx.surface
            .show_table("action files", &["File"], &file_rows);

        let action_rows: Vec<Vec<String>> = cx
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
            &action_rows,
        );
        Ok(())
    }
}

impl ActionsPage {
    /// File names from the last successful fetch.
    pub fn files(&self) -> &[String] {
        &self.files
    }
}
