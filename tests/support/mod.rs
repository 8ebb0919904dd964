//! In-memory doubles for the console's two external collaborators.
//!
//! `ScriptedAuthority` stands in for the remote authority: it applies
//! mutation envelopes to its own topology so dispatch-then-refresh
//! round-trips behave like the real thing, and any endpoint can be made
//! to fail. `RecordingSurface` captures every render call for
//! assertions.

// Not every test crate uses every helper here.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use amp_console::proto::{Action, Asset, AssetCud, MappingCud, Sector, Signal};
use amp_console::{
    AlertLevel, ApiOp, ApiSubject, Authority, ConsoleError, Envelope, RenderSurface, Result,
    SessionStatus, Topology,
};

/// Route the console's tracing output into the test harness. Handy
/// when a flow test fails and the transition log tells the story.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Default)]
struct AuthorityState {
    status: SessionStatus,
    queued_statuses: VecDeque<SessionStatus>,
    topology: Topology,
    files: Vec<String>,
    mutations: Vec<Envelope>,
    session_calls: usize,
    fail_session: bool,
    fail_topology: bool,
    fail_files: bool,
    fail_mutation: bool,
}

/// Scriptable in-memory authority.
#[derive(Default)]
pub struct ScriptedAuthority {
    state: Mutex<AuthorityState>,
}

impl ScriptedAuthority {
    pub fn new() -> Arc<Self> {
        let authority = Arc::new(Self::default());
        authority.set_status(SessionStatus {
            session: "s-1".into(),
            user: "operator".into(),
            version: "1.2.3".into(),
        });
        authority
    }

    pub fn set_status(&self, status: SessionStatus) {
        self.state.lock().unwrap().status = status;
    }

    /// Queue a one-shot status served before the standing one.
    pub fn queue_status(&self, status: SessionStatus) {
        self.state.lock().unwrap().queued_statuses.push_back(status);
    }

    pub fn set_topology(&self, topology: Topology) {
        self.state.lock().unwrap().topology = topology;
    }

    pub fn set_files(&self, files: Vec<String>) {
        self.state.lock().unwrap().files = files;
    }

    pub fn fail_session(&self, fail: bool) {
        self.state.lock().unwrap().fail_session = fail;
    }

    pub fn fail_topology(&self, fail: bool) {
        self.state.lock().unwrap().fail_topology = fail;
    }

    pub fn fail_files(&self, fail: bool) {
        self.state.lock().unwrap().fail_files = fail;
    }

    pub fn fail_mutation(&self, fail: bool) {
        self.state.lock().unwrap().fail_mutation = fail;
    }

    pub fn mutations(&self) -> Vec<Envelope> {
        self.state.lock().unwrap().mutations.clone()
    }

    pub fn session_calls(&self) -> usize {
        self.state.lock().unwrap().session_calls
    }

    fn apply(state: &mut AuthorityState, envelope: &Envelope) -> Result<()> {
        let topo = &mut state.topology;
        match (envelope.op, envelope.subject) {
            (ApiOp::Add, ApiSubject::Sector) => {
                let sector: Sector = serde_json::from_str(&envelope.data)?;
                topo.sectors.push(sector);
            }
            (ApiOp::Del, ApiSubject::Sector) => {
                topo.sectors.retain(|s| s.header.name != envelope.data);
            }
            (ApiOp::Add, ApiSubject::Asset) => {
                let cud: AssetCud = serde_json::from_str(&envelope.data)?;
                let sector = topo
                    .sectors
                    .iter_mut()
                    .find(|s| s.header.name == cud.sector)
                    .ok_or_else(|| ConsoleError::logic("no such sector"))?;
                sector.assets.push(cud.asset);
            }
            (ApiOp::Del, ApiSubject::Asset) => {
                let cud: AssetCud = serde_json::from_str(&envelope.data)?;
                let sector = topo
                    .sectors
                    .iter_mut()
                    .find(|s| s.header.name == cud.sector)
                    .ok_or_else(|| ConsoleError::logic("no such sector"))?;
                sector
                    .assets
                    .retain(|a| a.header.name != cud.asset.header.name);
            }
            (ApiOp::Add, ApiSubject::Signal) => {
                let signal: Signal = serde_json::from_str(&envelope.data)?;
                topo.signals.push(signal);
            }
            (ApiOp::Del, ApiSubject::Signal) => {
                topo.signals.retain(|s| s.header.name != envelope.data);
            }
            (ApiOp::Add, ApiSubject::Action) => {
                let action: Action = serde_json::from_str(&envelope.data)?;
                topo.actions.push(action);
            }
            (ApiOp::Del, ApiSubject::Action) => {
                topo.actions.retain(|a| a.header.name != envelope.data);
            }
            (ApiOp::Add, ApiSubject::Mapping) => {
                let cud: MappingCud = serde_json::from_str(&envelope.data)?;
                topo.signal_map.insert(cud.signal, cud.actions);
            }
            (ApiOp::Del, ApiSubject::Mapping) => {
                topo.signal_map.remove(&envelope.data);
            }
            (_, ApiSubject::Topo) => {
                return Err(ConsoleError::logic("topology is not mutable as a subject"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Authority for ScriptedAuthority {
    async fn session_status(&self) -> Result<SessionStatus> {
        let mut state = self.state.lock().unwrap();
        state.session_calls += 1;
        if state.fail_session {
            return Err(ConsoleError::transport("session endpoint down"));
        }
        if let Some(status) = state.queued_statuses.pop_front() {
            return Ok(status);
        }
        Ok(state.status.clone())
    }

    async fn fetch_topology(&self) -> Result<Topology> {
        let state = self.state.lock().unwrap();
        if state.fail_topology {
            return Err(ConsoleError::transport("topology endpoint down"));
        }
        Ok(state.topology.clone())
    }

    async fn action_files(&self) -> Result<Vec<String>> {
        let state = self.state.lock().unwrap();
        if state.fail_files {
            return Err(ConsoleError::transport("actions endpoint down"));
        }
        Ok(state.files.clone())
    }

    async fn mutate(&self, envelope: &Envelope) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.mutations.push(envelope.clone());
        if state.fail_mutation {
            return Err(ConsoleError::transport("mutation rejected"));
        }
        Self::apply(&mut state, envelope)
    }
}

/// Everything a surface can be asked to do, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    ClearAlerts,
    Alert(AlertLevel, String),
    Identity(String, String),
    ClearContent,
    Table {
        title: String,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Render surface that records every call.
#[derive(Default, Clone)]
pub struct RecordingSurface {
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn reset(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Alerts rendered since the most recent alert-region clear.
    pub fn visible_alerts(&self) -> Vec<(AlertLevel, String)> {
        let events = self.events.lock().unwrap();
        let start = events
            .iter()
            .rposition(|e| *e == SurfaceEvent::ClearAlerts)
            .map(|i| i + 1)
            .unwrap_or(0);
        events[start..]
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Alert(level, message) => Some((*level, message.clone())),
                _ => None,
            })
            .collect()
    }

    /// Tables rendered since the most recent content clear.
    pub fn visible_tables(&self) -> Vec<SurfaceEvent> {
        let events = self.events.lock().unwrap();
        let start = events
            .iter()
            .rposition(|e| *e == SurfaceEvent::ClearContent)
            .map(|i| i + 1)
            .unwrap_or(0);
        events[start..]
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Table { .. }))
            .cloned()
            .collect()
    }

    pub fn count(&self, matcher: impl Fn(&SurfaceEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| matcher(e)).count()
    }
}

impl RenderSurface for RecordingSurface {
    fn clear_alerts(&mut self) {
        self.events.lock().unwrap().push(SurfaceEvent::ClearAlerts);
    }

    fn show_alert(&mut self, level: AlertLevel, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SurfaceEvent::Alert(level, message.to_string()));
    }

    fn show_identity(&mut self, user: &str, version: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SurfaceEvent::Identity(user.to_string(), version.to_string()));
    }

    fn clear_content(&mut self) {
        self.events.lock().unwrap().push(SurfaceEvent::ClearContent);
    }

    fn show_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        self.events.lock().unwrap().push(SurfaceEvent::Table {
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows.to_vec(),
        });
    }
}

/// A small topology with one sector, one asset, a signal, and a bound
/// action.
pub fn seed_topology() -> Topology {
    use amp_console::proto::Header;

    let mut topo = Topology::default();
    topo.sectors.push(Sector {
        header: Header::new("greenhouse", "north lot"),
        assets: vec![Asset {
            header: Header::new("pump-1", "drip line"),
        }],
    });
    topo.sectors.push(Sector {
        header: Header::new("barn", "east lot"),
        assets: Vec::new(),
    });
    topo.signals.push(Signal {
        header: Header::new("overheat", "roof sensor"),
        trigger: Default::default(),
    });
    topo.actions.push(Action {
        header: Header::new("vent", "open roof vents"),
        kind: Default::default(),
        info: String::new(),
    });
    topo.signal_map
        .insert("overheat".to_string(), vec!["vent".to_string()]);
    topo
}
