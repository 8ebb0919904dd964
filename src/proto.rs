//! Wire and domain types shared with the remote authority.
//!
//! The authority marshals the topology tree with PascalCase field names
//! and the session status with lowercase ones; the serde attributes here
//! pin both shapes so the mirror deserializes byte-for-byte what the
//! authority emits. Mutations travel in a single uniform envelope
//! regardless of subject.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// The authority marshals empty collections as JSON null; treat null
/// as the empty value on the way in.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Mutation verb carried by the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiOp {
    #[serde(rename = "opAdd")]
    Add,
    #[serde(rename = "opDel")]
    Del,
}

impl ApiOp {
    /// Human-readable verb for alert messages.
    pub fn verb(&self) -> &'static str {
        match self {
            ApiOp::Add => "add",
            ApiOp::Del => "delete",
        }
    }
}

/// Subject class a mutation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiSubject {
    Sector,
    Asset,
    Signal,
    Action,
    Mapping,
    Topo,
}

impl ApiSubject {
    /// Human-readable noun for alert messages.
    pub fn noun(&self) -> &'static str {
        match self {
            ApiSubject::Sector => "sector",
            ApiSubject::Asset => "asset",
            ApiSubject::Signal => "signal",
            ApiSubject::Action => "action",
            ApiSubject::Mapping => "mapping",
            ApiSubject::Topo => "topology",
        }
    }
}

/// The uniform mutation request shape.
///
/// `data` is either a serialized entity (for adds) or a bare name
/// (for deletes); the subject determines which. The envelope shape
/// round-trips identically regardless of endpoint path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub op: ApiOp,
    pub subject: ApiSubject,
    pub data: String,
}

impl Envelope {
    pub fn new(op: ApiOp, subject: ApiSubject, data: impl Into<String>) -> Self {
        Self {
            op,
            subject,
            data: data.into(),
        }
    }
}

/// Common identity block for every topology entity.
///
/// `name` is the unique key within its subject class; edit and delete
/// both address entities by it. There is no surrogate id, so a rename
/// is only expressible as delete followed by create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    pub name: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl Header {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
        }
    }
}

/// A named grouping of assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sector {
    pub header: Header,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets: Vec<Asset>,
}

/// A monitored physical or logical endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Asset {
    pub header: Header,
}

/// Trigger condition attached to a signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalTrigger {
    #[default]
    #[serde(rename = "onEvent")]
    OnEvent,
    #[serde(rename = "onTimeout")]
    OnTimeout,
    #[serde(rename = "onBumpTimeout")]
    OnBumpTimeout,
    #[serde(rename = "onShutdown")]
    OnShutdown,
    #[serde(rename = "onSchedule")]
    OnSchedule,
    #[serde(rename = "onEmit")]
    OnEmit,
}

/// A named trigger condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Signal {
    pub header: Header,
    #[serde(default)]
    pub trigger: SignalTrigger,
}

/// How an action's body is stored on the authority side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[default]
    File,
    Embedded,
}

/// A named executable response, optionally bound to a signal through
/// the topology's signal map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Action {
    pub header: Header,
    #[serde(rename = "Type")]
    pub kind: ActionType,
    #[serde(default)]
    pub info: String,
}

/// The full configuration tree mirrored client-side.
///
/// `signal_map` maps a signal name to the names of the actions it
/// drives; a signal is "in use" when its entry is non-empty, and an
/// action's assigned signal is found by scanning the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Topology {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sectors: Vec<Sector>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signals: Vec<Signal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<Action>,
    #[serde(default, rename = "SigMap", deserialize_with = "null_as_default")]
    pub signal_map: BTreeMap<String, Vec<String>>,
}

/// Asset mutations carry the owning sector alongside the asset, since
/// assets are only addressable through their sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCud {
    pub sector: String,
    pub asset: Asset,
}

/// Mapping mutations bind a signal to the list of actions it drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingCud {
    pub signal: String,
    pub actions: Vec<String>,
}

/// Payload of the session status endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session: String,
    pub user: String,
    pub version: String,
}
