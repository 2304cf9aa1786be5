//! Update Ingestion
//!
//! Update messages arrive from the authoritative source as a flat list of
//! records. Each record names an edge and its two endpoint nodes, plus the
//! style attributes of all three. Two message shapes exist and the caller
//! picks the operation:
//!
//! - **Snapshot**: rebuild the model from scratch. Nodes are created on
//!   first mention and reused on later mentions; an edge is created only
//!   once both of its endpoints resolve.
//! - **Partial**: refresh attributes of entities that already exist. Every
//!   name must resolve, and nothing is written unless all of them do.
//!
//! Records are processed in message order. A record without a name is a
//! placeholder and is skipped in both shapes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{Endpoint, GraphError, Result};
use crate::graph::{Edge, EdgeId, GraphModel, Node, NodeId};
use crate::style::{Color, VisualStyle};

/// One record of an update message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateRecord {
    /// Edge name. Records without one are skipped.
    pub name: Option<String>,
    pub node1: Option<String>,
    pub node2: Option<String>,
    pub node1_x: Option<f64>,
    pub node1_y: Option<f64>,
    pub node2_x: Option<f64>,
    pub node2_y: Option<f64>,
    pub node1_fill: Option<Color>,
    pub node2_fill: Option<Color>,
    /// Edge stroke.
    pub color: Option<Color>,
    /// Edge stroke width.
    pub width: Option<f64>,
    /// Edge label text.
    pub label: Option<String>,
    /// Extra display attributes carried onto the edge.
    pub attributes: IndexMap<String, String>,
}

impl UpdateRecord {
    /// Record for an edge between two named nodes.
    pub fn edge(name: &str, node1: &str, node2: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            node1: Some(node1.to_string()),
            node2: Some(node2.to_string()),
            ..Self::default()
        }
    }

    /// Builder-style position for one endpoint.
    pub fn at(mut self, endpoint: Endpoint, x: f64, y: f64) -> Self {
        match endpoint {
            Endpoint::First => {
                self.node1_x = Some(x);
                self.node1_y = Some(y);
            }
            Endpoint::Second => {
                self.node2_x = Some(x);
                self.node2_y = Some(y);
            }
        }
        self
    }

    /// The record's name, treating an empty string as absent.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Name of the node at `endpoint`, treating an empty string as absent.
    pub fn node_name(&self, endpoint: Endpoint) -> Option<&str> {
        let name = match endpoint {
            Endpoint::First => self.node1.as_deref(),
            Endpoint::Second => self.node2.as_deref(),
        };
        name.filter(|name| !name.is_empty())
    }

    fn position(&self, endpoint: Endpoint) -> (Option<f64>, Option<f64>) {
        match endpoint {
            Endpoint::First => (self.node1_x, self.node1_y),
            Endpoint::Second => (self.node2_x, self.node2_y),
        }
    }

    fn fill(&self, endpoint: Endpoint) -> Option<&Color> {
        match endpoint {
            Endpoint::First => self.node1_fill.as_ref(),
            Endpoint::Second => self.node2_fill.as_ref(),
        }
    }
}

/// An ordered list of update records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateMessage {
    pub records: Vec<UpdateRecord>,
}

impl UpdateMessage {
    pub fn new(records: Vec<UpdateRecord>) -> Self {
        Self { records }
    }

    /// Decode a message from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a message from MessagePack.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

/// Entities whose attributes a partial update rewrote, in message order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Refreshed {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
}

/// A partial-update record whose names all resolved.
struct Resolved<'m> {
    record: &'m UpdateRecord,
    first: NodeId,
    second: NodeId,
    edge: EdgeId,
}

/// Turns update messages into model mutations.
pub struct UpdateIngestor<'a> {
    style: &'a VisualStyle,
}

impl<'a> UpdateIngestor<'a> {
    pub fn new(style: &'a VisualStyle) -> Self {
        Self { style }
    }

    /// Replace the whole model with the contents of `message`.
    pub fn load_snapshot(&self, model: &mut GraphModel, message: &UpdateMessage) {
        model.clear();

        for (index, record) in message.records.iter().enumerate() {
            let Some(name) = record.name() else {
                trace!(index, "skipping record without a name");
                continue;
            };
            let first = self.resolve_or_create(model, record, Endpoint::First);
            let second = self.resolve_or_create(model, record, Endpoint::Second);
            let (Some(first), Some(second)) = (first, second) else {
                trace!(edge = name, "deferring edge with an unresolved endpoint");
                continue;
            };

            let (Some(a), Some(b)) = (model.node(&first), model.node(&second)) else {
                continue;
            };
            let mut edge = Edge::new(name, a, b, self.style);
            refresh_edge(&mut edge, record);
            match model.upsert_edge(edge) {
                Ok(Some(_)) => debug!(edge = name, "edge redefined in snapshot"),
                Ok(None) => {}
                Err(err) => warn!(edge = name, %err, "could not insert snapshot edge"),
            }
        }

        debug!(
            nodes = model.node_count(),
            edges = model.edge_count(),
            "loaded snapshot"
        );
    }

    /// Look up the node named at `endpoint`, creating it from the record on
    /// first mention.
    fn resolve_or_create(
        &self,
        model: &mut GraphModel,
        record: &UpdateRecord,
        endpoint: Endpoint,
    ) -> Option<NodeId> {
        let id = NodeId::from(record.node_name(endpoint)?);
        if !model.contains_node(&id) {
            let (x, y) = record.position(endpoint);
            let mut node = Node::new(id.clone(), x.unwrap_or(0.0), y.unwrap_or(0.0), self.style);
            if let Some(fill) = record.fill(endpoint) {
                node.set_fill(fill.clone());
            }
            // Cannot collide: presence was checked above.
            if let Err(err) = model.add_node(node) {
                warn!(node = %id, %err, "could not insert snapshot node");
            }
        }
        Some(id)
    }

    /// Refresh the attributes of existing nodes and edges from `message`.
    ///
    /// Topology is left alone. Edge line geometry is not recomputed here;
    /// the render path does that from the returned node list.
    pub fn apply_partial_update(
        &self,
        model: &mut GraphModel,
        message: &UpdateMessage,
    ) -> Result<Refreshed> {
        let resolved = message
            .records
            .iter()
            .filter(|record| record.name().is_some())
            .map(|record| resolve_existing(model, record))
            .collect::<Result<Vec<_>>>()?;

        let mut refreshed = Refreshed::default();
        for entry in resolved {
            for (endpoint, id) in [(Endpoint::First, &entry.first), (Endpoint::Second, &entry.second)] {
                if let Some(node) = model.node_mut(id) {
                    refresh_node(node, entry.record, endpoint);
                }
                if !refreshed.nodes.contains(id) {
                    refreshed.nodes.push(id.clone());
                }
            }
            if let Some(edge) = model.edge_mut(&entry.edge) {
                refresh_edge(edge, entry.record);
            }
            refreshed.edges.push(entry.edge);
        }

        debug!(
            nodes = refreshed.nodes.len(),
            edges = refreshed.edges.len(),
            "applied partial update"
        );
        Ok(refreshed)
    }
}

fn resolve_existing<'m>(model: &GraphModel, record: &'m UpdateRecord) -> Result<Resolved<'m>> {
    let edge = EdgeId::from(record.name().unwrap_or_default());
    let node = |endpoint: Endpoint| -> Result<NodeId> {
        let name = record
            .node_name(endpoint)
            .ok_or_else(|| GraphError::MissingEndpoint {
                edge: edge.clone(),
                endpoint,
            })?;
        let id = NodeId::from(name);
        match model.contains_node(&id) {
            true => Ok(id),
            false => Err(GraphError::UnknownNode(id)),
        }
    };
    let first = node(Endpoint::First)?;
    let second = node(Endpoint::Second)?;
    if !model.contains_edge(&edge) {
        return Err(GraphError::UnknownEdge(edge));
    }
    Ok(Resolved {
        record,
        first,
        second,
        edge,
    })
}

fn refresh_node(node: &mut Node, record: &UpdateRecord, endpoint: Endpoint) {
    let (x, y) = record.position(endpoint);
    node.set_position(x.unwrap_or(node.x()), y.unwrap_or(node.y()));
    if let Some(fill) = record.fill(endpoint) {
        node.set_fill(fill.clone());
    }
}

fn refresh_edge(edge: &mut Edge, record: &UpdateRecord) {
    if let Some(color) = &record.color {
        edge.set_stroke(color.clone());
    }
    if let Some(width) = record.width {
        edge.set_width(width);
    }
    if let Some(label) = &record.label {
        edge.set_label_text(label.clone());
    }
    for (key, value) in &record.attributes {
        edge.set_attribute(key.clone(), value.clone());
    }
}
