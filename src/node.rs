//! Interchange node and annotation types.
//!
//! These are the contract with the external collaborators: a move-rules
//! component constructs [`Node`] values to insert (at least `id`, `ply` and
//! an empty child list), an annotation-authoring component supplies
//! [`Comment`] / [`Glyph`] / [`Shape`] values. Serde derives cover the wire
//! shape; persistence of a whole tree stays outside this crate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::NodeId;

/// Remaining time at a node, in centiseconds.
pub type Centis = u32;

/// Text annotation, upserted by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
}

/// Move assessment symbol (e.g. "!?"), identified by its NAG number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub id: u32,
    pub symbol: String,
    pub name: String,
}

/// Board markup drawn on a position: an arrow when `dest` is set, a circle
/// otherwise. Squares are opaque strings supplied by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub brush: String,
    pub orig: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,
}

/// Transient engine-analysis result cached on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eval {
    pub depth: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mate: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best: Option<String>,
}

/// Per-node payload: identity, move index and annotations.
///
/// Absent annotations are `None`, never an empty list. `dests` and `drops`
/// are opaque move-data strings from the move-rules collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub id: NodeId,
    pub ply: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub force_variation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<Vec<Glyph>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shapes: Option<Vec<Shape>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drops: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock: Option<Centis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceval: Option<Eval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat: Option<Eval>,
}

impl NodeData {
    pub fn new(id: NodeId, ply: u32) -> Self {
        Self {
            id,
            ply,
            force_variation: false,
            comments: None,
            glyphs: None,
            shapes: None,
            dests: None,
            drops: None,
            clock: None,
            ceval: None,
            threat: None,
        }
    }

    /// Collision policy for insertion and merge: copy {dests, drops, clock}
    /// from `incoming` only where this node's value is absent. A present
    /// value is never overwritten.
    pub(crate) fn backfill_from(&mut self, incoming: &NodeData) {
        if self.dests.is_none() {
            self.dests = incoming.dests.clone();
        }
        if self.drops.is_none() {
            self.drops = incoming.drops.clone();
        }
        if self.clock.is_none() {
            self.clock = incoming.clock;
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.ply)
    }
}

/// Owned interchange tree: payload plus recursive children. Grafted into a
/// [`crate::MoveTree`] on insertion or merge, never copied node-by-node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: NodeId, ply: u32) -> Self {
        Self {
            data: NodeData::new(id, ply),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_dests(mut self, dests: impl Into<String>) -> Self {
        self.data.dests = Some(dests.into());
        self
    }

    pub fn with_drops(mut self, drops: impl Into<String>) -> Self {
        self.data.drops = Some(drops.into());
        self
    }

    pub fn with_clock(mut self, clock: Centis) -> Self {
        self.data.clock = Some(clock);
        self
    }
}
