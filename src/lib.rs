//! Branching game move tree for interactive analysis.
//!
//! A [`MoveTree`] holds a root position and, at every node, an ordered list
//! of candidate continuations: `children[0]` is the mainline, everything
//! else is a variation. Nodes are addressed by compact [`TreePath`] strings
//! (fixed-width id tokens, no delimiters) instead of object references, and
//! two trees produced independently from the same root can be merged
//! structurally.
//!
//! The crate is a pure in-memory library. Move legality and generation live
//! in an external move-rules component, which supplies [`Node`] values to
//! insert; rendering and persistence are equally out of scope. All
//! operations are synchronous mutations of one tree instance; callers must
//! serialize access.
//!
//! Failure shapes: strict path-addressed setters return `None` on a missing
//! path, the best-effort resolvers never fail, and the two structural
//! operations with preconditions ([`MoveTree::delete_node_at`],
//! [`MoveTree::promote_at`]) return a [`TreeResult`].

pub mod arena;
pub mod errors;
pub mod node;
pub mod path;

mod merge;
mod mutate;
mod navigate;

pub use arena::{MoveTree, TreeIterator, TreeNode};
pub use errors::{TreeError, TreeResult};
pub use navigate::current_nodes_after_ply;
pub use node::{Centis, Comment, Eval, Glyph, Node, NodeData, Shape};
pub use path::{NodeId, TreePath, ID_LENGTH};
