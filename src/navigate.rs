//! Read-only queries resolving paths to nodes, node lists and
//! mainline/variation classification.
//!
//! Two resolution flavors exist side by side: strict resolution returns
//! `None` unless the whole path resolves, while the best-effort resolvers
//! never fail and fall back to the deepest node actually reached. Callers
//! of the best-effort form must not mistake the fallback for the requested
//! node.

use generational_arena::Index;
use itertools::{EitherOrBoth, Itertools};
use tracing::instrument;

use crate::arena::{MoveTree, TreeNode};
use crate::node::Centis;
use crate::path::TreePath;

impl MoveTree {
    /// Strict resolution: the arena index at `path`, or `None` if any token
    /// fails to match a child.
    pub(crate) fn index_at(&self, path: &TreePath) -> Option<Index> {
        let mut current = self.root();
        for id in path.tokens() {
            current = self.child_by_id(current, id)?;
        }
        Some(current)
    }

    /// Best-effort resolution: the deepest index reached along `path`.
    fn deepest_index(&self, path: &TreePath) -> Index {
        let mut current = self.root();
        for id in path.tokens() {
            match self.child_by_id(current, id) {
                Some(child) => current = child,
                None => break,
            }
        }
        current
    }

    /// Advance one token, record the node, stop when the next step fails or
    /// the path is exhausted. Root inclusive; shorter than the full chain
    /// if resolution fails partway.
    pub(crate) fn index_list(&self, path: &TreePath) -> Vec<Index> {
        let mut list = vec![self.root()];
        let mut current = self.root();
        for id in path.tokens() {
            match self.child_by_id(current, id) {
                Some(child) => {
                    list.push(child);
                    current = child;
                }
                None => break,
            }
        }
        list
    }

    /// Node at `path`, best-effort: never fails, returns the deepest node
    /// successfully reached when a token has no matching child.
    pub fn node_at_path(&self, path: &TreePath) -> &TreeNode {
        let idx = self.deepest_index(path);
        self.get_node(idx).unwrap_or_else(|| self.root_node())
    }

    /// Node at `path`, strict: `None` unless the path fully resolves.
    pub fn get_node_at_path(&self, path: &TreePath) -> Option<&TreeNode> {
        self.index_at(path).and_then(|idx| self.get_node(idx))
    }

    pub fn path_exists(&self, path: &TreePath) -> bool {
        self.index_at(path).is_some()
    }

    /// Longest token-aligned prefix of `path` that resolves to existing
    /// nodes.
    #[instrument(level = "trace", skip(self))]
    pub fn longest_valid_path(&self, path: &TreePath) -> TreePath {
        let mut valid = TreePath::root();
        let mut current = self.root();
        for id in path.tokens() {
            match self.child_by_id(current, id) {
                Some(child) => {
                    valid = valid.append(id);
                    current = child;
                }
                None => break,
            }
        }
        valid
    }

    /// Ordered nodes from the root to the node at `path`, both inclusive.
    pub fn get_node_list(&self, path: &TreePath) -> Vec<&TreeNode> {
        self.index_list(path)
            .into_iter()
            .filter_map(|idx| self.get_node(idx))
            .collect()
    }

    /// True iff every token along `path` is the mainline continuation
    /// (`children[0]`) at its level. The root path is trivially mainline.
    pub fn path_is_mainline(&self, path: &TreePath) -> bool {
        let mut current = self.root();
        for id in path.tokens() {
            match self.mainline_child(current) {
                Some(child) if self.get_node(child).map(|n| n.data.id) == Some(id) => {
                    current = child;
                }
                _ => return false,
            }
        }
        true
    }

    /// True iff any node on the root-to-`path` chain is flagged as a
    /// deliberate side line.
    pub fn path_is_forced_variation(&self, path: &TreePath) -> bool {
        self.get_node_list(path)
            .iter()
            .any(|node| node.data.force_variation)
    }

    /// Deepest node along `path` still on the mainline, i.e. the node just
    /// before the path diverges into a variation.
    pub fn last_mainline_node(&self, path: &TreePath) -> &TreeNode {
        let mut current = self.root();
        for id in path.tokens() {
            match self.mainline_child(current) {
                Some(child) if self.get_node(child).map(|n| n.data.id) == Some(id) => {
                    current = child;
                }
                _ => break,
            }
        }
        self.get_node(current).unwrap_or_else(|| self.root_node())
    }

    /// Node at `init(path)`; for a single-token path this is the root.
    /// Best-effort, like [`MoveTree::node_at_path`].
    pub fn parent_node(&self, path: &TreePath) -> &TreeNode {
        self.node_at_path(&path.init())
    }

    /// Parent node's clock, or the node's own clock for the root path (the
    /// root has no parent to query).
    pub fn parent_clock(&self, node: &TreeNode, path: &TreePath) -> Option<Centis> {
        if path.is_root() {
            node.data.clock
        } else {
            self.parent_node(path).data.clock
        }
    }

    /// Ply of the terminal mainline node (root's ply if the root is
    /// terminal).
    pub fn last_ply(&self) -> u32 {
        let mut current = self.root();
        while let Some(child) = self.mainline_child(current) {
            current = child;
        }
        self.get_node(current)
            .map(|node| node.data.ply)
            .unwrap_or_else(|| self.root_node().data.ply)
    }

    /// Root-inclusive chain obtained by always following `children[0]`.
    pub fn mainline(&self) -> Vec<&TreeNode> {
        let mut list = Vec::new();
        let mut current = Some(self.root());
        while let Some(idx) = current {
            match self.get_node(idx) {
                Some(node) => {
                    list.push(node);
                    current = node.children.first().copied();
                }
                None => break,
            }
        }
        list
    }

    fn mainline_child(&self, idx: Index) -> Option<Index> {
        self.get_node(idx)?.children.first().copied()
    }
}

/// Suffix of `node_list` played after `ply`, tolerating divergence from the
/// canonical mainline only beyond the cursor: scanning stops the instant an
/// index at or before `ply` disagrees between the two lists. A missing
/// mainline entry counts as divergence.
pub fn current_nodes_after_ply<'a>(
    node_list: &[&'a TreeNode],
    mainline: &[&'a TreeNode],
    ply: u32,
) -> Vec<&'a TreeNode> {
    let mut nodes = Vec::new();
    for pair in node_list.iter().zip_longest(mainline.iter()) {
        let (node, main) = match pair {
            EitherOrBoth::Both(node, main) => (node, Some(main)),
            EitherOrBoth::Left(node) => (node, None),
            EitherOrBoth::Right(_) => break,
        };
        if node.data.ply <= ply && main.map_or(true, |m| m.data.id != node.data.id) {
            break;
        }
        if node.data.ply > ply {
            nodes.push(*node);
        }
    }
    nodes
}
