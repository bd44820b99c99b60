use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::node::{Node, NodeData};
use crate::path::NodeId;

/// Tree node in the arena-based move tree.
///
/// `children` is ordered and the order is semantically meaningful:
/// `children[0]`, if present, is the mainline continuation at this node;
/// every other child is a variation.
#[derive(Debug)]
pub struct TreeNode {
    /// Move and annotation payload for this position
    pub data: NodeData,
    /// Index of the parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Ordered indices of child nodes in the arena
    pub children: Vec<Index>,
}

/// Arena-based move tree for one game, exclusively owning its root and,
/// transitively, every descendant.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// lookups. The arena holds exactly the nodes reachable from the root:
/// deletion prunes the removed subtree from storage.
#[derive(Debug)]
pub struct MoveTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node
    root: Index,
}

impl MoveTree {
    /// Builds a tree from an interchange node, grafting its whole subtree.
    pub fn new(root: Node) -> Self {
        let Node { data, children } = root;
        let mut arena = Arena::new();
        let root_idx = arena.insert(TreeNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        let mut tree = Self {
            arena,
            root: root_idx,
        };
        tree.graft_children(root_idx, children);
        tree
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_node(&self) -> &TreeNode {
        &self.arena[self.root]
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub(crate) fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Child of `parent` carrying the given sibling-unique id.
    pub fn child_by_id(&self, parent: Index, id: NodeId) -> Option<Index> {
        self.arena.get(parent)?.children.iter().copied().find(
            |&child| matches!(self.arena.get(child), Some(node) if node.data.id == id),
        )
    }

    /// Inserts an interchange node (with its whole subtree) as the last
    /// child of `parent`. Returns the index of the grafted node.
    #[instrument(level = "trace", skip(self, node))]
    pub(crate) fn graft(&mut self, node: Node, parent: Index) -> Index {
        let Node { data, children } = node;
        let idx = self.arena.insert(TreeNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(idx);
        }
        self.graft_children(idx, children);
        idx
    }

    /// Iterative subtree insertion with an explicit stack; sibling order of
    /// the interchange nodes is preserved.
    fn graft_children(&mut self, parent: Index, children: Vec<Node>) {
        let mut stack = vec![(parent, children)];
        while let Some((parent_idx, nodes)) = stack.pop() {
            for node in nodes {
                let Node { data, children } = node;
                let idx = self.arena.insert(TreeNode {
                    data,
                    parent: Some(parent_idx),
                    children: Vec::new(),
                });
                if let Some(parent_node) = self.arena.get_mut(parent_idx) {
                    parent_node.children.push(idx);
                }
                if !children.is_empty() {
                    stack.push((idx, children));
                }
            }
        }
    }

    /// Indices of the subtree rooted at `start`, the start node included.
    pub(crate) fn subtree_indices(&self, start: Index) -> Vec<Index> {
        let mut indices = Vec::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            if let Some(node) = self.arena.get(idx) {
                indices.push(idx);
                stack.extend(node.children.iter().copied());
            }
        }
        indices
    }

    pub(crate) fn remove_from_arena(&mut self, idx: Index) {
        self.arena.remove(idx);
    }

    pub(crate) fn arena_iter_mut(&mut self) -> generational_arena::IterMut<'_, TreeNode> {
        self.arena.iter_mut()
    }

    /// Preorder traversal over all nodes, mainline branches first.
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    /// Human-readable dump of the tree for debugging, one line per node.
    pub fn render(&self) -> Tree<String> {
        self.render_from(self.root)
    }

    fn render_from(&self, idx: Index) -> Tree<String> {
        match self.arena.get(idx) {
            Some(node) => {
                let mut label = node.data.to_string();
                if node.data.force_variation {
                    label.push_str(" (forced variation)");
                }
                let leaves: Vec<_> = node
                    .children
                    .iter()
                    .map(|&child| self.render_from(child))
                    .collect();
                Tree::new(label).with_leaves(leaves)
            }
            None => Tree::new(String::from("<missing>")),
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a MoveTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a MoveTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root()],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for mainline-first traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
