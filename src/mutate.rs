//! Mutation engine: insert, update, delete and promote.
//!
//! Failure policy: every path-addressed setter strict-resolves its target
//! and signals a missing path only through an absent return value, never by
//! panicking. `delete_node_at` and `promote_at` are the exception: they
//! return a [`TreeResult`] so an invalid path is an explicit error rather
//! than silent no-op.

use tracing::instrument;

use crate::arena::{MoveTree, TreeNode};
use crate::errors::{TreeError, TreeResult};
use crate::node::{Centis, Comment, Glyph, Node, NodeData, Shape};
use crate::path::TreePath;

impl MoveTree {
    /// Strict-resolves `path` and applies an in-place field mutation.
    /// Returns the updated node, or `None` if the path does not resolve.
    ///
    /// This is the uniform failure policy for every single-field setter
    /// built on top of it.
    #[instrument(level = "trace", skip(self, mutate))]
    pub fn update_at<F>(&mut self, path: &TreePath, mutate: F) -> Option<&TreeNode>
    where
        F: FnOnce(&mut NodeData),
    {
        let idx = self.index_at(path)?;
        let node = self.get_node_mut(idx)?;
        mutate(&mut node.data);
        self.get_node(idx)
    }

    /// Attaches `node` under `parent_path` and returns the new node's path.
    ///
    /// If a child with the same id already exists at the parent, the node is
    /// discarded instead of duplicated and its {dests, drops, clock} values
    /// back-fill gaps on the existing child. Returns `None` only when
    /// `parent_path` itself does not resolve.
    #[instrument(level = "debug", skip(self, node))]
    pub fn add_node(&mut self, node: Node, parent_path: &TreePath) -> Option<TreePath> {
        let new_path = parent_path.append(node.data.id);
        if let Some(existing) = self.index_at(&new_path) {
            if let Some(existing_node) = self.get_node_mut(existing) {
                existing_node.data.backfill_from(&node.data);
            }
            return Some(new_path);
        }
        let parent = self.index_at(parent_path)?;
        self.graft(node, parent);
        Some(new_path)
    }

    /// Folds [`MoveTree::add_node`] over `nodes`, threading the returned
    /// path forward. Aborts with `None` if any step fails.
    #[instrument(level = "debug", skip(self, nodes))]
    pub fn add_nodes(&mut self, nodes: Vec<Node>, path: &TreePath) -> Option<TreePath> {
        let mut current = path.clone();
        for node in nodes {
            current = self.add_node(node, &current)?;
        }
        Some(current)
    }

    /// Removes the node at `path` together with its entire subtree.
    ///
    /// The root path and a non-resolving path are explicit errors.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node_at(&mut self, path: &TreePath) -> TreeResult<()> {
        let last = path.last().ok_or(TreeError::RootNotDeletable)?;
        let parent = self
            .index_at(&path.init())
            .ok_or_else(|| TreeError::PathNotFound(path.to_string()))?;
        let child = self
            .child_by_id(parent, last)
            .ok_or_else(|| TreeError::PathNotFound(path.to_string()))?;
        if let Some(parent_node) = self.get_node_mut(parent) {
            parent_node.children.retain(|&c| c != child);
        }
        for idx in self.subtree_indices(child) {
            self.remove_from_arena(idx);
        }
        Ok(())
    }

    /// Promotes the variation at `path` toward the mainline.
    ///
    /// Walks the root-to-`path` chain from deepest to shallowest. A child
    /// that is not its parent's first child is moved to the front; a child
    /// already in front has its `force_variation` flag cleared. With
    /// `to_mainline` false the walk stops after the first structural change
    /// or cleared flag; with `to_mainline` true both rules are applied up to
    /// the root, making the whole line mainline.
    #[instrument(level = "debug", skip(self))]
    pub fn promote_at(&mut self, path: &TreePath, to_mainline: bool) -> TreeResult<()> {
        let chain = self.index_list(path);
        if chain.len() != path.token_count() + 1 {
            return Err(TreeError::PathNotFound(path.to_string()));
        }
        for pair in chain.windows(2).rev() {
            let (parent, child) = (pair[0], pair[1]);
            let is_first = self
                .get_node(parent)
                .map_or(false, |p| p.children.first() == Some(&child));
            if !is_first {
                if let Some(parent_node) = self.get_node_mut(parent) {
                    parent_node.children.retain(|&c| c != child);
                    parent_node.children.insert(0, child);
                }
                if !to_mainline {
                    break;
                }
            } else if self
                .get_node(child)
                .map_or(false, |c| c.data.force_variation)
            {
                if let Some(child_node) = self.get_node_mut(child) {
                    child_node.data.force_variation = false;
                }
                if !to_mainline {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Direct overwrite of the node's legal-move data.
    pub fn add_dests(&mut self, dests: impl Into<String>, path: &TreePath) -> Option<&TreeNode> {
        let dests = dests.into();
        self.update_at(path, |data| data.dests = Some(dests))
    }

    pub fn set_shapes(&mut self, shapes: Vec<Shape>, path: &TreePath) -> Option<&TreeNode> {
        self.update_at(path, |data| data.shapes = Some(shapes))
    }

    /// Upserts a comment by id, preserving list order. An empty text removes
    /// the matching comment instead.
    pub fn set_comment_at(&mut self, comment: Comment, path: &TreePath) -> Option<&TreeNode> {
        if comment.text.is_empty() {
            let id = comment.id;
            return self.delete_comment_at(&id, path);
        }
        self.update_at(path, |data| {
            let comments = data.comments.get_or_insert_with(Vec::new);
            match comments.iter_mut().find(|c| c.id == comment.id) {
                Some(existing) => existing.text = comment.text,
                None => comments.push(comment),
            }
        })
    }

    /// Removes the comment with the given id. An emptied list is stored as
    /// absent, never as an empty list.
    pub fn delete_comment_at(&mut self, id: &str, path: &TreePath) -> Option<&TreeNode> {
        self.update_at(path, |data| {
            if let Some(mut comments) = data.comments.take() {
                comments.retain(|c| c.id != id);
                if !comments.is_empty() {
                    data.comments = Some(comments);
                }
            }
        })
    }

    pub fn set_glyphs_at(&mut self, glyphs: Vec<Glyph>, path: &TreePath) -> Option<&TreeNode> {
        self.update_at(path, |data| data.glyphs = Some(glyphs))
    }

    pub fn set_clock_at(&mut self, clock: Option<Centis>, path: &TreePath) -> Option<&TreeNode> {
        self.update_at(path, |data| data.clock = clock)
    }

    /// Marks (or unmarks) the subtree at `path` as a deliberate side line.
    pub fn force_variation_at(&mut self, force: bool, path: &TreePath) -> Option<&TreeNode> {
        self.update_at(path, |data| data.force_variation = force)
    }

    /// Clears the transient engine-analysis caches on every node in the
    /// tree, variations included.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_ceval(&mut self) {
        for (_, node) in self.arena_iter_mut() {
            node.data.ceval = None;
            node.data.threat = None;
        }
    }
}
