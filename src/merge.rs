//! Merge engine: structural combination of two trees sharing root identity.

use tracing::instrument;

use crate::arena::MoveTree;
use crate::node::Node;

impl MoveTree {
    /// Recursively combines an externally produced tree, rooted at the same
    /// identity as this tree's root, into this tree.
    ///
    /// Children are matched by id level by level. A matched pair is merged
    /// in place, back-filling {dests, drops, clock} gaps on the existing
    /// node from the incoming one; an unmatched incoming child is grafted
    /// with its whole subtree as the last sibling. Existing children are
    /// never reordered or removed, so pre-merge mainline ordering survives
    /// unless the mainline itself collides and is back-filled.
    #[instrument(level = "debug", skip(self, incoming))]
    pub fn merge(&mut self, incoming: Node) {
        let mut stack = vec![(self.root(), incoming)];
        while let Some((existing, node)) = stack.pop() {
            for child in node.children {
                match self.child_by_id(existing, child.data.id) {
                    Some(matched) => {
                        if let Some(matched_node) = self.get_node_mut(matched) {
                            matched_node.data.backfill_from(&child.data);
                        }
                        stack.push((matched, child));
                    }
                    None => {
                        self.graft(child, existing);
                    }
                }
            }
        }
    }
}
