//! Tests for structural merge of trees sharing root identity

use movetree::{MoveTree, Node, NodeId, TreePath};

fn id(s: &str) -> NodeId {
    NodeId::new(s).expect("valid id")
}

fn path(s: &str) -> TreePath {
    TreePath::new(s).expect("valid path")
}

// zz ── aa ── ab
fn existing_tree() -> MoveTree {
    MoveTree::new(
        Node::new(id("zz"), 0)
            .with_child(Node::new(id("aa"), 1).with_child(Node::new(id("ab"), 2))),
    )
}

// ============================================================
// Matching Tests
// ============================================================

#[test]
fn given_overlapping_trees_when_merging_then_matches_by_id_and_appends_new_branches() {
    let mut tree = existing_tree();

    // same root identity: aa/ab collide, ac and bb are new
    let incoming = Node::new(id("zz"), 0)
        .with_child(
            Node::new(id("aa"), 1)
                .with_child(Node::new(id("ab"), 2).with_dests("e2e4"))
                .with_child(Node::new(id("ac"), 2)),
        )
        .with_child(Node::new(id("bb"), 1));

    tree.merge(incoming);

    // matched pair merged, not duplicated; new grandchild appended
    let aa = tree.get_node_at_path(&path("aa")).unwrap();
    assert_eq!(aa.children.len(), 2);
    assert!(tree.path_exists(&path("aaab")));
    assert!(tree.path_exists(&path("aaac")));

    // collided node back-filled from the incoming tree
    let ab = tree.get_node_at_path(&path("aaab")).unwrap();
    assert_eq!(ab.data.dests.as_deref(), Some("e2e4"));

    // new top-level branch appended after aa; aa keeps mainline status
    let root = tree.root_node();
    assert_eq!(root.children.len(), 2);
    assert_eq!(tree.get_node(root.children[1]).unwrap().data.id, id("bb"));
    assert!(tree.path_is_mainline(&path("aaab")));
    assert!(!tree.path_is_mainline(&path("bb")));
}

#[test]
fn given_present_fields_when_merging_then_never_overwritten() {
    let mut tree = MoveTree::new(
        Node::new(id("zz"), 0)
            .with_child(Node::new(id("aa"), 1).with_clock(6000).with_dests("d2d4")),
    );

    let incoming = Node::new(id("zz"), 0)
        .with_child(Node::new(id("aa"), 1).with_clock(1).with_drops("@e4"));

    tree.merge(incoming);

    let aa = tree.get_node_at_path(&path("aa")).unwrap();
    assert_eq!(aa.data.clock, Some(6000));
    assert_eq!(aa.data.dests.as_deref(), Some("d2d4"));
    // only the gap is filled
    assert_eq!(aa.data.drops.as_deref(), Some("@e4"));
}

#[test]
fn given_childless_incoming_tree_when_merging_then_nothing_changes() {
    let mut tree = existing_tree();
    let before = tree.node_count();

    tree.merge(Node::new(id("zz"), 0));

    assert_eq!(tree.node_count(), before);
}

// ============================================================
// Grafting Tests
// ============================================================

#[test]
fn given_deep_unmatched_branch_when_merging_then_grafts_whole_subtree() {
    let mut tree = existing_tree();

    let incoming = Node::new(id("zz"), 0).with_child(
        Node::new(id("bb"), 1)
            .with_child(Node::new(id("cd"), 2).with_child(Node::new(id("ef"), 3))),
    );

    tree.merge(incoming);

    assert!(tree.path_exists(&path("bbcdef")));
    assert_eq!(tree.node_at_path(&path("bbcdef")).data.ply, 3);
}

#[test]
fn given_matched_deeper_levels_when_merging_then_recursion_continues_below_collisions() {
    let mut tree = existing_tree();

    // ab collides; its child ac is new and lands one level deeper
    let incoming = Node::new(id("zz"), 0).with_child(
        Node::new(id("aa"), 1)
            .with_child(Node::new(id("ab"), 2).with_child(Node::new(id("ac"), 3))),
    );

    tree.merge(incoming);

    assert!(tree.path_exists(&path("aaabac")));
    assert_eq!(tree.get_node_at_path(&path("aaab")).unwrap().children.len(), 1);
}

#[test]
fn given_existing_variation_order_when_merging_then_order_is_preserved() {
    let mut tree = MoveTree::new(
        Node::new(id("zz"), 0)
            .with_child(Node::new(id("aa"), 1))
            .with_child(Node::new(id("bb"), 1)),
    );

    // incoming lists bb first; existing order must win
    let incoming = Node::new(id("zz"), 0)
        .with_child(Node::new(id("bb"), 1))
        .with_child(Node::new(id("aa"), 1))
        .with_child(Node::new(id("cc"), 1));

    tree.merge(incoming);

    let ids: Vec<String> = tree
        .root_node()
        .children
        .iter()
        .map(|&c| tree.get_node(c).unwrap().data.id.to_string())
        .collect();
    assert_eq!(ids, vec!["aa", "bb", "cc"]);
}
