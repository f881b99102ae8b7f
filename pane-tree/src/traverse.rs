use crate::PaneNode;

/// Produce a new tree by applying `f` to every node's own fields,
/// pre-order. `f` receives the node as it stood before any rewriting;
/// its `right`/`bottom` fields in the return value are ignored and
/// replaced with the recursively mapped children, so `f` only needs to
/// concern itself with the node's own data.
///
/// A nil tree maps to a nil tree.
pub fn map(tree: Option<&PaneNode>, f: &impl Fn(&PaneNode) -> PaneNode) -> Option<PaneNode> {
    tree.map(|node| map_node(node, f))
}

fn map_node(node: &PaneNode, f: &impl Fn(&PaneNode) -> PaneNode) -> PaneNode {
    let mut mapped = f(node);
    mapped.right = node.right.as_deref().map(|r| Box::new(map_node(r, f)));
    mapped.bottom = node.bottom.as_deref().map(|b| Box::new(map_node(b, f)));
    mapped
}

/// Accumulate over a pre-order traversal of `tree`. A nil tree leaves the
/// accumulator unchanged.
pub fn fold<A>(tree: Option<&PaneNode>, init: A, f: &impl Fn(A, &PaneNode) -> A) -> A {
    match tree {
        None => init,
        Some(node) => {
            let acc = f(init, node);
            let acc = fold(node.right.as_deref(), acc, f);
            fold(node.bottom.as_deref(), acc, f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::pane;
    use crate::build::build;

    #[test]
    fn fold_visits_preorder_and_counts_all_nodes() {
        let panes = vec![pane(0, 0, 53, 48), pane(54, 0, 53, 48), pane(108, 0, 53, 48)];
        let (tree, _) = build(panes);
        let count = fold(tree.as_ref(), 0usize, &|acc, _node| acc + 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn fold_on_nil_tree_is_identity() {
        let count = fold(None, 42usize, &|acc, _node| acc + 1);
        assert_eq!(count, 42);
    }

    #[test]
    fn map_rewrites_every_node_preserving_shape() {
        let panes = vec![pane(0, 0, 53, 48), pane(54, 0, 53, 48)];
        let (tree, _) = build(panes);
        let mapped = map(tree.as_ref(), &|n| {
            let mut n = n.clone();
            n.cwd = "/rewritten".to_string();
            n
        });
        let mapped = mapped.unwrap();
        assert_eq!(mapped.cwd, "/rewritten");
        assert_eq!(mapped.right.unwrap().cwd, "/rewritten");
    }

    #[test]
    fn map_on_nil_tree_is_identity() {
        assert!(map(None, &|n| n.clone()).is_none());
    }
}
