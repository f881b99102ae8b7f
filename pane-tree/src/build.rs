use crate::{PaneNode, RawPane};
use std::fmt;

/// Emitted once per non-spawnable domain encountered during [`build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureWarning {
    pub domain: String,
}

impl fmt::Display for CaptureWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Domain {} is not spawnable", self.domain)
    }
}

/// Infer the binary split tree that produced `panes`.
///
/// Panes are sorted by `(left, top)` ascending, so the first becomes the
/// top-left root. From there, each node's right and bottom children are
/// found by looking for the unique candidate pane that abuts it exactly
/// (one divider cell away); any pane that doesn't directly abut the
/// current node is passed down unchanged for a deeper node to claim.
///
/// Pure: no host calls, no I/O. Identical inputs yield identical trees.
pub fn build(panes: Vec<RawPane>) -> (Option<PaneNode>, Vec<CaptureWarning>) {
    if panes.is_empty() {
        return (None, Vec::new());
    }

    let mut sorted = panes;
    sorted.sort_by_key(|p| (p.left, p.top));

    let mut root_iter = sorted.into_iter();
    let root = root_iter.next().expect("checked non-empty above");
    let rest: Vec<RawPane> = root_iter.collect();

    let mut warnings = Vec::new();
    let node = build_node(&root, &rest, &mut warnings);
    (Some(node), warnings)
}

fn is_right_candidate(n: &RawPane, p: &RawPane) -> bool {
    p.left > n.left + n.width
}

fn is_bottom_candidate(n: &RawPane, p: &RawPane) -> bool {
    p.top > n.top + n.height
}

fn is_connected_right(n: &RawPane, p: &RawPane) -> bool {
    p.top == n.top && p.left == n.left + n.width + 1
}

fn is_connected_bottom(n: &RawPane, p: &RawPane) -> bool {
    p.left == n.left && p.top == n.top + n.height + 1
}

fn build_node(n: &RawPane, pool: &[RawPane], warnings: &mut Vec<CaptureWarning>) -> PaneNode {
    let (mut node, warning) = PaneNode::from_raw(n);
    if let Some(w) = warning {
        warnings.push(w);
    }

    let right_candidates: Vec<&RawPane> = pool.iter().filter(|p| is_right_candidate(n, p)).collect();
    let bottom_candidates: Vec<&RawPane> = pool.iter().filter(|p| is_bottom_candidate(n, p)).collect();

    let connected_right = right_candidates.iter().copied().find(|p| is_connected_right(n, p));

    if let Some(right_root) = connected_right {
        let right_pool: Vec<RawPane> = right_candidates
            .iter()
            .copied()
            .filter(|p| !std::ptr::eq(*p, right_root))
            .cloned()
            .collect();
        node.right = Some(Box::new(build_node(right_root, &right_pool, warnings)));
    }

    let connected_bottom = bottom_candidates.iter().copied().find(|p| is_connected_bottom(n, p));

    if let Some(bottom_root) = connected_bottom {
        // Any pane that is *also* a right candidate of `n` is claimed by
        // the right subtree first, per the right-before-bottom tie-break;
        // it must not be handed to the bottom subtree as well.
        let bottom_pool: Vec<RawPane> = bottom_candidates
            .iter()
            .copied()
            .filter(|p| !std::ptr::eq(*p, bottom_root) && !is_right_candidate(n, p))
            .cloned()
            .collect();
        node.bottom = Some(Box::new(build_node(bottom_root, &bottom_pool, warnings)));
    }

    node
}
