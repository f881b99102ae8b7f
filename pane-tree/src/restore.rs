use crate::PaneNode;

/// Which side of the parent a split command creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Bottom,
}

/// The order in which a node's two children should be split from it.
/// Only meaningful when a node has both a `right` and a `bottom` child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    RightFirst,
    BottomFirst,
}

/// How a [`SplitCommand`]'s size should be expressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeMode {
    /// Sizes are proportions of the post-split parent+child span.
    Relative,
    /// Sizes are literal cell counts.
    Absolute,
    /// Omit size; let the host apply its own default (usually 50/50).
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitSize {
    Relative(f64),
    Absolute(usize),
}

/// One split to issue against a live pane to recreate part of a captured
/// layout. `cwd`/`text`/`domain` describe the pane the split creates, not
/// the parent being split.
///
/// `parent_index` names which pane this command splits, using the same
/// indexing a flat-list replay builds up as it goes: index `0` is the
/// tree's own root (the pane the replay starts from, before any command
/// runs), and the pane produced by `commands[i]` is index `i + 1`. A
/// replay can therefore apply `commands` in order against nothing more
/// than a growing `Vec` of panes, with no need to re-walk the source
/// tree to know which pane to split next.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitCommand {
    pub parent_index: usize,
    pub direction: Direction,
    pub cwd: String,
    pub text: String,
    pub domain: Option<String>,
    pub size: Option<SplitSize>,
}

/// Decide whether `node`'s right or bottom child was split off first.
///
/// Only valid when both children are present. The `- 1` accounts for the
/// one-cell divider between panes; dropping it flips the decision on
/// near-square layouts, so it must be preserved exactly.
pub fn split_order(node: &PaneNode) -> Order {
    let right = node.right.as_deref().expect("split_order requires a right child");
    let bottom = node.bottom.as_deref().expect("split_order requires a bottom child");

    if right.height >= node.height + bottom.height - 1 {
        Order::RightFirst
    } else {
        Order::BottomFirst
    }
}

/// Compute the size to request when splitting `parent` to produce `child`
/// in the given `direction`, under `mode`.
pub fn split_size(parent: &PaneNode, child: &PaneNode, direction: Direction, mode: SizeMode) -> Option<SplitSize> {
    match mode {
        SizeMode::Default => None,
        SizeMode::Absolute => Some(match direction {
            Direction::Right => SplitSize::Absolute(child.width),
            Direction::Bottom => SplitSize::Absolute(child.height),
        }),
        SizeMode::Relative => Some(match direction {
            Direction::Right => {
                SplitSize::Relative(child.width as f64 / (parent.width + child.width) as f64)
            }
            Direction::Bottom => {
                SplitSize::Relative(child.height as f64 / (parent.height + child.height) as f64)
            }
        }),
    }
}

fn command_for(parent_index: usize, parent: &PaneNode, child: &PaneNode, direction: Direction, mode: SizeMode) -> SplitCommand {
    SplitCommand {
        parent_index,
        direction,
        cwd: child.cwd.clone(),
        text: child.text.clone(),
        domain: child.domain.clone(),
        size: split_size(parent, child, direction, mode),
    }
}

/// Plan the ordered sequence of splits that recreates `tree`, replaying
/// them against a single fresh pane.
///
/// The critical subtlety is [`split_order`]: when a node has both
/// children, whichever one spans the parent's *other* dimension in full
/// must be split off first, or replay produces a visibly different
/// layout (see module docs on the engine).
pub fn plan_splits(tree: &PaneNode, mode: SizeMode) -> Vec<SplitCommand> {
    plan_splits_with_nodes(tree, mode).0
}

/// Same as [`plan_splits`], but also returns the source node each
/// command split off, in lockstep (`nodes[i]` is the node `commands[i]`
/// produces). A caller that needs to carry more than a command's own
/// fields forward — scrollback text, process info, the `is_active`/
/// `is_zoomed` flags — zips the two rather than re-deriving them.
pub fn plan_splits_with_nodes(tree: &PaneNode, mode: SizeMode) -> (Vec<SplitCommand>, Vec<&PaneNode>) {
    let mut commands = Vec::new();
    let mut nodes = Vec::new();
    plan_node(tree, 0, mode, &mut commands, &mut nodes);
    (commands, nodes)
}

fn plan_node<'a>(
    node: &'a PaneNode,
    node_index: usize,
    mode: SizeMode,
    commands: &mut Vec<SplitCommand>,
    nodes: &mut Vec<&'a PaneNode>,
) {
    match (node.right.as_deref(), node.bottom.as_deref()) {
        (Some(right), Some(bottom)) => match split_order(node) {
            Order::RightFirst => {
                commands.push(command_for(node_index, node, right, Direction::Right, mode));
                nodes.push(right);
                let right_index = commands.len();
                commands.push(command_for(node_index, node, bottom, Direction::Bottom, mode));
                nodes.push(bottom);
                let bottom_index = commands.len();
                plan_node(right, right_index, mode, commands, nodes);
                plan_node(bottom, bottom_index, mode, commands, nodes);
            }
            Order::BottomFirst => {
                commands.push(command_for(node_index, node, bottom, Direction::Bottom, mode));
                nodes.push(bottom);
                let bottom_index = commands.len();
                commands.push(command_for(node_index, node, right, Direction::Right, mode));
                nodes.push(right);
                let right_index = commands.len();
                plan_node(bottom, bottom_index, mode, commands, nodes);
                plan_node(right, right_index, mode, commands, nodes);
            }
        },
        (Some(right), None) => {
            commands.push(command_for(node_index, node, right, Direction::Right, mode));
            nodes.push(right);
            let right_index = commands.len();
            plan_node(right, right_index, mode, commands, nodes);
        }
        (None, Some(bottom)) => {
            commands.push(command_for(node_index, node, bottom, Direction::Bottom, mode));
            nodes.push(bottom);
            let bottom_index = commands.len();
            plan_node(bottom, bottom_index, mode, commands, nodes);
        }
        (None, None) => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::pane;
    use super::*;
    use crate::build::build;

    #[test]
    fn split_order_scenario_emits_right_before_bottom() {
        let panes = vec![pane(0, 0, 80, 24), pane(81, 0, 80, 48), pane(0, 25, 80, 24)];
        let (tree, _) = build(panes);
        let tree = tree.unwrap();
        let commands = plan_splits(&tree, SizeMode::Default);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].direction, Direction::Right);
        assert_eq!(commands[1].direction, Direction::Bottom);
    }

    #[test]
    fn mirror_scenario_emits_bottom_before_right() {
        // root (0,0,80,24), right child (81,0,80,24), bottom child (0,25,160,24)
        let panes = vec![pane(0, 0, 80, 24), pane(81, 0, 80, 24), pane(0, 25, 160, 24)];
        let (tree, _) = build(panes);
        let tree = tree.unwrap();
        let commands = plan_splits(&tree, SizeMode::Default);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].direction, Direction::Bottom);
        assert_eq!(commands[1].direction, Direction::Right);
    }

    #[test]
    fn relative_sizes_are_proportions_of_post_split_span() {
        let panes = vec![pane(0, 0, 80, 24), pane(81, 0, 80, 24)];
        let (tree, _) = build(panes);
        let tree = tree.unwrap();
        let commands = plan_splits(&tree, SizeMode::Relative);
        match commands[0].size {
            Some(SplitSize::Relative(frac)) => assert!((frac - 0.5).abs() < 1e-9),
            other => panic!("expected a relative size, got {other:?}"),
        }
    }

    #[test]
    fn absolute_sizes_use_child_cell_counts() {
        let panes = vec![pane(0, 0, 80, 24), pane(0, 25, 80, 30)];
        let (tree, _) = build(panes);
        let tree = tree.unwrap();
        let commands = plan_splits(&tree, SizeMode::Absolute);
        assert_eq!(commands[0].size, Some(SplitSize::Absolute(30)));
    }

    #[test]
    fn every_command_names_an_already_produced_parent() {
        let panes = vec![pane(0, 0, 100, 48), pane(101, 0, 60, 24), pane(101, 25, 60, 24)];
        let (tree, _) = build(panes);
        let tree = tree.unwrap();
        let commands = plan_splits(&tree, SizeMode::Default);
        for (i, command) in commands.iter().enumerate() {
            assert!(command.parent_index <= i, "command {i} names a parent produced after it");
        }
    }

    /// A minimal flat-list replay: index 0 is the root pane, and index
    /// `i + 1` is the pane `commands[i]` creates. No tree-walking, just
    /// the commands applied in order against a growing `Vec`.
    struct ReplayedPane {
        cwd: String,
        right: Option<usize>,
        bottom: Option<usize>,
    }

    fn replay(root_cwd: &str, commands: &[SplitCommand]) -> Vec<ReplayedPane> {
        let mut panes = vec![ReplayedPane { cwd: root_cwd.to_string(), right: None, bottom: None }];
        for command in commands {
            let new_index = panes.len();
            panes.push(ReplayedPane { cwd: command.cwd.clone(), right: None, bottom: None });
            match command.direction {
                Direction::Right => panes[command.parent_index].right = Some(new_index),
                Direction::Bottom => panes[command.parent_index].bottom = Some(new_index),
            }
        }
        panes
    }

    fn same_shape(node: &PaneNode, replayed: &[ReplayedPane], index: usize) -> bool {
        let candidate = &replayed[index];
        if candidate.cwd != node.cwd {
            return false;
        }
        match (node.right.as_deref(), candidate.right) {
            (Some(r), Some(ri)) => {
                if !same_shape(r, replayed, ri) {
                    return false;
                }
            }
            (None, None) => {}
            _ => return false,
        }
        match (node.bottom.as_deref(), candidate.bottom) {
            (Some(b), Some(bi)) => same_shape(b, replayed, bi),
            (None, None) => true,
            _ => false,
        }
    }

    #[test]
    fn flat_command_list_replays_into_the_same_tree_shape() {
        let mut root = pane(0, 0, 53, 48);
        root.cwd = "/root".to_string();
        let mut middle = pane(54, 0, 53, 48);
        middle.cwd = "/middle".to_string();
        let mut last = pane(108, 0, 53, 48);
        last.cwd = "/last".to_string();
        let (tree, _) = build(vec![root, middle, last]);
        let tree = tree.unwrap();

        let commands = plan_splits(&tree, SizeMode::Default);
        let replayed = replay(&tree.cwd, &commands);

        assert!(same_shape(&tree, &replayed, 0));
    }
}
