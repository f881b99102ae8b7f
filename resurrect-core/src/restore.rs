use std::sync::Arc;

use anyhow::bail;
use pane_tree::{plan_splits_with_nodes, Direction, PaneNode, SizeMode};
use resurrect_model::{
    EventSink, MuxRoot, Pane, SpawnTabOptions, SpawnWindowOptions, SplitDirection, SplitSizeHint,
    Tab, TabState, Window, WindowState, WorkspaceState,
};

use crate::config::SizeOption;

/// Callback invoked once a live pane has been bound to a tree node, so
/// a caller can reinject scrollback/process state as it sees fit.
/// [`default_on_pane_restore`] is the implementation used when no
/// override is supplied.
pub type OnPaneRestore<'a> = dyn Fn(&PaneNode, &dyn Pane) + 'a;

pub struct RestoreOptions<'a> {
    pub size_option: SizeOption,
    pub spawn_in_workspace: bool,
    pub resize_window: bool,
    pub restore_text: bool,
    pub close_open_tabs: bool,
    pub close_open_panes: bool,
    pub on_pane_restore: Option<&'a OnPaneRestore<'a>>,
}

impl<'a> Default for RestoreOptions<'a> {
    fn default() -> Self {
        RestoreOptions {
            size_option: SizeOption::default(),
            spawn_in_workspace: true,
            resize_window: true,
            restore_text: true,
            close_open_tabs: false,
            close_open_panes: false,
            on_pane_restore: None,
        }
    }
}

/// Relaunch the foreground program (when the pane was alt-screen-active
/// and a process was captured), or otherwise reinject scrollback text
/// with trailing whitespace trimmed.
pub fn default_on_pane_restore(node: &PaneNode, pane: &dyn Pane) {
    if node.alt_screen_active {
        if let Some(process) = &node.process {
            let mut line = process.argv.join(" ");
            line.push('\r');
            pane.send_text(&line);
            return;
        }
    }
    let trimmed = node.text.trim_end();
    if !trimmed.is_empty() {
        pane.inject_output(trimmed);
    }
}

fn to_split_size_hint(size: Option<pane_tree::SplitSize>) -> Option<SplitSizeHint> {
    size.map(|s| match s {
        pane_tree::SplitSize::Relative(f) => SplitSizeHint::Relative(f),
        pane_tree::SplitSize::Absolute(n) => SplitSizeHint::Absolute(n),
    })
}

fn to_split_direction(direction: Direction) -> SplitDirection {
    match direction {
        Direction::Right => SplitDirection::Right,
        Direction::Bottom => SplitDirection::Bottom,
    }
}

fn subtree_has_zoomed(node: &PaneNode) -> bool {
    if node.is_zoomed {
        return true;
    }
    node.right.as_deref().is_some_and(subtree_has_zoomed)
        || node.bottom.as_deref().is_some_and(subtree_has_zoomed)
}

/// Restore a single tab onto a live host `Tab`, whose initial pane is
/// `initial_pane` (the pane a freshly spawned tab starts with).
///
/// Driven entirely by `pane_tree::plan_splits_with_nodes`: the flat
/// command list is applied in order against a growing list of live
/// panes (`panes[0]` is `initial_pane`; `panes[i + 1]` is the pane
/// `commands[i]` produces), with `nodes[i]` zipped alongside each
/// command to carry the scrollback/process/flag data a `SplitCommand`
/// itself doesn't.
///
/// `is_active_tab` gates whether this tab's own `is_active` pane is
/// actually brought to the front — only one tab per window should end
/// up focused, and that decision belongs to the caller iterating the
/// window's tabs, not to this function.
pub fn restore_tab(
    tab: &dyn Tab,
    tab_state: &TabState,
    initial_pane: Arc<dyn Pane>,
    is_active_tab: bool,
    opts: &RestoreOptions,
    sink: &dyn EventSink,
) -> anyhow::Result<()> {
    sink.emit("tab_state.restore_tab.start", Some(&tab_state.title));

    let default_cb: &OnPaneRestore = &default_on_pane_restore;
    let on_pane_restore = opts.on_pane_restore.unwrap_or(default_cb);
    let mode = opts.size_option.to_mode();

    on_pane_restore(&tab_state.pane_tree, initial_pane.as_ref());
    let mut active_pane = if tab_state.pane_tree.is_active { Some(Arc::clone(&initial_pane)) } else { None };

    let (commands, nodes) = plan_splits_with_nodes(&tab_state.pane_tree, mode);
    let mut panes: Vec<Arc<dyn Pane>> = vec![initial_pane];
    let mut result: anyhow::Result<()> = Ok(());

    for (command, node) in commands.iter().zip(nodes.iter()) {
        let parent = Arc::clone(&panes[command.parent_index]);
        let size = to_split_size_hint(command.size);
        let cwd = if command.cwd.is_empty() { None } else { Some(command.cwd.clone()) };
        match parent.split(to_split_direction(command.direction), cwd, command.domain.clone(), size) {
            Ok(child_pane) => {
                on_pane_restore(node, child_pane.as_ref());
                if node.is_active {
                    active_pane = Some(Arc::clone(&child_pane));
                }
                panes.push(child_pane);
            }
            Err(err) => {
                result = Err(err.context(format!("splitting pane for a {:?} child", command.direction)));
                break;
            }
        }
    }

    if result.is_ok() {
        if is_active_tab {
            if let Some(pane) = &active_pane {
                pane.activate();
            }
        }
    } else if let Err(err) = &result {
        log::error!("failed to restore tab {:?}: {err}", tab_state.title);
        sink.emit("resurrect.error", Some(&err.to_string()));
    }

    if subtree_has_zoomed(&tab_state.pane_tree) {
        tab.set_zoomed(true);
    }
    tab.set_title(&tab_state.title);

    sink.emit("tab_state.restore_tab.finished", Some(&tab_state.title));
    result
}

/// Restore a single window: spawn it, then restore each of its tabs
/// (the first tab reuses the window's initial tab/pane; the rest are
/// spawned fresh). Only the tab flagged `is_active` in `window_state`
/// is brought to the front.
///
/// When `close_open_tabs`/`close_open_panes` are set, tabs/panes that
/// existed before this restore populated the window/tab (the window's
/// own initial tab and that tab's own initial pane are never among
/// them) are closed once restore is done with them.
fn restore_window(
    mux: &dyn MuxRoot,
    window_state: &WindowState,
    opts: &RestoreOptions,
    sink: &dyn EventSink,
) -> anyhow::Result<()> {
    sink.emit("window_state.restore_window.start", Some(&window_state.title));

    let spawn_opts = SpawnWindowOptions {
        workspace: None,
        cwd: window_state
            .tabs
            .first()
            .map(|t| t.pane_tree.cwd.clone())
            .filter(|c| !c.is_empty()),
        width: if opts.resize_window { Some(window_state.size.cols) } else { None },
        height: if opts.resize_window { Some(window_state.size.rows) } else { None },
    };
    let (first_tab, first_pane, window) = mux.spawn_window(spawn_opts)?;

    let stale_tab_ids: Vec<_> = if opts.close_open_tabs {
        window
            .tabs_with_info()
            .into_iter()
            .map(|positioned| positioned.tab.id())
            .filter(|id| *id != first_tab.id())
            .collect()
    } else {
        Vec::new()
    };

    for (index, tab_state) in window_state.tabs.iter().enumerate() {
        let (tab, pane): (Arc<dyn Tab>, Arc<dyn Pane>) = if index == 0 {
            (Arc::clone(&first_tab), Arc::clone(&first_pane))
        } else {
            window.spawn_tab(SpawnTabOptions {
                cwd: Some(tab_state.pane_tree.cwd.clone()).filter(|c| !c.is_empty()),
                domain: tab_state.pane_tree.domain.clone(),
            })?
        };

        let stale_pane_ids: Vec<_> = if opts.close_open_panes {
            tab.panes_with_info()
                .into_iter()
                .map(|positioned| positioned.pane.id())
                .filter(|id| *id != pane.id())
                .collect()
        } else {
            Vec::new()
        };

        restore_tab(tab.as_ref(), tab_state, pane, tab_state.is_active, opts, sink)?;

        for pane_id in stale_pane_ids {
            tab.close_pane(pane_id);
        }
    }

    for tab_id in stale_tab_ids {
        window.close_tab(tab_id);
    }

    sink.emit("window_state.restore_window.finished", Some(&window_state.title));
    Ok(())
}

/// Restore a captured workspace. Aborts (emitting `resurrect.error`)
/// when the state is empty, per the propagation policy: this is an
/// expected failure mode, reported rather than panicked on.
pub fn restore_workspace(
    mux: &dyn MuxRoot,
    state: &WorkspaceState,
    opts: &RestoreOptions,
    sink: &dyn EventSink,
) -> anyhow::Result<()> {
    sink.emit("workspace_state.restore_workspace.start", Some(&state.workspace));

    if state.window_states.is_empty() {
        log::error!("workspace {:?} has no windows to restore", state.workspace);
        sink.emit("resurrect.error", Some("workspace state has no windows to restore"));
        bail!("workspace state has no windows to restore");
    }

    for window_state in &state.window_states {
        restore_window(mux, window_state, opts, sink)?;
    }

    if opts.spawn_in_workspace {
        mux.set_active_workspace(&state.workspace);
    }

    sink.emit("workspace_state.restore_workspace.finished", Some(&state.workspace));
    Ok(())
}
