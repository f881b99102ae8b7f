use pane_tree::{build, CaptureWarning};
use resurrect_model::{
    extract_raw_pane, Domain, MuxRoot, TabState, Window, WindowState, WorkspaceState,
};

/// Capture the active workspace: every window whose `workspace()` matches
/// `mux.active_workspace()`, each tab's pane tree built from the live
/// geometry, in window/tab order as reported by the host.
///
/// Non-spawnable-domain warnings produced while building a tab's tree
/// are logged at `warn` level and also returned, so a caller (or a test)
/// can assert on their content rather than only seeing them in the log.
pub fn capture_workspace(
    mux: &dyn MuxRoot,
    local_domain_name: &str,
    max_nlines: usize,
) -> (WorkspaceState, Vec<CaptureWarning>) {
    let active = mux.active_workspace();
    let mut window_states = Vec::new();
    let mut warnings = Vec::new();

    for window in mux.all_windows() {
        if window.workspace() != active {
            continue;
        }
        let (window_state, window_warnings) =
            capture_window(mux, window.as_ref(), local_domain_name, max_nlines);
        warnings.extend(window_warnings);
        window_states.push(window_state);
    }

    (WorkspaceState { workspace: active, window_states }, warnings)
}

fn capture_window(
    mux: &dyn MuxRoot,
    window: &dyn Window,
    local_domain_name: &str,
    max_nlines: usize,
) -> (WindowState, Vec<CaptureWarning>) {
    let positioned_tabs = window.tabs_with_info();
    let size = positioned_tabs
        .first()
        .map(|t| t.tab.size())
        .unwrap_or(resurrect_model::WindowSize { cols: 0, rows: 0, pixel_width: 0, pixel_height: 0 });

    let mut tabs = Vec::with_capacity(positioned_tabs.len());
    let mut warnings = Vec::new();

    for positioned_tab in positioned_tabs {
        let tab = positioned_tab.tab;
        let panes = tab.panes_with_info();
        let mut is_zoomed = false;
        let mut raw_panes = Vec::with_capacity(panes.len());
        for positioned in &panes {
            if positioned.is_zoomed {
                is_zoomed = true;
            }
            let is_spawnable = mux
                .get_domain(&positioned.pane.domain_name())
                .map(|d| d.is_spawnable())
                .unwrap_or(false);
            let raw = extract_raw_pane(
                positioned.pane.as_ref(),
                positioned,
                local_domain_name,
                is_spawnable,
                max_nlines,
            );
            raw_panes.push(raw);
        }
        let (tree, tab_warnings) = build(raw_panes);
        for warning in &tab_warnings {
            log::warn!("{warning}");
        }
        warnings.extend(tab_warnings);
        let pane_tree = tree.unwrap_or_else(empty_leaf);
        tabs.push(TabState {
            title: tab.title(),
            is_active: positioned_tab.is_active,
            is_zoomed,
            pane_tree,
        });
    }

    (WindowState { title: window.title(), size, tabs }, warnings)
}

fn empty_leaf() -> pane_tree::PaneNode {
    pane_tree::PaneNode {
        left: 0,
        top: 0,
        width: 0,
        height: 0,
        cwd: String::new(),
        domain: None,
        text: String::new(),
        process: None,
        is_active: true,
        is_zoomed: false,
        alt_screen_active: false,
        right: None,
        bottom: None,
    }
}
