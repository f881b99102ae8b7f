use pane_tree::PaneNode;
use serde::{Deserialize, Serialize};

use crate::error::ResurrectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub cols: usize,
    pub rows: usize,
    pub pixel_width: usize,
    pub pixel_height: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabState {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_zoomed: bool,
    pub pane_tree: PaneNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    #[serde(default)]
    pub title: String,
    pub size: WindowSize,
    pub tabs: Vec<TabState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceState {
    pub workspace: String,
    pub window_states: Vec<WindowState>,
}

/// The tagged union a decoded JSON blob resolves to. The host's own Lua
/// plugin layer distinguishes workspace/window/tab values by which field
/// is present (`window_states`, `tabs`, `pane_tree`); this is the
/// systems-language equivalent of that duck-typing.
#[derive(Debug, Clone, PartialEq)]
pub enum StateVariant {
    Workspace(WorkspaceState),
    Window(WindowState),
    Tab(TabState),
}

impl StateVariant {
    pub fn type_name(&self) -> &'static str {
        match self {
            StateVariant::Workspace(_) => "workspace",
            StateVariant::Window(_) => "window",
            StateVariant::Tab(_) => "tab",
        }
    }

    /// Best-effort name to derive a filename from: the workspace name,
    /// the window title, or the tab title. Empty titles resolve via the
    /// filename sanitizer's own fallback, not here.
    pub fn name(&self) -> Option<&str> {
        match self {
            StateVariant::Workspace(w) => Some(&w.workspace),
            StateVariant::Window(w) => Some(&w.title),
            StateVariant::Tab(t) => Some(&t.title),
        }
    }
}

/// Inspect a decoded JSON value for the field that identifies its shape,
/// lenient about unknown extra fields (round-tripped but not validated),
/// strict about the shape-identifying fields' presence.
pub fn detect_state_type(value: &serde_json::Value) -> Result<StateVariant, ResurrectError> {
    let obj = value
        .as_object()
        .ok_or(ResurrectError::UnknownStateType)?;

    if obj.contains_key("window_states") {
        let state: WorkspaceState =
            serde_json::from_value(value.clone()).map_err(ResurrectError::SerializationFailure)?;
        Ok(StateVariant::Workspace(state))
    } else if obj.contains_key("tabs") {
        let state: WindowState =
            serde_json::from_value(value.clone()).map_err(ResurrectError::SerializationFailure)?;
        Ok(StateVariant::Window(state))
    } else if obj.contains_key("pane_tree") {
        let state: TabState =
            serde_json::from_value(value.clone()).map_err(ResurrectError::SerializationFailure)?;
        Ok(StateVariant::Tab(state))
    } else {
        Err(ResurrectError::UnknownStateType)
    }
}
