//! Geometry-driven pane split tree.
//!
//! Given a flat set of pane rectangles captured from a multiplexer tab,
//! [`build`] infers the binary tree of right/bottom splits that produced
//! them. Given such a tree, [`plan_splits`] walks it back into an ordered
//! sequence of split commands that recreate the same layout.
//!
//! Both directions are pure: no host calls, no I/O, no randomness.

use serde::{Deserialize, Serialize};

mod build;
mod restore;
mod traverse;

pub use build::{build, CaptureWarning};
pub use restore::{
    plan_splits, plan_splits_with_nodes, split_order, split_size, Direction, Order, SizeMode,
    SplitCommand, SplitSize,
};
pub use traverse::{fold, map};

/// A foreground process descriptor, captured without any volatile
/// per-invocation identifiers (no pid, no ppid, no live child list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub name: String,
    pub argv: Vec<String>,
    pub executable: String,
    pub cwd: String,
}

/// The extracted-but-not-yet-structured record for a single pane, as read
/// straight off the host. Panes arrive as a flat list; [`build`] is the
/// only thing that knows how to turn them into a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPane {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
    pub cwd: String,
    pub domain: String,
    pub is_spawnable: bool,
    pub text: String,
    pub process: Option<ProcessInfo>,
    pub is_active: bool,
    pub is_zoomed: bool,
    pub alt_screen_active: bool,
}

/// A node of the binary pane tree. All geometry fields describe this
/// node's own rectangle after every descendant split has taken place.
///
/// `right` is the pane reached by a rightward split from this one;
/// `bottom` is the pane reached by a downward split. A leaf has neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneNode {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub cwd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<ProcessInfo>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_zoomed: bool,
    #[serde(default)]
    pub alt_screen_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<PaneNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Box<PaneNode>>,
}

impl PaneNode {
    /// True when neither `right` nor `bottom` is populated.
    pub fn is_leaf(&self) -> bool {
        self.right.is_none() && self.bottom.is_none()
    }

    fn from_raw(raw: &RawPane) -> (Self, Option<CaptureWarning>) {
        let (domain, warning) = if raw.is_spawnable {
            (Some(raw.domain.clone()), None)
        } else {
            (None, Some(CaptureWarning { domain: raw.domain.clone() }))
        };
        let node = PaneNode {
            left: raw.left,
            top: raw.top,
            width: raw.width,
            height: raw.height,
            cwd: raw.cwd.clone(),
            domain,
            text: raw.text.clone(),
            process: raw.process.clone(),
            is_active: raw.is_active,
            is_zoomed: raw.is_zoomed,
            alt_screen_active: raw.alt_screen_active,
            right: None,
            bottom: None,
        };
        (node, warning)
    }
}
