//! The capability set the core needs from a host terminal multiplexer.
//!
//! This is the *only* boundary through which host operations are
//! invoked; everything else in this workspace is pure. A test fake that
//! implements this trait set satisfies the full contract, the same way
//! the host's own mux layer is driven through a handful of traits
//! (`Domain`, `Pane`) regardless of whether the pane is local, SSH, or
//! WSL-backed.

use std::sync::Arc;

use pane_tree::{ProcessInfo, RawPane};

use crate::state::WindowSize;

pub type PaneId = u64;
pub type TabId = u64;
pub type WindowId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    Right,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitSizeHint {
    Relative(f64),
    Absolute(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneDimensions {
    pub scrollback_rows: usize,
    pub cols: usize,
    pub rows: usize,
}

/// The host's routing namespace for a pane: local process vs. a remote
/// session (ssh, wsl, ...).
pub trait Domain {
    fn name(&self) -> String;
    fn is_spawnable(&self) -> bool;
}

pub trait Pane {
    fn id(&self) -> PaneId;
    fn domain_name(&self) -> String;
    fn cwd(&self) -> Option<String>;
    fn is_alt_screen_active(&self) -> bool;
    fn foreground_process_info(&self) -> Option<ProcessInfo>;
    fn dimensions(&self) -> PaneDimensions;
    fn scrollback_as_escapes(&self, max_rows: usize) -> String;
    fn split(
        &self,
        direction: SplitDirection,
        cwd: Option<String>,
        domain: Option<String>,
        size: Option<SplitSizeHint>,
    ) -> anyhow::Result<Arc<dyn Pane>>;
    fn send_text(&self, text: &str);
    fn inject_output(&self, text: &str);
    fn activate(&self);
}

pub struct PositionedPane {
    pub pane: Arc<dyn Pane>,
    pub is_active: bool,
    pub is_zoomed: bool,
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

pub trait Tab {
    fn id(&self) -> TabId;
    fn title(&self) -> String;
    fn set_title(&self, title: &str);
    fn panes_with_info(&self) -> Vec<PositionedPane>;
    fn size(&self) -> WindowSize;
    fn set_zoomed(&self, zoomed: bool);
    /// Close one of this tab's panes. Used to drop panes that existed in
    /// a target tab before restore populated it, when configured to do so.
    fn close_pane(&self, pane_id: PaneId);
}

pub struct PositionedTab {
    pub tab: Arc<dyn Tab>,
    pub is_active: bool,
}

pub struct SpawnTabOptions {
    pub cwd: Option<String>,
    pub domain: Option<String>,
}

pub trait Window {
    fn title(&self) -> String;
    fn workspace(&self) -> String;
    fn tabs_with_info(&self) -> Vec<PositionedTab>;
    fn spawn_tab(&self, opts: SpawnTabOptions) -> anyhow::Result<(Arc<dyn Tab>, Arc<dyn Pane>)>;
    fn active_tab(&self) -> Option<Arc<dyn Tab>>;
    /// Close one of this window's tabs. Used to drop tabs that existed
    /// before restore spawned its own, when configured to do so.
    fn close_tab(&self, tab_id: TabId);
}

pub struct SpawnWindowOptions {
    pub workspace: Option<String>,
    pub cwd: Option<String>,
    pub width: Option<usize>,
    pub height: Option<usize>,
}

pub trait MuxRoot {
    fn active_workspace(&self) -> String;
    fn all_windows(&self) -> Vec<Arc<dyn Window>>;
    fn spawn_window(
        &self,
        opts: SpawnWindowOptions,
    ) -> anyhow::Result<(Arc<dyn Tab>, Arc<dyn Pane>, Arc<dyn Window>)>;
    fn get_domain(&self, name: &str) -> Option<Arc<dyn Domain>>;
    fn set_active_workspace(&self, name: &str);
}

/// Strip a leading `/C:`-style Windows-mingling prefix (as produced by
/// some PTY backends that prepend a POSIX-style root to a drive path)
/// down to the plain `C:` form.
fn strip_windows_mingle_prefix(cwd: &str) -> String {
    let bytes = cwd.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':' {
        cwd[1..].to_string()
    } else {
        cwd.to_string()
    }
}

/// Extract a [`RawPane`] from a single positioned pane, applying the
/// scrollback/process capture rules:
///
/// - non-local or non-spawnable domains never yield scrollback or
///   process info (it cannot be reinjected there on restore);
/// - an alt-screen-active pane yields its foreground process info, not
///   scrollback text (alt-screen content cannot be replayed as history);
/// - otherwise, scrollback text up to `max_lines` rows is captured.
pub fn extract_raw_pane(
    pane: &dyn Pane,
    positioned: &PositionedPane,
    local_domain_name: &str,
    is_spawnable: bool,
    max_lines: usize,
) -> RawPane {
    let domain = pane.domain_name();
    let cwd = pane
        .cwd()
        .map(|c| strip_windows_mingle_prefix(&c))
        .unwrap_or_default();
    let alt_screen_active = pane.is_alt_screen_active();
    let can_capture = domain == local_domain_name && is_spawnable;

    let (text, process) = if !can_capture {
        (String::new(), None)
    } else if alt_screen_active {
        (String::new(), pane.foreground_process_info())
    } else {
        (pane.scrollback_as_escapes(max_lines), None)
    };

    RawPane {
        left: positioned.left,
        top: positioned.top,
        width: positioned.width,
        height: positioned.height,
        cwd,
        domain,
        is_spawnable,
        text,
        process,
        is_active: positioned.is_active,
        is_zoomed: positioned.is_zoomed,
        alt_screen_active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePane {
        domain: String,
        cwd: Option<String>,
        alt_screen: bool,
        process: Option<ProcessInfo>,
        text: String,
    }

    impl Pane for FakePane {
        fn id(&self) -> PaneId {
            1
        }
        fn domain_name(&self) -> String {
            self.domain.clone()
        }
        fn cwd(&self) -> Option<String> {
            self.cwd.clone()
        }
        fn is_alt_screen_active(&self) -> bool {
            self.alt_screen
        }
        fn foreground_process_info(&self) -> Option<ProcessInfo> {
            self.process.clone()
        }
        fn dimensions(&self) -> PaneDimensions {
            PaneDimensions { scrollback_rows: 0, cols: 80, rows: 24 }
        }
        fn scrollback_as_escapes(&self, _max_rows: usize) -> String {
            self.text.clone()
        }
        fn split(
            &self,
            _direction: SplitDirection,
            _cwd: Option<String>,
            _domain: Option<String>,
            _size: Option<SplitSizeHint>,
        ) -> anyhow::Result<Arc<dyn Pane>> {
            anyhow::bail!("not used in these tests")
        }
        fn send_text(&self, _text: &str) {}
        fn inject_output(&self, _text: &str) {}
        fn activate(&self) {}
    }

    fn positioned(pane: Arc<dyn Pane>) -> PositionedPane {
        PositionedPane {
            pane,
            is_active: true,
            is_zoomed: false,
            left: 0,
            top: 0,
            width: 80,
            height: 24,
        }
    }

    #[test]
    fn windows_mingle_prefix_is_stripped() {
        assert_eq!(strip_windows_mingle_prefix("/C:/Users/foo"), "C:/Users/foo");
        assert_eq!(strip_windows_mingle_prefix("/home/foo"), "/home/foo");
    }

    #[test]
    fn alt_screen_pane_captures_process_not_text() {
        let pane: Arc<dyn Pane> = Arc::new(FakePane {
            domain: "local".to_string(),
            cwd: Some("/project".to_string()),
            alt_screen: true,
            process: Some(ProcessInfo {
                name: "vim".to_string(),
                argv: vec!["vim".to_string()],
                executable: "/usr/bin/vim".to_string(),
                cwd: "/project".to_string(),
            }),
            text: "should not appear".to_string(),
        });
        let p = positioned(Arc::clone(&pane));
        let raw = extract_raw_pane(pane.as_ref(), &p, "local", true, 2000);
        assert_eq!(raw.text, "");
        assert!(raw.process.is_some());
    }

    #[test]
    fn non_alt_screen_pane_captures_text_not_process() {
        let pane: Arc<dyn Pane> = Arc::new(FakePane {
            domain: "local".to_string(),
            cwd: Some("/project".to_string()),
            alt_screen: false,
            process: Some(ProcessInfo {
                name: "bash".to_string(),
                argv: vec![],
                executable: String::new(),
                cwd: String::new(),
            }),
            text: "$ ls\nfile1.txt\n$ ".to_string(),
        });
        let p = positioned(Arc::clone(&pane));
        let raw = extract_raw_pane(pane.as_ref(), &p, "local", true, 2000);
        assert_eq!(raw.text, "$ ls\nfile1.txt\n$ ");
        assert!(raw.process.is_none());
    }

    #[test]
    fn remote_domain_captures_neither() {
        let pane: Arc<dyn Pane> = Arc::new(FakePane {
            domain: "SSHMUX:host".to_string(),
            cwd: Some("/home/user".to_string()),
            alt_screen: false,
            process: None,
            text: "remote scrollback".to_string(),
        });
        let p = positioned(Arc::clone(&pane));
        let raw = extract_raw_pane(pane.as_ref(), &p, "local", true, 2000);
        assert_eq!(raw.text, "");
        assert!(raw.process.is_none());
    }

    #[test]
    fn non_spawnable_local_domain_captures_neither() {
        let pane: Arc<dyn Pane> = Arc::new(FakePane {
            domain: "local".to_string(),
            cwd: Some("/home/user".to_string()),
            alt_screen: false,
            process: None,
            text: "text".to_string(),
        });
        let p = positioned(Arc::clone(&pane));
        let raw = extract_raw_pane(pane.as_ref(), &p, "local", false, 2000);
        assert_eq!(raw.text, "");
    }
}
