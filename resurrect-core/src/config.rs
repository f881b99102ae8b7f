use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use pane_tree::SizeMode;
use resurrect_model::EncryptionAdapter;

/// Which split-size mode a restore should request.
///
/// `relative` and `absolute` are mutually exclusive knobs at the
/// configuration boundary (§6); resolving both to a single `SizeMode`
/// here keeps the rest of the crate from having to re-derive the
/// precedence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeOption {
    #[default]
    HostDefault,
    Relative,
    Absolute,
}

impl SizeOption {
    pub fn to_mode(self) -> SizeMode {
        match self {
            SizeOption::HostDefault => SizeMode::Default,
            SizeOption::Relative => SizeMode::Relative,
            SizeOption::Absolute => SizeMode::Absolute,
        }
    }
}

/// The configuration surface described at the core boundary.
#[derive(Clone)]
pub struct Config {
    pub state_dir: PathBuf,
    pub max_nlines: usize,
    pub interval_seconds: u64,
    pub save_workspaces: bool,
    pub save_windows: bool,
    pub save_tabs: bool,
    pub size_option: SizeOption,
    pub spawn_in_workspace: bool,
    pub resize_window: bool,
    pub restore_text: bool,
    pub close_open_tabs: bool,
    pub close_open_panes: bool,
    /// Optional seam for encrypting saved state at rest. `None` (the
    /// default) writes plain JSON; no implementation ships here, per
    /// the stated non-goal — a host embeds its own adapter.
    pub encryption: Option<Arc<dyn EncryptionAdapter>>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("state_dir", &self.state_dir)
            .field("max_nlines", &self.max_nlines)
            .field("interval_seconds", &self.interval_seconds)
            .field("save_workspaces", &self.save_workspaces)
            .field("save_windows", &self.save_windows)
            .field("save_tabs", &self.save_tabs)
            .field("size_option", &self.size_option)
            .field("spawn_in_workspace", &self.spawn_in_workspace)
            .field("resize_window", &self.resize_window)
            .field("restore_text", &self.restore_text)
            .field("close_open_tabs", &self.close_open_tabs)
            .field("close_open_panes", &self.close_open_panes)
            .field("encryption", &self.encryption.is_some())
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            state_dir: default_state_dir(),
            max_nlines: default_max_nlines(),
            interval_seconds: default_interval_seconds(),
            save_workspaces: true,
            save_windows: true,
            save_tabs: true,
            size_option: SizeOption::default(),
            spawn_in_workspace: true,
            resize_window: true,
            restore_text: true,
            close_open_tabs: false,
            close_open_panes: false,
            encryption: None,
        }
    }
}

fn default_state_dir() -> PathBuf {
    dirs_next_state_dir()
}

// Kept as its own function, rather than inlined, because a real
// deployment resolves this against the host's config directory; tests
// override `state_dir` directly and never call this.
fn dirs_next_state_dir() -> PathBuf {
    PathBuf::from(".resurrect")
}

fn default_max_nlines() -> usize {
    2000
}

fn default_interval_seconds() -> u64 {
    900
}
