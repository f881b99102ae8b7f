mod bus;
mod capture;
mod config;
mod guard;
mod restore;

pub use bus::{EventBus, Subscription};
pub use capture::capture_workspace;
pub use config::{Config, SizeOption};
pub use guard::{SaveGuard, SaveTicket};
pub use restore::{default_on_pane_restore, restore_tab, restore_workspace, OnPaneRestore, RestoreOptions};

use resurrect_model::{EventSink, MuxRoot};
use resurrect_store::{StateKind, Store};

/// Ties the event bus, the persistence layer, and the periodic-save
/// guard together behind the configuration surface. This is the object
/// a host binding owns and drives from its event loop.
pub struct Session {
    pub config: Config,
    pub bus: EventBus,
    pub store: Store,
    guard: SaveGuard,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let store = Store::new(config.state_dir.clone()).with_encryption(config.encryption.clone());
        Session { config, bus: EventBus::new(), store, guard: SaveGuard::new() }
    }

    /// Capture the active workspace and persist it, honoring
    /// `save_workspaces`/`save_windows`/`save_tabs`. Mirrors the level
    /// filtering periodic save applies: windows and tabs with an empty
    /// title are skipped, since an empty title can't round-trip to a
    /// stable filename a user would recognize.
    ///
    /// Returns any non-spawnable-domain warnings collected during
    /// capture, already logged at `warn` level, so a host binding can
    /// surface them to the user.
    pub fn capture_and_save(
        &self,
        mux: &dyn MuxRoot,
        local_domain_name: &str,
    ) -> anyhow::Result<Vec<pane_tree::CaptureWarning>> {
        let (workspace, warnings) = capture_workspace(mux, local_domain_name, self.config.max_nlines);

        if self.config.save_workspaces {
            self.store.write(StateKind::Workspace, &workspace.workspace, &workspace, &self.bus)?;
            self.store.write_current_state(&workspace.workspace, StateKind::Workspace)?;
        }

        if self.config.save_windows {
            for window in &workspace.window_states {
                if window.title.is_empty() {
                    continue;
                }
                self.store.write(StateKind::Window, &window.title, window, &self.bus)?;
            }
        }

        if self.config.save_tabs {
            for window in &workspace.window_states {
                for tab in &window.tabs {
                    if tab.title.is_empty() {
                        continue;
                    }
                    self.store.write(StateKind::Tab, &tab.title, tab, &self.bus)?;
                }
            }
        }

        Ok(warnings)
    }

    /// Run one periodic-save iteration if no other is in flight. Returns
    /// `false` without doing anything when a previous iteration is
    /// still running, per the single-flight guard.
    pub fn periodic_save(&self, mux: &dyn MuxRoot, local_domain_name: &str) -> anyhow::Result<bool> {
        let Some(_ticket) = self.guard.try_begin() else {
            return Ok(false);
        };

        self.bus.emit("state_manager.periodic_save.start", None);
        let result = self.capture_and_save(mux, local_domain_name);
        self.bus.emit("state_manager.periodic_save.finished", None);

        result.map(|_| true)
    }
}
