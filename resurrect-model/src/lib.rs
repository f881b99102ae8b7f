mod encryption;
mod error;
mod event;
mod host;
mod state;

pub use encryption::EncryptionAdapter;
pub use error::{ResurrectError, Result};
pub use event::{EventSink, NullEventSink};
pub use host::{
    extract_raw_pane, Domain, MuxRoot, Pane, PaneDimensions, PositionedPane, PositionedTab,
    SpawnTabOptions, SpawnWindowOptions, SplitDirection, SplitSizeHint, Tab, TabId, Window,
    WindowId, PaneId,
};
pub use state::{detect_state_type, StateVariant, TabState, WindowSize, WindowState, WorkspaceState};
