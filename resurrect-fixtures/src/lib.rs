//! A fake terminal multiplexer satisfying the `resurrect-model` host
//! capability contract, for use in tests that exercise capture and
//! restore without a real multiplexer backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use pane_tree::ProcessInfo;
use resurrect_model::{
    Domain, MuxRoot, Pane, PaneDimensions, PaneId, PositionedPane, PositionedTab, SpawnTabOptions,
    SpawnWindowOptions, SplitDirection, SplitSizeHint, Tab, TabId, Window, WindowId, WindowSize,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

pub struct FakeDomain {
    name: String,
    spawnable: bool,
}

impl FakeDomain {
    pub fn new(name: impl Into<String>, spawnable: bool) -> Arc<Self> {
        Arc::new(FakeDomain { name: name.into(), spawnable })
    }
}

impl Domain for FakeDomain {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_spawnable(&self) -> bool {
        self.spawnable
    }
}

pub struct FakePane {
    id: PaneId,
    domain: Mutex<String>,
    cwd: Mutex<Option<String>>,
    alt_screen: Mutex<bool>,
    process: Mutex<Option<ProcessInfo>>,
    scrollback: Mutex<String>,
    owner: Mutex<Weak<FakeTab>>,
    pub sent: Mutex<Vec<String>>,
    pub injected: Mutex<Vec<String>>,
    pub activated: Mutex<bool>,
}

impl FakePane {
    pub fn new(domain: impl Into<String>) -> Arc<Self> {
        Arc::new(FakePane {
            id: next_id(),
            domain: Mutex::new(domain.into()),
            cwd: Mutex::new(None),
            alt_screen: Mutex::new(false),
            process: Mutex::new(None),
            scrollback: Mutex::new(String::new()),
            owner: Mutex::new(Weak::new()),
            sent: Mutex::new(Vec::new()),
            injected: Mutex::new(Vec::new()),
            activated: Mutex::new(false),
        })
    }

    pub fn with_cwd(self: &Arc<Self>, cwd: impl Into<String>) -> Arc<Self> {
        *self.cwd.lock() = Some(cwd.into());
        Arc::clone(self)
    }

    pub fn with_scrollback(self: &Arc<Self>, text: impl Into<String>) -> Arc<Self> {
        *self.scrollback.lock() = text.into();
        Arc::clone(self)
    }

    pub fn with_alt_screen(self: &Arc<Self>, process: ProcessInfo) -> Arc<Self> {
        *self.alt_screen.lock() = true;
        *self.process.lock() = Some(process);
        Arc::clone(self)
    }

    fn set_owner(&self, tab: &Arc<FakeTab>) {
        *self.owner.lock() = Arc::downgrade(tab);
    }
}

impl Pane for FakePane {
    fn id(&self) -> PaneId {
        self.id
    }

    fn domain_name(&self) -> String {
        self.domain.lock().clone()
    }

    fn cwd(&self) -> Option<String> {
        self.cwd.lock().clone()
    }

    fn is_alt_screen_active(&self) -> bool {
        *self.alt_screen.lock()
    }

    fn foreground_process_info(&self) -> Option<ProcessInfo> {
        self.process.lock().clone()
    }

    fn dimensions(&self) -> PaneDimensions {
        PaneDimensions { scrollback_rows: 0, cols: 80, rows: 24 }
    }

    fn scrollback_as_escapes(&self, _max_rows: usize) -> String {
        self.scrollback.lock().clone()
    }

    fn split(
        &self,
        _direction: SplitDirection,
        cwd: Option<String>,
        domain: Option<String>,
        _size: Option<SplitSizeHint>,
    ) -> anyhow::Result<Arc<dyn Pane>> {
        let child = FakePane::new(domain.unwrap_or_else(|| self.domain.lock().clone()));
        if let Some(cwd) = cwd {
            *child.cwd.lock() = Some(cwd);
        }
        let owner = self.owner.lock().upgrade();
        if let Some(tab) = owner {
            child.set_owner(&tab);
            tab.push_pane(Arc::clone(&child), false, false, 0, 0, 0, 0);
        }
        Ok(child)
    }

    fn send_text(&self, text: &str) {
        self.sent.lock().push(text.to_string());
    }

    fn inject_output(&self, text: &str) {
        self.injected.lock().push(text.to_string());
    }

    fn activate(&self) {
        *self.activated.lock() = true;
    }
}

struct PaneRecord {
    pane: Arc<FakePane>,
    is_active: bool,
    is_zoomed: bool,
    left: usize,
    top: usize,
    width: usize,
    height: usize,
}

pub struct FakeTab {
    id: TabId,
    title: Mutex<String>,
    zoomed: Mutex<bool>,
    size: Mutex<WindowSize>,
    panes: Mutex<Vec<PaneRecord>>,
}

impl FakeTab {
    pub fn new(title: impl Into<String>) -> Arc<Self> {
        Arc::new(FakeTab {
            id: next_id(),
            title: Mutex::new(title.into()),
            zoomed: Mutex::new(false),
            size: Mutex::new(WindowSize { cols: 80, rows: 24, pixel_width: 800, pixel_height: 600 }),
            panes: Mutex::new(Vec::new()),
        })
    }

    pub fn add_pane(
        self: &Arc<Self>,
        pane: Arc<FakePane>,
        is_active: bool,
        is_zoomed: bool,
        left: usize,
        top: usize,
        width: usize,
        height: usize,
    ) {
        pane.set_owner(self);
        self.push_pane(pane, is_active, is_zoomed, left, top, width, height);
    }

    fn push_pane(
        &self,
        pane: Arc<FakePane>,
        is_active: bool,
        is_zoomed: bool,
        left: usize,
        top: usize,
        width: usize,
        height: usize,
    ) {
        self.panes.lock().push(PaneRecord { pane, is_active, is_zoomed, left, top, width, height });
    }

    pub fn pane_count(&self) -> usize {
        self.panes.lock().len()
    }

    pub fn is_zoomed(&self) -> bool {
        *self.zoomed.lock()
    }
}

impl Tab for FakeTab {
    fn id(&self) -> TabId {
        self.id
    }

    fn title(&self) -> String {
        self.title.lock().clone()
    }

    fn set_title(&self, title: &str) {
        *self.title.lock() = title.to_string();
    }

    fn panes_with_info(&self) -> Vec<PositionedPane> {
        self.panes
            .lock()
            .iter()
            .map(|record| PositionedPane {
                pane: record.pane.clone() as Arc<dyn Pane>,
                is_active: record.is_active,
                is_zoomed: record.is_zoomed,
                left: record.left,
                top: record.top,
                width: record.width,
                height: record.height,
            })
            .collect()
    }

    fn size(&self) -> WindowSize {
        *self.size.lock()
    }

    fn set_zoomed(&self, zoomed: bool) {
        *self.zoomed.lock() = zoomed;
    }

    fn close_pane(&self, pane_id: PaneId) {
        self.panes.lock().retain(|record| record.pane.id() != pane_id);
    }
}

pub struct FakeWindow {
    id: WindowId,
    title: Mutex<String>,
    workspace: Mutex<String>,
    tabs: Mutex<Vec<Arc<FakeTab>>>,
    active_tab_index: Mutex<usize>,
}

impl FakeWindow {
    pub fn new(workspace: impl Into<String>, title: impl Into<String>) -> Arc<Self> {
        Arc::new(FakeWindow {
            id: next_id(),
            title: Mutex::new(title.into()),
            workspace: Mutex::new(workspace.into()),
            tabs: Mutex::new(Vec::new()),
            active_tab_index: Mutex::new(0),
        })
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn add_tab(self: &Arc<Self>, tab: Arc<FakeTab>) {
        self.tabs.lock().push(tab);
    }

    pub fn set_active_tab(&self, index: usize) {
        *self.active_tab_index.lock() = index;
    }
}

impl Window for FakeWindow {
    fn title(&self) -> String {
        self.title.lock().clone()
    }

    fn workspace(&self) -> String {
        self.workspace.lock().clone()
    }

    fn tabs_with_info(&self) -> Vec<PositionedTab> {
        let active = *self.active_tab_index.lock();
        self.tabs
            .lock()
            .iter()
            .enumerate()
            .map(|(index, tab)| PositionedTab { tab: tab.clone() as Arc<dyn Tab>, is_active: index == active })
            .collect()
    }

    fn spawn_tab(&self, opts: SpawnTabOptions) -> anyhow::Result<(Arc<dyn Tab>, Arc<dyn Pane>)> {
        let tab = FakeTab::new("");
        let pane = FakePane::new(opts.domain.unwrap_or_else(|| "local".to_string()));
        if let Some(cwd) = opts.cwd {
            *pane.cwd.lock() = Some(cwd);
        }
        tab.add_pane(Arc::clone(&pane), true, false, 0, 0, 80, 24);
        self.tabs.lock().push(Arc::clone(&tab));
        Ok((tab as Arc<dyn Tab>, pane as Arc<dyn Pane>))
    }

    fn active_tab(&self) -> Option<Arc<dyn Tab>> {
        let active = *self.active_tab_index.lock();
        self.tabs.lock().get(active).map(|t| t.clone() as Arc<dyn Tab>)
    }

    fn close_tab(&self, tab_id: TabId) {
        self.tabs.lock().retain(|tab| tab.id() != tab_id);
    }
}

pub struct FakeMux {
    active_workspace: Mutex<String>,
    windows: Mutex<Vec<Arc<FakeWindow>>>,
    domains: Mutex<HashMap<String, Arc<FakeDomain>>>,
}

impl FakeMux {
    pub fn new(active_workspace: impl Into<String>) -> Arc<Self> {
        let mux = Arc::new(FakeMux {
            active_workspace: Mutex::new(active_workspace.into()),
            windows: Mutex::new(Vec::new()),
            domains: Mutex::new(HashMap::new()),
        });
        mux.domains.lock().insert("local".to_string(), FakeDomain::new("local", true));
        mux
    }

    pub fn register_domain(&self, domain: Arc<FakeDomain>) {
        self.domains.lock().insert(domain.name(), domain);
    }

    pub fn add_window(&self, window: Arc<FakeWindow>) {
        self.windows.lock().push(window);
    }
}

impl MuxRoot for FakeMux {
    fn active_workspace(&self) -> String {
        self.active_workspace.lock().clone()
    }

    fn all_windows(&self) -> Vec<Arc<dyn Window>> {
        self.windows.lock().iter().map(|w| w.clone() as Arc<dyn Window>).collect()
    }

    fn spawn_window(&self, opts: SpawnWindowOptions) -> anyhow::Result<(Arc<dyn Tab>, Arc<dyn Pane>, Arc<dyn Window>)> {
        let workspace = opts.workspace.unwrap_or_else(|| self.active_workspace());
        let window = FakeWindow::new(workspace, "");
        let tab = FakeTab::new("");
        let pane = FakePane::new("local");
        if let Some(cwd) = opts.cwd {
            *pane.cwd.lock() = Some(cwd);
        }
        if let (Some(cols), Some(rows)) = (opts.width, opts.height) {
            *tab.size.lock() = WindowSize { cols, rows, pixel_width: cols * 10, pixel_height: rows * 20 };
        }
        tab.add_pane(Arc::clone(&pane), true, false, 0, 0, 80, 24);
        window.add_tab(Arc::clone(&tab));
        self.windows.lock().push(Arc::clone(&window));
        Ok((tab as Arc<dyn Tab>, pane as Arc<dyn Pane>, window as Arc<dyn Window>))
    }

    fn get_domain(&self, name: &str) -> Option<Arc<dyn Domain>> {
        self.domains.lock().get(name).map(|d| Arc::clone(d) as Arc<dyn Domain>)
    }

    fn set_active_workspace(&self, name: &str) {
        *self.active_workspace.lock() = name.to_string();
    }
}
