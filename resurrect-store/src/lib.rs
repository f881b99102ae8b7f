mod sanitize;
mod store;

pub use sanitize::sanitize_filename;
pub use store::{StateKind, Store};

#[cfg(test)]
mod tests {
    use super::*;
    use resurrect_model::NullEventSink;
    use serde::{Deserialize, Serialize};
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Dummy {
        value: u32,
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        let sink = NullEventSink;
        store
            .write(StateKind::Workspace, "my project", &Dummy { value: 42 }, &sink)
            .unwrap();

        let path = dir.path().join("workspace").join("my+project.json");
        assert!(path.exists());

        let loaded: Dummy = store.read(StateKind::Workspace, "my project", &sink).unwrap();
        assert_eq!(loaded, Dummy { value: 42 });
    }

    #[test]
    fn read_of_missing_file_returns_none() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        let sink = NullEventSink;
        let loaded: Option<Dummy> = store.read(StateKind::Tab, "nope", &sink);
        assert!(loaded.is_none());
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        let sink = NullEventSink;
        store.write(StateKind::Window, "w1", &Dummy { value: 1 }, &sink).unwrap();
        store.delete(StateKind::Window, "w1", &sink).unwrap();
        let loaded: Option<Dummy> = store.read(StateKind::Window, "w1", &sink);
        assert!(loaded.is_none());
    }

    #[test]
    fn current_state_round_trips() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        store.write_current_state("default", StateKind::Workspace).unwrap();
        let (name, kind) = store.read_current_state().unwrap();
        assert_eq!(name, "default");
        assert_eq!(kind, StateKind::Workspace);
    }

    #[test]
    fn current_state_with_unknown_type_is_none() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("current_state"), "default\nbogus\n").unwrap();
        let store = Store::new(dir.path());
        assert!(store.read_current_state().is_none());
    }

    #[test]
    fn missing_current_state_is_none() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        assert!(store.read_current_state().is_none());
    }
}
