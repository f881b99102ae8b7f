use std::sync::atomic::{AtomicBool, Ordering};

/// Single-flight guard for periodic save: a scheduled save that fires
/// while a previous one is still in flight declines to start a new
/// iteration, rather than queuing or running concurrently.
///
/// This is the entire cancellation model for periodic save (§5): there
/// is no cancellation of an in-flight save, only refusal to start a
/// second one.
pub struct SaveGuard {
    in_progress: AtomicBool,
}

impl SaveGuard {
    pub fn new() -> Self {
        SaveGuard { in_progress: AtomicBool::new(false) }
    }

    /// Attempt to begin a save iteration. Returns a [`SaveTicket`] that
    /// clears the flag on drop if it succeeded in claiming it, or
    /// `None` if a save was already in flight.
    pub fn try_begin(&self) -> Option<SaveTicket<'_>> {
        let already_running = self.in_progress.swap(true, Ordering::AcqRel);
        if already_running {
            None
        } else {
            Some(SaveTicket { guard: self })
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }
}

impl Default for SaveGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the in-flight flag when dropped, so the guard is released
/// even if the save iteration returns early via `?`.
pub struct SaveTicket<'a> {
    guard: &'a SaveGuard,
}

impl Drop for SaveTicket<'_> {
    fn drop(&mut self) {
        self.guard.in_progress.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_second_begin_is_refused_while_the_first_is_in_flight() {
        let guard = SaveGuard::new();
        let first = guard.try_begin();
        assert!(first.is_some());
        assert!(guard.try_begin().is_none());
        drop(first);
        assert!(guard.try_begin().is_some());
    }

    #[test]
    fn ticket_drop_releases_the_flag_even_on_early_return() {
        let guard = SaveGuard::new();
        fn do_work(guard: &SaveGuard) -> Option<()> {
            let _ticket = guard.try_begin()?;
            None
        }
        assert!(do_work(&guard).is_none());
        assert!(!guard.is_in_progress());
    }
}
