use std::sync::{Arc, Mutex};

use watchrun::report::{LifecycleEvent, Reporter};

/// A reporter that:
/// - remembers every lifecycle event, in order
/// - forwards nothing anywhere else.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().unwrap().clone()
    }

    /// How many recorded events satisfy `pred`.
    pub fn count(&self, pred: impl Fn(&LifecycleEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }

    pub fn starts(&self) -> usize {
        self.count(|e| matches!(e, LifecycleEvent::Started { .. }))
    }

    pub fn kills(&self) -> usize {
        self.count(|e| matches!(e, LifecycleEvent::Killed { .. }))
    }

    /// Check that no two processes were ever running at once: every
    /// `Started` after the first is preceded by the end of the previous one.
    pub fn starts_are_serialized(&self) -> bool {
        let mut live: Option<u32> = None;
        for event in self.events() {
            match event {
                LifecycleEvent::Started { pid } => {
                    if live.is_some() {
                        return false;
                    }
                    live = Some(pid);
                }
                LifecycleEvent::Stopped { pid, .. } | LifecycleEvent::Killed { pid } => {
                    if live == Some(pid) {
                        live = None;
                    }
                }
                _ => {}
            }
        }
        true
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &LifecycleEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
