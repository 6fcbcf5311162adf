// src/watch/events.rs

use notify::EventKind;
use notify::event::ModifyKind;
use tokio::sync::mpsc;

/// "A write was observed somewhere under the watched tree."
///
/// Carries no payload. One is sent per qualifying raw event; nothing is
/// coalesced, so N writes produce N notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Notification;

/// Channel between the watcher and the restart loop.
///
/// It holds a single notification: a second send waits until the restart
/// loop has taken the first one, which is the watcher's backpressure point.
pub fn notification_channel() -> (mpsc::Sender<Notification>, mpsc::Receiver<Notification>) {
    mpsc::channel(1)
}

/// Does this raw event represent file content being written?
///
/// Creation, removal, renames and permission/metadata changes are observed
/// but do not count. `Modify(Any)` is what backends without finer detail
/// (kqueue, polling) report for writes.
pub fn is_write_event(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any))
}
