//! Observer event marshaling
//!
//! Observer moves may be reported on a worker thread, but render handles must
//! only change on the main thread. Workers push snapshots through a sender;
//! the main thread drains the queue into the registry once per tick.

use super::hologram_registry::HologramRegistry;
use crate::host::ObserverSnapshot;
use crate::world::{crossed_block_boundary, Location};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Cloneable producer half, safe to hand to worker threads
#[derive(Clone)]
pub struct ObserverEventSender {
    sender: Sender<ObserverSnapshot>,
}

impl ObserverEventSender {
    /// Queue a join or world change unconditionally
    pub fn submit(&self, snapshot: ObserverSnapshot) {
        if self.sender.send(snapshot).is_err() {
            log::debug!("[ObserverEventSender::submit] Queue closed, event dropped");
        }
    }

    /// Queue a move only if it left the previous block cell
    ///
    /// Returns true if the event was queued.
    pub fn submit_move(&self, previous: &Location, snapshot: ObserverSnapshot) -> bool {
        if !crossed_block_boundary(previous, &snapshot.location) {
            return false;
        }
        self.submit(snapshot);
        true
    }
}

pub struct ObserverEventQueue {
    sender: Sender<ObserverSnapshot>,
    receiver: Receiver<ObserverSnapshot>,
}

impl ObserverEventQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> ObserverEventSender {
        ObserverEventSender {
            sender: self.sender.clone(),
        }
    }

    /// Events waiting for the main thread
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Main thread: apply every queued event to the registry
    ///
    /// Returns the number of events processed.
    pub fn drain(&self, registry: &HologramRegistry) -> usize {
        let mut processed = 0;
        for snapshot in self.receiver.try_iter() {
            registry.on_observer_event(&snapshot);
            processed += 1;
        }
        processed
    }
}

impl Default for ObserverEventQueue {
    fn default() -> Self {
        Self::new()
    }
}
