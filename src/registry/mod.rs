//! Registry Module
//!
//! The aggregate root owning every hologram and the spatial index over them,
//! plus the main-thread plumbing that feeds it: the observer event queue and
//! the tick scheduler.

pub mod hologram_registry;
pub mod observer_queue;
pub mod scheduler;


pub use hologram_registry::HologramRegistry;
pub use observer_queue::{ObserverEventQueue, ObserverEventSender};
pub use scheduler::TickScheduler;
