//! Host Module
//!
//! The boundary between the hologram engine and the world-rendering host.
//! The host resolves worlds, owns render handles and reports observers;
//! this crate only ever talks to it through the traits defined here.

pub mod host_data;
pub mod memory_host;
pub mod observer;

pub use host_data::{DisplaySettings, HologramHost, HostError, HostResult, RenderHandle};
pub use memory_host::{InMemoryHost, SpawnedDisplay};
pub use observer::{Observer, ObserverSnapshot};
