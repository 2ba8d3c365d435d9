// Hearth Holograms - Data-Oriented Programming (DOP) Architecture
//
// Lifecycle and spatial-index engine for named, positioned display objects
// inside a live host world.
// - *_data modules hold plain data
// - *_operations modules hold the pure functions that transform it
// - the registry is the aggregate root used by the API and host event hooks

// Constants module
pub mod constants;

// Core modules
pub mod error;
pub mod color;
pub mod world;
pub mod host;
pub mod placeholder;

// Engine
pub mod hologram;
pub mod spatial;
pub mod registry;
pub mod persistence;

// Surfaces
pub mod api;
pub mod config;

pub use error::{HologramError, HologramResult, OptionExt};

pub use world::{Location, RegionKey};

pub use host::{
    DisplaySettings, HologramHost, HostError, InMemoryHost, Observer, ObserverSnapshot,
    RenderHandle,
};

pub use placeholder::{MapPlaceholders, PlaceholderResolver};

pub use hologram::{
    Billboard, HologramData, HologramKind, RenderContext, SharedHologram, TextAlignment,
    Visibility,
};

pub use spatial::SpatialIndex;

pub use registry::{HologramRegistry, ObserverEventQueue, ObserverEventSender, TickScheduler};

pub use persistence::{
    HologramRecord, HologramStorage, JsonFileStorage, MemoryStorage, PersistenceError,
};

pub use api::HologramApi;
pub use config::HologramConfig;
