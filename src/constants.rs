//! Shared constants for the hologram engine
//!
//! Grouped by concern so call sites read as `constants::timing::TICK_MILLIS`.

/// Host simulation timing
pub mod timing {
    /// Wall-clock length of one host tick
    pub const TICK_MILLIS: u64 = 50;

    /// Default number of ticks between registry refresh passes
    pub const DEFAULT_UPDATE_INTERVAL_TICKS: u32 = 20;
}

/// World partitioning
pub mod region {
    /// Horizontal edge length of one region (one host chunk)
    pub const REGION_SIZE: i64 = 16;
}

/// Text line layout
pub mod layout {
    /// Vertical distance between lines at scale 1.0
    pub const DEFAULT_LINE_SPACING: f32 = 0.25;

    /// Lower bound applied to the configured line spacing
    pub const MIN_LINE_SPACING: f32 = 0.01;

    /// Lower bound applied to a line's effective Y scale
    pub const MIN_LINE_SCALE: f32 = 0.1;

    /// Padding added below a line whose scale does not exceed 1.0
    pub const BASE_LINE_PADDING: f32 = 0.05;

    /// Padding per unit of scale for lines larger than 1.0
    pub const OVERSIZE_PADDING_FACTOR: f32 = 0.1;

    /// Host view range units per block of visibility distance
    pub const VIEW_RANGE_DIVISOR: f32 = 16.0;
}

/// Observer capabilities
pub mod permissions {
    /// Capability prefix checked for PERMISSION visibility; the hologram id is appended
    pub const VIEW_PERMISSION_PREFIX: &str = "view.";
}

/// Storage format
pub mod storage {
    /// Version written into the flat-file envelope
    pub const FORMAT_VERSION: u32 = 1;

    /// Default flat-file location
    pub const DEFAULT_STORAGE_FILE: &str = "holograms.json";
}
