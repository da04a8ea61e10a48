//! Level-of-detail generation and selection.
//!
//! Decimation functions are pure and produce new buffers. [`LodManager`]
//! caches one [`LevelTable`] per series and answers per-frame selection
//! queries against the current viewport.

mod config;
mod douglas_peucker;
mod grid;
mod level;
mod lttb;
mod manager;
mod strategy;

pub use config::LodConfig;
pub use douglas_peucker::douglas_peucker;
pub use grid::grid_decimate;
pub use level::{LevelTable, LodLevel};
pub use lttb::lttb;
pub use manager::{LodManager, LodMemoryUsage, build_level_table};
pub use strategy::DecimationStrategy;
