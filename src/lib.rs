//! chart-lod: level-of-detail engine for interactive charts.
//!
//! Series of up to millions of points are decimated once per load into a
//! ladder of coarser representations; every pan, zoom and resize then picks
//! the finest representation whose visible density fits the pixel budget.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod lod;
pub mod render;
pub mod telemetry;

pub use api::{LodChart, LodChartConfig};
pub use error::{ChartError, ChartResult};
pub use lod::{DecimationStrategy, LevelTable, LodConfig, LodLevel, LodManager};
