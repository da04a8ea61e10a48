//! Optional hooks layered on top of the chart integration.
//!
//! Observers see LOD lifecycle events but cannot mutate chart internals.

mod observers;

pub use observers::{LodContext, LodEvent, LodObserver};
