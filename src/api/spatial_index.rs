use crate::core::PointBuffer;

/// Hit-testing structure (nearest point, brush rectangle, lasso polygon)
/// maintained next to the chart.
///
/// The chart feeds it the original full-resolution data of each series so
/// hit results never depend on the level currently rendered.
pub trait SpatialIndex {
    fn rebuild(&mut self, series_id: &str, points: &PointBuffer);
    fn remove(&mut self, series_id: &str);
}
