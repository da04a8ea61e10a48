mod null_renderer;
mod upload;

pub use null_renderer::{NullRenderer, UploadRecord};
pub use upload::SeriesUpload;

use crate::error::ChartResult;

/// Contract implemented by the rendering pipeline that owns GPU buffers.
///
/// The LOD layer only decides which point buffer is current for a series;
/// vertex upload, shaders and draw calls live behind this trait.
pub trait Renderer {
    /// Replaces the resident buffer of `upload.series_id`.
    fn upload(&mut self, upload: &SeriesUpload<'_>) -> ChartResult<()>;

    /// Frees any buffer held for `series_id`. Unknown ids are ignored.
    fn release(&mut self, series_id: &str) -> ChartResult<()>;
}
