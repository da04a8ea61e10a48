use indexmap::IndexMap;

use crate::core::PointBuffer;
use crate::error::ChartResult;
use crate::render::{Renderer, SeriesUpload};

/// What a [`NullRenderer`] holds for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRecord {
    pub level: usize,
    /// Aliases the uploaded buffer so callers can check storage identity.
    pub points: PointBuffer,
}

/// No-op renderer used by tests and headless chart usage.
///
/// It still validates uploads and tracks the resident buffer per series so
/// tests can assert what a real pipeline would draw.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub upload_count: usize,
    pub release_count: usize,
    resident: IndexMap<String, UploadRecord>,
}

impl NullRenderer {
    #[must_use]
    pub fn resident(&self, series_id: &str) -> Option<&UploadRecord> {
        self.resident.get(series_id)
    }

    #[must_use]
    pub fn resident_count(&self) -> usize {
        self.resident.len()
    }
}

impl Renderer for NullRenderer {
    fn upload(&mut self, upload: &SeriesUpload<'_>) -> ChartResult<()> {
        upload.validate()?;
        self.upload_count += 1;
        self.resident.insert(
            upload.series_id.to_owned(),
            UploadRecord {
                level: upload.level,
                points: upload.points.clone(),
            },
        );
        Ok(())
    }

    fn release(&mut self, series_id: &str) -> ChartResult<()> {
        if self.resident.shift_remove(series_id).is_some() {
            self.release_count += 1;
        }
        Ok(())
    }
}
