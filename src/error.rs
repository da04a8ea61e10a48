use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid lod config: {0}")]
    InvalidConfig(String),

    /// Selection was requested before levels were generated for the series.
    #[error("no lod levels generated for series `{series_id}`")]
    MissingLevels { series_id: String },
}
