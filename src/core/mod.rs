pub mod domain_window;
pub mod point_buffer;
pub mod scale;
pub mod types;

pub use domain_window::DomainWindow;
pub use point_buffer::PointBuffer;
pub use scale::LinearScale;
pub use types::{DataPoint, DomainRange, Viewport};
