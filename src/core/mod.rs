pub mod coordinate;
pub mod geometry;
pub mod scale;
pub mod types;

pub use coordinate::{CoordinateSource, LinearCoordinateSource};
pub use scale::LinearScale;
pub use types::{LinePoint, PixelPoint, Viewport};
