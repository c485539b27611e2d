//! Spherical geometry behind the map: great circles, distance rings, viewport and projection.

pub mod antimeridian;
pub mod bounds;
pub mod great_circle;
pub mod projection;
pub mod ring;

pub use antimeridian::split_runs;
pub use bounds::BoundingBox;
pub use great_circle::{sample, DegenerateGreatCircle};
pub use projection::Miller;
pub use ring::ring;
