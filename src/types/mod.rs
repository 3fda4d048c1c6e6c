pub mod axis;
pub mod bounds;

pub use axis::ProjectionAxis;
pub use bounds::Bounds3;
