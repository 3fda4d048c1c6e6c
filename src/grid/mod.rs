pub mod builder;
pub mod cell;
pub mod fill;
pub mod interpolation;
pub mod raster;

pub use builder::{GridBuilder, UNUSUAL_CELL_COUNT};
pub use cell::RasterCell;
pub use fill::{EmptyCellPolicy, ResolvedFill};
pub use interpolation::{EmptyCellInterpolator, FillOutcome};
pub use raster::RasterGrid;
