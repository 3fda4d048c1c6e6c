// src/lib.rs

pub mod cloud;
pub mod config;
pub mod contour;
pub mod error;
pub mod grid;
pub mod progress;
pub mod types;

// Re-exports für einfache Verwendung
pub use error::{RasterError, RasterResult, RasterWarning};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        cloud::{MemoryPointCloud, PointCloudSource},
        config::{ContourConfig, ProjectionMode, RasterConfig},
        contour::{ContourExtractor, ContourLine},
        error::{RasterError, RasterResult, RasterWarning},
        grid::{
            EmptyCellInterpolator, EmptyCellPolicy, FillOutcome, GridBuilder, RasterCell,
            RasterGrid, ResolvedFill,
        },
        progress::{NullProgress, ProgressSink},
        types::{Bounds3, ProjectionAxis},
    };
}
