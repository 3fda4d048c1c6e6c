pub mod extractor;
pub mod marching;
pub mod scalar_field;
pub mod splitter;

pub use extractor::{ContourExtractor, ContourLine};
pub use marching::{extract_contours, RawContour};
pub use scalar_field::{PaddedHeightField, ScalarField2D};
pub use splitter::{BorderSplitter, SplitFragment};
