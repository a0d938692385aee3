pub mod labels;
pub mod layer;
pub mod objects;
pub mod raster;
pub mod symbology;
pub mod vector;

pub use layer::*;
