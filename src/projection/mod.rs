//! Coordinate types, reference systems and the PROJ-backed conversion engine

pub mod coordinate;
pub mod reference;
pub mod transformer;

pub use coordinate::Coordinate;
pub use reference::{SourceSystem, TargetSystem, CANONICAL_GEOGRAPHIC};
pub use transformer::{make_conversion, Conversion, Identity, ProjConversion, Projected};
