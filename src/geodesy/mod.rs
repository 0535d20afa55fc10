//! Geodetic conversions and local tangent frames

pub mod anchor;
pub mod ellipsoid;

pub use anchor::LocalAnchor;
pub use ellipsoid::{Ellipsoid, WGS84};
