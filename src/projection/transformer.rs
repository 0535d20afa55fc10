use crate::error::{Error, Result};
use crate::projection::coordinate::Coordinate;
use proj::Proj;
use tracing::debug;

/// Output of a forward conversion; `z` is `None` when the projection only
/// produces horizontal components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Projected {
    /// Completes the result, carrying `height` forward if no z was produced
    pub fn with_height(self, height: f64) -> Coordinate {
        Coordinate::new(self.x, self.y, self.z.unwrap_or(height))
    }
}

/// A reusable forward conversion between two reference systems
pub trait Conversion {
    /// Converts one coordinate
    fn forward(&self, coord: Coordinate) -> Result<Projected>;
}

/// Conversion backed by PROJ
pub struct ProjConversion {
    proj: Proj,
}

impl ProjConversion {
    /// Creates a conversion between two identifiers known to PROJ
    pub fn new(from: &str, to: &str) -> Result<Self> {
        let proj = Proj::new_known_crs(from, to, None).map_err(|e| {
            Error::Conversion(format!(
                "Failed to create projection from '{}' to '{}': {}",
                from, to, e
            ))
        })?;

        Ok(Self { proj })
    }
}

impl Conversion for ProjConversion {
    fn forward(&self, coord: Coordinate) -> Result<Projected> {
        let (x, y) = self
            .proj
            .convert((coord.x, coord.y))
            .map_err(|e| Error::Conversion(format!("Transformation failed: {}", e)))?;

        Ok(Projected { x, y, z: None })
    }
}

/// Conversion between a system and itself
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Conversion for Identity {
    fn forward(&self, coord: Coordinate) -> Result<Projected> {
        Ok(Projected {
            x: coord.x,
            y: coord.y,
            z: Some(coord.z),
        })
    }
}

/// Builds the conversion from `from` to `to`
///
/// Identical identifiers short-circuit to [`Identity`] without touching PROJ.
pub fn make_conversion(from: &str, to: &str) -> Result<Box<dyn Conversion>> {
    if from == to {
        debug!(system = from, "source and target match, using identity conversion");
        return Ok(Box::new(Identity));
    }

    debug!(from, to, "building PROJ conversion");
    Ok(Box::new(ProjConversion::new(from, to)?))
}
