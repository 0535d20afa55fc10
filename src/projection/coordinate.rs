use glam::DVec3;

/// An ordered `(x, y, z)` triple whose meaning depends on the pipeline stage:
/// raw file units, geographic degrees plus height, or Cartesian meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate {
    /// Creates a new coordinate
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate from longitude/latitude in degrees and height in meters
    pub fn from_lonlat_height(lon: f64, lat: f64, height: f64) -> Self {
        Self::new(lon, lat, height)
    }

    /// Largest absolute component difference to another coordinate
    pub fn max_abs_diff(self, other: Coordinate) -> f64 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

impl From<DVec3> for Coordinate {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Coordinate> for DVec3 {
    fn from(c: Coordinate) -> Self {
        DVec3::new(c.x, c.y, c.z)
    }
}
