//! Conversions between ECEF Cartesian and geographic coordinates

use crate::projection::Coordinate;

/// Convergence threshold for the latitude iteration, in radians
const LATITUDE_EPSILON: f64 = 1e-14;

/// Upper bound on latitude refinements
const MAX_ITERATIONS: usize = 16;

/// Reference ellipsoid parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major (equatorial) axis in meters
    pub a: f64,
    /// Semi-minor (polar) axis in meters
    pub b: f64,
    /// First eccentricity squared
    pub e2: f64,
}

impl Ellipsoid {
    /// Creates an ellipsoid from its semi-major axis and inverse flattening
    pub const fn new(a: f64, inverse_flattening: f64) -> Self {
        let f = 1.0 / inverse_flattening;
        Self {
            a,
            b: a * (1.0 - f),
            e2: f * (2.0 - f),
        }
    }

    /// Prime vertical radius of curvature at `sin_lat`
    fn prime_vertical_radius(&self, sin_lat: f64) -> f64 {
        self.a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt()
    }

    /// Converts an ECEF point to `(longitude°, latitude°, height m)`
    ///
    /// Latitude is refined iteratively until it moves less than
    /// [`LATITUDE_EPSILON`]. The poles and the Earth's center yield finite,
    /// if degenerate, values.
    pub fn to_geographic(&self, ecef: Coordinate) -> Coordinate {
        let Coordinate { x, y, z } = ecef;
        let p = x.hypot(y);
        let lon = y.atan2(x);

        if p == 0.0 && z == 0.0 {
            return Coordinate::from_lonlat_height(0.0, 0.0, -self.a);
        }

        let mut lat = z.atan2(p * (1.0 - self.e2));
        for _ in 0..MAX_ITERATIONS {
            let n = self.prime_vertical_radius(lat.sin());
            let h = self.height(p, z, lat, n);
            let denom = n + h;
            if denom.abs() <= f64::EPSILON * self.a {
                break;
            }
            let next = z.atan2(p * (1.0 - self.e2 * n / denom));
            let delta = (next - lat).abs();
            lat = next;
            if delta < LATITUDE_EPSILON {
                break;
            }
        }

        let n = self.prime_vertical_radius(lat.sin());
        let height = self.height(p, z, lat, n);
        Coordinate::from_lonlat_height(lon.to_degrees(), lat.to_degrees(), height)
    }

    /// Height above the ellipsoid, switching formulas near the poles where
    /// `cos(lat)` vanishes
    fn height(&self, p: f64, z: f64, lat: f64, n: f64) -> f64 {
        let (sin_lat, cos_lat) = lat.sin_cos();
        if cos_lat.abs() > 1e-10 {
            p / cos_lat - n
        } else {
            z / sin_lat - n * (1.0 - self.e2)
        }
    }

    /// Converts `(longitude°, latitude°, height m)` to ECEF
    pub fn to_ecef(&self, lon_deg: f64, lat_deg: f64, height: f64) -> Coordinate {
        let (sin_lat, cos_lat) = lat_deg.to_radians().sin_cos();
        let (sin_lon, cos_lon) = lon_deg.to_radians().sin_cos();
        let n = self.prime_vertical_radius(sin_lat);

        Coordinate::new(
            (n + height) * cos_lat * cos_lon,
            (n + height) * cos_lat * sin_lon,
            (n * (1.0 - self.e2) + height) * sin_lat,
        )
    }
}

/// The WGS84 ellipsoid, used for every ECEF conversion
pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 298.257_223_563);
