//! East-north-up frame anchored at a fixed ECEF origin

use glam::{DMat3, DMat4, DVec3};

use crate::geodesy::ellipsoid::Ellipsoid;
use crate::projection::Coordinate;

/// Rigid transform between ECEF and the ENU tangent frame at `origin`
///
/// X points east, Y north and Z along the ellipsoid normal at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalAnchor {
    origin: DVec3,
    enu_to_ecef: DMat4,
    ecef_to_enu: DMat4,
}

impl LocalAnchor {
    /// Builds the anchor for an ECEF origin
    pub fn new(ellipsoid: &Ellipsoid, origin: Coordinate) -> Self {
        let geo = ellipsoid.to_geographic(origin);
        let (sin_lon, cos_lon) = geo.x.to_radians().sin_cos();
        let (sin_lat, cos_lat) = geo.y.to_radians().sin_cos();

        let east = DVec3::new(-sin_lon, cos_lon, 0.0);
        let north = DVec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
        let up = DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

        let origin = DVec3::from(origin);
        let rotation = DMat3::from_cols(east, north, up);
        let inverse_rotation = rotation.transpose();

        Self {
            origin,
            enu_to_ecef: DMat4::from_mat3_translation(rotation, origin),
            ecef_to_enu: DMat4::from_mat3_translation(
                inverse_rotation,
                -(inverse_rotation * origin),
            ),
        }
    }

    /// The ECEF origin this anchor was created from
    pub fn origin(&self) -> Coordinate {
        self.origin.into()
    }

    /// ENU to ECEF transform
    pub fn enu_to_ecef(&self) -> &DMat4 {
        &self.enu_to_ecef
    }

    /// ECEF to ENU transform
    pub fn ecef_to_enu(&self) -> &DMat4 {
        &self.ecef_to_enu
    }

    /// Expresses an ECEF point in the local frame
    pub fn to_local(&self, ecef: Coordinate) -> Coordinate {
        self.ecef_to_enu.transform_point3(ecef.into()).into()
    }

    /// Expresses a local point in ECEF
    pub fn to_ecef(&self, local: Coordinate) -> Coordinate {
        self.enu_to_ecef.transform_point3(local.into()).into()
    }
}
