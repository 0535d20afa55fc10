//! Per-vertex coordinate transformation
//!
//! A [`VertexPipeline`] owns everything one run needs: the resolved source
//! and target systems, the projection built between them and, once the
//! first ENU-bound vertex has been seen, the [`LocalAnchor`] every later
//! vertex is expressed against.

use tracing::info;

use crate::error::{Error, Result};
use crate::geodesy::{Ellipsoid, LocalAnchor, WGS84};
use crate::projection::{make_conversion, Conversion, Coordinate, SourceSystem, TargetSystem};

/// Characters a numeric vertex field may contain
fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')
}

/// Parses one vertex field as a finite decimal or scientific-notation number
pub fn parse_field(token: &str) -> Result<f64> {
    let parse_error = || Error::Parse {
        token: token.to_string(),
    };

    if token.is_empty() || !token.chars().all(is_numeric_char) {
        return Err(parse_error());
    }

    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(parse_error)
}

/// Transforms vertices from the source to the target reference system
pub struct VertexPipeline {
    source: SourceSystem,
    target: TargetSystem,
    conversion: Box<dyn Conversion>,
    ellipsoid: Ellipsoid,
    anchor: Option<LocalAnchor>,
}

impl VertexPipeline {
    /// Creates a pipeline, building the projection between the two systems
    pub fn new(source: SourceSystem, target: TargetSystem) -> Result<Self> {
        info!(source = source.projection_id(), "Source");
        info!(target = target.projection_id(), "Target");

        let conversion = make_conversion(source.projection_id(), target.projection_id())?;
        Ok(Self::with_conversion(source, target, conversion))
    }

    /// Creates a pipeline around an already built conversion
    pub fn with_conversion(
        source: SourceSystem,
        target: TargetSystem,
        conversion: Box<dyn Conversion>,
    ) -> Self {
        Self {
            source,
            target,
            conversion,
            ellipsoid: WGS84,
            anchor: None,
        }
    }

    /// The anchor captured from the first ENU-bound vertex, if any
    pub fn anchor(&self) -> Option<&LocalAnchor> {
        self.anchor.as_ref()
    }

    /// Parses three raw fields and transforms them
    pub fn transform_fields(&mut self, fields: [&str; 3]) -> Result<Coordinate> {
        let x = parse_field(fields[0])?;
        let y = parse_field(fields[1])?;
        let z = parse_field(fields[2])?;
        self.transform(Coordinate::new(x, y, z))
    }

    /// Transforms one vertex
    pub fn transform(&mut self, raw: Coordinate) -> Result<Coordinate> {
        let input = match self.source {
            SourceSystem::Ecef => self.ellipsoid.to_geographic(raw),
            SourceSystem::Named(_) => raw,
        };

        let projected = self.conversion.forward(input)?.with_height(input.z);

        match self.target {
            TargetSystem::Named(_) => Ok(projected),
            TargetSystem::Ecef => {
                // TODO: heights are taken as ellipsoidal; add geoid correction
                // once a vertical datum can be configured.
                let ecef = self.ecef_of(projected);
                Ok(Coordinate::new(ecef.x, ecef.z, -ecef.y))
            }
            TargetSystem::Enu => {
                let ecef = self.ecef_of(projected);
                let ellipsoid = self.ellipsoid;
                let anchor = self.anchor.get_or_insert_with(|| {
                    info!(
                        lon = projected.x,
                        lat = projected.y,
                        height = projected.z,
                        "Captured local frame origin"
                    );
                    LocalAnchor::new(&ellipsoid, ecef)
                });
                Ok(anchor.to_local(ecef))
            }
        }
    }

    fn ecef_of(&self, geographic: Coordinate) -> Coordinate {
        self.ellipsoid.to_ecef(geographic.x, geographic.y, geographic.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{Identity, Projected};

    /// Halves x and y without producing a height
    struct Planar;

    impl Conversion for Planar {
        fn forward(&self, coord: Coordinate) -> Result<Projected> {
            Ok(Projected {
                x: coord.x / 2.0,
                y: coord.y / 2.0,
                z: None,
            })
        }
    }

    struct Failing;

    impl Conversion for Failing {
        fn forward(&self, _coord: Coordinate) -> Result<Projected> {
            Err(Error::Conversion("out of domain".to_string()))
        }
    }

    fn pipeline(source: SourceSystem, target: TargetSystem) -> VertexPipeline {
        VertexPipeline::with_conversion(source, target, Box::new(Identity))
    }

    fn named() -> SourceSystem {
        SourceSystem::Named("EPSG:4326".to_string())
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("1.5").unwrap(), 1.5);
        assert_eq!(parse_field("-2e3").unwrap(), -2000.0);
        assert_eq!(parse_field("+4.25E-1").unwrap(), 0.425);
        assert!(matches!(parse_field("foo"), Err(Error::Parse { .. })));
        assert!(parse_field("nan").is_err());
        assert!(parse_field("1e999").is_err());
        assert!(parse_field("1.2.3").is_err());
        assert!(parse_field("").is_err());
    }

    #[test]
    fn test_malformed_field_aborts() {
        let mut p = pipeline(named(), TargetSystem::default());
        let err = p.transform_fields(["1.0", "foo", "3.0"]).unwrap_err();
        assert!(matches!(err, Error::Parse { token } if token == "foo"));
    }

    #[test]
    fn test_ecef_to_geographic() {
        let mut p = pipeline(SourceSystem::Ecef, TargetSystem::default());
        let out = p.transform_fields(["6378137.0", "0.0", "0.0"]).unwrap();
        assert!(out.max_abs_diff(Coordinate::new(0.0, 0.0, 0.0)) < 1e-6);
    }

    #[test]
    fn test_height_preserved_for_planar_projection() {
        let target = TargetSystem::Named("planar".to_string());
        let mut p = VertexPipeline::with_conversion(named(), target, Box::new(Planar));
        let out = p.transform(Coordinate::new(10.0, 4.0, 123.25)).unwrap();
        assert_eq!(out, Coordinate::new(5.0, 2.0, 123.25));
    }

    #[test]
    fn test_ecef_target_axis_remap() {
        let mut p = pipeline(named(), TargetSystem::Ecef);
        let (lon, lat, h) = (30.0, 45.0, 100.0);
        let ecef = WGS84.to_ecef(lon, lat, h);
        let out = p.transform(Coordinate::new(lon, lat, h)).unwrap();
        assert!(out.max_abs_diff(Coordinate::new(ecef.x, ecef.z, -ecef.y)) < 1e-6);
    }

    #[test]
    fn test_ecef_round_trip_through_geographic() {
        let ecef = WGS84.to_ecef(-3.7, 40.4, 650.0);
        let mut to_geo = pipeline(SourceSystem::Ecef, TargetSystem::default());
        let geo = to_geo.transform(ecef).unwrap();

        let mut to_ecef = pipeline(named(), TargetSystem::Ecef);
        let remapped = to_ecef.transform(geo).unwrap();
        let back = Coordinate::new(remapped.x, -remapped.z, remapped.y);
        assert!(back.max_abs_diff(ecef) < 1e-3);
    }

    #[test]
    fn test_ecef_round_trip_through_utm() {
        let utm_target: TargetSystem = "EPSG:32633".parse().unwrap();
        let utm_source: SourceSystem = "EPSG:32633".parse().unwrap();
        let mut to_utm = VertexPipeline::new(SourceSystem::Ecef, utm_target).unwrap();
        let mut to_ecef = VertexPipeline::new(utm_source, TargetSystem::Ecef).unwrap();

        for (lon, lat, h) in [(15.0, 52.0, 80.0), (13.4, 52.5, 34.0), (16.9, 48.2, 250.0)] {
            let ecef = WGS84.to_ecef(lon, lat, h);
            let projected = to_utm.transform(ecef).unwrap();
            assert!(projected.x > 100_000.0 && projected.x < 900_000.0);
            assert!((projected.z - h).abs() < 1e-3);

            let remapped = to_ecef.transform(projected).unwrap();
            let back = Coordinate::new(remapped.x, -remapped.z, remapped.y);
            assert!(back.max_abs_diff(ecef) < 1e-3, "{:?} vs {:?}", back, ecef);
        }
    }

    #[test]
    fn test_enu_first_vertex_is_origin() {
        let mut p = pipeline(named(), TargetSystem::Enu);
        assert!(p.anchor().is_none());
        let out = p.transform(Coordinate::new(11.57, 48.13, 520.0)).unwrap();
        assert!(out.max_abs_diff(Coordinate::new(0.0, 0.0, 0.0)) < 1e-6);
        assert!(p.anchor().is_some());
    }

    #[test]
    fn test_enu_anchor_is_stable() {
        let mut p = pipeline(SourceSystem::Ecef, TargetSystem::Enu);
        let first = WGS84.to_ecef(11.57, 48.13, 520.0);
        p.transform(first).unwrap();
        let captured = *p.anchor().unwrap();

        let second = WGS84.to_ecef(11.58, 48.14, 530.0);
        let local = p.transform(second).unwrap();
        assert!(local.z.abs() < 50.0);
        assert!(local.x > 0.0 && local.y > 0.0);

        let later = *p.anchor().unwrap();
        assert_eq!(captured, later);
        assert!(later.origin().max_abs_diff(first) < 1e-6);
        assert!(later.to_local(first).max_abs_diff(Coordinate::new(0.0, 0.0, 0.0)) < 1e-6);
    }

    #[test]
    fn test_enu_round_trip() {
        let mut p = pipeline(named(), TargetSystem::Enu);
        p.transform(Coordinate::new(-0.1276, 51.5072, 11.0)).unwrap();
        let local = p.transform(Coordinate::new(-0.1, 51.52, 40.0)).unwrap();

        let anchor = p.anchor().unwrap();
        let geo = WGS84.to_geographic(anchor.to_ecef(local));
        assert!((geo.x + 0.1).abs() < 1e-6);
        assert!((geo.y - 51.52).abs() < 1e-6);
        assert!((geo.z - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_conversion_error_propagates() {
        let mut p = VertexPipeline::with_conversion(named(), TargetSystem::Enu, Box::new(Failing));
        let err = p.transform(Coordinate::new(0.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::Conversion(_)));
        assert!(p.anchor().is_none());
    }
}
