//! Reference system identifiers, resolved once from their textual form

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Identifier of the geographic system that stands in for the `ECEF` and
/// `ENU` sentinels when a projection is built
pub const CANONICAL_GEOGRAPHIC: &str = "EPSG:4326";

/// Sentinel for Earth-centered, Earth-fixed Cartesian coordinates
pub const ECEF: &str = "ECEF";

/// Sentinel for the local east-north-up frame at the first vertex
pub const ENU: &str = "ENU";

/// Resolves the `WGS84` shorthand to the canonical identifier
fn normalize(name: &str) -> String {
    if name.eq_ignore_ascii_case("WGS84") {
        CANONICAL_GEOGRAPHIC.to_string()
    } else {
        name.to_string()
    }
}

/// Reference system of the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSystem {
    /// Any identifier understood by the projection engine
    Named(String),
    /// Earth-centered, Earth-fixed Cartesian
    Ecef,
}

impl SourceSystem {
    /// Identifier handed to the projection engine
    pub fn projection_id(&self) -> &str {
        match self {
            SourceSystem::Named(name) => name,
            SourceSystem::Ecef => CANONICAL_GEOGRAPHIC,
        }
    }
}

impl FromStr for SourceSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "" => Err(Error::Config("source projection is empty".to_string())),
            ECEF => Ok(SourceSystem::Ecef),
            ENU => Err(Error::Config(
                "ENU is only valid as a target projection".to_string(),
            )),
            name => Ok(SourceSystem::Named(normalize(name))),
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSystem::Named(name) => write!(f, "{}", name),
            SourceSystem::Ecef => write!(f, "{}", ECEF),
        }
    }
}

/// Reference system of the target file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSystem {
    /// Any identifier understood by the projection engine
    Named(String),
    /// Earth-centered, Earth-fixed Cartesian
    Ecef,
    /// East-north-up frame anchored at the first vertex
    Enu,
}

impl TargetSystem {
    /// Identifier handed to the projection engine
    pub fn projection_id(&self) -> &str {
        match self {
            TargetSystem::Named(name) => name,
            TargetSystem::Ecef | TargetSystem::Enu => CANONICAL_GEOGRAPHIC,
        }
    }
}

impl Default for TargetSystem {
    fn default() -> Self {
        TargetSystem::Named(CANONICAL_GEOGRAPHIC.to_string())
    }
}

impl FromStr for TargetSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "" => Err(Error::Config("target projection is empty".to_string())),
            ECEF => Ok(TargetSystem::Ecef),
            ENU => Ok(TargetSystem::Enu),
            name => Ok(TargetSystem::Named(normalize(name))),
        }
    }
}

impl fmt::Display for TargetSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSystem::Named(name) => write!(f, "{}", name),
            TargetSystem::Ecef => write!(f, "{}", ECEF),
            TargetSystem::Enu => write!(f, "{}", ENU),
        }
    }
}
