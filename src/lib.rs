//! obj-reproject - Reproject the vertices of OBJ meshes between reference systems
//!
//! Vertex positions are converted through PROJ, with Earth-centered (`ECEF`)
//! input and output handled on the WGS84 ellipsoid and an optional local
//! east-north-up (`ENU`) frame anchored at the first vertex. Every other line
//! of the mesh is copied through untouched.
//!
//! # Examples
//!
//! ```no_run
//! use obj_reproject::{SourceSystem, TargetSystem, VertexPipeline};
//!
//! let mut pipeline = VertexPipeline::new(SourceSystem::Ecef, TargetSystem::Enu)?;
//! let local = pipeline.transform_fields(["4198944.6", "174747.2", "4781042.4"])?;
//! println!("{} {} {}", local.x, local.y, local.z);
//! # Ok::<(), obj_reproject::Error>(())
//! ```
//!
//! ## Rewriting a file
//!
//! ```no_run
//! use obj_reproject::{Config, rewrite_file};
//!
//! let config = Config {
//!     source_file: "building.obj".into(),
//!     target_file: "building-utm.obj".into(),
//!     source: "ECEF".parse()?,
//!     target: "EPSG:32632".parse()?,
//! };
//! let stats = rewrite_file(&config)?;
//! println!("{} vertices converted", stats.vertices);
//! # Ok::<(), obj_reproject::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod geodesy;
pub mod obj;
pub mod pipeline;
pub mod projection;
pub mod rewrite;

pub use config::{Cli, Config};
pub use error::{Error, Result};
pub use geodesy::{Ellipsoid, LocalAnchor, WGS84};
pub use pipeline::VertexPipeline;
pub use projection::{Conversion, Coordinate, SourceSystem, TargetSystem};
pub use rewrite::{rewrite, rewrite_file, RewriteStats};
