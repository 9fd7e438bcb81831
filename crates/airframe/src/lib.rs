#![warn(missing_docs)]

//! Aircraft point visualization.
//!
//! Loads a validated point dataset, builds one solid from a sphere marker at
//! every point and a two-sphere hull along every configured connection, hands
//! it to a [`Viewer`], and exports it as STL, STEP or DXF.
//!
//! # Example
//!
//! ```no_run
//! use airframe::{export, AirframeConfig, DirectorySaver, ExportFormat};
//!
//! # async fn run() -> Result<(), airframe::PipelineError> {
//! let config = AirframeConfig::default();
//! let saver = DirectorySaver::new("out");
//! let path = export(&config.source, &config, ExportFormat::Step, &saver).await?;
//! println!("wrote {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod config;
pub mod pipeline;
pub mod viewer;

pub use airframe_export::{DirectorySaver, ExportError, ExportFormat, FileSaver};
pub use airframe_points::{load, ConnectionTable, LoadError, PointSet, PointSource};
pub use build::{build_model, LookupError, Model};
pub use config::{AirframeConfig, ConfigError, ModelParams};
pub use pipeline::{build_from_source, export, export_bytes, PipelineError};
pub use viewer::{render, MeshView, Viewer};
