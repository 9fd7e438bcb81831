#![warn(missing_docs)]

//! File export for airframe solids.
//!
//! Each [`ExportFormat`] serializes a [`Solid`](airframe_kernel::Solid) to
//! bytes under a fixed filename; a [`FileSaver`] delivers them.
//!
//! # Example
//!
//! ```no_run
//! use airframe_export::{DirectorySaver, ExportFormat, FileSaver};
//! use airframe_kernel::{Solid, Tessellation};
//!
//! let solid = Solid::sphere(0.05, Tessellation::default());
//! let format = ExportFormat::Stl;
//! let bytes = format.serialize(&solid).unwrap();
//! DirectorySaver::new(".").save(format.file_name(), &bytes).unwrap();
//! ```

pub mod dxf;
mod error;
mod format;
mod save;
pub mod step;
pub mod stl;

pub use error::{ExportError, Result};
pub use format::ExportFormat;
pub use save::{DirectorySaver, FileSaver};
