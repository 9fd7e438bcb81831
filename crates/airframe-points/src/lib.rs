#![warn(missing_docs)]

//! Point dataset loading for airframe.
//!
//! Fetches `aircraft_points.json` (a JSON array of `{id, x, y, z}` records),
//! validates it all-or-nothing, and defines the connection table that says
//! which points are joined by hulls.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> Result<(), airframe_points::LoadError> {
//! use airframe_points::{load, PointSource};
//!
//! let points = load(&PointSource::parse("aircraft_points.json")).await?;
//! println!("{} points", points.len());
//! # Ok(())
//! # }
//! ```

mod connection;
mod error;
mod source;
mod validate;

pub use connection::{Connection, ConnectionTable};
pub use error::{LoadError, SchemaError, SchemaErrorKind};
pub use source::{load, PointSource, DEFAULT_SOURCE};
pub use validate::{parse_points, validate};

use serde::{Deserialize, Serialize};

/// A named point in model space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unique, non-empty identifier.
    pub id: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(id: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            z,
        }
    }

    /// Coordinates as an array.
    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// The validated points of one session, in dataset order.
///
/// Ids are pairwise distinct. The only way to obtain one is through
/// [`validate`], [`parse_points`] or [`load`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// The points in dataset order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Linear lookup by id.
    pub fn find(&self, id: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
