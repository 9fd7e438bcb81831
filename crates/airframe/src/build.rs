//! Geometry builder: markers at points, hulls along connections.

use airframe_kernel::{Point3, Solid};
use airframe_points::{Connection, ConnectionTable, Point, PointSet};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ModelParams;

/// A connection endpoint that names no point in the set.
///
/// Non-fatal: the connection is skipped and the build continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("connection {} -> {}: point \"{missing_id}\" not found", .connection.from_id, .connection.to_id)]
pub struct LookupError {
    /// The connection that was skipped.
    pub connection: Connection,
    /// The id that could not be resolved.
    pub missing_id: String,
}

/// The built solid plus what went into it.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Union of every marker and hull.
    pub solid: Solid,
    /// Number of point markers.
    pub markers: usize,
    /// Number of connection hulls.
    pub hulls: usize,
    /// Unresolved connection endpoints, in connection order.
    pub skipped: Vec<LookupError>,
}

fn position(point: &Point) -> Point3 {
    let [x, y, z] = point.position();
    Point3::new(x, y, z)
}

/// Resolve a connection endpoint, recording a miss.
fn lookup<'a>(
    points: &'a PointSet,
    connection: &Connection,
    id: &str,
    skipped: &mut Vec<LookupError>,
) -> Option<&'a Point> {
    let found = points.find(id);
    if found.is_none() {
        let err = LookupError {
            connection: connection.clone(),
            missing_id: id.to_string(),
        };
        warn!("{err}");
        skipped.push(err);
    }
    found
}

/// Build the aircraft solid.
///
/// One sphere of `marker_radius` sits at every point; every connection whose
/// endpoints both resolve becomes the hull of two spheres of `hull_radius`.
/// Everything is unioned into one solid. An empty point set gives an empty
/// solid.
pub fn build_model(points: &PointSet, connections: &ConnectionTable, params: &ModelParams) -> Model {
    let tess = params.tessellation();
    let marker = Solid::sphere(params.marker_radius, tess);

    let mut parts: Vec<Solid> = points
        .iter()
        .map(|p| {
            let [x, y, z] = p.position();
            marker.translate(x, y, z)
        })
        .collect();
    let markers = parts.len();

    let mut skipped = Vec::new();
    for connection in connections {
        // Both ends are looked up so each missing id gets reported.
        let from = lookup(points, connection, &connection.from_id, &mut skipped);
        let to = lookup(points, connection, &connection.to_id, &mut skipped);
        if let (Some(a), Some(b)) = (from, to) {
            parts.push(Solid::sphere_hull(
                &position(a),
                &position(b),
                params.hull_radius,
                tess,
            ));
        }
    }
    let hulls = parts.len() - markers;

    let solid = Solid::union_all(parts);
    info!(
        markers,
        hulls,
        skipped = skipped.len(),
        polygons = solid.num_polygons(),
        "built model"
    );

    Model {
        solid,
        markers,
        hulls,
        skipped,
    }
}
