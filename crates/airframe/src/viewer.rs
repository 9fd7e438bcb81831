//! Viewer binding: hand the built model, or the load failure, to a display.

use airframe_points::PointSource;
use serde::Serialize;
use tracing::error;

use crate::build::Model;
use crate::config::AirframeConfig;
use crate::pipeline::{self, PipelineError};

/// A display surface for the model.
///
/// Each render calls exactly one of the two methods.
pub trait Viewer {
    /// Display a successfully built model.
    fn show(&mut self, model: &Model);

    /// Display an error message in place of the model.
    fn show_error(&mut self, message: &str);
}

/// Mesh payload for web viewers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshView {
    /// Flat `[x, y, z, ...]` vertex positions.
    pub vertices: Vec<f32>,
    /// Flat triangle vertex indices.
    pub indices: Vec<u32>,
    /// `[min, max]` corners, absent for an empty model.
    pub bounds: Option<[[f32; 3]; 2]>,
    /// Number of point markers.
    pub markers: usize,
    /// Number of connection hulls.
    pub hulls: usize,
    /// Number of triangles.
    pub triangles: usize,
    /// Messages for connections that were skipped.
    pub skipped: Vec<String>,
}

impl MeshView {
    /// Triangulate a model for display.
    pub fn from_model(model: &Model) -> Self {
        let mesh = model.solid.to_mesh();
        let bounds = mesh.bounds().map(|b| {
            [
                [b.min.x as f32, b.min.y as f32, b.min.z as f32],
                [b.max.x as f32, b.max.y as f32, b.max.z as f32],
            ]
        });
        Self {
            triangles: mesh.num_triangles(),
            vertices: mesh.vertices,
            indices: mesh.indices,
            bounds,
            markers: model.markers,
            hulls: model.hulls,
            skipped: model.skipped.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Load, build and display.
///
/// On failure the viewer gets the error text and the error is returned.
pub async fn render<V: Viewer + ?Sized>(
    source: &PointSource,
    config: &AirframeConfig,
    viewer: &mut V,
) -> Result<(), PipelineError> {
    match pipeline::build_from_source(source, config).await {
        Ok(model) => {
            viewer.show(&model);
            Ok(())
        }
        Err(e) => {
            error!(%source, "error loading or processing data: {e}");
            viewer.show_error(&format!("Error: {e}"));
            Err(e.into())
        }
    }
}
