//! Load-build-export actions.
//!
//! Every action refetches the dataset and rebuilds the solid; nothing is
//! cached between actions.

use std::path::PathBuf;

use airframe_export::{ExportError, ExportFormat, FileSaver};
use airframe_points::{LoadError, PointSet, PointSource};
use thiserror::Error;
use tracing::info;

use crate::build::{build_model, Model};
use crate::config::AirframeConfig;

/// Errors that abort a view or export action.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The dataset could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The solid could not be serialized or saved.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Build the model for loaded points. CPU-bound; callers on an async
/// runtime may move it to a blocking thread.
pub fn build(points: &PointSet, config: &AirframeConfig) -> Model {
    build_model(points, &config.connections, &config.model)
}

/// Build the model for loaded points and serialize it to `format`.
pub fn serialize(
    points: &PointSet,
    config: &AirframeConfig,
    format: ExportFormat,
) -> Result<Vec<u8>, ExportError> {
    let model = build(points, config);
    let bytes = format.serialize(&model.solid)?;
    info!(%format, bytes = bytes.len(), "serialized model");
    Ok(bytes)
}

/// Fetch, validate and build.
pub async fn build_from_source(
    source: &PointSource,
    config: &AirframeConfig,
) -> Result<Model, LoadError> {
    let points = airframe_points::load(source).await?;
    Ok(build(&points, config))
}

/// Rebuild and serialize to `format`.
pub async fn export_bytes(
    source: &PointSource,
    config: &AirframeConfig,
    format: ExportFormat,
) -> Result<Vec<u8>, PipelineError> {
    let points = airframe_points::load(source).await?;
    Ok(serialize(&points, config, format)?)
}

/// Rebuild, serialize, and hand the bytes to `saver` under the format's
/// fixed filename.
///
/// The saver is called once on success and never on failure.
pub async fn export<S: FileSaver + ?Sized>(
    source: &PointSource,
    config: &AirframeConfig,
    format: ExportFormat,
    saver: &S,
) -> Result<PathBuf, PipelineError> {
    let bytes = export_bytes(source, config, format).await?;
    Ok(saver.save(format.file_name(), &bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::{render, Viewer};
    use airframe_points::SchemaErrorKind;
    use std::cell::RefCell;
    use std::path::Path;

    const AIRCRAFT: &str = r#"[
        {"id": "C11", "x": 0.0, "y": 0.0, "z": 0.0},
        {"id": "C21", "x": 1.0, "y": 0.0, "z": 0.0},
        {"id": "C31", "x": 1.0, "y": 1.0, "z": 0.0}
    ]"#;

    const DUPLICATE: &str = r#"[
        {"id": "A", "x": 0, "y": 0, "z": 0},
        {"id": "A", "x": 1, "y": 1, "z": 1}
    ]"#;

    fn dataset(name: &str, contents: &str) -> PointSource {
        let dir = std::env::temp_dir().join("airframe-pipeline-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        PointSource::File(path)
    }

    /// Records saves instead of writing files.
    #[derive(Default)]
    struct RecordingSaver {
        saved: RefCell<Vec<(String, usize)>>,
    }

    impl FileSaver for RecordingSaver {
        fn save(&self, file_name: &str, bytes: &[u8]) -> airframe_export::Result<PathBuf> {
            self.saved.borrow_mut().push((file_name.to_string(), bytes.len()));
            Ok(Path::new("/saved").join(file_name))
        }
    }

    #[derive(Default)]
    struct RecordingViewer {
        shown: Vec<(usize, usize)>,
        errors: Vec<String>,
    }

    impl Viewer for RecordingViewer {
        fn show(&mut self, model: &Model) {
            self.shown.push((model.markers, model.hulls));
        }

        fn show_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    #[tokio::test]
    async fn aircraft_renders_three_markers_two_hulls() {
        let source = dataset("aircraft.json", AIRCRAFT);
        let mut viewer = RecordingViewer::default();
        render(&source, &AirframeConfig::default(), &mut viewer).await.unwrap();
        assert_eq!(viewer.shown, vec![(3, 2)]);
        assert!(viewer.errors.is_empty());
    }

    #[tokio::test]
    async fn each_export_saves_exactly_one_file() {
        let source = dataset("aircraft-export.json", AIRCRAFT);
        let config = AirframeConfig::default();

        for format in ExportFormat::ALL {
            let saver = RecordingSaver::default();
            let path = export(&source, &config, format, &saver).await.unwrap();
            assert_eq!(path, Path::new("/saved").join(format.file_name()));

            let saved = saver.saved.into_inner();
            assert_eq!(saved.len(), 1);
            assert_eq!(saved[0].0, format.file_name());
            assert!(saved[0].1 > 0);
        }
    }

    #[tokio::test]
    async fn duplicate_ids_show_error_and_block_export() {
        let source = dataset("duplicate.json", DUPLICATE);
        let config = AirframeConfig::default();

        let mut viewer = RecordingViewer::default();
        let err = render(&source, &config, &mut viewer).await.unwrap_err();
        assert!(viewer.shown.is_empty());
        assert_eq!(viewer.errors.len(), 1);
        assert!(viewer.errors[0].contains("duplicate id"), "{}", viewer.errors[0]);
        match err {
            PipelineError::Load(e) => {
                let schema = e.as_schema().unwrap();
                assert_eq!(schema.kind, SchemaErrorKind::DuplicateId);
                assert_eq!(schema.point_id.as_deref(), Some("A"));
            }
            other => panic!("unexpected error: {other}"),
        }

        for format in ExportFormat::ALL {
            let saver = RecordingSaver::default();
            let err = export(&source, &config, format, &saver).await.unwrap_err();
            assert!(matches!(err, PipelineError::Load(_)));
            assert!(saver.saved.borrow().is_empty());
        }
    }

    #[tokio::test]
    async fn missing_source_is_a_transport_error() {
        let source = PointSource::parse("/nonexistent/aircraft_points.json");
        let mut viewer = RecordingViewer::default();
        let err = render(&source, &AirframeConfig::default(), &mut viewer).await.unwrap_err();
        assert!(matches!(err, PipelineError::Load(LoadError::Transport { status: None, .. })));
        assert_eq!(viewer.errors.len(), 1);
        assert!(viewer.errors[0].starts_with("Error: "));
    }

    #[tokio::test]
    async fn empty_dataset_exports_empty_solid() {
        let source = dataset("empty.json", "[]");
        let config = AirframeConfig {
            connections: airframe_points::ConnectionTable::empty(),
            ..AirframeConfig::default()
        };
        let model = build_from_source(&source, &config).await.unwrap();
        assert!(model.solid.is_empty());

        let stl = export_bytes(&source, &config, ExportFormat::Stl).await.unwrap();
        assert_eq!(stl.len(), 84);
    }

    #[test]
    fn build_and_serialize_loaded_points() {
        let points = airframe_points::parse_points(AIRCRAFT.as_bytes()).unwrap();
        let config = AirframeConfig::default();

        let model = build(&points, &config);
        assert_eq!((model.markers, model.hulls), (3, 2));

        let stl = serialize(&points, &config, ExportFormat::Stl).unwrap();
        let triangles = u32::from_le_bytes(stl[80..84].try_into().unwrap()) as usize;
        assert_eq!(triangles, model.solid.to_mesh().num_triangles());
        assert_eq!(stl.len(), 84 + 50 * triangles);
    }

    #[tokio::test]
    async fn save_failure_is_an_export_error() {
        struct FailingSaver;
        impl FileSaver for FailingSaver {
            fn save(&self, _: &str, _: &[u8]) -> airframe_export::Result<PathBuf> {
                Err(std::io::Error::other("disk full").into())
            }
        }

        let source = dataset("aircraft-fail.json", AIRCRAFT);
        let err = export(&source, &AirframeConfig::default(), ExportFormat::Dxf, &FailingSaver)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Export(ExportError::Io(_))));
    }
}
