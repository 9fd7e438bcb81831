//! Where point datasets are fetched from.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::LoadError;
use crate::validate::parse_points;
use crate::PointSet;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_SOURCE: &str = "aircraft_points.json";

/// A request/response transport delivering the raw dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PointSource {
    /// HTTP(S) GET.
    Http(String),
    /// Local file read.
    File(PathBuf),
}

impl PointSource {
    /// Interpret a location string: `http://` and `https://` URLs are fetched
    /// over HTTP, everything else is a file path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Http(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    /// Fetch the raw payload bytes.
    pub async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            Self::Http(url) => fetch_http(url).await,
            Self::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| LoadError::transport(path.display().to_string(), None, e.to_string())),
        }
    }
}

async fn fetch_http(url: &str) -> Result<Vec<u8>, LoadError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| LoadError::transport(url, e.status().map(|s| s.as_u16()), e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::transport(
            url,
            Some(status.as_u16()),
            status.canonical_reason().unwrap_or("request failed"),
        ));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| LoadError::transport(url, None, e.to_string()))?;
    Ok(body.to_vec())
}

impl Default for PointSource {
    fn default() -> Self {
        Self::parse(DEFAULT_SOURCE)
    }
}

impl fmt::Display for PointSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<String> for PointSource {
    fn from(location: String) -> Self {
        Self::parse(&location)
    }
}

impl From<PointSource> for String {
    fn from(source: PointSource) -> Self {
        source.to_string()
    }
}

/// Fetch and validate a dataset.
///
/// All-or-nothing: any transport, decode, or schema failure returns an error
/// and no points. Safe to repeat; nothing is cached between calls.
pub async fn load(source: &PointSource) -> Result<PointSet, LoadError> {
    debug!(%source, "fetching point dataset");
    let bytes = source.fetch().await?;
    let points = parse_points(&bytes)?;
    info!(%source, points = points.len(), "loaded point dataset");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchemaErrorKind;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("airframe-points-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parse_picks_transport() {
        assert_eq!(
            PointSource::parse("https://example.com/aircraft_points.json"),
            PointSource::Http("https://example.com/aircraft_points.json".into())
        );
        assert_eq!(
            PointSource::parse("data/aircraft_points.json"),
            PointSource::File(PathBuf::from("data/aircraft_points.json"))
        );
        assert_eq!(
            PointSource::default(),
            PointSource::File(PathBuf::from(DEFAULT_SOURCE))
        );
    }

    #[tokio::test]
    async fn load_from_file() {
        let path = scratch_file(
            "three_points.json",
            r#"[{"id":"C11","x":0,"y":0,"z":0},{"id":"C21","x":1,"y":0,"z":0},{"id":"C31","x":2,"y":0,"z":0}]"#,
        );
        let set = load(&PointSource::File(path)).await.unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.find("C31").map(|p| p.x), Some(2.0));
    }

    #[tokio::test]
    async fn missing_file_is_a_transport_error() {
        let source = PointSource::File(PathBuf::from("/nonexistent/airframe/points.json"));
        let err = load(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Transport { status: None, .. }));
    }

    #[tokio::test]
    async fn duplicate_ids_fail_the_load() {
        let path = scratch_file(
            "duplicate.json",
            r#"[{"id":"A","x":0,"y":0,"z":0},{"id":"A","x":1,"y":1,"z":1}]"#,
        );
        let err = load(&PointSource::File(path)).await.unwrap_err();
        assert_eq!(
            err.as_schema().map(|e| e.kind),
            Some(SchemaErrorKind::DuplicateId)
        );
    }

    #[tokio::test]
    async fn repeated_loads_agree() {
        let path = scratch_file("repeat.json", r#"[{"id":"P","x":1.5,"y":2.5,"z":3.5}]"#);
        let source = PointSource::File(path);
        let first = load(&source).await.unwrap();
        let second = load(&source).await.unwrap();
        assert_eq!(first, second);
    }

    /// Serve `/points.json` and a 404 at `/missing` on an ephemeral port.
    async fn http_fixture() -> std::net::SocketAddr {
        use axum::{http::StatusCode, routing::get, Router};

        const WINGS: &str =
            r#"[{"id":"W1L","x":0.5,"y":-2,"z":0.1},{"id":"W1R","x":0.5,"y":2,"z":0.1}]"#;
        let app = Router::new()
            .route("/points.json", get(|| async { WINGS }))
            .route("/missing", get(|| async { StatusCode::NOT_FOUND }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        addr
    }

    #[tokio::test]
    async fn load_over_http() {
        let addr = http_fixture().await;
        let source = PointSource::parse(&format!("http://{addr}/points.json"));
        assert!(matches!(source, PointSource::Http(_)));

        let set = load(&source).await.unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.find("W1R").map(|p| p.position()), Some([0.5, 2.0, 0.1]));
    }

    #[tokio::test]
    async fn http_error_status_is_a_transport_error() {
        let addr = http_fixture().await;
        let url = format!("http://{addr}/missing");
        let err = load(&PointSource::Http(url.clone())).await.unwrap_err();
        match &err {
            LoadError::Transport {
                source_name,
                status: Some(404),
                ..
            } => assert_eq!(source_name, &url),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("404"), "{err}");
    }
}
