//! Payload file module
//!
//! Reads the payload file from disk on every request and turns it into a
//! response. Nothing is cached, so edits to the file show up on the next
//! request.

use crate::http;
use crate::logger::RequestLog;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// The payload file could not be read
#[derive(Debug)]
pub struct PayloadError {
    path: PathBuf,
    source: io::Error,
}

impl PayloadError {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to read payload file '{}': {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Read the whole payload file as raw bytes
pub async fn load_payload(path: impl AsRef<Path>) -> Result<Bytes, PayloadError> {
    let path = path.as_ref();
    fs::read(path).await.map(Bytes::from).map_err(|source| PayloadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Serve the payload file, or 500 if it cannot be read
pub async fn serve_payload(payload_file: &str, request_log: &dyn RequestLog) -> Response<Full<Bytes>> {
    match load_payload(payload_file).await {
        Ok(payload) => http::build_payload_response(payload),
        Err(e) => {
            request_log.payload_error(&e);
            http::build_500_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NoopRequestLog;
    use std::sync::Mutex;

    fn temp_payload(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "mock-introspect-payload-{}-{name}.json",
            std::process::id()
        ))
    }

    #[derive(Default)]
    struct CapturingLog {
        errors: Mutex<Vec<String>>,
    }

    impl RequestLog for CapturingLog {
        fn payload_error(&self, error: &PayloadError) {
            self.errors.lock().unwrap().push(error.to_string());
        }
    }

    #[tokio::test]
    async fn test_load_payload_reads_raw_bytes() {
        let path = temp_payload("raw");
        let contents: &[u8] = b"{\"active\": true, \"sub\": \"user123\"}\n\xff";
        std::fs::write(&path, contents).unwrap();

        let payload = load_payload(&path).await.unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(&payload[..], contents);
    }

    #[tokio::test]
    async fn test_load_payload_rereads_file() {
        let path = temp_payload("reread");
        std::fs::write(&path, r#"{"active": true}"#).unwrap();
        let first = load_payload(&path).await.unwrap();

        std::fs::write(&path, r#"{"active": false}"#).unwrap();
        let second = load_payload(&path).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(&first[..], br#"{"active": true}"#);
        assert_eq!(&second[..], br#"{"active": false}"#);
    }

    #[tokio::test]
    async fn test_missing_payload_is_an_error() {
        let path = temp_payload("missing");
        std::fs::remove_file(&path).ok();

        let err = load_payload(&path).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("failed to read payload file"));
    }

    #[tokio::test]
    async fn test_serve_missing_payload_returns_500() {
        let path = temp_payload("serve-missing");
        std::fs::remove_file(&path).ok();
        let log = CapturingLog::default();

        let resp = serve_payload(path.to_str().unwrap(), &log).await;
        assert_eq!(resp.status(), 500);
        assert_eq!(log.errors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_serve_payload_returns_json() {
        let path = temp_payload("serve");
        std::fs::write(&path, r#"{"active": true}"#).unwrap();

        let resp = serve_payload(path.to_str().unwrap(), &NoopRequestLog).await;
        std::fs::remove_file(&path).ok();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "application/json");
    }
}
