//! Per-verb request handlers
//!
//! Each handler resolves the request path, performs one filesystem operation
//! and describes the reply. Failures are returned, never turned into
//! responses here.

use hyper::body::Body;
use hyper::{Method, Request, StatusCode};
use std::io;
use std::path::Path;
use tokio::fs;

use crate::config::AppState;
use crate::error::{BoxError, HandlerError};
use crate::fs::copy_body;
use crate::http::{mime, ResponseDescriptor};

pub type HandlerResult = Result<ResponseDescriptor, HandlerError>;

/// Body of the 404 returned by GET
pub const NOT_FOUND_BODY: &str = "File not found";

/// GET: directory listing or file contents
pub async fn get<B>(req: Request<B>, state: &AppState) -> HandlerResult {
    let path = state.resolver.resolve(&req.uri().to_string())?;

    let Some(metadata) = stat(&path).await? else {
        return Ok(ResponseDescriptor::text(StatusCode::NOT_FOUND, NOT_FOUND_BODY));
    };

    if metadata.is_dir() {
        let names = list_dir(&path).await?;
        return Ok(ResponseDescriptor::text(StatusCode::OK, names.join("\n")));
    }

    // Opened per request; the stream is consumed once by the response
    let file = fs::File::open(&path).await?;
    Ok(ResponseDescriptor::file(
        file,
        metadata.len(),
        mime::content_type_for(&path),
    ))
}

/// DELETE: remove a file or an empty directory. Missing targets count as deleted.
pub async fn delete<B>(req: Request<B>, state: &AppState) -> HandlerResult {
    let path = state.resolver.resolve(&req.uri().to_string())?;

    match stat(&path).await? {
        None => {}
        Some(metadata) if metadata.is_dir() => fs::remove_dir(&path).await?,
        Some(_) => fs::remove_file(&path).await?,
    }

    Ok(ResponseDescriptor::with_status(StatusCode::NO_CONTENT))
}

/// PUT: create or truncate the target and stream the request body into it.
///
/// A failed upload leaves whatever was written so far.
pub async fn put<B>(req: Request<B>, state: &AppState) -> HandlerResult
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let path = state.resolver.resolve(&req.uri().to_string())?;

    let mut file = fs::File::create(&path).await?;
    copy_body(req.into_body(), &mut file).await?;

    Ok(ResponseDescriptor::with_status(StatusCode::NO_CONTENT))
}

/// Any verb other than GET, PUT and DELETE
pub fn not_allowed(method: &Method) -> ResponseDescriptor {
    ResponseDescriptor::text(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {method} not allowed."),
    )
}

/// Metadata of `path`, `None` when it does not exist
async fn stat(path: &Path) -> io::Result<Option<std::fs::Metadata>> {
    match fs::metadata(path).await {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Names of the direct children of `dir`, in the order the OS returns them
async fn list_dir(dir: &Path) -> io::Result<Vec<String>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use crate::fs::PathResolver;
    use crate::http::response::Payload;

    fn state_for(dir: &Path) -> AppState {
        AppState::new(PathResolver::new(dir), &LoggingConfig::default())
    }

    fn request(uri: &str) -> Request<()> {
        Request::builder().uri(uri).body(()).unwrap()
    }

    #[tokio::test]
    async fn test_get_file_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.html"), "<h1>hi</h1>").unwrap();

        let desc = get(request("/page.html"), &state_for(dir.path())).await.unwrap();
        assert_eq!(desc.status, StatusCode::OK);
        assert_eq!(desc.content_type, "text/html");
        assert!(matches!(desc.body, Payload::File { len: 11, .. }));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let desc = get(request("/nope"), &state_for(dir.path())).await.unwrap();
        assert_eq!(desc.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_outside_base_fails_with_forbidden() {
        let dir = tempfile::tempdir().unwrap();
        let err = get(request("/../x"), &state_for(dir.path())).await.unwrap_err();
        assert!(matches!(err, HandlerError::Forbidden));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_get_below_a_file_is_unclassified() {
        // ENOTDIR, not NotFound
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("file"), "x").unwrap();
        let err = get(request("/file/child"), &state_for(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Io(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_delete_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();

        let desc = delete(request("/empty"), &state_for(dir.path())).await.unwrap();
        assert_eq!(desc.status, StatusCode::NO_CONTENT);
        assert!(!dir.path().join("empty").exists());
    }

    #[tokio::test]
    async fn test_put_into_missing_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let req = Request::builder()
            .method(Method::PUT)
            .uri("/no/such/dir/file.txt")
            .body(http_body_util::Full::new(bytes::Bytes::from_static(b"x")))
            .unwrap();

        let err = put(req, &state_for(dir.path())).await.unwrap_err();
        assert!(matches!(err, HandlerError::Io(_)));
    }

    #[test]
    fn test_not_allowed_message() {
        let desc = not_allowed(&Method::PATCH);
        assert_eq!(desc.status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(matches!(
            desc.body,
            Payload::Bytes(ref b) if b.as_ref() == b"Method PATCH not allowed."
        ));
    }
}
