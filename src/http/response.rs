//! Response descriptors
//!
//! Handlers describe their reply as a [`ResponseDescriptor`]; the dispatcher
//! turns it into a hyper response exactly once.

use std::borrow::Cow;
use std::io;

use bytes::Bytes;
use futures::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::Frame;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use tokio_util::io::ReaderStream;

/// Content-Type used when a handler does not choose one
pub const DEFAULT_TYPE: &str = "text/plain";

/// Body type written to the connection
pub type ResponseBody = BoxBody<Bytes, io::Error>;

/// Payload of a descriptor
#[derive(Debug)]
pub enum Payload {
    Empty,
    Bytes(Bytes),
    /// Streamed from the start of an already opened file
    File { file: tokio::fs::File, len: u64 },
}

impl Payload {
    /// Number of bytes the body will produce
    pub fn byte_len(&self) -> u64 {
        match self {
            Self::Empty => 0,
            Self::Bytes(bytes) => bytes.len() as u64,
            Self::File { len, .. } => *len,
        }
    }
}

/// Status, body and Content-Type of a reply
#[derive(Debug)]
pub struct ResponseDescriptor {
    pub status: StatusCode,
    pub body: Payload,
    pub content_type: Cow<'static, str>,
}

impl Default for ResponseDescriptor {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            body: Payload::Empty,
            content_type: Cow::Borrowed(DEFAULT_TYPE),
        }
    }
}

impl ResponseDescriptor {
    /// Bodiless reply with the given status
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Buffered text reply
    pub fn text(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: Payload::Bytes(body.into()),
            ..Self::default()
        }
    }

    /// 200 reply streaming `file`
    pub fn file(file: tokio::fs::File, len: u64, content_type: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            body: Payload::File { file, len },
            content_type: Cow::Borrowed(content_type),
        }
    }

    /// Build the hyper response: status line, a single Content-Type header and the body.
    pub fn into_response(self) -> Response<ResponseBody> {
        let body = match self.body {
            Payload::Empty => Empty::<Bytes>::new().map_err(|never| match never {}).boxed(),
            Payload::Bytes(bytes) => Full::new(bytes).map_err(|never| match never {}).boxed(),
            Payload::File { file, .. } => {
                StreamBody::new(ReaderStream::new(file).map_ok(Frame::data)).boxed()
            }
        };

        let content_type = HeaderValue::from_str(&self.content_type).unwrap_or_else(|e| {
            crate::logger::log_warning(&format!(
                "Invalid Content-Type '{}': {e}",
                self.content_type
            ));
            HeaderValue::from_static(DEFAULT_TYPE)
        });

        let mut response = Response::new(body);
        *response.status_mut() = self.status;
        response.headers_mut().insert(CONTENT_TYPE, content_type);
        response
    }
}
