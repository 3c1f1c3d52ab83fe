//! Request dispatch module
//!
//! Entry point for HTTP request processing: selects the handler for the
//! method, turns handler failures into responses and records the access log.

use hyper::body::Body;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::methods;
use crate::config::AppState;
use crate::error::{BoxError, HandlerError};
use crate::http::{ResponseBody, ResponseDescriptor};
use crate::logger::{self, AccessLogEntry, Level};

/// Methods with a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Put,
    Delete,
}

impl Verb {
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Self::Get),
            Method::PUT => Some(Self::Put),
            Method::DELETE => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let mut entry = state
        .access_log
        .then(|| AccessLogEntry::from_request(&req, remote_addr));

    let descriptor = dispatch(req, &state).await;

    if let Some(entry) = entry.as_mut() {
        entry.status = descriptor.status.as_u16();
        entry.body_bytes = descriptor.body.byte_len();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.access_log_format);
    }

    Ok(descriptor.into_response())
}

/// Run the handler for the request's method and always produce a descriptor
pub async fn dispatch<B>(req: Request<B>, state: &AppState) -> ResponseDescriptor
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let method = req.method().clone();
    let target = req.uri().to_string();

    let result = match Verb::from_method(&method) {
        Some(Verb::Get) => methods::get(req, state).await,
        Some(Verb::Put) => methods::put(req, state).await,
        Some(Verb::Delete) => methods::delete(req, state).await,
        None => Ok(methods::not_allowed(&method)),
    };

    result.unwrap_or_else(|err| {
        log_failure(&method, &target, &err);
        failure_response(&err)
    })
}

/// Explicit status when the failure carries one, 500 otherwise
fn failure_response(err: &HandlerError) -> ResponseDescriptor {
    let status = err.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    ResponseDescriptor::text(status, err.to_string())
}

fn log_failure(method: &Method, target: &str, err: &HandlerError) {
    match failure_message(method, target, err) {
        (Level::Warn, message) => logger::log_warning(&message),
        (_, message) => logger::log_error(&message),
    }
}

/// Severity and text of the log line for a failed request
fn failure_message(method: &Method, target: &str, err: &HandlerError) -> (Level, String) {
    match err {
        HandlerError::Forbidden => (
            Level::Warn,
            format!("Path traversal attempt blocked: {method} {target}"),
        ),
        _ => (Level::Error, format!("{method} {target} failed: {err}")),
    }
}
