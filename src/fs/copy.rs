//! Body-to-file streaming copy
//!
//! Frames are pulled one at a time, so a slow disk throttles the client
//! through hyper's own read backpressure.

use bytes::Buf;
use http_body_util::BodyExt;
use hyper::body::Body;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{BoxError, HandlerError};

/// Copy every data frame of `body` into `dest`.
///
/// The first failure from either side ends the copy. Success is reported only
/// after `dest` has been flushed. Returns the number of bytes written.
pub async fn copy_body<B, W>(body: B, dest: &mut W) -> Result<u64, HandlerError>
where
    B: Body,
    B::Error: Into<BoxError>,
    W: AsyncWrite + Unpin,
{
    let mut body = std::pin::pin!(body);
    let mut written = 0u64;

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(|e| HandlerError::Body(e.into()))?;
        // Trailers carry no file content
        if let Ok(mut data) = frame.into_data() {
            written += data.remaining() as u64;
            dest.write_all_buf(&mut data).await?;
        }
    }

    dest.flush().await?;
    Ok(written)
}
