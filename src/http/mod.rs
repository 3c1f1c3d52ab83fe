//! HTTP protocol layer module
//!
//! Response descriptors and Content-Type lookup, independent of the
//! filesystem handlers that use them.

pub mod mime;
pub mod response;

pub use response::{ResponseBody, ResponseDescriptor};
