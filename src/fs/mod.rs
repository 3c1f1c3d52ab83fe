//! Filesystem side of request handling
//!
//! Path containment and the streaming copy used by uploads.

pub mod copy;
pub mod resolve;

pub use copy::copy_body;
pub use resolve::PathResolver;
