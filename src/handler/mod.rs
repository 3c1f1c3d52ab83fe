//! Request handler module
//!
//! Method dispatch and the per-verb filesystem handlers.

pub mod dispatch;
pub mod methods;

// Re-export main entry point
pub use dispatch::handle_request;
