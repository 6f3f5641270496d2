//! The space status: fetching the status document and turning it into the
//! `/status` reply.

pub mod document;
pub mod format;
pub mod source;

pub use document::*;
pub use format::*;
pub use source::*;
