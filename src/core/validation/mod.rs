//! Request body validation
//!
//! Payload types declare their rules with `validator` derives; the
//! [`Validated`] extractor runs them before the body reaches a handler.

pub mod extractor;

pub use extractor::Validated;
