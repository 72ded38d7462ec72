//! Core types for sharegen
//!
//! - [`error`] - [`SharegenError`], [`ErrorContext`] and [`user_friendly_error`]
//! - [`encoding`] - strict text codecs used to read templates and write output
//!
//! Every fallible operation in the crate returns `anyhow::Result`, with a
//! [`SharegenError`] at the root of the chain for the failure modes users can act on.

pub mod encoding;
pub mod error;

pub use encoding::{CodecFailure, Encoding};
pub use error::{ErrorContext, SharegenError, user_friendly_error};
