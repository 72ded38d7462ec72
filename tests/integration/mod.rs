//! Integration test suite for sharegen
//!
//! End-to-end tests that drive the library through a full build and the
//! `sharegen` binary through its commands.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **pipeline**: project loading, gather, munge, write and lifecycle hooks
//! - **cli**: the `sharegen` binary, its output and exit codes

mod cli;
mod pipeline;
