//! File system utilities
//!
//! - [`atomic`] - temp-and-rename writes so build output is never half written
//! - [`dirs`] - directory creation

pub mod atomic;
pub mod dirs;

pub use atomic::atomic_write;
pub use dirs::ensure_dir;
