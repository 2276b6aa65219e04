//! Platform abstraction layer for wheelwright.
//!
//! This crate provides the seams the wheel builder talks to the outside world through:
//! - Process execution (streamed to the caller's terminal, or captured)
//! - Filesystem helpers (recursive copy, idempotent removal)
//!
//! Process execution goes through the [`ProcessOperations`] trait so the builder can be
//! driven by a fake in tests.

pub mod fs;
pub mod implementations;
pub mod process;

pub use implementations::native::NativeProcessOperations;
pub use process::{CommandOutput, OutputMode, PlatformCommand, ProcessOperations};
