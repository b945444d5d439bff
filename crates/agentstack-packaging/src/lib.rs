//! # agentstack-packaging
//!
//! Drives the external `uv` package manager for an AgentStack project:
//! - [`RuntimeContext`]: paths of the project-local virtual environment
//! - [`ProcessRunner`]: runs one external command, streams its output to
//!   callbacks and reduces every outcome to a `bool`
//! - [`uv`]: install, remove, upgrade and venv creation on top of the runner

pub mod context;
pub mod error;
pub mod progress;
pub mod runner;
pub mod uv;

pub use context::RuntimeContext;
pub use error::{Error, Result};
pub use progress::{ProgressLevel, ProgressReporter, TracingReporter};
pub use runner::{Callbacks, OutputChunk, OutputStream, ProcessRunner};
