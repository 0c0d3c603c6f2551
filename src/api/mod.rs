//! Purpose: Public client surface for the Console and Wavekit REST APIs.
//! Exports: `Client`, `ApiResponse`, `Operation`, `Method`, `DiagnosticsQuery`, error types,
//!          and one descriptor constant per endpoint (grouped by resource module).
//! Role: Thin per-operation layer over one generic request executor.
//! Invariants: Each operation has a `*_detailed` form returning `ApiResponse<T>` and a plain
//!             form returning the parsed payload only.

mod client;
mod operation;
mod response;

pub mod auth;
pub mod clusters;
pub mod databases;
pub mod metrics;
pub mod tasks;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use client::{ApiResult, Client};
pub use clusters::DiagnosticsQuery;
pub use operation::{Method, Operation};
pub use response::ApiResponse;
