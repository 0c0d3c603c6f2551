//! Purpose: Typed client library for the Console and Wavekit REST APIs.
//! Exports: `core` (entity codec, decode errors, timestamps), `models` (wire entities),
//!          `api` (client, operation descriptors, responses).
//! Role: Backs the `wavekit` CLI and is usable directly as a blocking SDK.
//! Invariants: Entities round-trip unknown wire keys through their additional-properties bag.
//! Invariants: Network access happens only through `api::Client`.
pub mod api;
pub mod core;
mod json;
pub mod models;
