//! Purpose: Internal JSON boundary between raw HTTP bodies and the entity codec.
//! Exports: `parse` module with body decode/encode helpers used by the endpoint invoker.
//! Role: Single seam so callsites never decode response bytes ad hoc.
//! Invariants: Body decoding always reports failures as `DecodeError`.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
