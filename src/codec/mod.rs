//! Codec module - serialization of request and response bodies.
//!
//! - [`JsonCodec`] - JSON using `serde_json`, the only encoding the backend speaks
//!
//! # Design
//!
//! Codecs are marker structs with static methods rather than trait objects.
//! The model types carry all per-field naming through serde derives, so the
//! codec itself needs no custom logic.

mod json;

pub use json::{JsonCodec, CONTENT_TYPE};
