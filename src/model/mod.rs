//! Model module - request payloads and the normalized dispatch result.
//!
//! Provides:
//! - [`OutboundRequest`] and the payload structs it wraps
//! - [`DispatchOutcome`] - status + body handed to every callback
//! - [`ProfileResponse`] - typed view of the `profile` answer

mod request;
mod response;

pub use request::{
    AuthTokenRequest, ContactRequest, Encounter, Location, LocationRequest, OutboundRequest,
    PositionFix, ProfileRequest, QuarantineLeftRequest,
};
pub use response::{DispatchOutcome, ProfileResponse, TRANSPORT_FAILURE_STATUS};
