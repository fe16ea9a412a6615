//! # exposure-api-client
//!
//! Asynchronous request dispatcher for the exposure-notification backend.
//!
//! A mobile client reports its profile, recorded contacts, locations and
//! quarantine status to the backend. Every call goes through one
//! [`Dispatcher`], which serializes the payload, runs the HTTP call on a
//! tokio worker and hands a normalized [`DispatchOutcome`] back to the
//! caller's own context.
//!
//! ## Architecture
//!
//! - **Caller context**: builds requests, calls named operations, drains an
//!   [`OriginContext`] to run callbacks
//! - **Runtime workers**: serialize, execute one transport call, normalize
//!
//! ## Example
//!
//! `demos/create_profile.rs` registers a device and drains the origin
//! context for the answer:
//!
//! ```text
//! cargo run --example create_profile -- https://api.example.com/v1
//! ```

pub mod codec;
pub mod dispatcher;
pub mod error;
pub mod identity;
pub mod model;
pub mod origin;
pub mod transport;

pub use dispatcher::{actions, Callback, Dispatcher, DispatcherBuilder};
pub use error::ApiError;
pub use identity::{IdentityProvider, StaticIdentity};
pub use model::{
    AuthTokenRequest, ContactRequest, DispatchOutcome, Encounter, Location, LocationRequest,
    OutboundRequest, PositionFix, ProfileRequest, ProfileResponse, QuarantineLeftRequest,
    TRANSPORT_FAILURE_STATUS,
};
pub use origin::{OriginContext, OriginHandle};
pub use transport::{HttpTransport, Method, Transport};
