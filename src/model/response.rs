//! Inbound results.

use serde::{Deserialize, Serialize};

use crate::codec::JsonCodec;
use crate::error::Result;

/// Status reported when no HTTP status was obtained.
pub const TRANSPORT_FAILURE_STATUS: i32 = -1;

const UNKNOWN_FAILURE: &str = "request failed without a description";

/// Normalized result of one dispatch.
///
/// Both arms always carry text: the response body when the server answered,
/// a description of what went wrong when it did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The server answered. Any status, 2xx or not, lands here.
    Completed { status: u16, body: String },
    /// The call never completed (connect, DNS, TLS, serialization, ...).
    Failed { reason: String },
}

impl DispatchOutcome {
    pub fn completed(status: u16, body: impl Into<String>) -> Self {
        DispatchOutcome::Completed {
            status,
            body: body.into(),
        }
    }

    /// Build a failure outcome. An empty description is replaced so the body
    /// is never blank.
    pub fn failed(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let reason = if reason.trim().is_empty() {
            UNKNOWN_FAILURE.to_string()
        } else {
            reason
        };
        DispatchOutcome::Failed { reason }
    }

    /// HTTP status, or [`TRANSPORT_FAILURE_STATUS`] if the call never completed.
    pub fn status(&self) -> i32 {
        match self {
            DispatchOutcome::Completed { status, .. } => i32::from(*status),
            DispatchOutcome::Failed { .. } => TRANSPORT_FAILURE_STATUS,
        }
    }

    /// Response body, or the failure description.
    pub fn body(&self) -> &str {
        match self {
            DispatchOutcome::Completed { body, .. } => body,
            DispatchOutcome::Failed { reason } => reason,
        }
    }

    /// True for a 2xx answer.
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Completed { status, .. } if (200..300).contains(status))
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, DispatchOutcome::Failed { .. })
    }

    /// Split into `(status, body)` the way callback consumers usually branch.
    pub fn into_parts(self) -> (i32, String) {
        let status = self.status();
        match self {
            DispatchOutcome::Completed { body, .. } => (status, body),
            DispatchOutcome::Failed { reason } => (status, reason),
        }
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not valid JSON for `T`. A failed outcome's
    /// description is plain text and will normally fail to decode.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        JsonCodec::decode(self.body())
    }
}

/// Answer to `PUT profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile_id: i64,
    pub device_id: String,
}
