//! Request dispatcher - the single choke point for backend calls.
//!
//! The [`DispatcherBuilder`] provides a fluent API for configuring the
//! endpoint, transport and identity source. The [`Dispatcher`] runs each call
//! as its own task:
//! 1. Serialize the request to JSON
//! 2. Resolve `base_endpoint/action`
//! 3. Execute one transport call on a runtime worker
//! 4. Normalize the result into a [`DispatchOutcome`]
//! 5. Post the callback to the origin context
//!
//! Nothing is ever returned as an error from a dispatch. Transport failures
//! and non-2xx answers alike arrive through the callback.
//!
//! # Example
//!
//! ```ignore
//! use exposure_api_client::{origin, DispatchOutcome, Dispatcher, ProfileRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (mut origin, handle) = origin::channel();
//!     let dispatcher = Dispatcher::builder()
//!         .base_endpoint("https://api.example.com/v1")
//!         .origin(handle)
//!         .build()?;
//!
//!     let request = ProfileRequest::new("device-uid", "push-token", "+421900000000", "sk_SK");
//!     dispatcher.create_profile(request, |outcome: DispatchOutcome| {
//!         println!("{} {}", outcome.status(), outcome.body());
//!     });
//!
//!     origin.next().await;
//!     Ok(())
//! }
//! ```

mod callback;
mod endpoint;

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::codec::{JsonCodec, CONTENT_TYPE};
use crate::error::{ApiError, Result};
use crate::identity::{IdentityProvider, StaticIdentity};
use crate::model::{
    AuthTokenRequest, ContactRequest, DispatchOutcome, LocationRequest, OutboundRequest,
    ProfileRequest, QuarantineLeftRequest,
};
use crate::origin::OriginHandle;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method, Transport};

pub use callback::Callback;
pub use endpoint::actions;

use callback::CompletionGuard;

/// Builder for configuring and creating a [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    base_endpoint: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    origin: Option<OriginHandle>,
    runtime: Option<Handle>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base endpoint every action path is appended to. Required.
    pub fn base_endpoint(mut self, base: impl Into<String>) -> Self {
        self.base_endpoint = Some(base.into());
        self
    }

    /// Transport used for network calls.
    ///
    /// Default: [`HttpTransport`] with reqwest defaults.
    pub fn transport(mut self, transport: impl Transport) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Source of device/profile identity for the auth and quarantine actions.
    ///
    /// Default: an unregistered identity (no device id, profile id 0).
    pub fn identity(mut self, identity: impl IdentityProvider) -> Self {
        self.identity = Some(Arc::new(identity));
        self
    }

    /// Context callbacks are delivered on. Required.
    pub fn origin(mut self, origin: OriginHandle) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Runtime whose workers execute the network calls.
    ///
    /// Default: the runtime `build` is called from.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Build the dispatcher.
    ///
    /// # Errors
    ///
    /// Fails if the base endpoint or origin is missing, the base endpoint is
    /// not an absolute http(s) URL, no runtime is available, or the default
    /// transport cannot be created.
    pub fn build(self) -> Result<Dispatcher> {
        let base = self
            .base_endpoint
            .ok_or(ApiError::MissingConfig("base_endpoint"))?;
        let base_endpoint = endpoint::normalize_base(&base)?;
        let origin = self.origin.ok_or(ApiError::MissingConfig("origin"))?;
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current()?,
        };
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::builder().build()?),
        };
        let identity: Arc<dyn IdentityProvider> = self
            .identity
            .unwrap_or_else(|| Arc::new(StaticIdentity::unregistered()));

        Ok(Dispatcher {
            inner: Arc::new(Inner {
                base_endpoint,
                transport,
                identity,
                origin,
                runtime,
            }),
        })
    }
}

struct Inner {
    base_endpoint: String,
    transport: Arc<dyn Transport>,
    identity: Arc<dyn IdentityProvider>,
    origin: OriginHandle,
    runtime: Handle,
}

/// Asynchronous request dispatcher.
///
/// Cheap to clone; all clones share the same configuration. Every operation
/// returns immediately and reports exactly once through its callback.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Normalized base endpoint (no trailing slash).
    pub fn base_endpoint(&self) -> &str {
        &self.inner.base_endpoint
    }

    /// Register a device profile (`PUT profile`).
    pub fn create_profile(&self, request: ProfileRequest, callback: impl Into<Callback>) {
        self.dispatch(actions::PROFILE, Method::Put, request, callback);
    }

    /// Upload recorded encounters (`POST profile/contacts`).
    pub fn send_contacts(&self, request: ContactRequest, callback: impl Into<Callback>) {
        self.dispatch(actions::CONTACTS, Method::Post, request, callback);
    }

    /// Ask the backend to send a one-time token to the user (`POST profile/mfatoken`).
    pub fn request_auth_token(&self, callback: impl Into<Callback>) {
        let request = self.identity_request();
        self.dispatch(actions::MFA_TOKEN, Method::Post, request, callback);
    }

    /// Confirm the one-time token (`PUT profile/mfatoken`).
    pub fn confirm_auth_token(&self, mfa_token: &str, callback: impl Into<Callback>) {
        let request = self.identity_request().with_mfa_token(mfa_token);
        self.dispatch(actions::MFA_TOKEN, Method::Put, request, callback);
    }

    /// Start a quarantine of `duration` days (`POST profile/quarantine`).
    pub fn confirm_quarantine(
        &self,
        mfa_token: &str,
        duration: u32,
        callback: impl Into<Callback>,
    ) {
        let request = self
            .identity_request()
            .with_mfa_token(mfa_token)
            .with_duration(duration);
        self.dispatch(actions::QUARANTINE, Method::Post, request, callback);
    }

    /// Upload recorded positions (`POST profile/location`).
    pub fn send_locations(&self, request: LocationRequest, callback: impl Into<Callback>) {
        self.dispatch(actions::LOCATION, Method::Post, request, callback);
    }

    /// Report leaving the quarantine area (`POST profile/areaexit`).
    pub fn quarantine_left(&self, request: QuarantineLeftRequest, callback: impl Into<Callback>) {
        self.dispatch(actions::AREA_EXIT, Method::Post, request, callback);
    }

    /// Send `request` to `action` on a runtime worker and report through `callback`.
    ///
    /// Returns immediately. The callback runs exactly once, on the origin
    /// context, after the network attempt has resolved.
    pub fn dispatch(
        &self,
        action: &str,
        method: Method,
        request: impl Into<OutboundRequest>,
        callback: impl Into<Callback>,
    ) {
        let request = request.into();
        let guard = CompletionGuard::new(callback.into(), self.inner.origin.clone());
        let inner = self.inner.clone();
        let action = action.to_owned();

        // Dropping the JoinHandle detaches the task. If the runtime is gone the
        // future is dropped unpolled and the guard reports the abort.
        self.inner.runtime.spawn(async move {
            let outcome = inner.execute(&action, method, &request).await;
            guard.complete(outcome);
        });
    }

    fn identity_request(&self) -> AuthTokenRequest {
        let identity = &self.inner.identity;
        AuthTokenRequest::new(identity.device_id(), identity.profile_id())
    }
}

impl Inner {
    async fn execute(
        &self,
        action: &str,
        method: Method,
        request: &OutboundRequest,
    ) -> DispatchOutcome {
        match self.send(action, method, request).await {
            Ok(response) => {
                if (200..300).contains(&response.status) {
                    tracing::debug!("API < {} {}", response.status, response.body);
                } else {
                    tracing::warn!(
                        "API < {} {} {}",
                        response.status,
                        response.body,
                        response.reason.as_deref().unwrap_or("")
                    );
                }
                DispatchOutcome::completed(response.status, response.body)
            }
            Err(e) => {
                tracing::warn!("API failed {} {}: {}", method, action, e);
                DispatchOutcome::failed(e.to_string())
            }
        }
    }

    async fn send(
        &self,
        action: &str,
        method: Method,
        request: &OutboundRequest,
    ) -> Result<HttpResponse> {
        let body = JsonCodec::encode_body(request)?;
        tracing::debug!(
            "API > {} {} ({}) {}",
            method,
            action,
            request.kind(),
            String::from_utf8_lossy(&body)
        );

        let url = endpoint::resolve(&self.base_endpoint, action)?;
        let http_request = HttpRequest {
            method,
            url,
            headers: vec![("Content-Type".to_string(), CONTENT_TYPE.to_string())],
            body,
        };

        self.transport.execute(http_request).await
    }
}
