//! Outbound payloads, one shape per backend action.
//!
//! Every payload serializes with camelCase field names. Optional fields that
//! are unset are left out of the JSON entirely; the backend never sees `null`.
//! Coordinates must be finite: NaN or infinity fails serialization instead of
//! going out as `null`.

use serde::{Deserialize, Serialize, Serializer};

/// Serialize a coordinate, refusing NaN and infinities.
fn finite<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(serde::ser::Error::custom(format!(
            "non-finite coordinate: {value}"
        )));
    }
    serializer.serialize_f64(*value)
}

/// Device profile registration, sent with `PUT profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    device_id: String,
    push_token: String,
    phone_number: String,
    locale: String,
}

impl ProfileRequest {
    /// Create a profile request. `locale` is a `language_COUNTRY` tag such as `en_US`.
    pub fn new(
        device_id: impl Into<String>,
        push_token: impl Into<String>,
        phone_number: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            push_token: push_token.into(),
            phone_number: phone_number.into(),
            locale: locale.into(),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn push_token(&self) -> &str {
        &self.push_token
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

/// A single close-contact sighting of another profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    /// Profile id advertised by the other device.
    pub seen_profile_id: i64,
    /// Start of the encounter, unix seconds.
    pub timestamp: i64,
    /// Encounter length in seconds.
    pub duration: i64,
}

/// Batch of encounters, sent with `POST profile/contacts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    source_device_id: String,
    source_profile_id: i64,
    connections: Vec<Encounter>,
}

impl ContactRequest {
    pub fn new(source_device_id: impl Into<String>, source_profile_id: i64) -> Self {
        Self {
            source_device_id: source_device_id.into(),
            source_profile_id,
            connections: Vec::new(),
        }
    }

    /// Append one encounter.
    pub fn push(&mut self, encounter: Encounter) -> &mut Self {
        self.connections.push(encounter);
        self
    }

    /// Builder-style variant of [`extend`](Extend::extend).
    pub fn with_connections(mut self, encounters: impl IntoIterator<Item = Encounter>) -> Self {
        self.connections.extend(encounters);
        self
    }

    pub fn source_device_id(&self) -> &str {
        &self.source_device_id
    }

    pub fn source_profile_id(&self) -> i64 {
        self.source_profile_id
    }

    pub fn connections(&self) -> &[Encounter] {
        &self.connections
    }
}

impl Extend<Encounter> for ContactRequest {
    fn extend<I: IntoIterator<Item = Encounter>>(&mut self, iter: I) {
        self.connections.extend(iter);
    }
}

/// Auth-token and quarantine-confirmation payload.
///
/// Built by the dispatcher from the process identity; callers only supply the
/// token and, for quarantine, the duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    device_id: Option<String>,
    profile_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mfa_token: Option<String>,
    /// Quarantine length in days, sent as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<String>,
}

impl AuthTokenRequest {
    pub fn new(device_id: Option<String>, profile_id: i64) -> Self {
        Self {
            device_id,
            profile_id,
            mfa_token: None,
            duration: None,
        }
    }

    pub fn with_mfa_token(mut self, mfa_token: impl Into<String>) -> Self {
        self.mfa_token = Some(mfa_token.into());
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration.to_string());
        self
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn profile_id(&self) -> i64 {
        self.profile_id
    }

    pub fn mfa_token(&self) -> Option<&str> {
        self.mfa_token.as_deref()
    }

    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }
}

/// A recorded position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(serialize_with = "finite")]
    pub latitude: f64,
    #[serde(serialize_with = "finite")]
    pub longitude: f64,
    /// Horizontal accuracy in metres.
    pub accuracy: i32,
    /// Unix seconds.
    pub record_timestamp: i64,
}

/// Batch of positions, sent with `POST profile/location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    device_id: String,
    profile_id: i64,
    locations: Vec<Location>,
}

impl LocationRequest {
    pub fn new(device_id: impl Into<String>, profile_id: i64) -> Self {
        Self {
            device_id: device_id.into(),
            profile_id,
            locations: Vec::new(),
        }
    }

    pub fn push(&mut self, location: Location) -> &mut Self {
        self.locations.push(location);
        self
    }

    pub fn with_locations(mut self, locations: impl IntoIterator<Item = Location>) -> Self {
        self.locations.extend(locations);
        self
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn profile_id(&self) -> i64 {
        self.profile_id
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }
}

impl Extend<Location> for LocationRequest {
    fn extend<I: IntoIterator<Item = Location>>(&mut self, iter: I) {
        self.locations.extend(iter);
    }
}

/// Raw position fix as reported by the platform location service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in metres.
    pub accuracy: f32,
    /// Fix time in unix milliseconds.
    pub time_millis: i64,
}

/// Report that the device left its quarantine area, sent with `POST profile/areaexit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarantineLeftRequest {
    device_id: String,
    profile_id: i64,
    #[serde(serialize_with = "finite")]
    latitude: f64,
    #[serde(serialize_with = "finite")]
    longitude: f64,
    accuracy: i32,
    record_timestamp: i64,
}

impl QuarantineLeftRequest {
    /// Accuracy is truncated to whole metres and the timestamp to whole seconds.
    pub fn new(device_id: impl Into<String>, profile_id: i64, fix: &PositionFix) -> Self {
        Self {
            device_id: device_id.into(),
            profile_id,
            latitude: fix.latitude,
            longitude: fix.longitude,
            accuracy: fix.accuracy as i32,
            record_timestamp: fix.time_millis / 1000,
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn profile_id(&self) -> i64 {
        self.profile_id
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn accuracy(&self) -> i32 {
        self.accuracy
    }

    pub fn record_timestamp(&self) -> i64 {
        self.record_timestamp
    }
}

/// Any payload the dispatcher can send.
///
/// Serializes as the inner payload alone; the action path, not a tag in the
/// body, tells the backend which shape to expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutboundRequest {
    Profile(ProfileRequest),
    Contacts(ContactRequest),
    AuthToken(AuthTokenRequest),
    Locations(LocationRequest),
    QuarantineLeft(QuarantineLeftRequest),
}

impl OutboundRequest {
    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundRequest::Profile(_) => "profile",
            OutboundRequest::Contacts(_) => "contacts",
            OutboundRequest::AuthToken(_) => "auth_token",
            OutboundRequest::Locations(_) => "locations",
            OutboundRequest::QuarantineLeft(_) => "quarantine_left",
        }
    }
}

impl From<ProfileRequest> for OutboundRequest {
    fn from(r: ProfileRequest) -> Self {
        OutboundRequest::Profile(r)
    }
}

impl From<ContactRequest> for OutboundRequest {
    fn from(r: ContactRequest) -> Self {
        OutboundRequest::Contacts(r)
    }
}

impl From<AuthTokenRequest> for OutboundRequest {
    fn from(r: AuthTokenRequest) -> Self {
        OutboundRequest::AuthToken(r)
    }
}

impl From<LocationRequest> for OutboundRequest {
    fn from(r: LocationRequest) -> Self {
        OutboundRequest::Locations(r)
    }
}

impl From<QuarantineLeftRequest> for OutboundRequest {
    fn from(r: QuarantineLeftRequest) -> Self {
        OutboundRequest::QuarantineLeft(r)
    }
}
