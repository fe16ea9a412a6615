//! Process identity lookup.
//!
//! The auth-token and quarantine actions carry the device id and profile id
//! that were persisted when the profile was created. The dispatcher reads
//! them through [`IdentityProvider`] at dispatch time, so tests can plug in a
//! fixed identity instead of a real preferences store.

use std::sync::Arc;

/// Source of the persisted device/profile identity.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Device identifier, `None` before a profile has been created.
    fn device_id(&self) -> Option<String>;

    /// Backend profile id, `0` before a profile has been created.
    fn profile_id(&self) -> i64;
}

/// Fixed identity, set once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticIdentity {
    device_id: Option<String>,
    profile_id: i64,
}

impl StaticIdentity {
    pub fn new(device_id: impl Into<String>, profile_id: i64) -> Self {
        Self {
            device_id: Some(device_id.into()),
            profile_id,
        }
    }

    /// Identity of a device that has not registered yet.
    pub fn unregistered() -> Self {
        Self::default()
    }
}

impl IdentityProvider for StaticIdentity {
    fn device_id(&self) -> Option<String> {
        self.device_id.clone()
    }

    fn profile_id(&self) -> i64 {
        self.profile_id
    }
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for Arc<T> {
    fn device_id(&self) -> Option<String> {
        (**self).device_id()
    }

    fn profile_id(&self) -> i64 {
        (**self).profile_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_identity() {
        let identity = StaticIdentity::new("dev-1", 42);
        assert_eq!(identity.device_id().as_deref(), Some("dev-1"));
        assert_eq!(identity.profile_id(), 42);
    }

    #[test]
    fn test_unregistered_defaults() {
        let identity = StaticIdentity::unregistered();
        assert_eq!(identity.device_id(), None);
        assert_eq!(identity.profile_id(), 0);
    }

    #[test]
    fn test_arc_forwards() {
        let identity: Arc<dyn IdentityProvider> = Arc::new(StaticIdentity::new("d", 1));
        assert_eq!(identity.device_id().as_deref(), Some("d"));
        assert_eq!(identity.profile_id(), 1);
    }
}
