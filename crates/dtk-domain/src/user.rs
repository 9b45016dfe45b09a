//! User identity types

use crate::office::Office;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique user identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub Ulid);

impl UserId {
    /// Generate new user ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

/// A registered user.
///
/// `id` is assigned once at registration and never changes. `office`
/// establishes home-office membership for routing purposes. The credential
/// is compared by plaintext equality; there is deliberately no real
/// security model here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub office: Office,
    pub credential: String,
}

impl User {
    /// Create a new user with a freshly allocated id.
    #[must_use]
    pub fn new(name: impl Into<String>, office: Office, credential: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            office,
            credential: credential.into(),
        }
    }
}

/// The `{id, name}` projection of a user captured in audit records.
///
/// Tracking entries never hold a full [`User`]: the credential has no
/// business in the audit trail, and the actor's office at the time of the
/// action is recorded on the entry itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRef {
    pub id: UserId,
    pub name: String,
}

impl From<&User> for ActorRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_ids_are_unique() {
        let a = User::new("Ana", Office::Fou, "pw");
        let b = User::new("Ana", Office::Fou, "pw");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn actor_ref_drops_credential() {
        let user = User::new("Ben", Office::Odm, "secret");
        let actor = ActorRef::from(&user);
        let json = serde_json::to_string(&actor).unwrap();
        assert!(!json.contains("secret"));
        assert_eq!(actor.id, user.id);
    }

    #[test]
    fn user_id_display_round_trip() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
