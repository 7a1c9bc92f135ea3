//! Stubbed account layer
//!
//! Sign-in resolves a fixture profile after a fixed delay; the credential
//! check is a hard-coded pair. No keyring, no tokens, no network.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

pub fn fixture_profile() -> UserProfile {
    UserProfile {
        id: 1,
        name: "John Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
    }
}

/// Dummy credential check. Accepts exactly one pair.
pub fn authenticate(email: &str, password: &str) -> Option<UserProfile> {
    if email == "user@example.com" && password == "password" {
        let mut profile = fixture_profile();
        profile.email = email.to_string();
        Some(profile)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticate_accepts_the_fixture_pair() {
        let profile = authenticate("user@example.com", "password").expect("fixture credentials");
        assert_eq!(profile.name, "John Doe");
        assert_eq!(profile.email, "user@example.com");
    }

    #[test]
    fn authenticate_rejects_everything_else() {
        assert!(authenticate("user@example.com", "wrong").is_none());
        assert!(authenticate("someone@example.com", "password").is_none());
        assert!(authenticate("", "").is_none());
    }
}
