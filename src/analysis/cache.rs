use std::collections::HashMap;

use crate::types::UserProfile;

/// Owner profiles fetched during the session, keyed by username.
#[derive(Debug, Clone, Default)]
pub struct ProfileDirectory {
    profiles: HashMap<String, UserProfile>,
}

impl ProfileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store profiles, replacing any earlier entry for the same username
    pub fn store_all(&mut self, profiles: impl IntoIterator<Item = UserProfile>) {
        for profile in profiles {
            self.profiles.insert(profile.username.clone(), profile);
        }
    }

    pub fn get(&self, username: &str) -> Option<&UserProfile> {
        self.profiles.get(username)
    }

    /// The stored profile, or a bare one carrying only the username.
    pub fn lookup(&self, username: &str) -> UserProfile {
        self.get(username)
            .cloned()
            .unwrap_or_else(|| UserProfile::bare(username))
    }
}
