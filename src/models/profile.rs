use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User identity and medical profile. Owned by the auth/user subsystem;
/// read-only inside this backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub blood_group: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    /// SHA-256 hash of the user's API token (hex), used to seed the
    /// token registry at startup. Never serialised to clients.
    #[serde(skip)]
    pub api_token_hash: Option<String>,
}

impl UserProfile {
    /// Medical History section exists iff either list is non-empty.
    pub fn has_medical_history(&self) -> bool {
        !self.chronic_conditions.is_empty() || !self.allergies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "user-1".into(),
            full_name: "Jordan Reyes".into(),
            email: "jordan@example.com".into(),
            phone: None,
            blood_group: None,
            date_of_birth: None,
            chronic_conditions: Vec::new(),
            allergies: Vec::new(),
            api_token_hash: None,
        }
    }

    #[test]
    fn no_history_when_both_empty() {
        assert!(!profile().has_medical_history());
    }

    #[test]
    fn history_when_conditions_present() {
        let mut p = profile();
        p.chronic_conditions.push("asthma".into());
        assert!(p.has_medical_history());
    }

    #[test]
    fn history_when_only_allergies_present() {
        let mut p = profile();
        p.allergies.push("penicillin".into());
        assert!(p.has_medical_history());
    }

    #[test]
    fn token_hash_not_serialized() {
        let mut p = profile();
        p.api_token_hash = Some("deadbeef".into());
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("deadbeef"));
    }
}
