use serde::{Deserialize, Serialize};

/// The rider on whose behalf the engine is acting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub id: String,
    /// Accessibility category chosen at sign-up; informational only.
    pub profile: String,
}

impl Requester {
    pub const PROFILES: [&'static str; 5] = [
        "Deficiência Motora",
        "Deficiência Visual",
        "Deficiência Auditiva",
        "Deficiência Intelectual",
        "Transtorno do Espectro Autista (TAE)",
    ];

    pub fn new(id: &str, profile: &str) -> Self {
        Self {
            id: id.into(),
            profile: profile.into(),
        }
    }

    pub fn guest() -> Self {
        Self::new("guest", "")
    }

    pub fn has_known_profile(&self) -> bool {
        Self::PROFILES.iter().any(|profile| *profile == self.profile)
    }
}
