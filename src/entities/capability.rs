use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

/// An accessibility accommodation a driver or vehicle can provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityTag {
    Ramp,
    Wheelchair,
    SignLanguageInterpreter,
    AssistedCommunication,
    Elevator,
    Companion,
}

impl CapabilityTag {
    pub const ALL: [CapabilityTag; 6] = [
        CapabilityTag::Ramp,
        CapabilityTag::Wheelchair,
        CapabilityTag::SignLanguageInterpreter,
        CapabilityTag::AssistedCommunication,
        CapabilityTag::Elevator,
        CapabilityTag::Companion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ramp => "ramp",
            Self::Wheelchair => "wheelchair",
            Self::SignLanguageInterpreter => "sign_language_interpreter",
            Self::AssistedCommunication => "assisted_communication",
            Self::Elevator => "elevator",
            Self::Companion => "companion",
        }
    }

    /// Display label shown to riders.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ramp => "rampa",
            Self::Wheelchair => "cadeira de rodas",
            Self::SignLanguageInterpreter => "interprete libras",
            Self::AssistedCommunication => "comunicação assistida",
            Self::Elevator => "elevador",
            Self::Companion => "acompanhante",
        }
    }
}

impl fmt::Display for CapabilityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either the snake_case name or the display label.
impl FromStr for CapabilityTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        CapabilityTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.name() == s || tag.label() == s)
            .ok_or_else(invalid_input_error)
    }
}

/// Removes repeated tags while keeping the order in which they were selected.
pub fn dedup_needs<I>(needs: I) -> Vec<CapabilityTag>
where
    I: IntoIterator<Item = CapabilityTag>,
{
    let mut deduped = Vec::new();

    for tag in needs {
        if !deduped.contains(&tag) {
            deduped.push(tag);
        }
    }

    deduped
}

/// Parses a comma separated list such as `ramp,wheelchair`.
pub fn parse_needs(list: &str) -> Result<Vec<CapabilityTag>, Error> {
    let tags = list
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(CapabilityTag::from_str)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(dedup_needs(tags))
}
