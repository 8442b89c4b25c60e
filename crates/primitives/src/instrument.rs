//! Instrument identifiers and role tags.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Unique identifier for a quoted instrument (ticker symbol or alias).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
pub struct InstrumentId(pub String);

impl InstrumentId {
    /// Create a new instrument id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Role an instrument plays in an attribution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum InstrumentRole {
    /// The instrument whose return is being explained.
    #[display("target")]
    Target,
    /// A candidate explanatory instrument.
    #[display("factor")]
    Factor,
}

/// An instrument identifier together with its role in the run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    /// Identifier.
    pub id: InstrumentId,
    /// Role in the attribution run.
    pub role: InstrumentRole,
}

impl Instrument {
    /// Tag an id as the attribution target.
    pub fn target(id: impl Into<InstrumentId>) -> Self {
        Self { id: id.into(), role: InstrumentRole::Target }
    }

    /// Tag an id as a candidate factor.
    pub fn factor(id: impl Into<InstrumentId>) -> Self {
        Self { id: id.into(), role: InstrumentRole::Factor }
    }

    /// Whether this instrument is the attribution target.
    #[must_use]
    pub const fn is_target(&self) -> bool {
        matches!(self.role, InstrumentRole::Target)
    }
}
