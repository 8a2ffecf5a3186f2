//! User state machines - pure decision logic for account status and role.
//!
//! Legality lives in one transition table per machine, not in scattered
//! conditionals: an invalid status or role can never be represented, and
//! every mutation goes through `transition_to`.

use serde::{Deserialize, Serialize};

use crate::common::errors::PersistenceError;

/// Account status of a user.
///
/// `removed` is terminal: no outbound transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Unconfirmed,
    Confirmed,
    Suspended,
    Removed,
}

impl Status {
    /// Parse a stored tag. Unknown tags fail with `InvalidInitialValue`.
    pub fn parse(tag: &str) -> Result<Self, PersistenceError> {
        match tag {
            "unconfirmed" => Ok(Self::Unconfirmed),
            "confirmed" => Ok(Self::Confirmed),
            "suspended" => Ok(Self::Suspended),
            "removed" => Ok(Self::Removed),
            other => Err(PersistenceError::InvalidInitialValue {
                machine: "Status",
                value: other.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unconfirmed => "unconfirmed",
            Self::Confirmed => "confirmed",
            Self::Suspended => "suspended",
            Self::Removed => "removed",
        }
    }

    /// The transition table: legal successors of each state.
    pub fn successors(self) -> &'static [Status] {
        match self {
            Self::Unconfirmed => &[Self::Confirmed, Self::Suspended, Self::Removed],
            Self::Confirmed => &[Self::Suspended],
            Self::Suspended => &[Self::Confirmed, Self::Removed],
            Self::Removed => &[],
        }
    }

    /// Pure legality predicate, no mutation. Same-state is always legal.
    pub fn can_transition_to(self, target: Status) -> bool {
        self == target || self.successors().contains(&target)
    }

    /// Produce the value in state `target`. A same-state call returns the
    /// value unchanged; an illegal target fails with `InvalidTransition`.
    pub fn transition_to(self, target: Status) -> Result<Self, PersistenceError> {
        if self == target {
            return Ok(self);
        }
        if self.successors().contains(&target) {
            Ok(target)
        } else {
            Err(PersistenceError::InvalidTransition {
                machine: "Status",
                from: self.as_str(),
                to: target.as_str(),
            })
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Unconfirmed
    }
}

/// Application role of a user. USER and ADMIN convert freely in both
/// directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn parse(tag: &str) -> Result<Self, PersistenceError> {
        match tag {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            other => Err(PersistenceError::InvalidInitialValue {
                machine: "Role",
                value: other.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    pub fn successors(self) -> &'static [Role] {
        match self {
            Self::User => &[Self::Admin],
            Self::Admin => &[Self::User],
        }
    }

    pub fn can_transition_to(self, target: Role) -> bool {
        self == target || self.successors().contains(&target)
    }

    pub fn transition_to(self, target: Role) -> Result<Self, PersistenceError> {
        if self == target {
            return Ok(self);
        }
        if self.successors().contains(&target) {
            Ok(target)
        } else {
            Err(PersistenceError::InvalidTransition {
                machine: "Role",
                from: self.as_str(),
                to: target.as_str(),
            })
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}
