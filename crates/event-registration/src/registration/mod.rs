//! Team registration entity.

mod validate;

pub use validate::validate;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload keys of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Event,
    TeamName,
    TeamLeader,
    PhoneNo,
    Email,
    RollNo,
    Members,
}

impl Field {
    /// Top-level text fields, in validation order.
    pub const TEXT: [Field; 6] = [
        Field::Event,
        Field::TeamName,
        Field::TeamLeader,
        Field::PhoneNo,
        Field::Email,
        Field::RollNo,
    ];

    /// JSON key for this field, as submitted and as persisted.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Event => "event",
            Field::TeamName => "teamName",
            Field::TeamLeader => "teamLeader",
            Field::PhoneNo => "phoneNo",
            Field::Email => "email",
            Field::RollNo => "rollNo",
            Field::Members => "members",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One team's validated entry for an event.
///
/// Fields are private: the only way to build a `Registration` is [`validate`],
/// so a value of this type always satisfies every field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    event: String,
    team_name: String,
    team_leader: String,
    phone_no: String,
    email: String,
    roll_no: String,
    members: Vec<String>,
}

impl Registration {
    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn team_leader(&self) -> &str {
        &self.team_leader
    }

    pub fn phone_no(&self) -> &str {
        &self.phone_no
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn roll_no(&self) -> &str {
        &self.roll_no
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }
}

/// Opaque key assigned by the store to a persisted registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
