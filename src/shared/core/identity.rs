use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const GUEST: &str = "Guest";
pub const ADMINISTRATOR: &str = "Administrator";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    TimeTrackerUser,
    TimeTrackerManager,
    HrManager,
    SystemManager,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::TimeTrackerUser => "Time Tracker User",
            Role::TimeTrackerManager => "Time Tracker Manager",
            Role::HrManager => "HR Manager",
            Role::SystemManager => "System Manager",
            Role::Other(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "Time Tracker User" => Role::TimeTrackerUser,
            "Time Tracker Manager" => Role::TimeTrackerManager,
            "HR Manager" => Role::HrManager,
            "System Manager" => Role::SystemManager,
            other => Role::Other(other.to_string()),
        })
    }
}

/// The identity an operation runs on behalf of. Passed explicitly into every
/// use case instead of being read from ambient session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user: String,
    pub roles: Vec<Role>,
}

impl Caller {
    pub fn new(user: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            user: user.into(),
            roles,
        }
    }

    pub fn guest() -> Self {
        Self::new(GUEST, Vec::new())
    }

    pub fn is_guest(&self) -> bool {
        self.user == GUEST
    }

    pub fn is_administrator(&self) -> bool {
        self.user == ADMINISTRATOR
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    /// Parses a comma separated role list such as `"Time Tracker User, HR Manager"`.
    pub fn parse_roles(raw: &str) -> Vec<Role> {
        raw.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .filter_map(|name| name.parse().ok())
            .collect()
    }
}
