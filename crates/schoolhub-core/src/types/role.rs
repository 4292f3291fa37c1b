//! Closed role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles the client knows how to serve.
///
/// Each role has exactly one home route; adding a variant forces every
/// exhaustive `match` on `Role` to be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Parent of one or more enrolled students.
    Parent,
    /// Teacher assigned to classes.
    Teacher,
    /// School administrator.
    Admin,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Role; 3] = [Role::Parent, Role::Teacher, Role::Admin];

    /// Path of the dashboard this role lands on.
    pub fn home_path(&self) -> &'static str {
        match self {
            Self::Parent => "/parent-dashboard",
            Self::Teacher => "/teacher-dashboard",
            Self::Admin => "/admin-dashboard",
        }
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parent" => Ok(Self::Parent),
            "teacher" => Ok(Self::Teacher),
            "admin" => Ok(Self::Admin),
            _ => Err(crate::AppError::authorization(format!(
                "Your role \"{s}\" is not supported in this application. Please contact support."
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_home_paths_are_distinct() {
        let paths: HashSet<&str> = Role::ALL.iter().map(Role::home_path).collect();
        assert_eq!(paths.len(), Role::ALL.len());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("teacher".parse::<Role>().unwrap(), Role::Teacher);
        assert!("janitor".parse::<Role>().is_err());
        // Stored role strings are matched exactly, as the backend emits them.
        assert!("Admin".parse::<Role>().is_err());
    }
}
