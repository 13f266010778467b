use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Route;

/// Role of a logged-in identity.
///
/// The set is closed: every role has a login endpoint, a dashboard and display
/// metadata, so there is no way to hold a role that lacks one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Owner,
    Employee,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Owner, Role::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Employee => "employee",
        }
    }

    /// Human-readable label ("Sign In as Owner").
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Owner => "Owner",
            Role::Employee => "Employee",
        }
    }

    /// Login endpoint, relative to the API base URL.
    pub fn login_path(&self) -> &'static str {
        match self {
            Role::Admin => "/api/auth/login/admin",
            Role::Owner => "/api/auth/login/owner",
            Role::Employee => "/api/auth/login/employee",
        }
    }

    /// Where a freshly logged-in user of this role lands.
    pub fn dashboard_route(&self) -> Route {
        match self {
            Role::Admin => Route::AdminDashboard,
            Role::Owner => Route::OwnerDashboard,
            Role::Employee => Route::EmployeeDashboard,
        }
    }

    /// Accent colour used by the presentation shell for this role.
    pub fn accent_color(&self) -> &'static str {
        match self {
            Role::Admin => "#23408e",
            Role::Owner => "#43cea2",
            Role::Employee => "#6C2AD2",
        }
    }

    /// Admin accounts are provisioned out of band.
    pub fn can_self_register(&self) -> bool {
        !matches!(self, Role::Admin)
    }

    /// Role preselected on the login screen.
    pub fn default_for_login() -> Self {
        Role::Employee
    }

    /// Role preselected on the registration screen.
    pub fn default_for_registration() -> Self {
        Role::Owner
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
