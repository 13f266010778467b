//! Client-side route table and the roles each route admits.

use crate::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    AdminDashboard,
    OwnerDashboard,
    EmployeeDashboard,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Login,
        Route::Register,
        Route::AdminDashboard,
        Route::OwnerDashboard,
        Route::EmployeeDashboard,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::AdminDashboard => "/dashboard/admin",
            Route::OwnerDashboard => "/dashboard/owner",
            Route::EmployeeDashboard => "/dashboard/employee",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// `None` for public routes; otherwise the roles admitted.
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Route::Login | Route::Register => None,
            Route::AdminDashboard => Some(&[Role::Admin]),
            Route::OwnerDashboard => Some(&[Role::Owner]),
            Route::EmployeeDashboard => Some(&[Role::Employee]),
        }
    }

    pub fn is_protected(&self) -> bool {
        self.allowed_roles().is_some()
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}
