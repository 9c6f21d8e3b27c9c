//! Permissions granted to new accounts by role.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::user::UserRole;

/// A named capability. Wire format: snake_case string (`view_profile`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewProfile,
    EditProfile,
    ManageQueues,
    ViewQueues,
    ManageUsers,
    ManagePermissions,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ViewProfile => "view_profile",
            Self::EditProfile => "edit_profile",
            Self::ManageQueues => "manage_queues",
            Self::ViewQueues => "view_queues",
            Self::ManageUsers => "manage_users",
            Self::ManagePermissions => "manage_permissions",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CUSTOMER_DEFAULTS: &[Permission] = &[Permission::ViewProfile, Permission::EditProfile];

const VENDOR_DEFAULTS: &[Permission] = &[
    Permission::ViewProfile,
    Permission::EditProfile,
    Permission::ManageQueues,
    Permission::ViewQueues,
];

const ADMIN_DEFAULTS: &[Permission] = &[
    Permission::ViewProfile,
    Permission::EditProfile,
    Permission::ManageQueues,
    Permission::ViewQueues,
    Permission::ManageUsers,
    Permission::ManagePermissions,
];

/// Permissions seeded for a freshly created account of the given role.
///
/// Each role includes every grant of the roles below it.
pub fn default_permissions(role: UserRole) -> &'static [Permission] {
    match role {
        UserRole::Customer => CUSTOMER_DEFAULTS,
        UserRole::Vendor => VENDOR_DEFAULTS,
        UserRole::Admin => ADMIN_DEFAULTS,
    }
}
