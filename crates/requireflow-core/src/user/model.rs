//! Staff user models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A member of staff who collects requirements or comments on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: UserRole,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    ProductManager,
    Sales,
    Implementation,
    Developer,
    Viewer,
}

impl UserRole {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ProductManager => "product_manager",
            Self::Sales => "sales",
            Self::Implementation => "implementation",
            Self::Developer => "developer",
            Self::Viewer => "viewer",
        }
    }
}
