use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableRole {
    Primary,
    Secondary,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TableRole::Primary => "primary",
            TableRole::Secondary => "secondary",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCheck {
    pub name: String,
    pub role: TableRole,
}

impl TableCheck {
    pub fn primary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: TableRole::Primary,
        }
    }

    pub fn secondary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: TableRole::Secondary,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.role == TableRole::Primary
    }

    /// PostgREST read path for this table, relative to the project base URL.
    pub fn rest_path(&self) -> String {
        format!("/rest/v1/{}", urlencoding::encode(&self.name))
    }

    pub fn display_path(&self) -> String {
        format!("GET    {}", self.rest_path())
    }
}
