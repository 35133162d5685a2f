use serde::{Deserialize, Serialize};
use std::fmt;

/// GHG Protocol emission scope: direct emissions, purchased-energy
/// emissions, and all other indirect (value-chain) emissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Scope1,
    Scope2,
    Scope3,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Scope1 => write!(f, "Scope 1"),
            Scope::Scope2 => write!(f, "Scope 2"),
            Scope::Scope3 => write!(f, "Scope 3"),
        }
    }
}

/// Named sub-categories of Scope 3 tracked separately in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope3Category {
    Purchasing,
    Digital,
    Travel,
}

impl fmt::Display for Scope3Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope3Category::Purchasing => write!(f, "Purchasing"),
            Scope3Category::Digital => write!(f, "Digital"),
            Scope3Category::Travel => write!(f, "Travel"),
        }
    }
}

/// Declarative mapping from an activity category to its reporting scope.
/// New categories are added as data rows, not as branching logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeAssignment {
    pub category: String,
    pub scope: Scope,
    /// Required when `scope` is Scope3, ignored otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope3_category: Option<Scope3Category>,
}
