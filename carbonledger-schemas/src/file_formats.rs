use crate::{
    action::ReductionAction, activity::ActivityRecord, factor::EmissionFactor,
    scope::ScopeAssignment,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FactorLibraryFile {
    pub schema_version: String,
    pub factors: Vec<EmissionFactor>,
    pub scope_assignments: Vec<ScopeAssignment>,
}

#[derive(Debug, Deserialize)]
pub struct ActionCatalogFile {
    pub schema_version: String,
    pub actions: Vec<ReductionAction>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityFile {
    pub schema_version: String,
    pub company: String,
    pub headcount: u32,
    pub carbon_price_per_tonne: f64,
    pub quantities: ActivityRecord,
}
