use crate::error::CarbonLedgerError;
use carbonledger_schemas::{
    factor::EmissionFactor,
    scope::{Scope, ScopeAssignment},
};
use std::collections::BTreeMap;

/// The validated, read-only factor table for a reporting session: every
/// category resolves to exactly one positive factor and one scope
/// assignment. Built once at load time and shared by every calculation.
#[derive(Debug, Clone)]
pub struct FactorLibrary {
    version: String,
    factors: BTreeMap<String, EmissionFactor>,
    assignments: BTreeMap<String, ScopeAssignment>,
}

impl FactorLibrary {
    /// Validates and assembles a factor library. Fails fast on the
    /// defects that would otherwise surface mid-calculation: non-positive
    /// factors, duplicate categories, and categories present in only one
    /// of the two tables.
    pub fn new(
        version: impl Into<String>,
        factors: Vec<EmissionFactor>,
        assignments: Vec<ScopeAssignment>,
    ) -> Result<Self, CarbonLedgerError> {
        let mut factor_map = BTreeMap::new();
        for factor in factors {
            if !(factor.kg_co2e_per_unit > 0.0) || !factor.kg_co2e_per_unit.is_finite() {
                return Err(CarbonLedgerError::InvalidFactor {
                    category: factor.category.clone(),
                    value: factor.kg_co2e_per_unit,
                });
            }
            if factor_map.contains_key(&factor.category) {
                return Err(CarbonLedgerError::DuplicateCategory(factor.category.clone()));
            }
            factor_map.insert(factor.category.clone(), factor);
        }

        let mut assignment_map = BTreeMap::new();
        for assignment in assignments {
            if !factor_map.contains_key(&assignment.category) {
                return Err(CarbonLedgerError::UnmappedCategory(
                    assignment.category.clone(),
                ));
            }
            if assignment.scope == Scope::Scope3 && assignment.scope3_category.is_none() {
                return Err(CarbonLedgerError::MissingScope3Category(
                    assignment.category.clone(),
                ));
            }
            if assignment_map.contains_key(&assignment.category) {
                return Err(CarbonLedgerError::DuplicateCategory(
                    assignment.category.clone(),
                ));
            }
            assignment_map.insert(assignment.category.clone(), assignment);
        }

        // Every factor must also carry a scope, or it can never be reported.
        for category in factor_map.keys() {
            if !assignment_map.contains_key(category) {
                return Err(CarbonLedgerError::UnmappedCategory(category.clone()));
            }
        }

        Ok(Self {
            version: version.into(),
            factors: factor_map,
            assignments: assignment_map,
        })
    }

    /// Looks up the emission factor for a category. A missing category is
    /// an error, never a silent zero: a zero here would mask a real
    /// data-entry or configuration defect.
    pub fn get_factor(&self, category: &str) -> Result<&EmissionFactor, CarbonLedgerError> {
        self.factors
            .get(category)
            .ok_or_else(|| CarbonLedgerError::UnknownCategory(category.to_string()))
    }

    pub fn assignment(&self, category: &str) -> Result<&ScopeAssignment, CarbonLedgerError> {
        self.assignments
            .get(category)
            .ok_or_else(|| CarbonLedgerError::UnknownCategory(category.to_string()))
    }

    pub fn scope_of(&self, category: &str) -> Result<Scope, CarbonLedgerError> {
        self.assignment(category).map(|a| a.scope)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn contains(&self, category: &str) -> bool {
        self.factors.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.factors.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}
