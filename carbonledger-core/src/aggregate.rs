use crate::{error::CarbonLedgerError, library::FactorLibrary};
use carbonledger_schemas::{
    activity::ActivityRecord,
    scope::{Scope, Scope3Category},
};
use serde::{Deserialize, Serialize};

/// Reporting masses are carried in tonnes; factors are per kilogram.
pub const KG_PER_TONNE: f64 = 1000.0;

/// Default sequestration assumption: trees needed to absorb one tonne of
/// CO2e per year. A planning convention, exposed as configuration.
pub const DEFAULT_TREES_PER_TONNE: f64 = 40.0;

/// External parameters a reporting run needs on top of the activity data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingParameters {
    pub headcount: u32,
    /// Shadow price per tonne of CO2e, for notional financial exposure.
    pub carbon_price_per_tonne: f64,
    pub trees_per_tonne: f64,
}

impl ReportingParameters {
    pub fn new(headcount: u32, carbon_price_per_tonne: f64) -> Self {
        Self {
            headcount,
            carbon_price_per_tonne,
            trees_per_tonne: DEFAULT_TREES_PER_TONNE,
        }
    }
}

/// One calculated line item: a category's activity quantity multiplied by
/// its factor and classified into its reporting scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEmission {
    pub category: String,
    pub scope: Scope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope3_category: Option<Scope3Category>,
    pub quantity: f64,
    pub factor_kg_per_unit: f64,
    pub kg_co2e: f64,
    pub tonnes_co2e: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeTotals {
    pub scope1_t: f64,
    pub scope2_t: f64,
    pub scope3_t: f64,
}

impl ScopeTotals {
    pub fn get(&self, scope: Scope) -> f64 {
        match scope {
            Scope::Scope1 => self.scope1_t,
            Scope::Scope2 => self.scope2_t,
            Scope::Scope3 => self.scope3_t,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scope3Breakdown {
    pub purchasing_t: f64,
    pub digital_t: f64,
    pub travel_t: f64,
}

impl Scope3Breakdown {
    pub fn get(&self, sub: Scope3Category) -> f64 {
        match sub {
            Scope3Category::Purchasing => self.purchasing_t,
            Scope3Category::Digital => self.digital_t,
            Scope3Category::Travel => self.travel_t,
        }
    }
}

/// Immutable snapshot of one calculation run. A new input produces a new
/// result; nothing here is ever updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    pub factor_library_version: String,
    /// Per-category line items, sorted by category name.
    pub line_items: Vec<CategoryEmission>,
    pub scope_totals: ScopeTotals,
    pub scope3_breakdown: Scope3Breakdown,
    pub total_tonnes: f64,
    pub intensity_per_employee: f64,
    pub tree_equivalents: f64,
    pub financial_exposure: f64,
    /// Share of the grand total sitting in Scope 3; 0 when the total is 0.
    pub scope3_share: f64,
}

impl EmissionResult {
    pub fn category_tonnes(&self, category: &str) -> Option<f64> {
        self.line_items
            .iter()
            .find(|item| item.category == category)
            .map(|item| item.tonnes_co2e)
    }

    pub fn scope_total(&self, scope: Scope) -> f64 {
        self.scope_totals.get(scope)
    }

    pub fn scope3_subtotal(&self, sub: Scope3Category) -> f64 {
        self.scope3_breakdown.get(sub)
    }
}

/// Converts raw activity quantities into a scope-classified emission
/// result with derived KPIs. Pure function of its inputs: safe to call
/// repeatedly and concurrently.
pub fn compute(
    activity: &ActivityRecord,
    library: &FactorLibrary,
    params: &ReportingParameters,
) -> Result<EmissionResult, CarbonLedgerError> {
    if params.headcount == 0 {
        return Err(CarbonLedgerError::InvalidParameter {
            name: "headcount".to_string(),
            value: params.headcount as f64,
            reason: "headcount must be at least 1".to_string(),
        });
    }
    if params.carbon_price_per_tonne < 0.0 || !params.carbon_price_per_tonne.is_finite() {
        return Err(CarbonLedgerError::InvalidParameter {
            name: "carbon_price_per_tonne".to_string(),
            value: params.carbon_price_per_tonne,
            reason: "carbon price must be a non-negative number".to_string(),
        });
    }
    if params.trees_per_tonne < 0.0 || !params.trees_per_tonne.is_finite() {
        return Err(CarbonLedgerError::InvalidParameter {
            name: "trees_per_tonne".to_string(),
            value: params.trees_per_tonne,
            reason: "tree absorption constant must be a non-negative number".to_string(),
        });
    }

    let mut line_items = Vec::with_capacity(activity.len());
    let mut scope_totals = ScopeTotals::default();
    let mut scope3_breakdown = Scope3Breakdown::default();

    // ActivityRecord iterates in category order, so line items come out
    // sorted without an extra pass.
    for (category, quantity) in activity.iter() {
        if quantity < 0.0 || !quantity.is_finite() {
            return Err(CarbonLedgerError::InvalidParameter {
                name: category.to_string(),
                value: quantity,
                reason: "activity quantity must be a non-negative number".to_string(),
            });
        }

        let factor = library.get_factor(category)?;
        let assignment = library.assignment(category)?;

        let kg_co2e = quantity * factor.kg_co2e_per_unit;
        let tonnes_co2e = kg_co2e / KG_PER_TONNE;

        match assignment.scope {
            Scope::Scope1 => scope_totals.scope1_t += tonnes_co2e,
            Scope::Scope2 => scope_totals.scope2_t += tonnes_co2e,
            Scope::Scope3 => {
                scope_totals.scope3_t += tonnes_co2e;
                // Library validation guarantees the sub-category is set.
                match assignment.scope3_category {
                    Some(Scope3Category::Purchasing) => {
                        scope3_breakdown.purchasing_t += tonnes_co2e
                    }
                    Some(Scope3Category::Digital) => scope3_breakdown.digital_t += tonnes_co2e,
                    Some(Scope3Category::Travel) => scope3_breakdown.travel_t += tonnes_co2e,
                    None => {
                        return Err(CarbonLedgerError::MissingScope3Category(
                            category.to_string(),
                        ))
                    }
                }
            }
        }

        line_items.push(CategoryEmission {
            category: category.to_string(),
            scope: assignment.scope,
            scope3_category: assignment.scope3_category,
            quantity,
            factor_kg_per_unit: factor.kg_co2e_per_unit,
            kg_co2e,
            tonnes_co2e,
        });
    }

    let total_tonnes = scope_totals.scope1_t + scope_totals.scope2_t + scope_totals.scope3_t;

    let intensity_per_employee = total_tonnes / params.headcount as f64;
    let tree_equivalents = total_tonnes * params.trees_per_tonne;
    let financial_exposure = total_tonnes * params.carbon_price_per_tonne;
    let scope3_share = if total_tonnes == 0.0 {
        0.0
    } else {
        scope_totals.scope3_t / total_tonnes
    };

    Ok(EmissionResult {
        factor_library_version: library.version().to_string(),
        line_items,
        scope_totals,
        scope3_breakdown,
        total_tonnes,
        intensity_per_employee,
        tree_equivalents,
        financial_exposure,
        scope3_share,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbonledger_schemas::factor::{EmissionFactor, FactorUnit};
    use carbonledger_schemas::scope::ScopeAssignment;

    fn test_library() -> FactorLibrary {
        let factors = vec![
            EmissionFactor {
                category: "electricity".to_string(),
                kg_co2e_per_unit: 0.06,
                unit: FactorUnit::PerKilowattHour,
                source: None,
            },
            EmissionFactor {
                category: "natural_gas".to_string(),
                kg_co2e_per_unit: 0.22,
                unit: FactorUnit::PerKilowattHour,
                source: None,
            },
            EmissionFactor {
                category: "services_spend".to_string(),
                kg_co2e_per_unit: 0.15,
                unit: FactorUnit::PerCurrencyUnit,
                source: None,
            },
            EmissionFactor {
                category: "digital_spend".to_string(),
                kg_co2e_per_unit: 0.25,
                unit: FactorUnit::PerCurrencyUnit,
                source: None,
            },
            EmissionFactor {
                category: "travel_spend".to_string(),
                kg_co2e_per_unit: 0.50,
                unit: FactorUnit::PerCurrencyUnit,
                source: None,
            },
        ];
        let assignments = vec![
            ScopeAssignment {
                category: "electricity".to_string(),
                scope: Scope::Scope2,
                scope3_category: None,
            },
            ScopeAssignment {
                category: "natural_gas".to_string(),
                scope: Scope::Scope1,
                scope3_category: None,
            },
            ScopeAssignment {
                category: "services_spend".to_string(),
                scope: Scope::Scope3,
                scope3_category: Some(Scope3Category::Purchasing),
            },
            ScopeAssignment {
                category: "digital_spend".to_string(),
                scope: Scope::Scope3,
                scope3_category: Some(Scope3Category::Digital),
            },
            ScopeAssignment {
                category: "travel_spend".to_string(),
                scope: Scope::Scope3,
                scope3_category: Some(Scope3Category::Travel),
            },
        ];
        FactorLibrary::new("test-1.0", factors, assignments).unwrap()
    }

    fn full_activity() -> ActivityRecord {
        ActivityRecord::new()
            .with_quantity("electricity", 10_000.0)
            .with_quantity("natural_gas", 500.0)
            .with_quantity("services_spend", 50_000.0)
            .with_quantity("digital_spend", 20_000.0)
            .with_quantity("travel_spend", 20_000.0)
    }

    #[test]
    fn grand_total_equals_sum_of_scope_totals() {
        let result = compute(
            &full_activity(),
            &test_library(),
            &ReportingParameters::new(10, 80.0),
        )
        .unwrap();

        let scope_sum = result.scope_totals.scope1_t
            + result.scope_totals.scope2_t
            + result.scope_totals.scope3_t;
        let item_sum: f64 = result.line_items.iter().map(|i| i.tonnes_co2e).sum();

        assert!((result.total_tonnes - scope_sum).abs() <= 1e-9 * result.total_tonnes);
        assert!((result.total_tonnes - item_sum).abs() <= 1e-9 * result.total_tonnes);
    }

    #[test]
    fn emissions_scale_linearly_with_quantities() {
        let library = test_library();
        let params = ReportingParameters::new(10, 80.0);
        let base = compute(&full_activity(), &library, &params).unwrap();

        let k = 3.5;
        let scaled_activity: ActivityRecord = full_activity()
            .iter()
            .map(|(c, q)| (c.to_string(), q * k))
            .collect();
        let scaled = compute(&scaled_activity, &library, &params).unwrap();

        assert!((scaled.total_tonnes - base.total_tonnes * k).abs() <= 1e-9 * scaled.total_tonnes);
        for (a, b) in base.line_items.iter().zip(scaled.line_items.iter()) {
            assert_eq!(a.category, b.category);
            assert!((b.tonnes_co2e - a.tonnes_co2e * k).abs() <= 1e-9 * b.tonnes_co2e.max(1e-12));
        }
    }

    #[test]
    fn electricity_example_lands_in_scope2() {
        let factors = vec![EmissionFactor {
            category: "electricity".to_string(),
            kg_co2e_per_unit: 0.052,
            unit: FactorUnit::PerKilowattHour,
            source: None,
        }];
        let assignments = vec![ScopeAssignment {
            category: "electricity".to_string(),
            scope: Scope::Scope2,
            scope3_category: None,
        }];
        let library = FactorLibrary::new("1.0", factors, assignments).unwrap();
        let activity = ActivityRecord::new().with_quantity("electricity", 120_000.0);

        let result = compute(&activity, &library, &ReportingParameters::new(5, 0.0)).unwrap();
        assert!((result.scope_totals.scope2_t - 6.24).abs() < 1e-9);
        assert!((result.total_tonnes - 6.24).abs() < 1e-9);
    }

    #[test]
    fn zero_headcount_is_rejected() {
        let err = compute(
            &full_activity(),
            &test_library(),
            &ReportingParameters::new(0, 80.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CarbonLedgerError::InvalidParameter { ref name, .. } if name == "headcount"
        ));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let activity = ActivityRecord::new().with_quantity("electricity", -1.0);
        let err = compute(
            &activity,
            &test_library(),
            &ReportingParameters::new(10, 80.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CarbonLedgerError::InvalidParameter { ref name, .. } if name == "electricity"
        ));
    }

    #[test]
    fn negative_carbon_price_is_rejected() {
        let err = compute(
            &full_activity(),
            &test_library(),
            &ReportingParameters::new(10, -1.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CarbonLedgerError::InvalidParameter { ref name, .. } if name == "carbon_price_per_tonne"
        ));
    }

    #[test]
    fn unknown_activity_category_is_an_error() {
        let activity = ActivityRecord::new().with_quantity("cloud_compute", 1_000.0);
        let err = compute(
            &activity,
            &test_library(),
            &ReportingParameters::new(10, 80.0),
        )
        .unwrap_err();
        assert!(matches!(err, CarbonLedgerError::UnknownCategory(c) if c == "cloud_compute"));
    }

    #[test]
    fn zero_activity_yields_defined_kpis() {
        let activity = ActivityRecord::new()
            .with_quantity("electricity", 0.0)
            .with_quantity("travel_spend", 0.0);
        let result = compute(
            &activity,
            &test_library(),
            &ReportingParameters::new(10, 80.0),
        )
        .unwrap();

        assert_eq!(result.total_tonnes, 0.0);
        assert_eq!(result.scope3_share, 0.0);
        assert_eq!(result.intensity_per_employee, 0.0);
        assert!(result.scope3_share.is_finite());
        assert!(result.intensity_per_employee.is_finite());
    }

    #[test]
    fn kpis_follow_the_reporting_parameters() {
        let mut params = ReportingParameters::new(10, 80.0);
        params.trees_per_tonne = 40.0;
        let result = compute(&full_activity(), &test_library(), &params).unwrap();

        // 10000*0.06 + 500*0.22 + 50000*0.15 + 20000*0.25 + 20000*0.50 kg
        let expected_total = (600.0 + 110.0 + 7_500.0 + 5_000.0 + 10_000.0) / 1_000.0;
        assert!((result.total_tonnes - expected_total).abs() < 1e-9);
        assert!((result.intensity_per_employee - expected_total / 10.0).abs() < 1e-9);
        assert!((result.tree_equivalents - expected_total * 40.0).abs() < 1e-9);
        assert!((result.financial_exposure - expected_total * 80.0).abs() < 1e-9);

        let expected_scope3 = (7_500.0 + 5_000.0 + 10_000.0) / 1_000.0;
        assert!((result.scope3_share - expected_scope3 / expected_total).abs() < 1e-9);
    }
}
