use crate::{aggregate::EmissionResult, error::CarbonLedgerError};
use carbonledger_schemas::action::{ActionTarget, ReductionAction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One action as applied to a baseline: the emissions pool it targeted and
/// the abatement it actually contributed after overlap capping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedAction {
    pub action: ReductionAction,
    pub target_tonnes: f64,
    pub abatement_tonnes: f64,
}

/// Read-only outcome of a what-if projection over a baseline result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub baseline: EmissionResult,
    pub applied: Vec<AppliedAction>,
    pub total_abatement_tonnes: f64,
    pub projected_total_tonnes: f64,
    pub reduction_percent: f64,
}

/// Categories of the baseline covered by an action target, with their
/// emitted tonnes.
fn covered_categories<'a>(
    baseline: &'a EmissionResult,
    target: &ActionTarget,
) -> Vec<(&'a str, f64)> {
    baseline
        .line_items
        .iter()
        .filter(|item| match target {
            ActionTarget::Category { category } => item.category == *category,
            ActionTarget::Scope { scope } => item.scope == *scope,
            ActionTarget::Scope3Category { scope3_category } => {
                item.scope3_category == Some(*scope3_category)
            }
        })
        .map(|item| (item.category.as_str(), item.tonnes_co2e))
        .collect()
}

/// Projects a set of selected reduction actions onto a baseline result.
///
/// Overlap policy: when several actions reach into the same category, the
/// category can only be abated once. The requested fractions are summed
/// per category and, where the sum exceeds 1, every overlapping action is
/// scaled down by the same ratio. This keeps the projection independent of
/// the order actions were selected in and caps abatement at 100% of each
/// emissions pool.
pub fn project(
    baseline: &EmissionResult,
    actions: &[ReductionAction],
) -> Result<ScenarioResult, CarbonLedgerError> {
    for action in actions {
        if !(0.0..=1.0).contains(&action.reduction_fraction)
            || !action.reduction_fraction.is_finite()
        {
            return Err(CarbonLedgerError::InvalidParameter {
                name: format!("{}.reduction_fraction", action.id),
                value: action.reduction_fraction,
                reason: "reduction fraction must lie in [0, 1]".to_string(),
            });
        }
    }

    // First pass: total fraction requested against each category.
    let mut requested: BTreeMap<&str, f64> = BTreeMap::new();
    for action in actions {
        for (category, _) in covered_categories(baseline, &action.target) {
            *requested.entry(category).or_insert(0.0) += action.reduction_fraction;
        }
    }

    // Second pass: apply, scaling overlapping actions down proportionally.
    let mut applied = Vec::with_capacity(actions.len());
    let mut total_abatement_tonnes = 0.0;
    for action in actions {
        let covered = covered_categories(baseline, &action.target);
        let target_tonnes: f64 = covered.iter().map(|(_, t)| t).sum();

        let mut abatement_tonnes = 0.0;
        for (category, tonnes) in covered {
            let total_fraction = requested.get(category).copied().unwrap_or(0.0);
            let scale = if total_fraction > 1.0 {
                1.0 / total_fraction
            } else {
                1.0
            };
            abatement_tonnes += tonnes * action.reduction_fraction * scale;
        }

        total_abatement_tonnes += abatement_tonnes;
        applied.push(AppliedAction {
            action: action.clone(),
            target_tonnes,
            abatement_tonnes,
        });
    }

    let projected_total_tonnes = (baseline.total_tonnes - total_abatement_tonnes).max(0.0);
    let reduction_percent = if baseline.total_tonnes == 0.0 {
        0.0
    } else {
        total_abatement_tonnes / baseline.total_tonnes * 100.0
    };

    Ok(ScenarioResult {
        baseline: baseline.clone(),
        applied,
        total_abatement_tonnes,
        projected_total_tonnes,
        reduction_percent,
    })
}
