use crate::scope::{Scope, Scope3Category};
use serde::{Deserialize, Serialize};

/// What an emission-reduction action applies to: a single activity
/// category, a whole scope, or a named Scope 3 sub-category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionTarget {
    Category { category: String },
    Scope { scope: Scope },
    Scope3Category { scope3_category: Scope3Category },
}

/// A toggleable reduction measure: abates `reduction_fraction` of the
/// emissions of its target. Fractions are domain constants per action and
/// must lie in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionAction {
    pub id: String,
    pub label: String,
    pub target: ActionTarget,
    pub reduction_fraction: f64,
}

impl ReductionAction {
    /// The built-in action catalog. Fractions are standard planning
    /// assumptions; deployments can override them via the action YAML.
    pub fn catalog() -> Vec<ReductionAction> {
        vec![
            ReductionAction {
                id: "renewable_electricity".to_string(),
                label: "Switch to renewable electricity".to_string(),
                target: ActionTarget::Scope {
                    scope: Scope::Scope2,
                },
                reduction_fraction: 0.95,
            },
            ReductionAction {
                id: "rail_modal_shift".to_string(),
                label: "Shift business travel to rail".to_string(),
                target: ActionTarget::Scope3Category {
                    scope3_category: Scope3Category::Travel,
                },
                reduction_fraction: 0.30,
            },
            ReductionAction {
                id: "fleet_electrification".to_string(),
                label: "Electrify the vehicle fleet".to_string(),
                target: ActionTarget::Scope {
                    scope: Scope::Scope1,
                },
                reduction_fraction: 0.60,
            },
            ReductionAction {
                id: "it_sobriety".to_string(),
                label: "IT sobriety programme".to_string(),
                target: ActionTarget::Scope3Category {
                    scope3_category: Scope3Category::Digital,
                },
                reduction_fraction: 0.15,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_target_uses_tagged_representation() {
        let target = ActionTarget::Scope {
            scope: Scope::Scope2,
        };
        let json = serde_json::to_string(&target).unwrap();
        assert_eq!(json, r#"{"type":"scope","scope":"scope2"}"#);

        let parsed: ActionTarget =
            serde_json::from_str(r#"{"type":"scope3_category","scope3_category":"travel"}"#)
                .unwrap();
        assert_eq!(
            parsed,
            ActionTarget::Scope3Category {
                scope3_category: Scope3Category::Travel
            }
        );
    }

    #[test]
    fn catalog_fractions_are_valid() {
        for action in ReductionAction::catalog() {
            assert!(
                (0.0..=1.0).contains(&action.reduction_fraction),
                "action '{}' has fraction {}",
                action.id,
                action.reduction_fraction
            );
        }
    }
}
