use serde::{Deserialize, Serialize};

/// The activity unit an emission factor divides by. Spend-based factors
/// (per currency unit) are a proxy used when physical activity data is
/// unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorUnit {
    PerKilowattHour,
    PerLitre,
    PerCurrencyUnit,
    PerPassengerKilometre,
}

/// A single emission factor: kilograms of CO2-equivalent emitted per unit
/// of activity in the given category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    pub category: String,
    pub kg_co2e_per_unit: f64,
    pub unit: FactorUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}
