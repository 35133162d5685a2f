use crate::{
    aggregate::EmissionResult,
    error::CarbonLedgerError,
    scenario::ScenarioResult,
};
use csv::Writer;
use serde::Serialize;
use std::fs;

#[derive(Debug, Serialize)]
struct EmissionRow {
    category: String,
    scope: String,
    scope3_category: String,
    quantity: f64,
    factor_kg_per_unit: f64,
    kg_co2e: f64,
    tonnes_co2e: f64,
}

#[derive(Debug, Serialize)]
struct ScenarioRow {
    action_id: String,
    label: String,
    target_tonnes: f64,
    abatement_tonnes: f64,
}

/// Writes calculation results as flat CSV tables for downstream report
/// and chart consumers.
pub struct EmissionReportWriter {
    writer: Writer<fs::File>,
    path: String,
}

impl EmissionReportWriter {
    pub fn new(path: &str) -> Result<Self, CarbonLedgerError> {
        let writer = Writer::from_path(path)
            .map_err(|e| CarbonLedgerError::CsvError(path.to_string(), e))?;
        Ok(Self {
            writer,
            path: path.to_string(),
        })
    }

    /// One row per category line item, in category order.
    pub fn write_result(&mut self, result: &EmissionResult) -> Result<(), CarbonLedgerError> {
        for item in &result.line_items {
            let row = EmissionRow {
                category: item.category.clone(),
                scope: item.scope.to_string(),
                scope3_category: item
                    .scope3_category
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                quantity: item.quantity,
                factor_kg_per_unit: item.factor_kg_per_unit,
                kg_co2e: item.kg_co2e,
                tonnes_co2e: item.tonnes_co2e,
            };
            self.writer
                .serialize(row)
                .map_err(|e| CarbonLedgerError::CsvError(self.path.clone(), e))?;
        }
        self.writer
            .flush()
            .map_err(|e| CarbonLedgerError::FileIO(self.path.clone(), e))?;
        Ok(())
    }
}

/// One row per applied action, plus the baseline/projected totals in JSON
/// alongside via [`write_result_json`].
pub fn write_scenario_csv(
    path: &str,
    scenario: &ScenarioResult,
) -> Result<(), CarbonLedgerError> {
    let mut writer =
        Writer::from_path(path).map_err(|e| CarbonLedgerError::CsvError(path.to_string(), e))?;
    for applied in &scenario.applied {
        let row = ScenarioRow {
            action_id: applied.action.id.clone(),
            label: applied.action.label.clone(),
            target_tonnes: applied.target_tonnes,
            abatement_tonnes: applied.abatement_tonnes,
        };
        writer
            .serialize(row)
            .map_err(|e| CarbonLedgerError::CsvError(path.to_string(), e))?;
    }
    writer
        .flush()
        .map_err(|e| CarbonLedgerError::FileIO(path.to_string(), e))?;
    Ok(())
}

/// Serializes a result snapshot to pretty JSON, the exchange format the
/// report/export layer reads from.
pub fn write_result_json<T: Serialize>(path: &str, value: &T) -> Result<(), CarbonLedgerError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| CarbonLedgerError::FileIO(path.to_string(), e))?;
    Ok(())
}
