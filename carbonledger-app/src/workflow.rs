use crate::plotting;
use anyhow::{Context, Result};
use carbonledger_core::{
    aggregate::{self, ReportingParameters},
    report::{self, EmissionReportWriter},
    scenario,
};
use carbonledger_schemas::{action::ReductionAction, file_formats::ActivityFile};
use crate::config::KnowledgeBase;
use std::path::Path;

/// Runs one full reporting pass: baseline calculation, optional scenario
/// projection, and CSV/JSON/chart outputs into the run directory.
pub fn run_report(
    kb: &KnowledgeBase,
    activity_file: &ActivityFile,
    selected_actions: &[ReductionAction],
    output_dir: &str,
    charts: bool,
) -> Result<()> {
    println!("\n--- [Workflow] Computing baseline emissions ---");

    let params = ReportingParameters::new(
        activity_file.headcount,
        activity_file.carbon_price_per_tonne,
    );
    let result = aggregate::compute(&activity_file.quantities, &kb.library, &params)
        .context("Baseline emission calculation failed")?;

    println!(
        "Total: {:.2} tCO2e | S1 {:.2} | S2 {:.2} | S3 {:.2} ({:.0}% of total)",
        result.total_tonnes,
        result.scope_totals.scope1_t,
        result.scope_totals.scope2_t,
        result.scope_totals.scope3_t,
        result.scope3_share * 100.0,
    );
    println!(
        "Per employee: {:.2} tCO2e | Tree equivalents: {:.0} | Exposure at {:.0}/t: {:.0}",
        result.intensity_per_employee,
        result.tree_equivalents,
        params.carbon_price_per_tonne,
        result.financial_exposure,
    );

    let emissions_csv = Path::new(output_dir).join("emissions.csv");
    let mut writer = EmissionReportWriter::new(emissions_csv.to_str().unwrap())?;
    writer.write_result(&result)?;

    let result_json = Path::new(output_dir).join("result.json");
    report::write_result_json(result_json.to_str().unwrap(), &result)?;

    if !selected_actions.is_empty() {
        println!("\n--- [Workflow] Projecting reduction scenario ---");
        let projection = scenario::project(&result, selected_actions)
            .context("Scenario projection failed")?;

        for applied in &projection.applied {
            println!(
                "  {}: -{:.2} tCO2e (of {:.2} t targeted)",
                applied.action.label, applied.abatement_tonnes, applied.target_tonnes
            );
        }
        println!(
            "Projected total: {:.2} tCO2e ({:.1}% reduction)",
            projection.projected_total_tonnes, projection.reduction_percent
        );

        let scenario_csv = Path::new(output_dir).join("scenario.csv");
        report::write_scenario_csv(scenario_csv.to_str().unwrap(), &projection)?;
        let scenario_json = Path::new(output_dir).join("scenario.json");
        report::write_result_json(scenario_json.to_str().unwrap(), &projection)?;

        if charts {
            plotting::plot_scenario_comparison(output_dir, &projection)?;
        }
    }

    if charts {
        plotting::plot_category_emissions(output_dir, emissions_csv.to_str().unwrap())?;
    }

    Ok(())
}
