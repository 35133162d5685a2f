//! This module is responsible for generating the report charts from
//! calculation results.

use anyhow::Result;
use carbonledger_core::scenario::ScenarioResult;
use plotters::prelude::*;
use serde::Deserialize;

/// The columns of the emissions CSV the charts need; the report writer
/// emits more, which the reader skips by header name.
#[derive(Debug, Deserialize)]
struct EmissionRow {
    category: String,
    scope: String,
    tonnes_co2e: f64,
}

fn scope_color(scope: &str) -> RGBColor {
    match scope {
        "Scope 1" => RGBColor(178, 34, 34),
        "Scope 2" => RGBColor(70, 130, 180),
        _ => RGBColor(46, 139, 87),
    }
}

/// Parses the emissions report CSV back into plottable rows.
fn parse_emissions_csv(csv_path: &str) -> Result<Vec<EmissionRow>> {
    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: EmissionRow = result?;
        rows.push(row);
    }
    Ok(rows)
}

/// Generates a bar chart of per-category emissions, colored by scope,
/// from the emissions CSV of a run.
pub fn plot_category_emissions(output_dir: &str, csv_path: &str) -> Result<()> {
    println!("[Plotting] Generating emission charts...");

    let rows = parse_emissions_csv(csv_path)?;
    if rows.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }

    let path = format!("{}/1_emissions_by_category.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let n = rows.len();
    let max_tonnes = rows
        .iter()
        .map(|r| r.tonnes_co2e)
        .fold(0.0, f64::max)
        .max(f64::MIN_POSITIVE);

    let categories: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Emissions by Category", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..n as f64, 0f64..max_tonnes * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Category")
        .y_desc("tCO2e")
        .x_labels(n)
        .x_label_formatter(&|x| {
            let i = x.floor() as usize;
            categories.get(i).map(|c| c.to_string()).unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(rows.iter().enumerate().map(|(i, row)| {
        let color = scope_color(&row.scope);
        Rectangle::new(
            [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, row.tonnes_co2e)],
            color.filled(),
        )
    }))?;

    root.present()?;
    println!("[Plotting] Charts have been saved to '{}'.", output_dir);
    Ok(())
}

/// Generates a baseline-vs-projected comparison chart for a scenario,
/// with one bar per applied action's abatement.
pub fn plot_scenario_comparison(output_dir: &str, scenario: &ScenarioResult) -> Result<()> {
    let path = format!("{}/2_scenario_comparison.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut bars: Vec<(String, f64, RGBColor)> = vec![(
        "Baseline".to_string(),
        scenario.baseline.total_tonnes,
        RGBColor(105, 105, 105),
    )];
    for applied in &scenario.applied {
        bars.push((
            applied.action.label.clone(),
            applied.abatement_tonnes,
            RGBColor(46, 139, 87),
        ));
    }
    bars.push((
        "Projected".to_string(),
        scenario.projected_total_tonnes,
        RGBColor(70, 130, 180),
    ));

    let n = bars.len();
    let max_tonnes = bars
        .iter()
        .map(|(_, v, _)| *v)
        .fold(0.0, f64::max)
        .max(f64::MIN_POSITIVE);

    let labels: Vec<String> = bars.iter().map(|(l, _, _)| l.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Reduction Scenario", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..n as f64, 0f64..max_tonnes * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Baseline / Abatements / Projected")
        .y_desc("tCO2e")
        .x_labels(n)
        .x_label_formatter(&|x| {
            let i = x.floor() as usize;
            labels.get(i).cloned().unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, value, color))| {
        Rectangle::new(
            [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, *value)],
            color.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}
