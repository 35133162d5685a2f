use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;

mod config;
mod plotting;
mod workflow;

/// Carbon footprint calculator: computes a scope-classified emission
/// report from an activity file and projects what-if reduction scenarios.
#[derive(Parser, Debug)]
#[command(name = "carbonledger", version, about)]
struct Cli {
    /// Directory containing factors.yaml and actions.yaml.
    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Activity input file (company, headcount, quantities).
    #[arg(long, default_value = "./data/activity.yaml")]
    activity: String,

    /// Base directory for run outputs.
    #[arg(long, default_value = "./runs")]
    output_dir: String,

    /// Comma-separated reduction action ids to project as a scenario.
    #[arg(long)]
    actions: Option<String>,

    /// Skip PNG chart generation.
    #[arg(long)]
    no_charts: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    println!("--- Carbon Ledger ---");

    let kb = config::KnowledgeBase::load(&cli.data_dir)?;
    let activity_file = config::load_activity_file(&cli.activity)?;

    let selected_actions = match &cli.actions {
        Some(ids) => kb.select_actions(ids)?,
        None => Vec::new(),
    };

    let company_slug: String = activity_file
        .company
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let run_dir = format!(
        "{}/{}_{}",
        cli.output_dir,
        company_slug,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create output directory: {}", run_dir))?;

    // Copy the activity file into the run directory for traceability.
    fs::copy(&cli.activity, Path::new(&run_dir).join("activity.yaml"))
        .with_context(|| format!("Failed to copy '{}'", cli.activity))?;

    workflow::run_report(
        &kb,
        &activity_file,
        &selected_actions,
        &run_dir,
        !cli.no_charts,
    )?;

    println!("\nReport complete. Results are in '{}'", run_dir);
    Ok(())
}
