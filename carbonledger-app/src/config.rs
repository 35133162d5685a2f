use anyhow::{bail, Context, Result};
use carbonledger_core::library::FactorLibrary;
use carbonledger_schemas::{
    action::{ActionTarget, ReductionAction},
    file_formats::{ActionCatalogFile, ActivityFile, FactorLibraryFile},
};
use std::{fs, path::Path};

/// All the static configuration a reporting run needs: the validated
/// factor library and the reduction action catalog.
pub struct KnowledgeBase {
    pub library: FactorLibrary,
    pub actions: Vec<ReductionAction>,
}

impl KnowledgeBase {
    /// Loads `factors.yaml` and `actions.yaml` from the data directory.
    /// Validation runs here, at load time: a category referenced anywhere
    /// without a matching factor is a configuration error, surfaced
    /// before any calculation is attempted.
    pub fn load(base_path: &str) -> Result<Self> {
        println!("Loading configuration from '{}'...", base_path);

        let factors_path = Path::new(base_path).join("factors.yaml");
        let factors_str = fs::read_to_string(&factors_path)
            .with_context(|| format!("Failed to read {:?}", factors_path))?;
        let factor_file: FactorLibraryFile = serde_yaml::from_str(&factors_str)
            .with_context(|| format!("Failed to parse YAML from {:?}", factors_path))?;

        let library = FactorLibrary::new(
            factor_file.schema_version,
            factor_file.factors,
            factor_file.scope_assignments,
        )
        .context("Factor library failed validation")?;

        let actions_path = Path::new(base_path).join("actions.yaml");
        let actions = if actions_path.is_file() {
            let actions_str = fs::read_to_string(&actions_path)
                .with_context(|| format!("Failed to read {:?}", actions_path))?;
            let catalog: ActionCatalogFile = serde_yaml::from_str(&actions_str)
                .with_context(|| format!("Failed to parse YAML from {:?}", actions_path))?;
            catalog.actions
        } else {
            ReductionAction::catalog()
        };

        for action in &actions {
            if let ActionTarget::Category { category } = &action.target {
                if !library.contains(category) {
                    bail!(
                        "Action '{}' targets category '{}' which has no emission factor",
                        action.id,
                        category
                    );
                }
            }
        }

        println!(
            "Configuration loaded: {} factors (library v{}), {} actions.",
            library.len(),
            library.version(),
            actions.len()
        );
        Ok(Self { library, actions })
    }

    /// Resolves a comma-separated list of action ids against the catalog.
    pub fn select_actions(&self, ids: &str) -> Result<Vec<ReductionAction>> {
        let mut selected = Vec::new();
        for id in ids.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let action = self
                .actions
                .iter()
                .find(|a| a.id == id)
                .with_context(|| format!("Unknown reduction action '{}'", id))?;
            selected.push(action.clone());
        }
        Ok(selected)
    }
}

/// Loads the activity input file: company details plus raw quantities.
/// Accepts YAML or, for data exported from other tools, JSON.
pub fn load_activity_file(path: &str) -> Result<ActivityFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path))?;
    let activity: ActivityFile = if Path::new(path).extension().map_or(false, |e| e == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from '{}'", path))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from '{}'", path))?
    };
    Ok(activity)
}
