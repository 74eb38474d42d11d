// Experiment scenario files
//
// A scenario is an `ExperimentConfig` plus descriptive metadata:
//
//   meta:
//     name: Small budgets
//     hypothesis: Defending the top 25 nodes halves the compromised fraction
//   config:
//     population_sizes: [50, 100]
//     samples_per_size: 200
//     budget_mappings: [[25, 75], [0, 75]]

use ci_rust::{ExperimentConfig, SimError};
use std::fs;
use std::path::{Path, PathBuf};

/// Scenario file format
#[derive(Debug, serde::Deserialize)]
pub struct ScenarioFile {
    /// Scenario metadata
    #[serde(default)]
    pub meta: ScenarioMeta,

    /// Experiment configuration (missing fields take standard defaults)
    #[serde(default)]
    pub config: ExperimentConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct ScenarioMeta {
    pub name: Option<String>,
    pub description: Option<String>,
    pub hypothesis: Option<String>,
}

impl ScenarioFile {
    /// Parse and validate a scenario document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SimError> {
        let scenario: ScenarioFile = serde_yaml::from_str(yaml)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, SimError> {
        let yaml = fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    /// Display name: `meta.name` or the file stem
    pub fn display_name(&self, path: &Path) -> String {
        self.meta.name.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "scenario".to_string())
        })
    }
}

/// All `.yaml` / `.yml` files in a directory, sorted
pub fn find_scenarios(dir: &Path) -> Vec<PathBuf> {
    let mut scenarios = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let ext = path.extension().and_then(|s| s.to_str());
            if ext == Some("yaml") || ext == Some("yml") {
                scenarios.push(path);
            }
        }
    }

    scenarios.sort();
    scenarios
}

#[cfg(test)]
mod tests {
    use super::*;
    use ci_rust::BudgetPair;

    #[test]
    fn test_parse_scenario_with_meta() {
        let yaml = r#"
meta:
  name: Small budgets
  hypothesis: Defense helps
config:
  population_sizes: [30]
  samples_per_size: 20
  budget_mappings: [[25, 75], [0, 75]]
"#;
        let scenario = ScenarioFile::from_yaml_str(yaml).unwrap();

        assert_eq!(scenario.meta.name.as_deref(), Some("Small budgets"));
        assert_eq!(scenario.config.population_sizes, vec![30]);
        assert_eq!(
            scenario.config.budget_mappings,
            vec![BudgetPair::from_units(25, 75), BudgetPair::from_units(0, 75)]
        );
        assert_eq!(scenario.display_name(Path::new("x/small.yaml")), "Small budgets");
    }

    #[test]
    fn test_empty_scenario_is_standard_experiment() {
        let scenario = ScenarioFile::from_yaml_str("{}").unwrap();
        assert_eq!(scenario.config, ExperimentConfig::default());
        assert_eq!(scenario.display_name(Path::new("x/standard.yaml")), "standard");
    }

    #[test]
    fn test_invalid_budget_rejected() {
        let yaml = "config:\n  budget_mappings: [[10, -1]]\n";
        assert!(ScenarioFile::from_yaml_str(yaml).is_err());
    }
}
