// Experiment summary statistics

use ci_rust::{BudgetPair, ExperimentReport, ExperimentResultSet};
use ci_rust::ci_seed::seed_to_hex;

/// Distribution of compromised fractions for one budget pair
#[derive(Debug, Clone, PartialEq)]
pub struct FractionSummary {
    pub samples: usize,
    pub mean: f64,
    /// Sample standard deviation (0 for fewer than two samples)
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

impl FractionSummary {
    pub fn from_fractions(fractions: &[f64]) -> Option<Self> {
        if fractions.is_empty() {
            return None;
        }

        let n = fractions.len();
        let mean = fractions.iter().sum::<f64>() / n as f64;
        let stddev = if n > 1 {
            let var = fractions.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };
        let min = fractions.iter().copied().fold(f64::INFINITY, f64::min);
        let max = fractions.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            samples: n,
            mean,
            stddev,
            min,
            max,
        })
    }

    /// Half-width of a 95% normal confidence interval on the mean
    pub fn ci95(&self) -> f64 {
        1.96 * self.stddev / (self.samples as f64).sqrt()
    }
}

/// Per-population, per-pair summaries of a report
#[derive(Debug, Clone)]
pub struct ExperimentSummary {
    pub seed_used: [u8; 32],
    pub populations: Vec<(usize, Vec<(BudgetPair, FractionSummary)>)>,
}

impl ExperimentSummary {
    pub fn from_report(report: &ExperimentReport) -> Self {
        Self {
            seed_used: report.seed_used,
            populations: report.result_sets.iter().map(summarize_set).collect(),
        }
    }

    /// Print a summary of the experiment results
    pub fn print_summary(&self) {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("║        Infiltration Experiment Results                 ║");
        println!("╚════════════════════════════════════════════════════════╝\n");

        println!("Seed: 0x{}\n", seed_to_hex(&self.seed_used));

        for (node_count, pairs) in &self.populations {
            println!("═══ n = {} ═══", node_count);
            println!(
                "  {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
                "defense", "attack", "trials", "mean", "±95%", "min", "max"
            );
            for (pair, s) in pairs {
                println!(
                    "  {:>8} {:>8} {:>8} {:>8.4} {:>8.4} {:>8.3} {:>8.3}",
                    pair.defense(),
                    pair.attack(),
                    s.samples,
                    s.mean,
                    s.ci95(),
                    s.min,
                    s.max
                );
            }
            println!();
        }
    }
}

fn summarize_set(set: &ExperimentResultSet) -> (usize, Vec<(BudgetPair, FractionSummary)>) {
    let pairs = set
        .results
        .iter()
        .filter_map(|(pair, fractions)| {
            FractionSummary::from_fractions(fractions).map(|s| (*pair, s))
        })
        .collect();
    (set.node_count, pairs)
}
