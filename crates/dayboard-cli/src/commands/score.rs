//! Stateless scoring calculators.

use clap::Subcommand;
use dayboard_core::{adjust_points, priority_score, EfficiencyBand};
use serde_json::json;

#[derive(Subcommand)]
pub enum ScoreAction {
    /// Priority score from the four weights
    Calc {
        urgency: i32,
        importance: i32,
        effort: i32,
        impact: i32,
    },
    /// Points after the time-efficiency adjustment
    Adjust {
        /// Base points, usually a priority score
        base: f64,
        /// Actual minutes spent
        actual: u32,
        /// Estimated minutes
        #[arg(long)]
        estimated: Option<u32>,
    },
}

pub fn run(action: ScoreAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScoreAction::Calc {
            urgency,
            importance,
            effort,
            impact,
        } => {
            println!("{}", priority_score(urgency, importance, effort, impact));
        }
        ScoreAction::Adjust {
            base,
            actual,
            estimated,
        } => {
            let band = EfficiencyBand::classify(estimated, actual);
            let out = json!({
                "points": adjust_points(base, estimated, actual),
                "multiplier": band.multiplier(),
                "band": band.description(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
