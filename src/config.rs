use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::ModelParams;

/// Live snooker match odds from season strength, in-play stats and score
#[derive(Parser, Debug, Clone)]
#[command(name = "snooker-odds", version, about)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// JSON file with model weights and realism settings (defaults if absent)
    #[arg(long, env = "MODEL_CONFIG", global = true)]
    pub model_config: Option<PathBuf>,

    /// Realism shrink λ toward 50/50 (0.0–1.0)
    #[arg(long, env = "SHRINK_LAMBDA", global = true)]
    pub shrink_lambda: Option<f64>,

    /// Disable the per-frame probability cap
    #[arg(long, env = "NO_CAP", global = true)]
    pub no_cap: bool,

    /// Lower bound of the per-frame probability cap (0.0–0.5)
    #[arg(long, env = "CAP_MIN", global = true)]
    pub cap_min: Option<f64>,

    /// Upper bound of the per-frame probability cap (0.5–1.0)
    #[arg(long, env = "CAP_MAX", global = true)]
    pub cap_max: Option<f64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Evaluate one request and print the prices
    Evaluate {
        /// Request JSON file, or `-` for stdin
        #[arg(long, short, default_value = "-")]
        input: String,

        /// Print the full evaluation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the dashboard
    Serve {
        /// Dashboard listen address
        #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
        addr: String,
    },
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(lambda) = self.shrink_lambda {
            if !(0.0..=1.0).contains(&lambda) {
                anyhow::bail!("shrink_lambda must be between 0.0 and 1.0");
            }
        }
        if let Some(lo) = self.cap_min {
            if !(0.0..=0.5).contains(&lo) {
                anyhow::bail!("cap_min must be between 0.0 and 0.5");
            }
        }
        if let Some(hi) = self.cap_max {
            if !(0.5..=1.0).contains(&hi) {
                anyhow::bail!("cap_max must be between 0.5 and 1.0");
            }
        }
        Ok(())
    }

    /// Model parameters: file (or defaults), then flag overrides.
    pub fn model_params(&self) -> anyhow::Result<ModelParams> {
        let mut params = match &self.model_config {
            Some(path) => ModelParams::load(path)?,
            None => ModelParams::default(),
        };
        if let Some(lambda) = self.shrink_lambda {
            params.realism.shrink_lambda = lambda;
        }
        if self.no_cap {
            params.realism.cap_enabled = false;
        }
        if let Some(lo) = self.cap_min {
            params.realism.cap_min = lo;
        }
        if let Some(hi) = self.cap_max {
            params.realism.cap_max = hi;
        }
        validate_params(&params)?;
        Ok(params)
    }
}

/// Reject parameter sets the model would only silently repair.
pub fn validate_params(params: &ModelParams) -> anyhow::Result<()> {
    let realism = &params.realism;
    if !(0.0..=1.0).contains(&realism.shrink_lambda) {
        anyhow::bail!("realism.shrink_lambda must be between 0.0 and 1.0");
    }
    if realism.cap_enabled && realism.cap_min >= realism.cap_max {
        anyhow::bail!(
            "realism cap collapses: cap_min {} must be below cap_max {}",
            realism.cap_min,
            realism.cap_max
        );
    }
    if params.live.k_shots <= 0.0 {
        anyhow::bail!("live.k_shots must be positive");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(args).unwrap()
    }

    #[test]
    fn flags_override_realism() {
        let config = parse(&[
            "snooker-odds",
            "evaluate",
            "--shrink-lambda",
            "0.9",
            "--cap-max",
            "0.8",
        ]);
        config.validate().unwrap();
        let params = config.model_params().unwrap();
        assert_relative_eq!(params.realism.shrink_lambda, 0.9);
        assert_relative_eq!(params.realism.cap_max, 0.8);
        assert_relative_eq!(params.realism.cap_min, 0.45);
        assert!(params.realism.cap_enabled);
    }

    #[test]
    fn no_cap_disables_cap() {
        let config = parse(&["snooker-odds", "--no-cap", "serve"]);
        assert!(!config.model_params().unwrap().realism.cap_enabled);
        match config.command {
            Command::Serve { addr } => assert_eq!(addr, "0.0.0.0:8080"),
            other => panic!("Expected Serve, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_lambda_is_rejected() {
        let config = parse(&["snooker-odds", "evaluate", "--shrink-lambda", "1.5"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn collapsed_cap_is_rejected() {
        let config = parse(&[
            "snooker-odds",
            "evaluate",
            "--cap-min",
            "0.5",
            "--cap-max",
            "0.5",
        ]);
        config.validate().unwrap();
        assert!(config.model_params().is_err());
    }

    #[test]
    fn evaluate_reads_stdin_by_default() {
        match parse(&["snooker-odds", "evaluate"]).command {
            Command::Evaluate { input, json } => {
                assert_eq!(input, "-");
                assert!(!json);
            }
            other => panic!("Expected Evaluate, got {:?}", other),
        }
    }
}
