// scripts/snowball.rs
//! Snowball scenario CLI
//!
//! - `snowball simulate` - generate (or load) a path and evaluate the note on it
//! - `snowball what-if --scenario <name>` - payoff from chosen event timings
//! - `snowball distribution` - scenario frequencies over many simulated paths

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use snowball_sde::config::AnalysisConfig;
use snowball_sde::mc::simulate_scenarios;
use snowball_sde::output;
use snowball_sde::paths::{generate, PricePath};
use snowball_sde::product::ProductTerms;
use snowball_sde::scenario::{evaluate, evaluate_what_if, Evaluation, WhatIf};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG: &str = "snowball.toml";

#[derive(Parser)]
#[command(name = "snowball")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Analysis configuration file (TOML)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Override the simulation seed
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Table)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the note on one simulated or observed path
    Simulate {
        /// Observed closes (one per line or comma-separated) instead of a simulated path
        #[arg(long)]
        observed: Option<PathBuf>,

        /// Write the path and payoff series to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Evaluate a what-if scenario without a path
    WhatIf {
        /// early_knock_out, maturity_no_event, knock_in_no_knock_out or knock_in_then_knock_out
        #[arg(long)]
        scenario: String,

        #[arg(long)]
        knock_in_period: Option<usize>,

        #[arg(long)]
        knock_out_period: Option<usize>,

        /// Final underlying level (%) for knock_in_no_knock_out
        #[arg(long)]
        final_price: Option<f64>,

        /// Write the payoff series to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Scenario frequencies over many simulated paths
    Distribution {
        /// Number of paths (overrides the config file)
        #[arg(short, long)]
        paths: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let optional = cli.config == Path::new(DEFAULT_CONFIG);
    let mut config = AnalysisConfig::load(&cli.config, optional)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }
    let terms = config.product_terms().context("invalid product terms")?;

    match cli.command {
        Commands::Simulate { observed, csv } => {
            let path = match observed {
                Some(file) => load_observed(&file)?,
                None => generate(&config.path_config(&terms))?,
            };
            let evaluation = evaluate(&path, &terms)?;
            if let Some(csv) = csv {
                output::write_series_to_csv(&csv, Some(&path), &evaluation.payoff)
                    .with_context(|| format!("writing {}", csv.display()))?;
                info!("Series written to {}", csv.display());
            }
            report(&terms, &evaluation, cli.format)
        }
        Commands::WhatIf {
            scenario,
            knock_in_period,
            knock_out_period,
            final_price,
            csv,
        } => {
            let what_if = apply_overrides(
                WhatIf::defaults_for(&scenario, &terms)?,
                knock_in_period,
                knock_out_period,
                final_price,
            );
            let evaluation = evaluate_what_if(&terms, &what_if)?;
            if let Some(csv) = csv {
                output::write_series_to_csv(&csv, None, &evaluation.payoff)
                    .with_context(|| format!("writing {}", csv.display()))?;
            }
            report(&terms, &evaluation, cli.format)
        }
        Commands::Distribution { paths } => {
            let mut mc = config.mc_config(&terms);
            if let Some(paths) = paths {
                mc.paths = paths;
            }
            let distribution = simulate_scenarios(&mc, &terms)?;
            match cli.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&distribution)?),
                Format::Table => {
                    println!("Paths simulated:        {}", distribution.paths);
                    println!("Early knock-out:        {}", distribution.early_knock_out);
                    println!("  after a knock-in:     {}", distribution.knock_in_before_knock_out);
                    println!("Maturity, no event:     {}", distribution.maturity_no_event);
                    println!("Knock-in, no knock-out: {}", distribution.knock_in_no_knock_out);
                    println!("Knock-out probability:  {:.4}", distribution.knock_out_probability);
                    if let Some(period) = distribution.mean_knock_out_period {
                        println!("Mean knock-out period:  {:.2}", period);
                    }
                    println!(
                        "Terminal payoff:        {:.4} ± {:.4} [{:.2}, {:.2}]",
                        distribution.mean_terminal_payoff,
                        distribution.std_terminal_payoff,
                        distribution.min_terminal_payoff,
                        distribution.max_terminal_payoff
                    );
                }
            }
            Ok(())
        }
    }
}

fn apply_overrides(
    what_if: WhatIf,
    knock_in_period: Option<usize>,
    knock_out_period: Option<usize>,
    final_price: Option<f64>,
) -> WhatIf {
    match what_if {
        WhatIf::EarlyKnockOut { knock_out_period: ko } => WhatIf::EarlyKnockOut {
            knock_out_period: knock_out_period.unwrap_or(ko),
        },
        WhatIf::KnockInNoKnockOut {
            knock_in_period: ki,
            final_price: fp,
        } => WhatIf::KnockInNoKnockOut {
            knock_in_period: knock_in_period.unwrap_or(ki),
            final_price: final_price.unwrap_or(fp),
        },
        WhatIf::KnockInThenKnockOut {
            knock_in_period: ki,
            knock_out_period: ko,
        } => WhatIf::KnockInThenKnockOut {
            knock_in_period: knock_in_period.unwrap_or(ki),
            knock_out_period: knock_out_period.unwrap_or(ko),
        },
        WhatIf::MaturityNoEvent => WhatIf::MaturityNoEvent,
    }
}

fn load_observed(file: &Path) -> Result<PricePath> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let closes = contents
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().with_context(|| format!("invalid close '{}'", s)))
        .collect::<Result<Vec<f64>>>()?;
    Ok(PricePath::from_observed(&closes)?)
}

fn report(terms: &ProductTerms, evaluation: &Evaluation, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(evaluation)?),
        Format::Table => {
            println!("┌──────────────────────┬──────────────┐");
            for (name, value) in terms.summary() {
                println!("│ {:<20} │ {:>12} │", name, value);
            }
            println!("└──────────────────────┴──────────────┘");
            for event in &evaluation.events {
                println!(
                    "{:?} at period {} (price {:.2})",
                    event.kind, event.period, event.price
                );
            }
            println!("Scenario:        {}", evaluation.scenario.label());
            println!("Terminal payoff: {:.4}%", evaluation.terminal_payoff);
            println!("{}", evaluation.narrative);
        }
    }
    Ok(())
}
