use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use orbital_calculator::propulsion::PayloadBudget;
use orbital_calculator::solver::Knowns;
use orbital_cli::{Prompter, init_logging, report};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Single-stage payload budget from known masses and ratios"
)]
struct Cli {
    /// Known values as a JSON object, e.g. {"m0": 100000, "mN": 1000, "mK": 9900}
    #[arg(long)]
    json: Option<String>,

    /// JSON output path ("-" for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let json = match cli.json {
        Some(json) => json,
        None => Prompter::stdio().line("Payload JSON data")?,
    };
    let knowns: Knowns =
        serde_json::from_str(&json).with_context(|| format!("parsing payload data `{json}`"))?;

    let budget = PayloadBudget::new(knowns)?;
    report(budget.trace(), &budget, &cli.output)
}
