use std::path::PathBuf;

use clap::Parser;
use orbital_calculator::conics::Ellipse;
use orbital_calculator::time::days_to_seconds_decimal;
use orbital_cli::{Prompter, catalog, init_logging, knowns_from, report};
use rust_decimal::Decimal;

/// Parameters asked for when none is given on the command line.
const QUESTIONS: &[(&str, &str)] = &[
    ("ra", "Apoapsis radius ra [km]"),
    ("rp", "Periapsis radius rp [km]"),
    ("epsilon", "Eccentricity ε"),
    ("p", "Semi-latus rectum p [km]"),
    ("a", "Semi-major axis a [km]"),
    ("period", "Orbital period [s]"),
];

#[derive(Parser, Debug)]
#[command(author, version, about = "Solve a closed orbit from any sufficient set of elements")]
struct Cli {
    /// Central body (case-insensitive, German or English name)
    #[arg(long, default_value = "erde")]
    body: String,

    /// Extra body definitions (YAML list, TOML file or directory)
    #[arg(long)]
    bodies: Option<PathBuf>,

    /// Apoapsis radius in km
    #[arg(long)]
    ra: Option<Decimal>,

    /// Periapsis radius in km
    #[arg(long)]
    rp: Option<Decimal>,

    /// Numerical eccentricity
    #[arg(long)]
    epsilon: Option<Decimal>,

    /// Semi-latus rectum in km
    #[arg(long)]
    p: Option<Decimal>,

    /// Semi-major axis in km
    #[arg(long)]
    a: Option<Decimal>,

    /// Semi-minor axis in km
    #[arg(long)]
    b: Option<Decimal>,

    /// Orbital period in days
    #[arg(long)]
    period_days: Option<Decimal>,

    /// JSON output path ("-" for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let catalog = catalog(cli.bodies.as_deref())?;
    let central = catalog.get(&cli.body)?;

    let period = cli.period_days.map(days_to_seconds_decimal).transpose()?;
    let mut knowns = knowns_from(&[
        ("ra", cli.ra),
        ("rp", cli.rp),
        ("epsilon", cli.epsilon),
        ("p", cli.p),
        ("a", cli.a),
        ("b", cli.b),
        ("period", period),
    ]);
    if knowns.is_empty() {
        println!("Ellipse around {} (leave blank if unknown)", central.name);
        knowns = Prompter::stdio().knowns(QUESTIONS)?;
    }

    let ellipse = Ellipse::new(central, knowns)?;
    report(ellipse.trace(), &ellipse, &cli.output)
}
