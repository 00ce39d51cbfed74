use std::path::PathBuf;

use clap::Parser;
use orbital_calculator::conics::Hyperbola;
use orbital_cli::{Prompter, catalog, init_logging, knowns_from, report};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(author, version, about = "Escape (or capture) hyperbola around a body")]
struct Cli {
    /// Body to escape from
    #[arg(long, default_value = "erde")]
    body: String,

    /// Extra body definitions (YAML list, TOML file or directory)
    #[arg(long)]
    bodies: Option<PathBuf>,

    /// Hyperbolic excess speed in km/s
    #[arg(long)]
    v_inf: Option<Decimal>,

    /// Periapsis altitude above the surface in km
    #[arg(long)]
    hp: Option<Decimal>,

    /// Numerical eccentricity, as an alternative to the periapsis altitude
    #[arg(long)]
    epsilon: Option<Decimal>,

    /// JSON output path ("-" for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let catalog = catalog(cli.bodies.as_deref())?;
    let central = catalog.get(&cli.body)?;

    let mut prompter = Prompter::stdio();
    let v_inf = prompter.or_ask(cli.v_inf, "Hyperbolic excess speed v∞ [km/s]")?;
    let hp = match (cli.hp, cli.epsilon) {
        (None, None) => prompter.optional_decimal("Periapsis altitude hp [km]")?,
        (hp, _) => hp,
    };

    let knowns = knowns_from(&[
        ("v_inf", Some(v_inf)),
        ("hp", hp),
        ("epsilon", cli.epsilon),
    ]);
    let hyperbola = Hyperbola::new(central, knowns)?;
    report(hyperbola.trace(), &hyperbola, &cli.output)
}
