use clap::Parser;
use orbital_calculator::conics::TransferEllipse;
use orbital_cli::{Prompter, TransferArgs, catalog, init_logging};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "General coplanar transfer ellipse with a chosen shape"
)]
struct Cli {
    #[command(flatten)]
    transfer: TransferArgs,

    /// Eccentricity of the transfer ellipse
    #[arg(long)]
    epsilon: Option<Decimal>,

    /// Semi-latus rectum of the transfer ellipse in km
    #[arg(long)]
    p: Option<Decimal>,

    /// True anomaly at arrival in degrees
    #[arg(long)]
    phi_arrival: Option<Decimal>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let catalog = catalog(cli.transfer.bodies.as_deref())?;
    let mut prompter = Prompter::stdio();
    let mut endpoints = cli.transfer.endpoints(&catalog, &mut prompter)?;

    let epsilon = match (cli.epsilon, cli.p, cli.phi_arrival) {
        (None, None, None) => prompter.optional_decimal("Eccentricity ε")?,
        (epsilon, _, _) => epsilon,
    };
    for (name, value) in [
        ("epsilon", epsilon),
        ("p", cli.p),
        ("phi_arrival", cli.phi_arrival),
    ] {
        if let Some(value) = value {
            endpoints.knowns.insert(name, value);
        }
    }

    let transfer = TransferEllipse::new(
        endpoints.central,
        endpoints.start,
        endpoints.target,
        endpoints.knowns,
    )?;
    cli.transfer.finish(&transfer)
}
