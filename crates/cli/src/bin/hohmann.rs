use clap::Parser;
use orbital_calculator::conics::TransferEllipse;
use orbital_cli::{Prompter, TransferArgs, catalog, init_logging};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hohmann transfer between two bodies or radii")]
struct Cli {
    #[command(flatten)]
    transfer: TransferArgs,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let catalog = catalog(cli.transfer.bodies.as_deref())?;
    let endpoints = cli
        .transfer
        .endpoints(&catalog, &mut Prompter::stdio())?;

    let transfer = TransferEllipse::hohmann(
        endpoints.central,
        endpoints.start,
        endpoints.target,
        endpoints.knowns,
    )?;
    cli.transfer.finish(&transfer)
}
