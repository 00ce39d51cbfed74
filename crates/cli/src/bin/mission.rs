use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use orbital_calculator::config::{DEFAULT_ASCENT_LOSSES_KM_S, MissionScenario, load_scenario};
use orbital_calculator::mission::{MissionConfig, plan_mission};
use orbital_calculator::propulsion::VehicleBudget;
use orbital_cli::{Prompter, catalog, init_logging, parse_date, print_windows, report};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Mission planner: ascent, Hohmann cruise, escape and insertion"
)]
struct Cli {
    /// Scenario file (TOML or YAML); replaces the body and altitude flags
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Departure body (case-insensitive)
    #[arg(long)]
    from: Option<String>,

    /// Destination body (case-insensitive)
    #[arg(long)]
    to: Option<String>,

    /// Central body of the cruise
    #[arg(long, default_value = "sonne")]
    star: String,

    /// Parking altitude at origin in km
    #[arg(long)]
    origin_altitude: Option<Decimal>,

    /// Parking altitude at destination in km
    #[arg(long)]
    dest_altitude: Option<Decimal>,

    /// Gravity and drag losses added to the ascent in km/s
    #[arg(long, default_value_t = DEFAULT_ASCENT_LOSSES_KM_S)]
    ascent_losses: Decimal,

    /// Launch mass in kg; enables the payload budget together with the
    /// structural ratio and exhaust velocity
    #[arg(long, requires_all = ["structural_ratio", "exhaust_velocity"])]
    launch_mass: Option<Decimal>,

    /// Structural ratio σ of the vehicle
    #[arg(long)]
    structural_ratio: Option<Decimal>,

    /// Effective exhaust velocity in km/s
    #[arg(long)]
    exhaust_velocity: Option<Decimal>,

    /// List launch windows around this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: Option<DateTime<Utc>>,

    /// Extra body definitions (YAML list, TOML file or directory)
    #[arg(long)]
    bodies: Option<PathBuf>,

    /// JSON output path ("-" for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

impl Cli {
    fn scenario(&self) -> anyhow::Result<MissionScenario> {
        if let Some(path) = &self.scenario {
            return load_scenario(path)
                .with_context(|| format!("loading scenario {}", path.display()));
        }
        let mut prompter = Prompter::stdio();
        let vehicle = match (
            self.launch_mass,
            self.structural_ratio,
            self.exhaust_velocity,
        ) {
            (Some(launch_mass_kg), Some(structural_ratio), Some(exhaust_velocity_km_s)) => {
                Some(VehicleBudget {
                    name: None,
                    launch_mass_kg,
                    structural_ratio,
                    exhaust_velocity_km_s,
                })
            }
            _ => None,
        };
        Ok(MissionScenario {
            origin: prompter.or_ask(self.from.clone(), "From (body)")?,
            destination: prompter.or_ask(self.to.clone(), "To (body)")?,
            star: self.star.clone(),
            origin_altitude_km: prompter
                .or_ask(self.origin_altitude, "Parking altitude at origin [km]")?,
            destination_altitude_km: prompter
                .or_ask(self.dest_altitude, "Parking altitude at destination [km]")?,
            ascent_losses_km_s: self.ascent_losses,
            vehicle,
        })
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let scenario = cli.scenario()?;
    let catalog = catalog(cli.bodies.as_deref())?;
    let config = MissionConfig::from_scenario(&scenario, &catalog)?;

    let profile = plan_mission(config)?;
    report(&profile.trace(), &profile, &cli.output)?;

    println!();
    println!(
        "{} -> {}: ascent {}, escape {}, insertion {}",
        scenario.origin,
        scenario.destination,
        profile.ascent.delta_v,
        profile.departure.delta_v,
        profile.arrival.delta_v
    );
    println!("Total Δv: {}", profile.total_delta_v);
    println!("Cruise: {:.1} days", profile.cruise.transfer_days());
    if let Some(budget) = &profile.budget {
        println!("Payload: {}", budget.m_n);
    }
    if let Some(date) = cli.date {
        print_windows(&profile.launch_windows()?, date, 3)?;
    }
    Ok(())
}
