//! Mission planning orchestrator that sequences ascent, escape, the
//! interplanetary transfer and insertion.

pub mod arrival;
pub mod ascent;
pub mod departure;

use log::info;
use orbital_bodies::{Body, Catalog};
use orbital_config::{ConfigError, MissionScenario};
use orbital_conics::{Hyperbola, LaunchWindowError, LaunchWindows, OrbitError, TransferEllipse};
use orbital_core::Quantity;
use orbital_core::numeric::add;
use orbital_core::units::KM_S;
use orbital_propulsion::{BudgetError, PayloadBudget, VehicleBudget};
use orbital_solver::{Knowns, Step};
use rust_decimal::Decimal;
use serde::Serialize;

use self::ascent::AscentPlan;

/// Aggregated mission profile describing the sequential legs.
#[derive(Debug, Clone, Serialize)]
pub struct MissionProfile<'a> {
    pub ascent: AscentPlan<'a>,
    pub cruise: TransferEllipse<'a>,
    pub departure: Hyperbola<'a>,
    pub arrival: Hyperbola<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<PayloadBudget>,
    /// Ascent, escape and insertion burns.
    pub total_delta_v: Quantity,
}

impl MissionProfile<'_> {
    pub fn launch_windows(&self) -> Result<LaunchWindows, LaunchWindowError> {
        self.cruise.launch_windows()
    }

    /// Solver traces of every stage, in pipeline order.
    pub fn trace(&self) -> Vec<Step> {
        let stages = [
            self.ascent.parking_orbit.trace(),
            self.cruise.trace(),
            self.departure.trace(),
            self.arrival.trace(),
            self.budget.as_ref().map(PayloadBudget::trace).unwrap_or_default(),
        ];
        stages.concat()
    }
}

/// Top-level mission planning error; one variant per stage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MissionError {
    #[error("ascent planning failed: {0}")]
    Ascent(#[source] OrbitError),
    #[error("interplanetary transfer failed: {0}")]
    Transfer(#[source] OrbitError),
    #[error("escape planning failed: {0}")]
    Escape(#[source] OrbitError),
    #[error("insertion planning failed: {0}")]
    Insertion(#[source] OrbitError),
    #[error("payload budget failed: {0}")]
    Budget(#[from] BudgetError),
}

/// Inputs necessary to compute an end-to-end transfer between parking orbits.
#[derive(Debug, Clone)]
pub struct MissionConfig<'a> {
    pub star: &'a Body,
    pub origin: &'a Body,
    pub destination: &'a Body,
    pub origin_altitude_km: Decimal,
    pub destination_altitude_km: Decimal,
    pub ascent_losses_km_s: Decimal,
    pub vehicle: Option<VehicleBudget>,
}

impl<'a> MissionConfig<'a> {
    /// Resolve the bodies a scenario names against `catalog`.
    pub fn from_scenario(
        scenario: &MissionScenario,
        catalog: &'a Catalog,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            star: catalog.get(&scenario.star)?,
            origin: catalog.get(&scenario.origin)?,
            destination: catalog.get(&scenario.destination)?,
            origin_altitude_km: scenario.origin_altitude_km,
            destination_altitude_km: scenario.destination_altitude_km,
            ascent_losses_km_s: scenario.ascent_losses_km_s,
            vehicle: scenario.vehicle.clone(),
        })
    }
}

/// Run the mission planner. The cruise is planned first because both
/// hyperbolas take their excess speed from its burns.
pub fn plan_mission(config: MissionConfig<'_>) -> Result<MissionProfile<'_>, MissionError> {
    let ascent = ascent::plan_ascent(
        config.origin,
        config.origin_altitude_km,
        config.ascent_losses_km_s,
    )
    .map_err(MissionError::Ascent)?;

    info!(
        "planning transfer {} -> {} around {}",
        config.origin.name, config.destination.name, config.star.name
    );
    let cruise = TransferEllipse::hohmann(
        config.star,
        Some(config.origin),
        Some(config.destination),
        Knowns::new(),
    )
    .map_err(MissionError::Transfer)?;

    let departure = departure::plan_departure(config.origin, config.origin_altitude_km, &cruise)
        .map_err(MissionError::Escape)?;
    let arrival = arrival::plan_arrival(
        config.destination,
        config.destination_altitude_km,
        &cruise,
    )
    .map_err(MissionError::Insertion)?;

    let total = add(ascent.delta_v.value, departure.delta_v.value)
        .and_then(|sum| add(sum, arrival.delta_v.value))
        .map_err(|err| MissionError::Ascent(err.into()))?;
    let budget = config
        .vehicle
        .as_ref()
        .map(|vehicle| vehicle.budget(total))
        .transpose()?;

    info!("mission total Δv = {total:.3} km/s");
    Ok(MissionProfile {
        ascent,
        cruise,
        departure,
        arrival,
        budget,
        total_delta_v: Quantity::new(total, KM_S),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use orbital_bodies::lookup;
    use orbital_core::numeric::to_f64;
    use rust_decimal_macros::dec;

    fn earth_mars() -> MissionConfig<'static> {
        MissionConfig {
            star: lookup("sonne").unwrap(),
            origin: lookup("erde").unwrap(),
            destination: lookup("mars").unwrap(),
            origin_altitude_km: dec!(200),
            destination_altitude_km: dec!(300),
            ascent_losses_km_s: orbital_config::DEFAULT_ASCENT_LOSSES_KM_S,
            vehicle: None,
        }
    }

    #[test]
    fn earth_to_mars_profile() {
        let profile = plan_mission(earth_mars()).unwrap();
        assert_relative_eq!(to_f64(profile.ascent.delta_v.value), 9.58, epsilon = 5e-3);
        assert_eq!(profile.departure.v_inf.value, profile.cruise.delta_v1.value.abs());
        assert_eq!(profile.arrival.v_inf.value, profile.cruise.delta_v2.value.abs());
        assert_relative_eq!(to_f64(profile.departure.delta_v.value), 3.6, epsilon = 0.1);
        let total = profile.ascent.delta_v.value
            + profile.departure.delta_v.value
            + profile.arrival.delta_v.value;
        assert_eq!(profile.total_delta_v.value, total);
        assert!(profile.budget.is_none());
        assert!(profile.launch_windows().is_ok());
    }

    #[test]
    fn vehicle_budget_covers_the_whole_mission() {
        let config = MissionConfig {
            vehicle: Some(VehicleBudget {
                name: Some("heavy".to_string()),
                launch_mass_kg: dec!(3000000),
                structural_ratio: dec!(0.02),
                exhaust_velocity_km_s: dec!(4.5),
            }),
            ..earth_mars()
        };
        let profile = plan_mission(config).unwrap();
        let budget = profile.budget.unwrap();
        assert_eq!(budget.delta_v.unwrap().value, profile.total_delta_v.value);
    }

    #[test]
    fn failing_stage_is_named() {
        let config = MissionConfig {
            origin: lookup("sonne").unwrap(),
            ..earth_mars()
        };
        assert!(matches!(
            plan_mission(config),
            Err(MissionError::Transfer(_))
        ));
    }

    #[test]
    fn scenario_bodies_are_resolved() {
        let catalog = Catalog::new();
        let scenario = MissionScenario {
            origin: "Erde".to_string(),
            destination: "Neptun".to_string(),
            star: "helios".to_string(),
            origin_altitude_km: dec!(200),
            destination_altitude_km: dec!(1000),
            ascent_losses_km_s: dec!(1.796),
            vehicle: None,
        };
        let config = MissionConfig::from_scenario(&scenario, &catalog).unwrap();
        assert_eq!(config.destination.name, "Neptune");
        assert_eq!(config.star.name, "Sun");

        let unknown = MissionScenario {
            destination: "vulcan".to_string(),
            ..scenario
        };
        assert!(matches!(
            MissionConfig::from_scenario(&unknown, &catalog),
            Err(ConfigError::UnknownBody(_))
        ));
    }
}
