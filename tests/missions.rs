use std::fs;

use approx::assert_relative_eq;
use chrono::{TimeDelta, TimeZone, Utc};
use orbital_calculator::bodies::{j2000, lookup};
use orbital_calculator::config::{load_catalog, load_scenario, load_scenarios};
use orbital_calculator::conics::{Ellipse, TransferEllipse};
use orbital_calculator::mission::{MissionConfig, MissionError, plan_mission};
use orbital_calculator::numeric::to_f64;
use orbital_calculator::solver::Knowns;
use rust_decimal_macros::dec;
use tempfile::tempdir;

#[test]
fn earth_mars_windows_bracket_a_date() {
    let transfer = TransferEllipse::hohmann(
        lookup("sonne").unwrap(),
        Some(lookup("erde").unwrap()),
        Some(lookup("mars").unwrap()),
        Knowns::new(),
    )
    .unwrap();
    let windows = transfer.launch_windows().unwrap();
    assert_eq!(windows.reference_epoch(), j2000());

    let first = windows.nth(0).unwrap();
    assert_eq!(
        windows.around(first).unwrap(),
        (first, first + windows.synodic_period())
    );

    let date = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
    let (previous, next) = windows.around(date).unwrap();
    assert!(previous <= date && date < next);
    assert_eq!(next - previous, windows.synodic_period());

    let upcoming = windows.upcoming(date, 3).unwrap();
    assert_eq!(upcoming[0], next);
    assert_eq!(upcoming[2] - upcoming[0], windows.synodic_period() * 2);
    assert!(windows.synodic_period() > TimeDelta::days(779));
}

#[test]
fn scenario_file_drives_the_mission_planner() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("earth_mars.toml");
    fs::write(
        &path,
        r#"
origin = "erde"
destination = "mars"
origin_altitude_km = 200
destination_altitude_km = 300
"#,
    )
    .unwrap();
    let scenario = load_scenario(&path).unwrap();
    let catalog = orbital_calculator::bodies::Catalog::new();
    let profile = plan_mission(MissionConfig::from_scenario(&scenario, &catalog).unwrap()).unwrap();

    assert_relative_eq!(to_f64(profile.ascent.delta_v.value), 9.58, epsilon = 0.01);
    assert_eq!(
        profile.departure.v_inf.value,
        profile.cruise.delta_v1.value.abs()
    );
    assert_eq!(
        profile.arrival.v_inf.value,
        profile.cruise.delta_v2.value.abs()
    );
    assert_eq!(
        profile.total_delta_v.value,
        profile.ascent.delta_v.value + profile.departure.delta_v.value + profile.arrival.delta_v.value
    );
    assert!(profile.budget.is_none());
    assert!(profile.trace().len() > profile.cruise.trace().len());
}

#[test]
fn scenario_directory_is_read_in_file_order() {
    let dir = tempdir().unwrap();
    for (file, destination) in [("b.toml", "venus"), ("a.toml", "mars")] {
        fs::write(
            dir.path().join(file),
            format!(
                "origin = \"erde\"\ndestination = \"{destination}\"\norigin_altitude_km = 200\ndestination_altitude_km = 400\n"
            ),
        )
        .unwrap();
    }
    let scenarios = load_scenarios(dir.path()).unwrap();
    let destinations: Vec<_> = scenarios.iter().map(|s| s.destination.as_str()).collect();
    assert_eq!(destinations, ["mars", "venus"]);
}

#[test]
fn extra_bodies_extend_the_catalog() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("moons.yaml");
    fs::write(
        &path,
        "- name: Moon\n  mu_km3_s2: 4902.8\n  radius_km: 1737.4\n",
    )
    .unwrap();
    let catalog = load_catalog(&path).unwrap();
    let moon = catalog.get("MOON").unwrap();
    assert!(!moon.is_orbiting());
    assert_eq!(catalog.get("erde").unwrap().name, "Earth");

    let low_orbit = Ellipse::circular(moon, dec!(100)).unwrap();
    assert_relative_eq!(to_f64(low_orbit.vp.value), (4902.8_f64 / 1837.4).sqrt(), epsilon = 1e-9);
}

#[test]
fn a_star_cannot_be_a_mission_endpoint() {
    let catalog = orbital_calculator::bodies::Catalog::new();
    let config = MissionConfig {
        star: catalog.get("sonne").unwrap(),
        origin: catalog.get("sonne").unwrap(),
        destination: catalog.get("mars").unwrap(),
        origin_altitude_km: dec!(10000),
        destination_altitude_km: dec!(300),
        ascent_losses_km_s: dec!(0),
        vehicle: None,
    };
    assert!(matches!(
        plan_mission(config),
        Err(MissionError::Transfer(_))
    ));
}

#[test]
fn shipped_configs_plan_cleanly() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("configs");
    let catalog = load_catalog(root.join("bodies")).unwrap();
    assert!(catalog.get("moon").is_ok());

    let scenarios = load_scenarios(root.join("scenarios")).unwrap();
    assert_eq!(scenarios.len(), 2);
    for scenario in &scenarios {
        let profile =
            plan_mission(MissionConfig::from_scenario(scenario, &catalog).unwrap()).unwrap();
        assert_eq!(profile.budget.is_some(), scenario.vehicle.is_some());
        if let Some(budget) = &profile.budget {
            assert!(budget.m_n.value > dec!(0));
        }
    }
}
