//! Configuration models and loaders for the orbital calculator.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::debug;
use orbital_bodies::{Body, Catalog, UnknownBodyError};
use orbital_propulsion::VehicleBudget;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Ascent losses (gravity and drag) added to the orbital speed of the parking
/// orbit; 1.796 km/s yields the classic 9.58 km/s to a 200 km Earth orbit.
pub const DEFAULT_ASCENT_LOSSES_KM_S: Decimal = Decimal::from_parts(1796, 0, 0, false, 3);

/// Mission scenario parsed from `configs/scenarios`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MissionScenario {
    pub origin: String,
    pub destination: String,
    /// Central body of the interplanetary leg.
    #[serde(default = "default_star")]
    pub star: String,
    pub origin_altitude_km: Decimal,
    pub destination_altitude_km: Decimal,
    #[serde(default = "default_ascent_losses")]
    pub ascent_losses_km_s: Decimal,
    #[serde(default)]
    pub vehicle: Option<VehicleBudget>,
}

fn default_star() -> String {
    "sonne".to_string()
}

fn default_ascent_losses() -> Decimal {
    DEFAULT_ASCENT_LOSSES_KM_S
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    UnknownBody(#[from] UnknownBodyError),
}

/// Load extra bodies from a YAML list, a single TOML file or a directory of
/// TOML files.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<Body>, ConfigError> {
    load_records(path)
}

/// Built-in catalog extended with the bodies found at `path`.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, ConfigError> {
    let bodies = load_bodies(path)?;
    debug!("loaded {} extra bodies", bodies.len());
    Ok(Catalog::with_bodies(bodies))
}

/// Load one mission scenario from a TOML or YAML file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<MissionScenario, ConfigError> {
    let path = path.as_ref();
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Load every scenario of a directory (`.toml`, sorted by file name).
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<MissionScenario>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        debug!("reading {}", path.display());
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    const SCENARIO: &str = r#"
origin = "erde"
destination = "mars"
origin_altitude_km = 200
destination_altitude_km = 300

[vehicle]
launch_mass_kg = 500000
structural_ratio = 0.1
exhaust_velocity_km_s = 4.4
"#;

    #[test]
    fn scenario_defaults_star_and_losses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("earth_mars.toml");
        std::fs::write(&path, SCENARIO).unwrap();
        let scenario = load_scenario(&path).unwrap();
        assert_eq!(scenario.star, "sonne");
        assert_eq!(scenario.ascent_losses_km_s, dec!(1.796));
        assert_eq!(scenario.origin_altitude_km, dec!(200));
        assert_eq!(scenario.vehicle.unwrap().structural_ratio, dec!(0.1));
    }

    #[test]
    fn yaml_scenario() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "origin: erde\ndestination: venus\nstar: sun\norigin_altitude_km: 200\ndestination_altitude_km: 250\nascent_losses_km_s: 1.5"
        )
        .unwrap();
        let scenario = load_scenario(file.path()).unwrap();
        assert_eq!(scenario.destination, "venus");
        assert_eq!(scenario.star, "sun");
        assert_eq!(scenario.ascent_losses_km_s, dec!(1.5));
        assert!(scenario.vehicle.is_none());
    }

    #[test]
    fn body_directory_is_sorted_and_extends_catalog() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("b_ceres.toml"),
            "name = \"Ceres\"\nmu_km3_s2 = 62.6\nradius_km = 470\nsemi_major_axis_km = 413690250\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("a_vesta.toml"),
            "name = \"Vesta\"\nmu_km3_s2 = 17.8\nradius_km = 262.7\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let bodies = load_bodies(dir.path()).unwrap();
        let names: Vec<_> = bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Vesta", "Ceres"]);
        assert!(bodies[0].semi_major_axis().is_none());

        let catalog = load_catalog(dir.path()).unwrap();
        assert_eq!(catalog.get("ceres").unwrap().radius_km, 470.0);
        assert_eq!(catalog.get("Erde").unwrap().name, "Earth");
    }

    #[test]
    fn malformed_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "origin = ").unwrap();
        assert!(matches!(load_scenario(&path), Err(ConfigError::Toml(_))));
    }
}
