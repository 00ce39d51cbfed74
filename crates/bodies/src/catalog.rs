use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::debug;

use crate::{Body, UnknownBodyError};

static BODIES: LazyLock<Vec<Body>> = LazyLock::new(|| {
    let nan = f64::NAN;
    vec![
        Body::new("Sun", 1.989e30, 1.3271e11, nan, 696_000.0, nan, nan, nan),
        Body::new("Mercury", 3.301e23, 22_032.0, 57_909_227.0, 2_440.0, 47.362, 252.250_84, 87.969),
        Body::new("Venus", 4.869e24, 324_860.0, 108_208_777.0, 6_052.0, 35.020, 181.979_73, 224.701),
        Body::new("Earth", 5.9742e24, 398_599.0, 149_599_366.0, 6_378.0, 29.784, 100.464_35, 365.256),
        Body::new("Mars", 6.4191e23, 42_828.0, 227_946_314.0, 3_397.0, 24.129, 355.453_32, 686.980),
        Body::new("Jupiter", 1.8988e27, 126_687_936.0, 778_344_254.0, 71_398.0, 13.058, 34.404_38, 4_332.589),
        Body::new("Saturn", 5.686e26, 37_930_320.0, 1_425_945_953.0, 60_000.0, 9.647, 49.944_32, 10_759.22),
        Body::new("Uranus", 8.681e25, 5_793_939.0, 2_870_658_186.0, 25_559.0, 6.810, 313.232_18, 30_685.4),
        Body::new("Neptune", 1.024e26, 6_836_529.0, 4_498_396_441.0, 24_764.0, 5.432, 304.880_03, 60_189.0),
        Body::new("Pluto", 1.303e22, 869.6, 5_906_440_628.0, 1_188.0, 4.743, 238.928_81, 90_560.0),
    ]
});

const ALIASES: &[(&str, &str)] = &[
    ("sonne", "Sun"),
    ("helios", "Sun"),
    ("sun", "Sun"),
    ("merkur", "Mercury"),
    ("mercury", "Mercury"),
    ("venus", "Venus"),
    ("erde", "Earth"),
    ("earth", "Earth"),
    ("mars", "Mars"),
    ("jupiter", "Jupiter"),
    ("saturn", "Saturn"),
    ("uranus", "Uranus"),
    ("neptun", "Neptune"),
    ("neptune", "Neptune"),
    ("pluto", "Pluto"),
];

static REGISTRY: LazyLock<BTreeMap<&'static str, &'static Body>> = LazyLock::new(|| {
    ALIASES
        .iter()
        .filter_map(|(alias, name)| {
            BODIES
                .iter()
                .find(|body| body.name == *name)
                .map(|body| (*alias, body))
        })
        .collect()
});

/// Every built-in body, Sun first, then the planets by distance.
pub fn builtin() -> &'static [Body] {
    &BODIES
}

/// Case-insensitive lookup in the built-in catalog.
pub fn lookup(name: &str) -> Result<&'static Body, UnknownBodyError> {
    REGISTRY
        .get(name.trim().to_lowercase().as_str())
        .copied()
        .ok_or_else(|| UnknownBodyError(name.to_string()))
}

/// Built-in bodies plus bodies loaded at runtime. Extra bodies are keyed by
/// their lowercase name and shadow built-in entries with the same key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    extra: BTreeMap<String, Body>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bodies(bodies: impl IntoIterator<Item = Body>) -> Self {
        let mut catalog = Self::new();
        for body in bodies {
            catalog.insert(body);
        }
        catalog
    }

    pub fn insert(&mut self, body: Body) -> Option<Body> {
        let key = body.name.to_lowercase();
        debug!("registering body `{key}`");
        self.extra.insert(key, body)
    }

    pub fn get(&self, name: &str) -> Result<&Body, UnknownBodyError> {
        let key = name.trim().to_lowercase();
        match self.extra.get(&key) {
            Some(body) => Ok(body),
            None => lookup(&key).map_err(|_| UnknownBodyError(name.to_string())),
        }
    }

    pub fn extra(&self) -> impl Iterator<Item = &Body> {
        self.extra.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_the_same_body() {
        let sonne = lookup("Sonne").unwrap();
        assert!(std::ptr::eq(sonne, lookup("HELIOS").unwrap()));
        assert!(std::ptr::eq(sonne, lookup("sun").unwrap()));
        assert_eq!(lookup("Erde").unwrap().name, "Earth");
        assert_eq!(lookup("neptun").unwrap().name, "Neptune");
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            lookup("vulcan").unwrap_err(),
            UnknownBodyError("vulcan".to_string())
        );
    }

    #[test]
    fn extra_bodies_shadow_builtins() {
        let mut moon_mars = lookup("mars").unwrap().clone();
        moon_mars.radius_km = 1.0;
        let catalog = Catalog::with_bodies([moon_mars]);
        assert_eq!(catalog.get("MARS").unwrap().radius_km, 1.0);
        assert_eq!(catalog.get("erde").unwrap().radius_km, 6_378.0);
        assert!(catalog.get("vulcan").is_err());
    }
}
