//! User-supplied starting values, keyed by parameter name.

use std::collections::BTreeMap;

use orbital_core::{Decimal, Quantity};
use serde::{Deserialize, Serialize};

use crate::params::Params;
use crate::solve::SolveError;
use crate::table::FormulaTable;

/// Known values as the user states them, before they are checked against a
/// formula table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Knowns {
    values: BTreeMap<String, Decimal>,
}

impl Knowns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: Decimal) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Decimal) -> Option<Decimal> {
        self.values.insert(name.into(), value)
    }

    /// Insert only when the caller has not supplied the value already.
    pub fn seed(&mut self, name: impl Into<String>, value: Decimal) {
        self.values.entry(name.into()).or_insert(value);
    }

    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Decimal> {
        self.values.remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Attach the table's units to every value; names the table does not
    /// declare are rejected.
    pub fn resolve(&self, table: &FormulaTable) -> Result<Params, SolveError> {
        self.values
            .iter()
            .map(|(name, value)| {
                table
                    .spec(name)
                    .map(|spec| (spec.name, Quantity::new(*value, spec.unit)))
                    .ok_or_else(|| SolveError::UnknownParameter(name.clone()))
            })
            .collect()
    }
}

impl From<BTreeMap<String, Decimal>> for Knowns {
    fn from(values: BTreeMap<String, Decimal>) -> Self {
        Self { values }
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for Knowns {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> FormulaTable {
        FormulaTable::new()
            .param("ra", "km", "apoapsis radius", [])
            .param("rp", "km", "periapsis radius", [])
    }

    #[test]
    fn seed_keeps_explicit_values() {
        let mut knowns = Knowns::new().with("ra", dec!(42164));
        knowns.seed("ra", dec!(1));
        knowns.seed("rp", dec!(6578));
        assert_eq!(knowns.get("ra"), Some(dec!(42164)));
        assert_eq!(knowns.get("rp"), Some(dec!(6578)));
    }

    #[test]
    fn resolve_attaches_units() {
        let params = Knowns::new().with("rp", dec!(6578)).resolve(&table()).unwrap();
        let rp = params.get("rp").unwrap();
        assert_eq!(rp.value, dec!(6578));
        assert_eq!(rp.unit, "km");
    }

    #[test]
    fn resolve_rejects_undeclared_names() {
        let err = Knowns::new().with("rq", dec!(1)).resolve(&table()).unwrap_err();
        assert_eq!(err, SolveError::UnknownParameter("rq".to_string()));
    }
}
