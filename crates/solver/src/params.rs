use std::collections::BTreeMap;

use orbital_core::{Decimal, NumericError, Quantity};
use serde::Serialize;
use thiserror::Error;

/// Parameter names are static identifiers declared by a formula table.
pub type ParamName = &'static str;

/// Failure raised from inside a derivation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("input `{0}` is not known")]
    MissingInput(&'static str),
    #[error(transparent)]
    Domain(#[from] NumericError),
}

/// Known parameter values of a solve in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params {
    values: BTreeMap<ParamName, Quantity>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: ParamName, quantity: Quantity) -> Option<Quantity> {
        self.values.insert(name, quantity)
    }

    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Numeric value of a known input. Derivations call this for each of their
    /// declared inputs, which the solver has already checked to be present.
    pub fn value(&self, name: &'static str) -> Result<Decimal, FormulaError> {
        self.values
            .get(name)
            .map(|quantity| quantity.value)
            .ok_or(FormulaError::MissingInput(name))
    }

    /// Inputs used as boolean flags hold `0` (false) or any other value (true).
    pub fn flag(&self, name: &'static str) -> Result<bool, FormulaError> {
        Ok(!self.value(name)?.is_zero())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamName, &Quantity)> {
        self.values.iter().map(|(name, quantity)| (*name, quantity))
    }
}

impl FromIterator<(ParamName, Quantity)> for Params {
    fn from_iter<I: IntoIterator<Item = (ParamName, Quantity)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
