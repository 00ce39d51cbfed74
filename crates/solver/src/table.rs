//! Formula tables: the parameters of an entity and how each can be derived.

use std::collections::HashSet;

use orbital_core::Decimal;
use thiserror::Error;

use crate::params::{FormulaError, ParamName, Params};

/// Result of evaluating a derivation.
///
/// `Ok(None)` means the formula does not apply to the current inputs even
/// though all of them are known (a branch-specific formula whose precondition
/// fails); the solver then tries the next candidate.
pub type Derived = Result<Option<Decimal>, FormulaError>;

/// Pure function computing one parameter from the known inputs.
pub type Compute = fn(&Params) -> Derived;

/// One candidate way of computing a parameter.
///
/// The value is attached to the parameter the derivation is registered under,
/// so a derivation cannot produce any other parameter.
#[derive(Debug, Clone, Copy)]
pub struct Derivation {
    name: &'static str,
    inputs: &'static [ParamName],
    compute: Compute,
}

impl Derivation {
    pub const fn new(name: &'static str, inputs: &'static [ParamName], compute: Compute) -> Self {
        Self {
            name,
            inputs,
            compute,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn inputs(&self) -> &'static [ParamName] {
        self.inputs
    }

    /// A derivation is ready once every declared input is known.
    pub fn is_ready(&self, known: &Params) -> bool {
        self.inputs.iter().all(|input| known.contains(input))
    }

    pub fn evaluate(&self, known: &Params) -> Derived {
        (self.compute)(known)
    }
}

/// A declared parameter with its candidate derivations in priority order.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: ParamName,
    pub unit: &'static str,
    pub description: &'static str,
    derivations: Vec<Derivation>,
}

impl ParamSpec {
    pub fn derivations(&self) -> &[Derivation] {
        &self.derivations
    }
}

/// Structural problems in a formula table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("parameter `{0}` is declared more than once")]
    Duplicate(ParamName),
    #[error("derivation `{via}` of `{param}` reads undeclared input `{input}`")]
    UndeclaredInput {
        param: ParamName,
        via: &'static str,
        input: ParamName,
    },
    #[error("derivation `{via}` of `{param}` reads its own output")]
    SelfReference { param: ParamName, via: &'static str },
}

/// Ordered set of parameters; declaration order is the solver's pass order.
#[derive(Debug, Clone, Default)]
pub struct FormulaTable {
    entries: Vec<ParamSpec>,
}

impl FormulaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter and its candidate derivations (highest priority first).
    pub fn param(
        mut self,
        name: ParamName,
        unit: &'static str,
        description: &'static str,
        derivations: impl IntoIterator<Item = Derivation>,
    ) -> Self {
        self.entries.push(ParamSpec {
            name,
            unit,
            description,
            derivations: derivations.into_iter().collect(),
        });
        self
    }

    /// Union of two tables by parameter name.
    ///
    /// Parameters keep the parent's position and unit; for a name present in
    /// both tables the child's candidates are appended after the parent's.
    pub fn merge(parent: &FormulaTable, child: &FormulaTable) -> FormulaTable {
        let mut merged = parent.clone();
        for entry in &child.entries {
            match merged.entries.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) => existing
                    .derivations
                    .extend(entry.derivations.iter().copied()),
                None => merged.entries.push(entry.clone()),
            }
        }
        merged
    }

    pub fn entries(&self) -> &[ParamSpec] {
        &self.entries
    }

    pub fn spec(&self, name: &str) -> Option<&ParamSpec> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.spec(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = ParamName> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every derivation only reads declared parameters other than
    /// its own output, and that no parameter is declared twice.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.name) {
                return Err(TableError::Duplicate(entry.name));
            }
        }
        for entry in &self.entries {
            for derivation in &entry.derivations {
                for input in derivation.inputs {
                    if *input == entry.name {
                        return Err(TableError::SelfReference {
                            param: entry.name,
                            via: derivation.name,
                        });
                    }
                    if !seen.contains(input) {
                        return Err(TableError::UndeclaredInput {
                            param: entry.name,
                            via: derivation.name,
                            input: *input,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
