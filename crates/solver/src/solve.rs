//! Fixed-point solver over a formula table.

use std::fmt;

use log::{debug, trace, warn};
use orbital_core::Quantity;
use serde::Serialize;
use thiserror::Error;

use crate::params::{FormulaError, ParamName, Params};
use crate::table::{FormulaTable, ParamSpec};

/// How a parameter obtained its value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Given {
        param: ParamName,
        value: Quantity,
    },
    Derived {
        param: ParamName,
        via: &'static str,
        inputs: Vec<(ParamName, Quantity)>,
        value: Quantity,
    },
}

impl Step {
    pub fn param(&self) -> ParamName {
        match self {
            Step::Given { param, .. } | Step::Derived { param, .. } => param,
        }
    }

    pub fn value(&self) -> Quantity {
        match self {
            Step::Given { value, .. } | Step::Derived { value, .. } => *value,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Given { param, value } => write!(f, "[{param}] given as {value}"),
            Step::Derived {
                param,
                via,
                inputs,
                value,
            } => {
                write!(f, "[{param}] = {value} via {via} from {{")?;
                for (index, (name, input)) in inputs.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name} = {input}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Fully resolved parameter set plus the order in which values were obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub params: Params,
    pub trace: Vec<Step>,
}

impl Solution {
    /// Value of a resolved parameter.
    pub fn take(&self, name: ParamName) -> Result<Quantity, SolveError> {
        self.params
            .get(name)
            .copied()
            .ok_or_else(|| SolveError::Unsolvable {
                missing: vec![name],
            })
    }

    pub fn optional(&self, name: &str) -> Option<Quantity> {
        self.params.get(name).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("could not solve, missing parameters: {}", .missing.join(", "))]
    Unsolvable { missing: Vec<ParamName> },
    #[error("deriving `{param}` via `{via}` failed: {source}")]
    Formula {
        param: ParamName,
        via: &'static str,
        #[source]
        source: FormulaError,
    },
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
}

/// Resolve every parameter of `table` starting from `given`.
///
/// Pending parameters are visited in declaration order, repeatedly, and each
/// takes the value of its first ready derivation that applies. A value
/// resolved during a pass is visible to the parameters after it in the same
/// pass. Values in `given` are never re-derived. The loop ends when nothing is
/// pending or when a whole pass resolves nothing, in which case the remaining
/// names are reported as [`SolveError::Unsolvable`].
pub fn solve(table: &FormulaTable, given: Params) -> Result<Solution, SolveError> {
    let mut trace: Vec<Step> = given
        .iter()
        .map(|(param, value)| Step::Given {
            param,
            value: *value,
        })
        .collect();
    let mut known = given;
    let mut pending: Vec<&ParamSpec> = table
        .entries()
        .iter()
        .filter(|spec| !known.contains(spec.name))
        .collect();

    while !pending.is_empty() {
        let before = pending.len();
        let mut unresolved = Vec::with_capacity(before);

        for spec in pending {
            match solve_param(spec, &known)? {
                Some(step) => {
                    debug!("{step}");
                    known.insert(spec.name, step.value());
                    trace.push(step);
                }
                None => unresolved.push(spec),
            }
        }

        if unresolved.len() == before {
            let missing: Vec<ParamName> = unresolved.iter().map(|spec| spec.name).collect();
            warn!("could not solve, missing {missing:?}");
            return Err(SolveError::Unsolvable { missing });
        }
        pending = unresolved;
    }

    Ok(Solution {
        params: known,
        trace,
    })
}

fn solve_param(spec: &ParamSpec, known: &Params) -> Result<Option<Step>, SolveError> {
    for derivation in spec.derivations() {
        if !derivation.is_ready(known) {
            continue;
        }
        let value = derivation
            .evaluate(known)
            .map_err(|source| SolveError::Formula {
                param: spec.name,
                via: derivation.name(),
                source,
            })?;
        let Some(value) = value else {
            trace!("{} does not apply to [{}]", derivation.name(), spec.name);
            continue;
        };
        let inputs = derivation
            .inputs()
            .iter()
            .filter_map(|input| known.get(input).map(|quantity| (*input, *quantity)))
            .collect();
        return Ok(Some(Step::Derived {
            param: spec.name,
            via: derivation.name(),
            inputs,
            value: Quantity::new(value, spec.unit),
        }));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Derivation, Derived};
    use orbital_core::numeric;
    use rust_decimal_macros::dec;

    fn area(p: &Params) -> Derived {
        Ok(Some(p.value("width")? * p.value("height")?))
    }

    fn width(p: &Params) -> Derived {
        Ok(Some(numeric::div(p.value("area")?, p.value("height")?)?))
    }

    fn height(p: &Params) -> Derived {
        Ok(Some(numeric::div(p.value("area")?, p.value("width")?)?))
    }

    fn height_from_square(p: &Params) -> Derived {
        if p.flag("square")? {
            Ok(Some(p.value("width")?))
        } else {
            Ok(None)
        }
    }

    fn height_fallback(_: &Params) -> Derived {
        Ok(Some(dec!(1)))
    }

    fn rectangle() -> FormulaTable {
        FormulaTable::new()
            .param("square", "", "square flag", [])
            .param(
                "area",
                "m²",
                "area",
                [Derivation::new("area", &["width", "height"], area)],
            )
            .param(
                "width",
                "m",
                "width",
                [Derivation::new("width", &["area", "height"], width)],
            )
            .param(
                "height",
                "m",
                "height",
                [
                    Derivation::new("height_square", &["width", "square"], height_from_square),
                    Derivation::new("height", &["area", "width"], height),
                ],
            )
    }

    fn given(values: &[(ParamName, rust_decimal::Decimal)]) -> Params {
        values
            .iter()
            .map(|(name, value)| (*name, Quantity::new(*value, "")))
            .collect()
    }

    #[test]
    fn resolves_through_chained_passes() {
        let solution = solve(
            &rectangle(),
            given(&[("square", dec!(0)), ("width", dec!(4)), ("area", dec!(12))]),
        )
        .expect("solvable");
        assert_eq!(solution.take("height").unwrap().value, dec!(3));
        assert_eq!(solution.take("height").unwrap().unit, "m");
    }

    #[test]
    fn sentinel_falls_through_to_next_candidate() {
        let solution = solve(
            &rectangle(),
            given(&[("square", dec!(0)), ("width", dec!(4)), ("area", dec!(12))]),
        )
        .unwrap();
        let step = solution
            .trace
            .iter()
            .find(|step| step.param() == "height")
            .unwrap();
        assert!(matches!(step, Step::Derived { via: "height", .. }));

        let square = solve(
            &rectangle(),
            given(&[("square", dec!(1)), ("width", dec!(4))]),
        )
        .unwrap();
        assert_eq!(square.take("height").unwrap().value, dec!(4));
        assert_eq!(square.take("area").unwrap().value, dec!(16));
    }

    #[test]
    fn reports_every_missing_parameter() {
        let err = solve(&rectangle(), given(&[("square", dec!(0)), ("width", dec!(4))]))
            .unwrap_err();
        assert_eq!(
            err,
            SolveError::Unsolvable {
                missing: vec!["area", "height"]
            }
        );
    }

    #[test]
    fn given_values_are_never_rederived() {
        // Inconsistent on purpose: area != width * height.
        let solution = solve(
            &rectangle(),
            given(&[
                ("square", dec!(0)),
                ("width", dec!(2)),
                ("height", dec!(2)),
                ("area", dec!(10)),
            ]),
        )
        .unwrap();
        assert_eq!(solution.take("area").unwrap().value, dec!(10));
        assert!(solution.trace.iter().all(|step| matches!(step, Step::Given { .. })));
    }

    #[test]
    fn domain_errors_abort_the_solve() {
        let err = solve(
            &rectangle(),
            given(&[("square", dec!(0)), ("width", dec!(0)), ("area", dec!(12))]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SolveError::Formula {
                param: "height",
                via: "height",
                ..
            }
        ));
    }

    #[test]
    fn merge_appends_child_candidates() {
        let child = FormulaTable::new().param(
            "height",
            "m",
            "height",
            [Derivation::new("height_fallback", &[], height_fallback)],
        );
        let merged = FormulaTable::merge(&rectangle(), &child);
        let names: Vec<_> = merged
            .spec("height")
            .unwrap()
            .derivations()
            .iter()
            .map(|d| d.name())
            .collect();
        assert_eq!(names, ["height_square", "height", "height_fallback"]);
        assert_eq!(merged.len(), 4);
        assert!(merged.validate().is_ok());
    }

    #[test]
    fn validate_rejects_undeclared_inputs() {
        let table = FormulaTable::new().param(
            "area",
            "m²",
            "area",
            [Derivation::new("area", &["width", "height"], area)],
        );
        assert!(matches!(
            table.validate(),
            Err(crate::table::TableError::UndeclaredInput { input: "width", .. })
        ));
    }
}
