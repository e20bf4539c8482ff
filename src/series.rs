use itertools::Itertools;
use lazy_static::lazy_static;

use crate::error::CoreResult;
use crate::report::StandardFit;
use crate::{CircuitParameters, SolveResult, ThermalModel, Unknown};

const DECADES: &[f64] = &[1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6];

// Mantissas are held in tenths so that every table value is an exact product.
lazy_static! {
    /// RSeries constant for the E3 standard series
    pub static ref E3: RSeries = RSeries::new("E3", &[10, 22, 47]);
    /// RSeries constant for the E6 standard series
    pub static ref E6: RSeries = RSeries::extend("E6", &E3, &[15, 33, 68]);
    /// RSeries constant for the E12 standard series
    pub static ref E12: RSeries = RSeries::extend("E12", &E6, &[12, 18, 27, 39, 56, 82]);
    /// RSeries constant for the E24 standard series
    pub static ref E24: RSeries = RSeries::extend(
        "E24",
        &E12,
        &[11, 13, 16, 20, 24, 30, 36, 43, 51, 62, 75, 91]
    );
}

/// A series of standard resistor values from 1R to 9M1.
#[derive(Debug)]
pub struct RSeries {
    name: &'static str,
    values: Box<[f64]>,
}

fn expand(mantissas: &[u32]) -> impl Iterator<Item = f64> + '_ {
    mantissas
        .iter()
        .cartesian_product(DECADES.iter())
        .map(|(m, pow)| f64::from(*m) * pow / 10.0)
}

impl RSeries {
    fn new(name: &'static str, mantissas: &[u32]) -> Self {
        Self::sorted(name, expand(mantissas).collect())
    }

    fn extend(name: &'static str, base: &RSeries, add: &[u32]) -> Self {
        Self::sorted(name, base.iter().cloned().chain(expand(add)).collect())
    }

    fn sorted(name: &'static str, mut values: Vec<f64>) -> Self {
        values.sort_by(|a, b| a.total_cmp(b));
        RSeries {
            name,
            values: values.into_boxed_slice(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Iterates the series in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> + Clone {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The standard value closest to `r`. Ties go to the lower value.
    pub fn nearest(&self, r: f64) -> f64 {
        self.iter()
            .cloned()
            .min_by(|a, b| (a - r).abs().total_cmp(&(b - r).abs()))
            .unwrap_or(r)
    }

    /// Rounds the resistor a solve derived to this series and re-solves the trip temperature
    /// the rounded part actually gives. Returns `None` when both resistors were given.
    pub fn fit(
        &self,
        params: &CircuitParameters,
        result: &SolveResult,
    ) -> CoreResult<Option<StandardFit>> {
        let model = ThermalModel::new(*params);
        let (part, value, solved) = match result.solved_for {
            Unknown::R1 => {
                let r1 = self.nearest(result.r1);
                (Unknown::R1, r1, model.solve_tt(result.r25, r1)?)
            }
            Unknown::R25 => {
                let r25 = self.nearest(result.r25);
                (Unknown::R25, r25, model.solve_tt(r25, result.r1)?)
            }
            Unknown::Tt => return Ok(None),
        };
        Ok(Some(StandardFit {
            series: self.name,
            part,
            value,
            result: solved,
        }))
    }
}

fn format_rval(r: f64, unit: &str) -> String {
    let mut val = format!("{}", (r * 1e6).round() / 1e6);
    if val.contains('.') {
        val.replace('.', unit)
    } else {
        val.push_str(unit);
        val
    }
}

/// Formats a resistance in the `470R` / `4K7` / `2M2` style.
pub fn format_resistance(r: f64) -> String {
    if r < 1000.0 {
        format_rval(r, "R")
    } else if r < 1_000_000.0 {
        format_rval(r / 1000.0, "K")
    } else {
        format_rval(r / 1_000_000.0, "M")
    }
}
