//! A thermistor over-temperature divider calculator for circuit design.
//!
//! A thermistor (NTC or PTC) forms the lower leg of a voltage divider with a fixed resistor R1 to
//! Vcc. The circuit trips when the divider output crosses a set fraction of Vcc (`X` for NTC, `Y`
//! for PTC). Given any two of R1, the thermistor's nominal resistance R25 and the trip temperature
//! Tt, the calculator derives the third along with the thermistor resistance at trip, the trip
//! voltage and the power dissipated in each leg.
//!
//! # Example
//! A 10K pull-up and an NTC with B = 3950 that should trip at 60 °C with the stock trigger ratio
//! of 0.45:
//! ```rust
//! extern crate thermistor_calc;
//!
//! use thermistor_calc::*;
//!
//! fn main() {
//!     let params = CircuitParameters::default();
//!     let inputs = KnownInputs::new().with_r1(10_000.0).with_tt(60.0);
//!
//!     let res = solve(params, inputs).expect("Error: circuit cannot be solved");
//!
//!     assert_eq!(res.solved_for, Unknown::R25);
//!     assert!((res.vout - 2.25).abs() < 1e-9);
//!     println!("{}", res);
//!
//!     let fit = E24.fit(&params, &res).unwrap().unwrap();
//!     println!("{}", fit);
//! }
//! ```
//! The printed result follows this layout:
//! ```text
//! R1 ≈ 10000.00 Ω
//! P_R1 ≈ 0.0008 W
//! Rt ≈ 8181.82 Ω
//! R25 ≈ 32909.40 Ω
//! P_Rt ≈ 0.0006 W
//! Vout ≈ 2.250 V
//! I ≈ 0.000275 A
//!```

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

mod error;
pub mod input;
mod model;
mod report;
mod series;

pub use error::{CoreError, CoreResult};
pub use input::{ParseError, RawInputs};
pub use model::{ThermalModel, KELVIN_OFFSET, T25_K};
pub use report::StandardFit;
pub use series::{format_resistance, RSeries, E12, E24, E3, E6};

use error::ensure_positive;

/// Thermistor temperature coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThermistorType {
    /// Resistance falls as temperature rises.
    #[default]
    Ntc,
    /// Resistance rises as temperature rises.
    Ptc,
}

impl FromStr for ThermistorType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, <Self as FromStr>::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NTC" => Ok(ThermistorType::Ntc),
            "PTC" => Ok(ThermistorType::Ptc),
            _ => Err(ParseError::ThermistorType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ThermistorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ThermistorType::Ntc => write!(f, "NTC"),
            ThermistorType::Ptc => write!(f, "PTC"),
        }
    }
}

/// Fixed configuration of the divider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitParameters {
    pub thermistor_type: ThermistorType,
    /// B constant in kelvin.
    pub b: f64,
    /// Supply voltage in volts.
    pub vcc: f64,
    /// NTC trigger ratio, the fraction of Vcc at which the circuit trips.
    pub x: f64,
    /// PTC trigger ratio.
    pub y: f64,
}

impl Default for CircuitParameters {
    fn default() -> Self {
        CircuitParameters {
            thermistor_type: ThermistorType::Ntc,
            b: 3950.0,
            vcc: 5.0,
            x: 0.45,
            y: 0.8,
        }
    }
}

impl CircuitParameters {
    /// The trigger ratio in effect for the configured thermistor type.
    pub fn trigger_ratio(&self) -> f64 {
        match self.thermistor_type {
            ThermistorType::Ntc => self.x,
            ThermistorType::Ptc => self.y,
        }
    }

    /// Checks B, Vcc and both trigger ratios.
    pub fn validate(&self) -> CoreResult<()> {
        ensure_positive(self.b, "B constant must be positive")?;
        ensure_positive(self.vcc, "Vcc must be positive")?;
        check_ratio(self.x, "trigger ratio X must lie strictly between 0 and 1")?;
        check_ratio(self.y, "trigger ratio Y must lie strictly between 0 and 1")?;
        Ok(())
    }
}

fn check_ratio(v: f64, what: &'static str) -> CoreResult<()> {
    if v > 0.0 && v < 1.0 {
        Ok(())
    } else {
        Err(CoreError::invalid(what, v))
    }
}

/// The circuit values the caller already knows. Exactly two must be present.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KnownInputs {
    /// Series resistor in ohms.
    pub r1: Option<f64>,
    /// Thermistor resistance at 25 °C in ohms.
    pub r25: Option<f64>,
    /// Trip temperature in °C.
    pub tt: Option<f64>,
}

impl KnownInputs {
    pub fn new() -> Self {
        KnownInputs::default()
    }

    pub fn with_r1(mut self, r1: f64) -> Self {
        self.r1 = Some(r1);
        self
    }

    pub fn with_r25(mut self, r25: f64) -> Self {
        self.r25 = Some(r25);
        self
    }

    pub fn with_tt(mut self, tt: f64) -> Self {
        self.tt = Some(tt);
        self
    }

    /// Number of populated fields.
    pub fn supplied(&self) -> usize {
        [self.r1.is_some(), self.r25.is_some(), self.tt.is_some()]
            .iter()
            .filter(|present| **present)
            .count()
    }

    /// Checks the values that are present.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(r1) = self.r1 {
            ensure_positive(r1, "R1 must be positive")?;
        }
        if let Some(r25) = self.r25 {
            ensure_positive(r25, "R25 must be positive")?;
        }
        if let Some(tt) = self.tt {
            if !(tt.is_finite() && tt > -KELVIN_OFFSET) {
                return Err(CoreError::invalid(
                    "trip temperature must be above absolute zero",
                    tt,
                ));
            }
        }
        Ok(())
    }
}

/// The quantity a solve derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown {
    R1,
    R25,
    Tt,
}

/// A fully resolved divider at its trip point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveResult {
    pub solved_for: Unknown,
    /// Series resistor (Ω).
    pub r1: f64,
    /// Thermistor resistance at 25 °C (Ω).
    pub r25: f64,
    /// Trip temperature (°C).
    pub tt: f64,
    /// Thermistor resistance at the trip temperature (Ω).
    pub rt: f64,
    /// Divider output at trip (V).
    pub vout: f64,
    /// Loop current at trip (A).
    pub current: f64,
    /// Power dissipated in R1 (W).
    pub p_r1: f64,
    /// Power dissipated in the thermistor (W).
    pub p_rt: f64,
}

/// Solves for whichever of R1, R25 and Tt is missing from `inputs`.
///
/// Requests that do not carry exactly two known values yield `CoreError::RequestIncomplete`
/// before any parameter is inspected.
pub fn solve(params: CircuitParameters, inputs: KnownInputs) -> CoreResult<SolveResult> {
    let supplied = inputs.supplied();
    if supplied != 2 {
        debug!(supplied, "incomplete request");
        return Err(CoreError::RequestIncomplete { supplied });
    }

    if let Err(e) = params.validate().and_then(|_| inputs.validate()) {
        warn!(error = %e, "rejected configuration");
        return Err(e);
    }

    let model = ThermalModel::new(params);
    match (inputs.r1, inputs.r25, inputs.tt) {
        (Some(r1), None, Some(tt)) => {
            debug!(r1, tt, "solving for R25");
            model.solve_r25(r1, tt)
        }
        (None, Some(r25), Some(tt)) => {
            debug!(r25, tt, "solving for R1");
            model.solve_r1(r25, tt)
        }
        (Some(r1), Some(r25), None) => {
            debug!(r1, r25, "solving for trip temperature");
            model.solve_tt(r25, r1)
        }
        _ => Err(CoreError::RequestIncomplete { supplied }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ntc() -> CircuitParameters {
        CircuitParameters::default()
    }

    #[test]
    fn gating_rejects_wrong_counts() {
        let all = KnownInputs::new()
            .with_r1(10_000.0)
            .with_r25(10_000.0)
            .with_tt(60.0);
        for inputs in &[
            KnownInputs::new(),
            KnownInputs::new().with_r1(10_000.0),
            KnownInputs::new().with_tt(60.0),
            all,
        ] {
            match solve(ntc(), *inputs) {
                Err(CoreError::RequestIncomplete { supplied }) => {
                    assert_eq!(supplied, inputs.supplied())
                }
                other => panic!("expected RequestIncomplete, got {:?}", other),
            }
        }
    }

    #[test]
    fn gating_precedes_validation() {
        let params = CircuitParameters { x: 1.0, ..ntc() };
        let err = solve(params, KnownInputs::new().with_r1(10_000.0)).unwrap_err();
        assert_eq!(err, CoreError::RequestIncomplete { supplied: 1 });
    }

    #[test]
    fn dispatch_reports_given_values() {
        let res = solve(ntc(), KnownInputs::new().with_r1(10_000.0).with_tt(60.0)).unwrap();
        assert_eq!(res.solved_for, Unknown::R25);
        assert_eq!(res.r1, 10_000.0);
        assert_eq!(res.tt, 60.0);

        let res = solve(ntc(), KnownInputs::new().with_r25(10_000.0).with_tt(60.0)).unwrap();
        assert_eq!(res.solved_for, Unknown::R1);
        assert_eq!(res.r25, 10_000.0);

        let res = solve(ntc(), KnownInputs::new().with_r25(10_000.0).with_r1(10_000.0)).unwrap();
        assert_eq!(res.solved_for, Unknown::Tt);
        assert_eq!(res.r1, 10_000.0);
        assert_eq!(res.r25, 10_000.0);
    }

    #[test]
    fn boundary_ratio_is_invalid_configuration() {
        let inputs = KnownInputs::new().with_r1(10_000.0).with_tt(60.0);
        let err = solve(CircuitParameters { x: 1.0, ..ntc() }, inputs).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration { .. }));

        let ptc = CircuitParameters {
            thermistor_type: ThermistorType::Ptc,
            y: 1.0,
            ..ntc()
        };
        let err = solve(ptc, inputs).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration { .. }));
    }

    #[test]
    fn rejects_non_physical_inputs() {
        let err = solve(ntc(), KnownInputs::new().with_r1(-5.0).with_tt(60.0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration { .. }));

        let err = solve(ntc(), KnownInputs::new().with_r1(1_000.0).with_tt(-300.0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration { .. }));

        let params = CircuitParameters { vcc: 0.0, ..ntc() };
        let err = solve(params, KnownInputs::new().with_r1(1_000.0).with_tt(60.0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration { .. }));
    }

    #[test]
    fn r25_scenario_matches_closed_form() {
        let res = solve(ntc(), KnownInputs::new().with_r1(10_000.0).with_tt(60.0)).unwrap();
        let rt = 10_000.0 * 2.25 / (5.0 - 2.25);
        let r25 = rt * (-3950.0 * (1.0 / 333.15 - 1.0 / 298.15_f64)).exp();
        assert_relative_eq!(res.vout, 2.25, epsilon = 1e-12);
        assert_relative_eq!(res.rt, rt, max_relative = 1e-12);
        assert_relative_eq!(res.r25, r25, max_relative = 1e-12);
        assert!(res.r25 > 32_800.0 && res.r25 < 33_000.0);
    }

    #[test]
    fn tt_scenario_round_trips_through_r25() {
        let res = solve(ntc(), KnownInputs::new().with_r25(10_000.0).with_r1(10_000.0)).unwrap();
        assert!(res.tt.is_finite());
        let back = solve(ntc(), KnownInputs::new().with_r1(10_000.0).with_tt(res.tt)).unwrap();
        assert!((back.r25 - 10_000.0).abs() < 1e-3);
    }

    #[test]
    fn thermistor_type_parses_case_insensitively() {
        assert_eq!(" ntc ".parse::<ThermistorType>(), Ok(ThermistorType::Ntc));
        assert_eq!("Ptc".parse::<ThermistorType>(), Ok(ThermistorType::Ptc));
        assert!("PTX".parse::<ThermistorType>().is_err());
        assert_eq!(ThermistorType::Ptc.to_string(), "PTC");
    }
}
