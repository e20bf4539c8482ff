use tracing::trace;

use crate::error::{ensure_positive, CoreError, CoreResult};
use crate::{CircuitParameters, SolveResult, ThermistorType, Unknown};

/// Offset between the Celsius and Kelvin scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Reference temperature of R25 in kelvin.
pub const T25_K: f64 = 25.0 + KELVIN_OFFSET;

/// B-parameter model of a thermistor sitting in the lower leg of a divider fed through R1.
///
/// Every solver returns a complete `SolveResult` with the trip-point current and dissipation
/// filled in.
#[derive(Debug, Clone, Copy)]
pub struct ThermalModel {
    params: CircuitParameters,
}

impl ThermalModel {
    pub fn new(params: CircuitParameters) -> Self {
        ThermalModel { params }
    }

    pub fn params(&self) -> &CircuitParameters {
        &self.params
    }

    // NTC curves carry a positive exponent, PTC curves the negated one.
    fn sign(&self) -> f64 {
        match self.params.thermistor_type {
            ThermistorType::Ntc => 1.0,
            ThermistorType::Ptc => -1.0,
        }
    }

    /// `1/Tk - 1/T25` for a temperature in °C.
    fn inverse_delta(&self, tc: f64) -> CoreResult<f64> {
        let tk = ensure_positive(tc + KELVIN_OFFSET, "temperature below absolute zero")?;
        Ok(1.0 / tk - 1.0 / T25_K)
    }

    /// Divider output at which the circuit trips.
    pub fn vout_target(&self) -> CoreResult<f64> {
        let vcc = ensure_positive(self.params.vcc, "Vcc must be positive")?;
        let vout = vcc * self.params.trigger_ratio();
        if !(vout > 0.0) {
            Err(CoreError::invalid("trip voltage must be above 0 V", vout))
        } else if !(vout < vcc) {
            Err(CoreError::invalid("trip voltage must be below Vcc", vout))
        } else {
            Ok(vout)
        }
    }

    /// Thermistor resistance that puts the divider output exactly at the trip voltage.
    pub fn divider_rt(&self, r1: f64) -> CoreResult<f64> {
        let r1 = ensure_positive(r1, "R1 must be positive")?;
        let vout = self.vout_target()?;
        ensure_positive(
            r1 * vout / (self.params.vcc - vout),
            "thermistor resistance at trip must be positive",
        )
    }

    /// Thermistor resistance at `tc` °C for a part with the given R25.
    pub fn rt_at(&self, r25: f64, tc: f64) -> CoreResult<f64> {
        let exponent = self.sign() * self.params.b * self.inverse_delta(tc)?;
        ensure_positive(r25 * exponent.exp(), "thermistor resistance must be positive")
    }

    /// Finds R25 given the series resistor and the trip temperature.
    pub fn solve_r25(&self, r1: f64, tt: f64) -> CoreResult<SolveResult> {
        let vout = self.vout_target()?;
        let rt = self.divider_rt(r1)?;
        let exponent = -self.sign() * self.params.b * self.inverse_delta(tt)?;
        let r25 = ensure_positive(rt * exponent.exp(), "R25 must be positive")?;
        trace!(rt, r25, "solved R25");
        self.finish(Unknown::R25, r1, r25, tt, rt, vout)
    }

    /// Finds the series resistor given R25 and the trip temperature.
    pub fn solve_r1(&self, r25: f64, tt: f64) -> CoreResult<SolveResult> {
        let rt = self.rt_at(r25, tt)?;
        let vout = self.vout_target()?;
        let r1 = ensure_positive(
            rt * (self.params.vcc - vout) / vout,
            "R1 must be positive",
        )?;
        trace!(rt, r1, "solved R1");
        self.finish(Unknown::R1, r1, r25, tt, rt, vout)
    }

    /// Finds the trip temperature given both resistors.
    pub fn solve_tt(&self, r25: f64, r1: f64) -> CoreResult<SolveResult> {
        let r25 = ensure_positive(r25, "R25 must be positive")?;
        let vout = self.vout_target()?;
        let rt = self.divider_rt(r1)?;
        let ratio = ensure_positive(rt / r25, "Rt/R25 must be positive")?;

        let inv_t = 1.0 / T25_K + self.sign() * ratio.ln() / self.params.b;
        if !(inv_t.is_finite() && inv_t > 0.0) {
            return Err(CoreError::invalid(
                "trip temperature would be below absolute zero",
                inv_t,
            ));
        }
        let tt = 1.0 / inv_t - KELVIN_OFFSET;
        trace!(rt, tt, "solved trip temperature");
        self.finish(Unknown::Tt, r1, r25, tt, rt, vout)
    }

    fn finish(
        &self,
        solved_for: Unknown,
        r1: f64,
        r25: f64,
        tt: f64,
        rt: f64,
        vout: f64,
    ) -> CoreResult<SolveResult> {
        let current = ensure_positive(self.params.vcc / (r1 + rt), "loop current must be positive")?;
        let p_r1 = current * current * r1;
        let p_rt = current * current * rt;
        if !tt.is_finite() {
            return Err(CoreError::invalid("trip temperature is not finite", tt));
        }
        Ok(SolveResult {
            solved_for,
            r1,
            r25,
            tt,
            rt,
            vout,
            current,
            p_r1,
            p_rt,
        })
    }
}
