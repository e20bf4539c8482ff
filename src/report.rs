use std::fmt;

use crate::series::format_resistance;
use crate::{SolveResult, Unknown};

/// A derived resistor rounded to a standard series, with the circuit re-solved around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardFit {
    pub series: &'static str,
    /// Which resistor was rounded.
    pub part: Unknown,
    /// The standard value chosen.
    pub value: f64,
    /// The circuit solved for its trip temperature with the standard part fitted.
    pub result: SolveResult,
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Unknown::R1 => write!(f, "R1"),
            Unknown::R25 => write!(f, "R25"),
            Unknown::Tt => write!(f, "trip temperature"),
        }
    }
}

impl fmt::Display for SolveResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.solved_for == Unknown::Tt {
            writeln!(f, "Trip temperature ≈ {:.2} °C", self.tt)?;
        }
        writeln!(f, "R1 ≈ {:.2} Ω", self.r1)?;
        writeln!(f, "P_R1 ≈ {:.4} W", self.p_r1)?;
        writeln!(f, "Rt ≈ {:.2} Ω", self.rt)?;
        writeln!(f, "R25 ≈ {:.2} Ω", self.r25)?;
        writeln!(f, "P_Rt ≈ {:.4} W", self.p_rt)?;
        writeln!(f, "Vout ≈ {:.3} V", self.vout)?;
        write!(f, "I ≈ {:.6} A", self.current)
    }
}

impl fmt::Display for StandardFit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Nearest {} {}: {} (trip ≈ {:.2} °C)",
            self.series,
            self.part,
            format_resistance(self.value),
            self.result.tt
        )
    }
}
