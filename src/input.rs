//! Turns raw text fields into solver inputs.
//!
//! Every number accepts plain floating point (`10000`, `1e4`) and the resistor shorthand the
//! crate prints (`470R`, `4K7`, `10k`, `2M2`). With the `expr_input` feature a field may also be
//! an arithmetic expression such as `4.7*1000` or `25+35`.

use thiserror::Error;
use tracing::debug;

use crate::{CircuitParameters, KnownInputs, ThermistorType};

/// A raw field could not be read. Raised before any solve is attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("{field}: `{text}` is not a number")]
    NotANumber { field: &'static str, text: String },

    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("unknown thermistor type `{0}`, expected NTC or PTC")]
    ThermistorType(String),
}

/// The unparsed text of every calculator field. Blank R1, R25 or Tt mean "unknown".
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub thermistor_type: String,
    pub b: String,
    pub vcc: String,
    pub x: String,
    pub y: String,
    pub r1: String,
    pub r25: String,
    pub tt: String,
}

impl RawInputs {
    /// The stock calculator settings with no circuit values filled in.
    pub fn stock() -> Self {
        RawInputs {
            thermistor_type: "NTC".into(),
            b: "3950".into(),
            vcc: "5".into(),
            x: "0.45".into(),
            y: "0.8".into(),
            ..RawInputs::default()
        }
    }

    pub fn parse(&self) -> Result<(CircuitParameters, KnownInputs), ParseError> {
        let params = CircuitParameters {
            thermistor_type: self.thermistor_type.parse::<ThermistorType>()?,
            b: required("B", &self.b)?,
            vcc: required("Vcc", &self.vcc)?,
            x: required("X", &self.x)?,
            y: required("Y", &self.y)?,
        };
        let inputs = KnownInputs {
            r1: optional("R1", &self.r1)?,
            r25: optional("R25", &self.r25)?,
            tt: optional("trip temperature", &self.tt)?,
        };
        debug!(?params, ?inputs, "parsed inputs");
        Ok((params, inputs))
    }
}

fn required(field: &'static str, text: &str) -> Result<f64, ParseError> {
    optional(field, text)?.ok_or(ParseError::Missing { field })
}

fn optional(field: &'static str, text: &str) -> Result<Option<f64>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    parse_number(text)
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| ParseError::NotANumber {
            field,
            text: text.to_string(),
        })
}

/// Parses a single numeric field.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    text.parse::<f64>()
        .ok()
        .or_else(|| parse_shorthand(text))
        .or_else(|| eval_expr(text))
}

fn multiplier(c: char) -> Option<f64> {
    match c {
        'R' | 'r' => Some(1.0),
        'K' | 'k' => Some(1e3),
        'M' => Some(1e6),
        _ => None,
    }
}

fn parse_shorthand(text: &str) -> Option<f64> {
    let (pos, mult) = text
        .char_indices()
        .find_map(|(i, c)| multiplier(c).map(|m| (i, m)))?;
    let (whole, frac) = (&text[..pos], &text[pos + 1..]);
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let num = if frac.is_empty() {
        whole.parse::<f64>().ok()?
    } else {
        if !whole.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        format!("{}.{}", if whole.is_empty() { "0" } else { whole }, frac)
            .parse::<f64>()
            .ok()?
    };
    Some(num * mult)
}

#[cfg(feature = "expr_input")]
fn eval_expr(text: &str) -> Option<f64> {
    meval::eval_str(text).ok()
}

#[cfg(not(feature = "expr_input"))]
fn eval_expr(_text: &str) -> Option<f64> {
    None
}
