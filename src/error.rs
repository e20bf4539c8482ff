use thiserror::Error;

/// Result type returned by the solver.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced while solving a divider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Not exactly two of R1, R25 and the trip temperature were supplied.
    #[error("supply any two of R1, R25 and trip temperature ({supplied} given)")]
    RequestIncomplete { supplied: usize },

    /// The parameters lead to a division by zero, a logarithm of a non-positive number or a
    /// non-physical result.
    #[error("invalid configuration: {what} (value = {value})")]
    InvalidConfiguration { what: &'static str, value: f64 },
}

impl CoreError {
    pub(crate) fn invalid(what: &'static str, value: f64) -> Self {
        CoreError::InvalidConfiguration { what, value }
    }
}

pub(crate) fn ensure_positive(v: f64, what: &'static str) -> CoreResult<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::invalid(what, v))
    }
}
