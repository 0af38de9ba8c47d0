use thiserror::Error;

/// Conditions reported by the distribution and evaluation layers.
///
/// None of these are fatal: under the default priors they should not occur, but callers get an
/// explicit error instead of NaN or negative probabilities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("invalid distribution: {reason}")]
    InvalidDistribution { reason: String },
    #[error("distribution has no remaining mass")]
    EmptyDistribution,
    #[error("{attribute} has already been eliminated")]
    AlreadyEliminated { attribute: String },
    #[error("{attribute} is not part of this distribution")]
    UnknownAttribute { attribute: String },
    #[error("hint combination leaves {colors} colors and {shapes} shapes to guess from")]
    DegenerateHypothesis { colors: usize, shapes: usize },
    #[error("illegal hint '{hint}': {reason}")]
    IllegalHint { hint: String, reason: &'static str },
    #[error("no legal hint remains for {chip}")]
    NoLegalHint { chip: String },
}

impl InferenceError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        InferenceError::InvalidDistribution {
            reason: reason.into(),
        }
    }

    /// Returns true for conditions the evaluator skips instead of propagating.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, InferenceError::DegenerateHypothesis { .. })
    }
}
