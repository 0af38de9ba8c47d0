//! Pure evaluation of generated rounds.
//!
//! - `bag`: odds of naming the bag under every exchanged-hint combination.
//! - `arbitration`: the arbiter/opponent reference table built from per-attribute spreads.
//! - `advisor`: picks a guess from the two posteriors.

mod advisor;
mod arbitration;
mod bag;

pub use advisor::{Advice, AdvisorConfig, GuessAdvisor};
pub use arbitration::{ArbitrationPosterior, MaxEntry, Side, Spread, SpreadTable};
pub use bag::{BagOdds, HintOutcome, PosteriorTable, RoundEvaluator, SkippedHypothesis};
