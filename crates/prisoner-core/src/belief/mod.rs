//! Probability model over the hidden attributes.
//!
//! This module is composed of:
//! - `weighted`: the `WeightedSet` distribution with cyclic elimination.
//! - `pairs`: unordered pair enumeration and scoring.
//! - `repository`: chip generation by sampling and eliminating.

mod pairs;
mod repository;
mod weighted;

pub use pairs::{Pair, PairScorer};
pub use repository::Repository;
pub use weighted::{
    Elimination, PREDECESSOR_SHARE, SUCCESSOR_SHARE, SUM_TOLERANCE, WeightedSet,
};
