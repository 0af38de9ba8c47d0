//! Unordered pair enumeration and scoring over weighted sets.

use super::weighted::WeightedSet;
use crate::error::InferenceError;
use crate::model::attribute::Attribute;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::Serialize;

/// Two distinct attributes and a joint-likelihood score.
///
/// For a same-universe pair the members are stored in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pair<A, B = A> {
    pub first: A,
    pub second: B,
    pub score: f64,
}

impl<A: Attribute> Pair<A, A> {
    pub fn contains(&self, member: A) -> bool {
        self.first == member || self.second == member
    }

    /// The member paired with `member`, if `member` is part of this pair.
    pub fn other(&self, member: A) -> Option<A> {
        if self.first == member {
            Some(self.second)
        } else if self.second == member {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Scores each pair as the arithmetic mean of its members' current weights.
///
/// Scores are proxies for joint likelihood and deliberately not normalised: over `n` active
/// members summing to one they total `(n - 1) / 2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairScorer {
    include_eliminated: bool,
}

impl PairScorer {
    pub const fn new() -> Self {
        Self {
            include_eliminated: false,
        }
    }

    /// Scorer that also pairs members already pinned at weight zero.
    pub const fn including_eliminated() -> Self {
        Self {
            include_eliminated: true,
        }
    }

    /// All `C(n, 2)` unordered pairs over the set's members, in cycle order.
    pub fn combinations<A: Attribute>(&self, set: &WeightedSet<A>) -> Vec<Pair<A>> {
        let entries: Vec<(A, f64)> = if self.include_eliminated {
            set.entries().collect()
        } else {
            set.snapshot()
        };

        let mut pairs = Vec::with_capacity(entries.len() * entries.len().saturating_sub(1) / 2);
        for (i, &(first, first_weight)) in entries.iter().enumerate() {
            for &(second, second_weight) in &entries[i + 1..] {
                pairs.push(Pair {
                    first,
                    second,
                    score: mean(first_weight, second_weight),
                });
            }
        }
        pairs
    }

    /// Every combination of one member from each set.
    pub fn cross<A: Attribute, B: Attribute>(
        &self,
        left: &WeightedSet<A>,
        right: &WeightedSet<B>,
    ) -> Vec<Pair<A, B>> {
        let (left, right): (Vec<(A, f64)>, Vec<(B, f64)>) = if self.include_eliminated {
            (left.entries().collect(), right.entries().collect())
        } else {
            (left.snapshot(), right.snapshot())
        };

        left.iter()
            .flat_map(|&(first, first_weight)| {
                right.iter().map(move |&(second, second_weight)| Pair {
                    first,
                    second,
                    score: mean(first_weight, second_weight),
                })
            })
            .collect()
    }

    /// Picks one pair with probability proportional to its score.
    pub fn choose<'a, A, B, R>(
        pairs: &'a [Pair<A, B>],
        rng: &mut R,
    ) -> Result<&'a Pair<A, B>, InferenceError>
    where
        R: Rng + ?Sized,
    {
        let distribution = WeightedIndex::new(pairs.iter().map(|pair| pair.score))
            .map_err(|_| InferenceError::EmptyDistribution)?;
        Ok(&pairs[distribution.sample(rng)])
    }
}

fn mean(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}
