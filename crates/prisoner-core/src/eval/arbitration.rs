//! Reference spreads and the arbiter/opponent posterior.
//!
//! One spread is precomputed per attribute: the prior distribution with that attribute
//! eliminated, and the scored pairs over what remains. Given a player's own attribute and an
//! optional hint, every candidate arbiter attribute is scored by the pairs that contain the
//! player's attribute and not the hinted one, weighted by the arbiter's prior. The pair's other
//! member accumulates the same weight as a candidate for the opponent.

use super::bag::normalize;
use crate::belief::{Pair, PairScorer, WeightedSet};
use crate::error::InferenceError;
use crate::model::attribute::Attribute;
use serde::Serialize;

/// The prior with one attribute eliminated, and its scored pairs.
#[derive(Debug, Clone)]
pub struct Spread<A> {
    pub eliminated: A,
    pub remaining: WeightedSet<A>,
    pub pairs: Vec<Pair<A>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Arbiter,
    Opponent,
}

/// Largest entry across both output distributions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaxEntry {
    pub side: Side,
    /// Position within its own distribution.
    pub index: usize,
    /// Position when the arbiter entries are followed by the opponent entries.
    pub combined_index: usize,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrationPosterior<A> {
    pub mine: A,
    pub hint: Option<A>,
    pub arbiter: Vec<(A, f64)>,
    pub opponent: Vec<(A, f64)>,
    pub max: Option<MaxEntry>,
}

impl<A: Attribute> ArbitrationPosterior<A> {
    pub fn arbiter_probability(&self, value: A) -> f64 {
        lookup(&self.arbiter, value)
    }

    pub fn opponent_probability(&self, value: A) -> f64 {
        lookup(&self.opponent, value)
    }

    /// Most likely opponent attribute; ties go to the earlier member in cycle order.
    pub fn most_likely_opponent(&self) -> Option<(A, f64)> {
        super::bag::argmax(&self.opponent)
    }
}

#[derive(Debug, Clone)]
pub struct SpreadTable<A> {
    priors: WeightedSet<A>,
    spreads: Vec<Spread<A>>,
}

impl<A: Attribute> SpreadTable<A> {
    /// Precomputes one spread per active member of `priors`.
    pub fn new(priors: WeightedSet<A>) -> Result<Self, InferenceError> {
        let scorer = PairScorer::new();
        let spreads = priors
            .snapshot()
            .into_iter()
            .map(|(member, _)| {
                let mut remaining = priors.clone();
                remaining.eliminate(member)?;
                let pairs = scorer.combinations(&remaining);
                Ok(Spread {
                    eliminated: member,
                    remaining,
                    pairs,
                })
            })
            .collect::<Result<Vec<_>, InferenceError>>()?;

        Ok(Self { priors, spreads })
    }

    pub fn priors(&self) -> &WeightedSet<A> {
        &self.priors
    }

    pub fn spread(&self, eliminated: A) -> Option<&Spread<A>> {
        self.spreads
            .iter()
            .find(|spread| spread.eliminated == eliminated)
    }

    /// Posterior over the arbiter's and the opponent's attribute for a player holding `mine`.
    ///
    /// `hint` names an attribute the arbiter is known not to hold. When no pair survives the
    /// filters both distributions are empty and `max` is `None`.
    pub fn evaluate(
        &self,
        mine: A,
        hint: Option<A>,
    ) -> Result<ArbitrationPosterior<A>, InferenceError> {
        if !self.priors.universe().contains(&mine) {
            return Err(InferenceError::UnknownAttribute {
                attribute: mine.to_string(),
            });
        }
        if hint == Some(mine) {
            return Err(InferenceError::IllegalHint {
                hint: mine.to_string(),
                reason: "hint names the player's own attribute",
            });
        }

        let universe = self.priors.universe();
        let mut arbiter: Vec<(A, f64)> = universe.iter().map(|&a| (a, 0.0)).collect();
        let mut opponent = arbiter.clone();

        for (slot, &candidate) in universe.iter().enumerate() {
            if candidate == mine || hint == Some(candidate) {
                continue;
            }
            let Some(spread) = self.spread(candidate) else {
                continue;
            };
            let prior = self.priors.weight(candidate);

            let relevant = spread
                .pairs
                .iter()
                .filter(|pair| pair.contains(mine) && hint.is_none_or(|h| !pair.contains(h)));
            for pair in relevant {
                let weighted = pair.score * prior;
                arbiter[slot].1 += weighted;
                let Some(other) = pair.other(mine) else {
                    continue;
                };
                if let Some(entry) = opponent.iter_mut().find(|(a, _)| *a == other) {
                    entry.1 += weighted;
                }
            }
        }

        // Every pair may be filtered out in small universes; both sides are then empty.
        let arbiter = normalize(arbiter).unwrap_or_default();
        let opponent = normalize(opponent).unwrap_or_default();
        let max = track_max(&arbiter, &opponent);

        Ok(ArbitrationPosterior {
            mine,
            hint,
            arbiter,
            opponent,
            max,
        })
    }

    /// Every `(hint, mine)` row: no hint first, then each hint in cycle order.
    ///
    /// Rows whose hint names the player's own attribute are left out.
    pub fn rows(&self) -> Result<Vec<ArbitrationPosterior<A>>, InferenceError> {
        let universe = self.priors.universe();
        let hints = std::iter::once(None).chain(universe.iter().copied().map(Some));

        let mut rows = Vec::new();
        for hint in hints {
            for &mine in universe {
                if hint == Some(mine) {
                    continue;
                }
                rows.push(self.evaluate(mine, hint)?);
            }
        }
        Ok(rows)
    }
}

fn lookup<A: Attribute>(entries: &[(A, f64)], value: A) -> f64 {
    entries
        .iter()
        .find(|(a, _)| *a == value)
        .map(|(_, p)| *p)
        .unwrap_or(0.0)
}

fn track_max<A>(arbiter: &[(A, f64)], opponent: &[(A, f64)]) -> Option<MaxEntry> {
    let sides = arbiter
        .iter()
        .enumerate()
        .map(|(index, (_, p))| (Side::Arbiter, index, *p))
        .chain(
            opponent
                .iter()
                .enumerate()
                .map(|(index, (_, p))| (Side::Opponent, index, *p)),
        );

    let mut best: Option<MaxEntry> = None;
    for (combined_index, (side, index, probability)) in sides.enumerate() {
        let current = best.map(|entry| entry.probability).unwrap_or(0.0);
        if probability > current {
            best = Some(MaxEntry {
                side,
                index,
                combined_index,
                probability,
            });
        }
    }
    best
}
