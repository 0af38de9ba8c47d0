//! Weighted attribute distribution with cyclic elimination.

use crate::error::InferenceError;
use crate::model::attribute::Attribute;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use tracing::{Level, event};

/// Share of an eliminated member's mass moved to its predecessor in the cycle.
pub const PREDECESSOR_SHARE: f64 = 0.4;
/// Share of an eliminated member's mass moved to its successor in the cycle.
pub const SUCCESSOR_SHARE: f64 = 0.6;
/// Tolerance when checking that priors sum to one.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// A distribution over a fixed cycle of attributes.
///
/// The backing arrays never shrink: an eliminated member stays in place pinned at weight zero,
/// so neighbour arithmetic always runs on the original cycle. A member is active iff its weight
/// is strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSet<A> {
    members: Vec<A>,
    weights: Vec<f64>,
}

/// Record of one elimination: where the removed mass went.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elimination<A> {
    pub removed: A,
    pub mass: f64,
    pub predecessor: Option<A>,
    pub successor: Option<A>,
}

impl<A: Attribute> WeightedSet<A> {
    /// Builds a set from `(attribute, weight)` pairs; iteration order defines the cycle.
    pub fn new<I>(priors: I) -> Result<Self, InferenceError>
    where
        I: IntoIterator<Item = (A, f64)>,
    {
        let mut members = Vec::new();
        let mut weights = Vec::new();

        for (member, weight) in priors {
            if !weight.is_finite() || weight < 0.0 {
                return Err(InferenceError::invalid(format!(
                    "{member} has weight {weight}"
                )));
            }
            if members.contains(&member) {
                return Err(InferenceError::invalid(format!(
                    "{member} is listed more than once"
                )));
            }
            members.push(member);
            weights.push(weight);
        }

        if members.is_empty() {
            return Err(InferenceError::invalid("no members"));
        }

        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > SUM_TOLERANCE {
            return Err(InferenceError::invalid(format!(
                "weights sum to {total:.6}, expected 1.0"
            )));
        }

        Ok(Self { members, weights })
    }

    /// Every member in cycle order, eliminated ones included.
    pub fn universe(&self) -> &[A] {
        &self.members
    }

    /// Current weight of `member`; zero when eliminated or not part of the set.
    pub fn weight(&self, member: A) -> f64 {
        self.position(member)
            .map(|index| self.weights[index])
            .unwrap_or(0.0)
    }

    pub fn contains(&self, member: A) -> bool {
        self.weight(member) > 0.0
    }

    /// Number of active members.
    pub fn len(&self) -> usize {
        self.weights.iter().filter(|weight| **weight > 0.0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Active members and their weights in cycle order.
    pub fn snapshot(&self) -> Vec<(A, f64)> {
        self.entries()
            .filter(|(_, weight)| *weight > 0.0)
            .collect()
    }

    /// All members with their weights, eliminated ones at zero.
    pub fn entries(&self) -> impl Iterator<Item = (A, f64)> + '_ {
        self.members
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
    }

    /// Draws a member with probability proportional to its current weight.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<A, InferenceError> {
        let active = self.snapshot();
        let distribution = WeightedIndex::new(active.iter().map(|(_, weight)| *weight))
            .map_err(|_| InferenceError::EmptyDistribution)?;
        Ok(active[distribution.sample(rng)].0)
    }

    /// Samples a member and eliminates it, conditioning later draws on this one.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<A, InferenceError> {
        let member = self.sample(rng)?;
        self.eliminate(member)?;
        Ok(member)
    }

    /// Removes `member` and moves its mass to its nearest active neighbours.
    ///
    /// The predecessor receives [`PREDECESSOR_SHARE`] and the successor [`SUCCESSOR_SHARE`].
    /// Eliminated slots are skipped, so a share walks on to the next active member in the
    /// same direction. With a single other active member, it receives the full mass. When
    /// `member` was the last active one its mass is dropped and the set becomes empty.
    pub fn eliminate(&mut self, member: A) -> Result<Elimination<A>, InferenceError> {
        let index = self
            .position(member)
            .ok_or_else(|| InferenceError::UnknownAttribute {
                attribute: member.to_string(),
            })?;

        let mass = self.weights[index];
        if mass <= 0.0 {
            return Err(InferenceError::AlreadyEliminated {
                attribute: member.to_string(),
            });
        }

        let predecessor = self.active_neighbor(index, Direction::Backward);
        let successor = self.active_neighbor(index, Direction::Forward);

        self.weights[index] = 0.0;
        if let Some(pred) = predecessor {
            self.weights[pred] += mass * PREDECESSOR_SHARE;
        }
        if let Some(succ) = successor {
            self.weights[succ] += mass * SUCCESSOR_SHARE;
        }

        let elimination = Elimination {
            removed: member,
            mass,
            predecessor: predecessor.map(|i| self.members[i]),
            successor: successor.map(|i| self.members[i]),
        };

        event!(
            target: "prisoner_core::belief",
            Level::DEBUG,
            kind = %A::KIND,
            removed = %member,
            mass,
            predecessor = ?elimination.predecessor,
            successor = ?elimination.successor,
            remaining = self.len(),
        );

        Ok(elimination)
    }

    /// Rescales active weights so they sum to one.
    pub fn normalize(&mut self) -> Result<(), InferenceError> {
        let total = self.total();
        if total <= 0.0 {
            return Err(InferenceError::EmptyDistribution);
        }
        for weight in &mut self.weights {
            *weight /= total;
        }
        Ok(())
    }

    fn position(&self, member: A) -> Option<usize> {
        self.members.iter().position(|m| *m == member)
    }

    fn active_neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        let len = self.members.len();
        (1..len)
            .map(|step| match direction {
                Direction::Forward => (index + step) % len,
                Direction::Backward => (index + len - step) % len,
            })
            .find(|&candidate| self.weights[candidate] > 0.0)
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}
