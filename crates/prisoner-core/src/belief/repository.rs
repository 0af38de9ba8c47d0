//! Chip generation by sampling and eliminating from the prior distributions.

use super::pairs::PairScorer;
use super::weighted::WeightedSet;
use crate::error::InferenceError;
use crate::model::chip::Chip;
use crate::model::color::Color;
use crate::model::priors::{PriorConfig, Variant};
use crate::model::shape::Shape;
use rand::Rng;

/// Owns the distributions for one generation sequence.
///
/// Every draw eliminates what it produced, so later draws are conditioned on earlier ones.
#[derive(Debug, Clone)]
pub struct Repository {
    colors: WeightedSet<Color>,
    shapes: Option<WeightedSet<Shape>>,
    scorer: PairScorer,
}

impl Repository {
    pub fn new(priors: &PriorConfig, variant: Variant) -> Result<Self, InferenceError> {
        let colors = priors.color_set()?;
        let shapes = if variant.has_shapes() {
            Some(priors.shape_set()?)
        } else {
            None
        };
        Ok(Self {
            colors,
            shapes,
            scorer: PairScorer::new(),
        })
    }

    pub fn colors(&self) -> &WeightedSet<Color> {
        &self.colors
    }

    pub fn shapes(&self) -> Option<&WeightedSet<Shape>> {
        self.shapes.as_ref()
    }

    /// Draws a single chip.
    pub fn chip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Chip, InferenceError> {
        let color = self.colors.draw(rng)?;
        let shape = self
            .shapes
            .as_mut()
            .map(|shapes| shapes.draw(rng))
            .transpose()?;
        Ok(Chip { color, shape })
    }

    /// Draws two chips jointly.
    ///
    /// One scored pair is chosen per universe, its members are dealt to the two chips by a fair
    /// coin, and both members are eliminated afterwards.
    pub fn pair<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(Chip, Chip), InferenceError> {
        let color_pairs = self.scorer.combinations(&self.colors);
        let color_pair = *PairScorer::choose(&color_pairs, rng)?;
        let (color_a, color_b) = deal(color_pair.first, color_pair.second, rng);

        let (shape_a, shape_b) = match self.shapes.as_ref() {
            Some(shapes) => {
                let shape_pairs = self.scorer.combinations(shapes);
                let shape_pair = *PairScorer::choose(&shape_pairs, rng)?;
                let (a, b) = deal(shape_pair.first, shape_pair.second, rng);
                (Some(a), Some(b))
            }
            None => (None, None),
        };

        self.colors.eliminate(color_a)?;
        self.colors.eliminate(color_b)?;
        if let (Some(shapes), Some(a), Some(b)) = (self.shapes.as_mut(), shape_a, shape_b) {
            shapes.eliminate(a)?;
            shapes.eliminate(b)?;
        }

        Ok((
            Chip {
                color: color_a,
                shape: shape_a,
            },
            Chip {
                color: color_b,
                shape: shape_b,
            },
        ))
    }
}

fn deal<T, R: Rng + ?Sized>(first: T, second: T, rng: &mut R) -> (T, T) {
    if rng.gen_bool(0.5) {
        (first, second)
    } else {
        (second, first)
    }
}
