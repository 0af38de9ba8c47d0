use crate::model::color::Color;
use crate::model::hint::Hint;
use crate::model::priors::PriorConfig;
use crate::model::shape::Shape;
use core::fmt;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chip {
    pub color: Color,
    pub shape: Option<Shape>,
}

impl Chip {
    pub const fn new(color: Color, shape: Shape) -> Self {
        Self {
            color,
            shape: Some(shape),
        }
    }

    /// Chip for the colour-only game.
    pub const fn colored(color: Color) -> Self {
        Self { color, shape: None }
    }

    /// Every hint this chip may legally give about itself to a holder of `known`.
    ///
    /// A legal hint names neither this chip's attribute, nor the attribute the listener already
    /// holds, nor anything in `given`. Shape hints are only offered when this chip has a shape.
    pub fn legal_hints(&self, known: &Chip, given: &[Hint], priors: &PriorConfig) -> Vec<Hint> {
        let colors = priors
            .colors()
            .filter(|&color| color != self.color && color != known.color)
            .map(Hint::Color);
        let shapes = priors
            .shapes()
            .filter(|_| self.shape.is_some())
            .filter(|&shape| Some(shape) != self.shape && Some(shape) != known.shape)
            .map(Hint::Shape);

        colors
            .chain(shapes)
            .filter(|hint| !given.contains(hint))
            .collect()
    }

    /// Samples one legal hint uniformly, or `None` when every candidate is exhausted.
    pub fn hint<R: Rng + ?Sized>(
        &self,
        known: &Chip,
        given: &[Hint],
        priors: &PriorConfig,
        rng: &mut R,
    ) -> Option<Hint> {
        self.legal_hints(known, given, priors).choose(rng).copied()
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            Some(shape) => write!(f, "{} {}", self.color, shape),
            None => write!(f, "{}", self.color),
        }
    }
}
