//! Prior weights per universe and the game variant selector.

use super::attribute::Attribute;
use super::color::Color;
use super::shape::Shape;
use crate::belief::WeightedSet;
use crate::error::InferenceError;
use serde::{Deserialize, Serialize};

/// Default weights in cyclic order; the last member of each universe is the rare one.
pub const DEFAULT_WEIGHTS: [f64; 4] = [0.3, 0.3, 0.3, 0.1];

/// One attribute and its prior weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorEntry<A> {
    pub value: A,
    pub weight: f64,
}

impl<A> PriorEntry<A> {
    pub const fn new(value: A, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// Prior weights for both universes. Entry order defines the redistribution cycle.
///
/// A universe may list fewer than four members (for example a three-colour game); omitted
/// members simply never appear in generated chips or hint enumerations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorConfig {
    #[serde(default = "default_entries::<Color>")]
    pub colors: Vec<PriorEntry<Color>>,
    #[serde(default = "default_entries::<Shape>")]
    pub shapes: Vec<PriorEntry<Shape>>,
}

impl Default for PriorConfig {
    fn default() -> Self {
        Self {
            colors: default_entries::<Color>(),
            shapes: default_entries::<Shape>(),
        }
    }
}

impl PriorConfig {
    pub fn color_set(&self) -> Result<WeightedSet<Color>, InferenceError> {
        WeightedSet::new(self.colors.iter().map(|entry| (entry.value, entry.weight)))
    }

    pub fn shape_set(&self) -> Result<WeightedSet<Shape>, InferenceError> {
        WeightedSet::new(self.shapes.iter().map(|entry| (entry.value, entry.weight)))
    }

    /// Prior weight of `color`, or zero when the colour is not part of the universe.
    pub fn color_weight(&self, color: Color) -> f64 {
        weight_of(&self.colors, color)
    }

    pub fn shape_weight(&self, shape: Shape) -> f64 {
        weight_of(&self.shapes, shape)
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().map(|entry| entry.value)
    }

    pub fn shapes(&self) -> impl Iterator<Item = Shape> + '_ {
        self.shapes.iter().map(|entry| entry.value)
    }

    /// Checks both universes form valid distributions.
    pub fn validate(&self) -> Result<(), InferenceError> {
        self.color_set()?;
        self.shape_set()?;
        Ok(())
    }
}

fn default_entries<A: Attribute>() -> Vec<PriorEntry<A>> {
    A::ALL
        .into_iter()
        .zip(DEFAULT_WEIGHTS)
        .map(|(value, weight)| PriorEntry::new(value, weight))
        .collect()
}

fn weight_of<A: Attribute>(entries: &[PriorEntry<A>], value: A) -> f64 {
    entries
        .iter()
        .find(|entry| entry.value == value)
        .map(|entry| entry.weight)
        .unwrap_or(0.0)
}

/// Whether chips carry a shape in addition to their colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    ColorOnly,
    #[default]
    ColorShape,
}

impl Variant {
    pub const fn has_shapes(self) -> bool {
        matches!(self, Variant::ColorShape)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Variant::ColorOnly => "color_only",
            Variant::ColorShape => "color_shape",
        }
    }
}
