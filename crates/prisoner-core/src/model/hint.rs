//! Negative statements of the form "the chip is NOT <value>".

use crate::model::attribute::AttributeKind;
use crate::model::chip::Chip;
use crate::model::color::Color;
use crate::model::priors::{PriorConfig, Variant};
use crate::model::shape::Shape;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A hint states that the referenced chip does not carry `value`.
///
/// Colour and shape hints share all behaviour; only the prior table consulted differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Hint {
    Color(Color),
    Shape(Shape),
}

impl Hint {
    /// Every hint a player could express, colours first, in prior order.
    pub fn all(priors: &PriorConfig, variant: Variant) -> Vec<Hint> {
        let colors = priors.colors().map(Hint::Color);
        let shapes = priors
            .shapes()
            .filter(|_| variant.has_shapes())
            .map(Hint::Shape);
        colors.chain(shapes).collect()
    }

    pub const fn kind(self) -> AttributeKind {
        match self {
            Hint::Color(_) => AttributeKind::Color,
            Hint::Shape(_) => AttributeKind::Shape,
        }
    }

    /// Prior weight of the hinted value. A likelihood weight, not a posterior.
    pub fn probability(self, priors: &PriorConfig) -> f64 {
        match self {
            Hint::Color(color) => priors.color_weight(color),
            Hint::Shape(shape) => priors.shape_weight(shape),
        }
    }

    /// True when the statement holds for `chip`, i.e. the chip's attribute differs from the value.
    ///
    /// A shape hint always holds for a chip without a shape.
    pub fn applies(self, chip: &Chip) -> bool {
        match self {
            Hint::Color(color) => chip.color != color,
            Hint::Shape(shape) => chip.shape != Some(shape),
        }
    }

    /// True when this hint eliminates `color` as a candidate.
    pub fn excludes_color(self, color: Color) -> bool {
        self == Hint::Color(color)
    }

    pub fn excludes_shape(self, shape: Shape) -> bool {
        self == Hint::Shape(shape)
    }

    /// True when the hint neither names the speaker's own attribute nor repeats `previous`.
    pub fn is_consistent_with_own_knowledge(self, chip: &Chip, previous: Option<&Hint>) -> bool {
        self.applies(chip) && previous.is_none_or(|prior| *prior != self)
    }

    /// True when the hint is a correct statement about the ground truth, whatever the speaker knew.
    pub fn accuracy_against(self, truth: &Chip) -> bool {
        self.applies(truth)
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Color(color) => write!(f, "not {color}"),
            Hint::Shape(shape) => write!(f, "not {shape}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_when_chip_differs() {
        let chip = Chip::new(Color::Red, Shape::Square);
        assert!(Hint::Color(Color::Blue).applies(&chip));
        assert!(!Hint::Color(Color::Red).applies(&chip));
        assert!(!Hint::Shape(Shape::Square).applies(&chip));
        assert!(Hint::Shape(Shape::Square).applies(&Chip::colored(Color::Red)));
    }

    #[test]
    fn consistency_rejects_own_attribute_and_repeats() {
        let chip = Chip::new(Color::Green, Shape::Star);
        let hint = Hint::Color(Color::Black);
        assert!(hint.is_consistent_with_own_knowledge(&chip, None));
        assert!(hint.is_consistent_with_own_knowledge(&chip, Some(&Hint::Color(Color::Red))));
        assert!(!hint.is_consistent_with_own_knowledge(&chip, Some(&hint)));
        assert!(!Hint::Shape(Shape::Star).is_consistent_with_own_knowledge(&chip, None));
    }

    #[test]
    fn accuracy_is_independent_of_speaker_knowledge() {
        let speaker = Chip::new(Color::Blue, Shape::Circle);
        let truth = Chip::new(Color::Red, Shape::Triangle);
        let hint = Hint::Color(Color::Blue);

        assert!(!hint.is_consistent_with_own_knowledge(&speaker, None));
        assert!(hint.accuracy_against(&truth));
        assert!(!Hint::Color(Color::Red).accuracy_against(&truth));
    }

    #[test]
    fn probability_reads_the_matching_universe() {
        let priors = PriorConfig::default();
        assert_eq!(Hint::Color(Color::Black).probability(&priors), 0.1);
        assert_eq!(Hint::Shape(Shape::Circle).probability(&priors), 0.3);
    }

    #[test]
    fn enumerates_expressions_per_variant() {
        let priors = PriorConfig::default();
        assert_eq!(Hint::all(&priors, Variant::ColorShape).len(), 8);
        assert_eq!(Hint::all(&priors, Variant::ColorOnly).len(), 4);
        assert_eq!(
            Hint::all(&priors, Variant::ColorOnly)[3],
            Hint::Color(Color::Black)
        );
    }

    #[test]
    fn serializes_as_tagged_value() {
        let json = serde_json::to_string(&Hint::Shape(Shape::Star)).expect("serialize");
        assert_eq!(json, r#"{"kind":"shape","value":"star"}"#);
        assert_eq!(Hint::Color(Color::Red).to_string(), "not red");
    }
}
