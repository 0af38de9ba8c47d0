//! One-ply guess advisor: name the bag, name the opponent, or abstain.

use super::arbitration::SpreadTable;
use super::bag::RoundEvaluator;
use crate::error::InferenceError;
use crate::model::chip::Chip;
use crate::model::color::Color;
use crate::model::guess::Guess;
use crate::model::hint::Hint;
use crate::model::player::Seat;
use crate::model::priors::{PriorConfig, Variant};
use crate::model::round::Round;
use crate::model::shape::Shape;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{Level, event};

const DEFAULT_ABSTAIN_BELOW: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Abstain when neither target reaches this success probability.
    pub abstain_below: f64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            abstain_below: DEFAULT_ABSTAIN_BELOW,
        }
    }
}

const ABSTAIN_BELOW_ENV: &str = "PRISONER_ABSTAIN_BELOW";

impl AdvisorConfig {
    /// Applies `PRISONER_ABSTAIN_BELOW` on top of the loaded threshold.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Overrides read through `lookup`; unparsable values keep the current threshold.
    pub fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let abstain_below = lookup(ABSTAIN_BELOW_ENV)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .map(|value| value.clamp(0.0, 1.0))
            .unwrap_or(self.abstain_below);
        Self { abstain_below }
    }
}

/// The advised guess and the success probabilities it was chosen from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Advice {
    pub guess: Guess,
    pub bag: Option<(Chip, f64)>,
    pub opponent: Option<(Chip, f64)>,
}

impl Advice {
    pub fn bag_probability(&self) -> f64 {
        self.bag.map(|(_, p)| p).unwrap_or(0.0)
    }

    pub fn opponent_probability(&self) -> f64 {
        self.opponent.map(|(_, p)| p).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct GuessAdvisor {
    evaluator: RoundEvaluator,
    colors: SpreadTable<Color>,
    shapes: Option<SpreadTable<Shape>>,
    config: AdvisorConfig,
}

impl GuessAdvisor {
    pub fn new(
        priors: PriorConfig,
        variant: Variant,
        config: AdvisorConfig,
    ) -> Result<Self, InferenceError> {
        let colors = SpreadTable::new(priors.color_set()?)?;
        let shapes = if variant.has_shapes() {
            Some(SpreadTable::new(priors.shape_set()?)?)
        } else {
            None
        };

        Ok(Self {
            evaluator: RoundEvaluator::new(priors, variant),
            colors,
            shapes,
            config,
        })
    }

    pub fn config(&self) -> AdvisorConfig {
        self.config
    }

    pub fn evaluator(&self) -> &RoundEvaluator {
        &self.evaluator
    }

    /// Advice for `seat` after both players expressed their hints.
    ///
    /// Only the player's own chip, the hint it received from the bag and the two expressed
    /// hints are used. A degenerate bag hypothesis leaves only the opponent target.
    pub fn advise(
        &self,
        round: &Round,
        seat: Seat,
        hint_a: Hint,
        hint_b: Hint,
    ) -> Result<Advice, InferenceError> {
        let hand = round.hand(seat);
        let own = hand.chip();

        let bag = match self.evaluator.bag_odds(own, hint_a, hint_b) {
            Ok(odds) => odds.most_likely(),
            Err(err) if err.is_degenerate() => None,
            Err(err) => return Err(err),
        };
        let opponent = self.opponent(own, hand.hint())?;

        let bag_p = bag.map(|(_, p)| p).unwrap_or(0.0);
        let opp_p = opponent.map(|(_, p)| p).unwrap_or(0.0);

        let guess = if bag_p.max(opp_p) < self.config.abstain_below {
            Guess::abstain()
        } else if bag_p >= opp_p {
            bag.map(|(chip, _)| Guess::bag(chip))
                .unwrap_or_else(Guess::abstain)
        } else {
            opponent
                .map(|(chip, _)| Guess::opponent(chip))
                .unwrap_or_else(Guess::abstain)
        };

        if tracing::enabled!(target: "prisoner_core::advisor", Level::DEBUG) {
            event!(
                target: "prisoner_core::advisor",
                Level::DEBUG,
                seat = %seat,
                own = %own,
                hint_a = %hint_a,
                hint_b = %hint_b,
                bag_p,
                opp_p,
                target_kind = ?guess.target,
                guess = %guess,
                "advisor decision"
            );
        }

        Ok(Advice {
            guess,
            bag,
            opponent,
        })
    }

    /// Most likely opponent chip from the arbitration posteriors of each universe.
    fn opponent(&self, own: &Chip, received: Hint) -> Result<Option<(Chip, f64)>, InferenceError> {
        let color_hint = match received {
            Hint::Color(color) => Some(color),
            Hint::Shape(_) => None,
        };
        let colors = self.colors.evaluate(own.color, color_hint)?;
        let Some((color, color_p)) = colors.most_likely_opponent() else {
            return Ok(None);
        };

        let (Some(table), Some(shape)) = (&self.shapes, own.shape) else {
            return Ok(Some((Chip::colored(color), color_p)));
        };
        let shape_hint = match received {
            Hint::Shape(shape) => Some(shape),
            Hint::Color(_) => None,
        };
        let shapes = table.evaluate(shape, shape_hint)?;
        Ok(shapes
            .most_likely_opponent()
            .map(|(shape, shape_p)| (Chip::new(color, shape), color_p * shape_p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hand::Hand;

    fn round() -> Round {
        Round::new(
            Hand::new(Chip::colored(Color::Red), Hint::Color(Color::Black)),
            Hand::new(Chip::colored(Color::Green), Hint::Color(Color::Red)),
            Chip::colored(Color::Blue),
        )
    }

    fn advisor(abstain_below: f64) -> GuessAdvisor {
        GuessAdvisor::new(
            PriorConfig::default(),
            Variant::ColorOnly,
            AdvisorConfig { abstain_below },
        )
        .expect("advisor")
    }

    #[test]
    fn names_the_bag_when_two_colors_are_ruled_out() {
        let round = round();
        // A hears "not black" and B says "not green"; red is A's own colour.
        let advice = advisor(0.25)
            .advise(&round, Seat::A, Hint::Color(Color::Black), Hint::Color(Color::Green))
            .expect("advice");
        assert_eq!(advice.guess, Guess::bag(Chip::colored(Color::Blue)));
        assert!((advice.bag_probability() - 1.0).abs() < 1e-9);
        assert_eq!(round.judge(Seat::A, &advice.guess).as_str(), "bag_correct");
    }

    #[test]
    fn opponent_posterior_respects_received_hint() {
        let advice = advisor(0.0)
            .advise(&round(), Seat::A, Hint::Color(Color::Red), Hint::Color(Color::Red))
            .expect("advice");
        let (chip, p) = advice.opponent.expect("opponent posterior");
        assert_ne!(chip.color, Color::Black);
        assert_ne!(chip.color, Color::Red);
        assert!(p > 0.0 && p <= 1.0);
    }

    #[test]
    fn abstains_below_threshold() {
        let advice = advisor(1.1)
            .advise(&round(), Seat::B, Hint::Color(Color::Red), Hint::Color(Color::Red))
            .expect("advice");
        assert!(advice.guess.target.is_abstain());
        assert_eq!(advice.guess.chip, None);
    }

    #[test]
    fn shaped_opponent_guess_carries_a_shape() {
        let round = Round::new(
            Hand::new(Chip::new(Color::Red, Shape::Square), Hint::Shape(Shape::Star)),
            Hand::new(Chip::new(Color::Green, Shape::Circle), Hint::Color(Color::Black)),
            Chip::new(Color::Blue, Shape::Triangle),
        );
        let advisor = GuessAdvisor::new(
            PriorConfig::default(),
            Variant::ColorShape,
            AdvisorConfig::default(),
        )
        .expect("advisor");
        let advice = advisor
            .advise(&round, Seat::A, Hint::Shape(Shape::Star), Hint::Color(Color::Black))
            .expect("advice");
        let (chip, _) = advice.opponent.expect("opponent posterior");
        assert!(chip.shape.is_some());
        assert_ne!(chip.shape, Some(Shape::Star));
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config: AdvisorConfig = serde_json::from_str("{}").expect("config");
        assert_eq!(config, AdvisorConfig::default());
    }

    #[test]
    fn env_override_replaces_threshold() {
        let base = AdvisorConfig { abstain_below: 0.4 };
        let lookup = |value: &'static str| {
            move |key: &str| (key == "PRISONER_ABSTAIN_BELOW").then(|| value.to_string())
        };

        assert_eq!(base.with_overrides(lookup("0.1")).abstain_below, 0.1);
        assert_eq!(base.with_overrides(lookup("7")).abstain_below, 1.0);
        assert_eq!(base.with_overrides(lookup("often")).abstain_below, 0.4);
        assert_eq!(base.with_overrides(|_| None), base);
    }
}
