//! Process-of-elimination odds for naming the bag under every exchanged-hint combination.

use crate::error::InferenceError;
use crate::model::attribute::Attribute;
use crate::model::chip::Chip;
use crate::model::color::Color;
use crate::model::hint::Hint;
use crate::model::player::Seat;
use crate::model::priors::{PriorConfig, Variant};
use crate::model::round::Round;
use crate::model::shape::Shape;
use serde::Serialize;

/// What a player can still believe about the bag after two expressed hints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BagOdds {
    /// Remaining colours, prior-weighted and normalised.
    pub colors: Vec<(Color, f64)>,
    /// Remaining shapes, prior-weighted and normalised; empty in the colour-only game.
    pub shapes: Vec<(Shape, f64)>,
    /// Chance of naming the bag by guessing uniformly among the remaining combinations.
    ///
    /// Colour and shape remainders are treated as independent.
    pub probability: f64,
}

impl BagOdds {
    /// Most likely bag chip under the prior weights, with its probability.
    pub fn most_likely(&self) -> Option<(Chip, f64)> {
        let (color, color_p) = argmax(&self.colors)?;
        if self.shapes.is_empty() {
            return Some((Chip::colored(color), color_p));
        }
        let (shape, shape_p) = argmax(&self.shapes)?;
        Some((Chip::new(color, shape), color_p * shape_p))
    }
}

/// The evaluation of one `(hint_a, hint_b)` combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HintOutcome {
    pub hint_a: Hint,
    pub hint_b: Hint,
    /// Per seat: whether the speaker could know the statement to be true.
    pub truthful: [bool; 2],
    /// Per seat: whether the statement holds for the actual bag.
    pub accurate: [bool; 2],
    /// Per seat: odds of naming the bag if the player trusts both statements.
    pub odds: [BagOdds; 2],
}

/// A combination left out of the table, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedHypothesis {
    pub hint_a: Hint,
    pub hint_b: Hint,
    pub reason: String,
}

/// Every evaluated combination in enumeration order, plus those skipped as degenerate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosteriorTable {
    pub outcomes: Vec<HintOutcome>,
    pub skipped: Vec<SkippedHypothesis>,
}

impl PosteriorTable {
    pub fn outcome(&self, hint_a: Hint, hint_b: Hint) -> Option<&HintOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.hint_a == hint_a && outcome.hint_b == hint_b)
    }

    /// Mean bag odds for `seat` across evaluated combinations.
    pub fn mean_probability(&self, seat: Seat) -> Option<f64> {
        if self.outcomes.is_empty() {
            return None;
        }
        let total: f64 = self
            .outcomes
            .iter()
            .map(|outcome| outcome.odds[seat.index()].probability)
            .sum();
        Some(total / self.outcomes.len() as f64)
    }
}

/// Pure evaluation of rounds against hypothetical hint pairs.
#[derive(Debug, Clone)]
pub struct RoundEvaluator {
    priors: PriorConfig,
    variant: Variant,
}

impl RoundEvaluator {
    pub fn new(priors: PriorConfig, variant: Variant) -> Self {
        Self { priors, variant }
    }

    pub fn priors(&self) -> &PriorConfig {
        &self.priors
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The hypothesis space: every hint either player could express.
    pub fn expressions(&self) -> Vec<Hint> {
        Hint::all(&self.priors, self.variant)
    }

    /// Odds for a player holding `own` after hearing `hint_a` and `hint_b`.
    pub fn bag_odds(
        &self,
        own: &Chip,
        hint_a: Hint,
        hint_b: Hint,
    ) -> Result<BagOdds, InferenceError> {
        let ruled_out = [hint_a, hint_b];

        let colors: Vec<(Color, f64)> = self
            .priors
            .colors
            .iter()
            .filter(|entry| entry.value != own.color)
            .filter(|entry| !ruled_out.iter().any(|hint| hint.excludes_color(entry.value)))
            .map(|entry| (entry.value, entry.weight))
            .collect();

        let shapes: Vec<(Shape, f64)> = if self.variant.has_shapes() {
            self.priors
                .shapes
                .iter()
                .filter(|entry| Some(entry.value) != own.shape)
                .filter(|entry| !ruled_out.iter().any(|hint| hint.excludes_shape(entry.value)))
                .map(|entry| (entry.value, entry.weight))
                .collect()
        } else {
            Vec::new()
        };

        let shape_factor = if self.variant.has_shapes() {
            shapes.len()
        } else {
            1
        };
        if colors.is_empty() || shape_factor == 0 {
            return Err(InferenceError::DegenerateHypothesis {
                colors: colors.len(),
                shapes: shapes.len(),
            });
        }

        let probability = 1.0 / (colors.len() * shape_factor) as f64;
        let colors = normalize(colors)?;
        let shapes = if shapes.is_empty() {
            shapes
        } else {
            normalize(shapes)?
        };

        Ok(BagOdds {
            colors,
            shapes,
            probability,
        })
    }

    /// Evaluates one combination for both seats.
    pub fn outcome(
        &self,
        round: &Round,
        hint_a: Hint,
        hint_b: Hint,
    ) -> Result<HintOutcome, InferenceError> {
        let expressed = [hint_a, hint_b];
        let truthful = [
            round.hand(Seat::A).backs(hint_a),
            round.hand(Seat::B).backs(hint_b),
        ];
        let accurate = expressed.map(|hint| hint.accuracy_against(round.bag()));
        let odds = [
            self.bag_odds(round.hand(Seat::A).chip(), hint_a, hint_b)?,
            self.bag_odds(round.hand(Seat::B).chip(), hint_a, hint_b)?,
        ];

        Ok(HintOutcome {
            hint_a,
            hint_b,
            truthful,
            accurate,
            odds,
        })
    }

    /// Evaluates every ordered pair of expressions, skipping degenerate combinations.
    ///
    /// A combination is skipped as a whole when either seat's odds are degenerate, so every
    /// kept outcome carries odds for both seats.
    pub fn evaluate(&self, round: &Round) -> Result<PosteriorTable, InferenceError> {
        let expressions = self.expressions();
        let mut outcomes = Vec::with_capacity(expressions.len() * expressions.len());
        let mut skipped = Vec::new();

        for &hint_a in &expressions {
            for &hint_b in &expressions {
                match self.outcome(round, hint_a, hint_b) {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(err) if err.is_degenerate() => {
                        tracing::warn!(
                            target: "prisoner_core::eval",
                            hint_a = %hint_a,
                            hint_b = %hint_b,
                            reason = %err,
                            "skipping degenerate hint combination"
                        );
                        skipped.push(SkippedHypothesis {
                            hint_a,
                            hint_b,
                            reason: err.to_string(),
                        });
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        Ok(PosteriorTable { outcomes, skipped })
    }
}

pub(crate) fn normalize<A: Attribute>(
    entries: Vec<(A, f64)>,
) -> Result<Vec<(A, f64)>, InferenceError> {
    let total: f64 = entries.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return Err(InferenceError::EmptyDistribution);
    }
    Ok(entries
        .into_iter()
        .map(|(value, weight)| (value, weight / total))
        .collect())
}

pub(crate) fn argmax<A: Copy>(entries: &[(A, f64)]) -> Option<(A, f64)> {
    entries
        .iter()
        .copied()
        .fold(None, |best: Option<(A, f64)>, (value, p)| match best {
            Some((_, best_p)) if best_p >= p => best,
            _ => Some((value, p)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hand::Hand;
    use crate::model::priors::PriorEntry;

    const EPS: f64 = 1e-9;

    fn round() -> Round {
        Round::new(
            Hand::new(
                Chip::new(Color::Red, Shape::Square),
                Hint::Color(Color::Black),
            ),
            Hand::new(
                Chip::new(Color::Green, Shape::Circle),
                Hint::Shape(Shape::Star),
            ),
            Chip::new(Color::Blue, Shape::Triangle),
        )
    }

    #[test]
    fn distinct_hints_of_each_kind_leave_two_by_two() {
        let evaluator = RoundEvaluator::new(PriorConfig::default(), Variant::ColorShape);
        let own = Chip::new(Color::Red, Shape::Square);
        let odds = evaluator
            .bag_odds(&own, Hint::Color(Color::Green), Hint::Shape(Shape::Star))
            .expect("odds");

        assert_eq!(odds.colors.len(), 2);
        assert_eq!(odds.shapes.len(), 2);
        assert!((odds.probability - 0.25).abs() < EPS);
        // blue 0.3 vs black 0.1
        assert!((odds.colors[0].1 - 0.75).abs() < EPS);
        assert_eq!(odds.most_likely().map(|(chip, _)| chip.color), Some(Color::Blue));
    }

    #[test]
    fn repeated_or_self_referential_hints_eliminate_less() {
        let evaluator = RoundEvaluator::new(PriorConfig::default(), Variant::ColorShape);
        let own = Chip::new(Color::Red, Shape::Square);

        let repeated = evaluator
            .bag_odds(&own, Hint::Color(Color::Green), Hint::Color(Color::Green))
            .expect("odds");
        assert!((repeated.probability - 1.0 / 6.0).abs() < EPS);

        let own_color = evaluator
            .bag_odds(&own, Hint::Color(Color::Red), Hint::Shape(Shape::Square))
            .expect("odds");
        assert!((own_color.probability - 1.0 / 9.0).abs() < EPS);
    }

    #[test]
    fn color_only_odds_ignore_shapes() {
        let evaluator = RoundEvaluator::new(PriorConfig::default(), Variant::ColorOnly);
        let own = Chip::colored(Color::Blue);
        let odds = evaluator
            .bag_odds(&own, Hint::Color(Color::Red), Hint::Color(Color::Black))
            .expect("odds");
        assert!(odds.shapes.is_empty());
        assert!((odds.probability - 1.0).abs() < EPS);
        assert_eq!(odds.most_likely(), Some((Chip::colored(Color::Green), 1.0)));
    }

    #[test]
    fn three_color_game_can_be_degenerate() {
        let priors = PriorConfig {
            colors: vec![
                PriorEntry::new(Color::Red, 0.4),
                PriorEntry::new(Color::Green, 0.3),
                PriorEntry::new(Color::Blue, 0.3),
            ],
            ..PriorConfig::default()
        };
        let evaluator = RoundEvaluator::new(priors, Variant::ColorOnly);
        let own = Chip::colored(Color::Red);
        let err = evaluator
            .bag_odds(&own, Hint::Color(Color::Green), Hint::Color(Color::Blue))
            .expect_err("nothing left");
        assert_eq!(
            err,
            InferenceError::DegenerateHypothesis {
                colors: 0,
                shapes: 0
            }
        );
    }

    #[test]
    fn full_table_covers_every_combination() {
        let evaluator = RoundEvaluator::new(PriorConfig::default(), Variant::ColorShape);
        let table = evaluator.evaluate(&round()).expect("table");
        assert_eq!(table.outcomes.len(), 64);
        assert!(table.skipped.is_empty());

        for outcome in &table.outcomes {
            for odds in &outcome.odds {
                assert!(odds.probability > 0.0 && odds.probability <= 1.0);
                let color_sum: f64 = odds.colors.iter().map(|(_, p)| p).sum();
                let shape_sum: f64 = odds.shapes.iter().map(|(_, p)| p).sum();
                assert!((color_sum - 1.0).abs() < EPS);
                assert!((shape_sum - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn outcome_flags_truth_and_accuracy_separately() {
        let evaluator = RoundEvaluator::new(PriorConfig::default(), Variant::ColorShape);
        let round = round();

        // A repeats the received hint; B names a colour it cannot know about.
        let outcome = evaluator
            .outcome(&round, Hint::Color(Color::Black), Hint::Color(Color::Blue))
            .expect("outcome");
        assert_eq!(outcome.truthful, [true, false]);
        assert_eq!(outcome.accurate, [true, false]);

        // B lies but happens to be accurate.
        let outcome = evaluator
            .outcome(&round, Hint::Color(Color::Red), Hint::Shape(Shape::Square))
            .expect("outcome");
        assert_eq!(outcome.truthful, [true, false]);
        assert_eq!(outcome.accurate, [true, true]);
    }

    #[test]
    fn degenerate_combinations_are_skipped_not_fatal() {
        let priors = PriorConfig {
            colors: vec![
                PriorEntry::new(Color::Red, 0.4),
                PriorEntry::new(Color::Green, 0.3),
                PriorEntry::new(Color::Blue, 0.3),
            ],
            ..PriorConfig::default()
        };
        let evaluator = RoundEvaluator::new(priors, Variant::ColorOnly);
        let round = Round::new(
            Hand::new(Chip::colored(Color::Red), Hint::Color(Color::Green)),
            Hand::new(Chip::colored(Color::Green), Hint::Color(Color::Red)),
            Chip::colored(Color::Blue),
        );

        let table = evaluator.evaluate(&round).expect("table");
        assert_eq!(table.outcomes.len() + table.skipped.len(), 9);
        assert!(!table.skipped.is_empty());
        assert!(table.outcome(Hint::Color(Color::Green), Hint::Color(Color::Red)).is_some());
        assert!(
            table
                .skipped
                .iter()
                .any(|s| s.hint_a == Hint::Color(Color::Blue) && s.hint_b == Hint::Color(Color::Green))
        );
        assert!(table.mean_probability(Seat::A).is_some());
    }

    #[test]
    fn one_degenerate_seat_skips_the_whole_combination() {
        let priors = PriorConfig {
            colors: vec![
                PriorEntry::new(Color::Red, 0.4),
                PriorEntry::new(Color::Green, 0.3),
                PriorEntry::new(Color::Blue, 0.3),
            ],
            ..PriorConfig::default()
        };
        let evaluator = RoundEvaluator::new(priors, Variant::ColorOnly);
        let round = Round::new(
            Hand::new(Chip::colored(Color::Red), Hint::Color(Color::Green)),
            Hand::new(Chip::colored(Color::Green), Hint::Color(Color::Red)),
            Chip::colored(Color::Blue),
        );
        let (hint_a, hint_b) = (Hint::Color(Color::Blue), Hint::Color(Color::Green));

        // A has nothing left, B still has red.
        let a_odds = evaluator.bag_odds(round.hand(Seat::A).chip(), hint_a, hint_b);
        assert!(a_odds.expect_err("A degenerate").is_degenerate());
        let b_odds = evaluator
            .bag_odds(round.hand(Seat::B).chip(), hint_a, hint_b)
            .expect("B odds");
        assert_eq!(b_odds.most_likely(), Some((Chip::colored(Color::Red), 1.0)));

        assert!(evaluator.outcome(&round, hint_a, hint_b).is_err());
        let table = evaluator.evaluate(&round).expect("table");
        assert!(table.outcome(hint_a, hint_b).is_none());
        assert_eq!(
            table
                .skipped
                .iter()
                .filter(|s| s.hint_a == hint_a && s.hint_b == hint_b)
                .count(),
            1
        );
    }
}
