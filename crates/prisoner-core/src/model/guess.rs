use crate::model::chip::Chip;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Bag,
    Opponent,
    Abstain,
}

/// A player's final call: which chip they name, or abstaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub target: Target,
    pub chip: Option<Chip>,
}

impl Guess {
    pub const fn bag(chip: Chip) -> Self {
        Self {
            target: Target::Bag,
            chip: Some(chip),
        }
    }

    pub const fn opponent(chip: Chip) -> Self {
        Self {
            target: Target::Opponent,
            chip: Some(chip),
        }
    }

    pub const fn abstain() -> Self {
        Self {
            target: Target::Abstain,
            chip: None,
        }
    }
}

impl Target {
    pub const fn is_abstain(self) -> bool {
        matches!(self, Target::Abstain)
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.target, self.chip) {
            (Target::Bag, Some(chip)) => write!(f, "bag is {chip}"),
            (Target::Opponent, Some(chip)) => write!(f, "opponent holds {chip}"),
            _ => f.write_str("abstain"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundResult {
    BagCorrect,
    BagWrong,
    OpponentCorrect,
    OpponentWrong,
    Abstain,
}

impl RoundResult {
    pub const ALL: [RoundResult; 5] = [
        RoundResult::BagCorrect,
        RoundResult::BagWrong,
        RoundResult::OpponentCorrect,
        RoundResult::OpponentWrong,
        RoundResult::Abstain,
    ];

    pub const fn is_correct(self) -> bool {
        matches!(self, RoundResult::BagCorrect | RoundResult::OpponentCorrect)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RoundResult::BagCorrect => "bag_correct",
            RoundResult::BagWrong => "bag_wrong",
            RoundResult::OpponentCorrect => "opponent_correct",
            RoundResult::OpponentWrong => "opponent_wrong",
            RoundResult::Abstain => "abstain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::color::Color;

    #[test]
    fn display_describes_target() {
        let chip = Chip::colored(Color::Green);
        assert_eq!(Guess::bag(chip).to_string(), "bag is green");
        assert_eq!(Guess::opponent(chip).to_string(), "opponent holds green");
        assert_eq!(Guess::abstain().to_string(), "abstain");
    }

    #[test]
    fn only_correct_results_score() {
        let correct: Vec<_> = RoundResult::ALL
            .into_iter()
            .filter(|result| result.is_correct())
            .collect();
        assert_eq!(
            correct,
            vec![RoundResult::BagCorrect, RoundResult::OpponentCorrect]
        );
    }
}
