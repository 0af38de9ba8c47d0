use crate::model::chip::Chip;
use crate::model::guess::{Guess, RoundResult, Target};
use crate::model::hand::Hand;
use crate::model::player::Seat;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Two hands and the hidden bag chip. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    hands: [Hand; 2],
    bag: Chip,
}

impl Round {
    pub const fn new(player_a: Hand, player_b: Hand, bag: Chip) -> Self {
        Self {
            hands: [player_a, player_b],
            bag,
        }
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 2] {
        &self.hands
    }

    pub fn bag(&self) -> &Chip {
        &self.bag
    }

    /// Scores `guess` made by `seat` against the ground truth.
    pub fn judge(&self, seat: Seat, guess: &Guess) -> RoundResult {
        match (guess.target, guess.chip) {
            (Target::Bag, Some(chip)) if chip == self.bag => RoundResult::BagCorrect,
            (Target::Bag, _) => RoundResult::BagWrong,
            (Target::Opponent, Some(chip)) if chip == *self.hand(seat.opponent()).chip() => {
                RoundResult::OpponentCorrect
            }
            (Target::Opponent, _) => RoundResult::OpponentWrong,
            (Target::Abstain, _) => RoundResult::Abstain,
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bag: {}", self.bag)?;
        for seat in Seat::LOOP {
            write!(f, "\n   {}: {}", seat, self.hand(seat))?;
        }
        Ok(())
    }
}
