use crate::model::chip::Chip;
use crate::model::hint::Hint;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A player's own chip plus the hint they received about the bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    chip: Chip,
    hint: Hint,
}

impl Hand {
    pub const fn new(chip: Chip, hint: Hint) -> Self {
        Self { chip, hint }
    }

    pub fn chip(&self) -> &Chip {
        &self.chip
    }

    pub fn hint(&self) -> Hint {
        self.hint
    }

    /// Whether this player can truthfully express `hint` about the bag.
    ///
    /// Chips are drawn without replacement, so the bag never shares the player's own attribute;
    /// the received hint is the only other thing the player knows about it.
    pub fn backs(&self, hint: Hint) -> bool {
        !hint.applies(&self.chip) || hint == self.hint
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [bag is {}]", self.chip, self.hint)
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::chip::Chip;
    use crate::model::color::Color;
    use crate::model::hint::Hint;
    use crate::model::shape::Shape;

    #[test]
    fn backs_own_attribute_and_received_hint() {
        let hand = Hand::new(
            Chip::new(Color::Green, Shape::Square),
            Hint::Color(Color::Black),
        );
        assert!(hand.backs(Hint::Color(Color::Green)));
        assert!(hand.backs(Hint::Shape(Shape::Square)));
        assert!(hand.backs(Hint::Color(Color::Black)));
        assert!(!hand.backs(Hint::Color(Color::Red)));
        assert!(!hand.backs(Hint::Shape(Shape::Star)));
    }

    #[test]
    fn display_shows_chip_and_hint() {
        let hand = Hand::new(Chip::colored(Color::Red), Hint::Color(Color::Blue));
        assert_eq!(hand.to_string(), "red [bag is not blue]");
    }
}
