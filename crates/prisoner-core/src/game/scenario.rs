use crate::belief::Repository;
use crate::error::InferenceError;
use crate::model::chip::Chip;
use crate::model::hand::Hand;
use crate::model::hint::Hint;
use crate::model::priors::{PriorConfig, Variant};
use crate::model::round::Round;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A generated round together with everything needed to regenerate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    seed: u64,
    variant: Variant,
    priors: PriorConfig,
    round: Round,
}

impl Scenario {
    /// Draws the bag, then the two player chips, then one hint from the bag to each player.
    ///
    /// The hint to the second player never repeats the first.
    pub fn generate<R: Rng + ?Sized>(
        priors: &PriorConfig,
        variant: Variant,
        rng: &mut R,
    ) -> Result<Round, InferenceError> {
        let mut repository = Repository::new(priors, variant)?;
        let bag = repository.chip(rng)?;
        let (chip_a, chip_b) = repository.pair(rng)?;

        let hint_a = bag_hint(&bag, &chip_a, &[], priors, rng)?;
        let hint_b = bag_hint(&bag, &chip_b, &[hint_a], priors, rng)?;

        Ok(Round::new(
            Hand::new(chip_a, hint_a),
            Hand::new(chip_b, hint_b),
            bag,
        ))
    }

    pub fn with_seed(priors: PriorConfig, variant: Variant, seed: u64) -> Result<Self, InferenceError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let round = Self::generate(&priors, variant, &mut rng)?;
        Ok(Self {
            seed,
            variant,
            priors,
            round,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn priors(&self) -> &PriorConfig {
        &self.priors
    }

    pub fn round(&self) -> &Round {
        &self.round
    }
}

fn bag_hint<R: Rng + ?Sized>(
    bag: &Chip,
    listener: &Chip,
    given: &[Hint],
    priors: &PriorConfig,
    rng: &mut R,
) -> Result<Hint, InferenceError> {
    bag.hint(listener, given, priors, rng)
        .ok_or_else(|| InferenceError::NoLegalHint {
            chip: bag.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::Scenario;
    use crate::model::player::Seat;
    use crate::model::priors::{PriorConfig, Variant};

    #[test]
    fn same_seed_same_round() {
        let first =
            Scenario::with_seed(PriorConfig::default(), Variant::ColorShape, 17).expect("scenario");
        let second =
            Scenario::with_seed(PriorConfig::default(), Variant::ColorShape, 17).expect("scenario");
        assert_eq!(first.round(), second.round());
        assert_eq!(first.seed(), 17);
    }

    #[test]
    fn chips_are_distinct_and_hints_legal() {
        for seed in 0..200 {
            let scenario =
                Scenario::with_seed(PriorConfig::default(), Variant::ColorShape, seed)
                    .expect("scenario");
            let round = scenario.round();
            let bag = round.bag();
            let a = round.hand(Seat::A);
            let b = round.hand(Seat::B);

            assert_ne!(a.chip().color, b.chip().color);
            assert_ne!(a.chip().color, bag.color);
            assert_ne!(b.chip().color, bag.color);
            assert_ne!(a.chip().shape, b.chip().shape);
            assert_ne!(a.chip().shape, bag.shape);

            assert!(a.hint().accuracy_against(bag), "seed {seed}");
            assert!(b.hint().accuracy_against(bag), "seed {seed}");
            assert!(a.hint().applies(a.chip()), "seed {seed}");
            assert!(b.hint().applies(b.chip()), "seed {seed}");
            assert_ne!(a.hint(), b.hint());
        }
    }

    #[test]
    fn color_only_rounds_have_no_shapes() {
        let scenario =
            Scenario::with_seed(PriorConfig::default(), Variant::ColorOnly, 5).expect("scenario");
        let round = scenario.round();
        assert!(round.bag().shape.is_none());
        assert!(round.hands().iter().all(|hand| hand.chip().shape.is_none()));
    }
}
