use prisoner_core::eval::{AdvisorConfig, GuessAdvisor, RoundEvaluator, SpreadTable};
use prisoner_core::game::scenario::Scenario;
use prisoner_core::game::snapshot::RoundSnapshot;
use prisoner_core::model::color::Color;
use prisoner_core::model::guess::RoundResult;
use prisoner_core::model::player::Seat;
use prisoner_core::model::priors::{PriorConfig, Variant};
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeds(count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(20251017);
    (0..count).map(|_| rng.next_u64()).collect()
}

#[test]
fn generated_rounds_evaluate_without_degenerate_combinations() {
    let evaluator = RoundEvaluator::new(PriorConfig::default(), Variant::ColorShape);
    for seed in seeds(25) {
        let scenario = Scenario::with_seed(PriorConfig::default(), Variant::ColorShape, seed)
            .expect("scenario");
        let table = evaluator.evaluate(scenario.round()).expect("table");
        assert_eq!(table.outcomes.len(), 64);
        assert!(table.skipped.is_empty());

        // The hints each player actually received are always truthful to repeat.
        let round = scenario.round();
        let outcome = table
            .outcome(round.hand(Seat::A).hint(), round.hand(Seat::B).hint())
            .expect("received hints are enumerated");
        assert_eq!(outcome.truthful, [true, true]);
        assert_eq!(outcome.accurate, [true, true]);
    }
}

#[test]
fn certain_bag_odds_always_name_the_bag() {
    let priors = PriorConfig::default();
    let advisor = GuessAdvisor::new(priors.clone(), Variant::ColorOnly, AdvisorConfig::default())
        .expect("advisor");
    let mut certain = 0;

    for seed in seeds(50) {
        let scenario =
            Scenario::with_seed(priors.clone(), Variant::ColorOnly, seed).expect("scenario");
        let round = scenario.round();
        let hint_a = round.hand(Seat::A).hint();
        let hint_b = round.hand(Seat::B).hint();

        for seat in Seat::LOOP {
            let advice = advisor.advise(round, seat, hint_a, hint_b).expect("advice");
            let odds = advisor
                .evaluator()
                .bag_odds(round.hand(seat).chip(), hint_a, hint_b)
                .expect("honest hints always leave the bag");
            assert!(odds.colors.iter().any(|(color, _)| *color == round.bag().color));

            if (odds.probability - 1.0).abs() < 1e-9 {
                certain += 1;
                assert_eq!(round.judge(seat, &advice.guess), RoundResult::BagCorrect);
            }
        }
    }
    assert!(certain > 0);
}

#[test]
fn arbitration_rows_cover_every_hint() {
    let table = SpreadTable::new(PriorConfig::default().color_set().expect("colors"))
        .expect("spreads");
    let rows = table.rows().expect("rows");
    assert_eq!(rows.len(), 16);
    for color in Color::ALL {
        let hinted = rows.iter().filter(|row| row.hint == Some(color)).count();
        assert_eq!(hinted, 3);
    }
    assert!(rows.iter().all(|row| row.max.is_some()));
}

#[test]
fn snapshots_reproduce_generated_rounds() {
    for seed in seeds(10) {
        let scenario = Scenario::with_seed(PriorConfig::default(), Variant::ColorShape, seed)
            .expect("scenario");
        let json = RoundSnapshot::to_json(&scenario).expect("json");
        let snapshot = RoundSnapshot::from_json(&json).expect("parse");
        assert!(snapshot.is_reproducible());
    }
}
