use std::fs;
use std::path::Path;

use prisoner_core::model::guess::RoundResult;
use prisoner_core::model::player::Seat;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::SimulationConfig;

const CONFIDENCE_LEVEL: f64 = 0.95;
const CONFIDENCE_Z: f64 = 1.96;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// One seat's judged guess for a single round.
#[derive(Debug, Clone, Copy)]
pub struct SeatObservation {
    pub seat: Seat,
    pub result: RoundResult,
    pub advised_probability: f64,
    pub mean_bag_odds: Option<f64>,
}

pub struct SummaryCollector {
    run_id: String,
    variant: &'static str,
    abstain_below: f64,
    seats: [SeatAccumulator; 2],
    rounds: usize,
    skipped_combinations: usize,
}

impl SummaryCollector {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            run_id: config.run_id.clone(),
            variant: config.scenarios.variant.as_str(),
            abstain_below: config.advisor.abstain_below,
            seats: [SeatAccumulator::default(), SeatAccumulator::default()],
            rounds: 0,
            skipped_combinations: 0,
        }
    }

    pub fn record_round(&mut self, observations: &[SeatObservation], skipped: usize) {
        self.rounds += 1;
        self.skipped_combinations += skipped;
        for observation in observations {
            self.seats[observation.seat.index()].record(observation);
        }
    }

    pub fn finalize(self) -> SimulationSummary {
        let z = z_score(CONFIDENCE_LEVEL);
        let seats = Seat::LOOP
            .into_iter()
            .zip(self.seats)
            .map(|(seat, acc)| acc.into_report(seat, z))
            .collect();

        SimulationSummary {
            run_id: self.run_id,
            variant: self.variant,
            abstain_below: self.abstain_below,
            rounds: self.rounds,
            skipped_combinations: self.skipped_combinations,
            seats,
        }
    }
}

#[derive(Debug, Default)]
struct SeatAccumulator {
    counts: [usize; RoundResult::ALL.len()],
    correct: Vec<f64>,
    advised_probability_sum: f64,
    bag_odds_sum: f64,
    bag_odds_samples: usize,
}

impl SeatAccumulator {
    fn record(&mut self, observation: &SeatObservation) {
        if let Some(slot) = RoundResult::ALL
            .iter()
            .position(|result| *result == observation.result)
        {
            self.counts[slot] += 1;
        }
        self.correct
            .push(if observation.result.is_correct() { 1.0 } else { 0.0 });
        self.advised_probability_sum += observation.advised_probability;
        if let Some(odds) = observation.mean_bag_odds {
            self.bag_odds_sum += odds;
            self.bag_odds_samples += 1;
        }
    }

    fn into_report(self, seat: Seat, z: f64) -> SeatReport {
        let rounds = self.correct.len();
        let abstained = self.count(RoundResult::Abstain);
        let correct = self.count(RoundResult::BagCorrect) + self.count(RoundResult::OpponentCorrect);
        let committed = rounds - abstained;

        SeatReport {
            seat: seat.to_string(),
            rounds,
            counts: RoundResult::ALL
                .iter()
                .map(|result| (result.as_str(), self.count(*result)))
                .collect(),
            success_rate: ratio(correct, rounds),
            precision: ratio(correct, committed),
            ci95: confidence_interval(&self.correct, z),
            mean_advised_probability: if rounds == 0 {
                0.0
            } else {
                self.advised_probability_sum / rounds as f64
            },
            mean_bag_odds: if self.bag_odds_samples == 0 {
                0.0
            } else {
                self.bag_odds_sum / self.bag_odds_samples as f64
            },
        }
    }

    fn count(&self, result: RoundResult) -> usize {
        RoundResult::ALL
            .iter()
            .position(|candidate| *candidate == result)
            .map(|slot| self.counts[slot])
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatReport {
    pub seat: String,
    pub rounds: usize,
    pub counts: Vec<(&'static str, usize)>,
    /// Correct guesses over all rounds; abstentions count as misses.
    pub success_rate: f64,
    /// Correct guesses over rounds where the seat committed to a target.
    pub precision: f64,
    pub ci95: (f64, f64),
    pub mean_advised_probability: f64,
    pub mean_bag_odds: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub run_id: String,
    pub variant: &'static str,
    pub abstain_below: f64,
    pub rounds: usize,
    pub skipped_combinations: usize,
    pub seats: Vec<SeatReport>,
}

impl SimulationSummary {
    pub fn overall_success_rate(&self) -> f64 {
        let total: usize = self.seats.iter().map(|seat| seat.rounds).sum();
        if total == 0 {
            return 0.0;
        }
        let weighted: f64 = self
            .seats
            .iter()
            .map(|seat| seat.success_rate * seat.rounds as f64)
            .sum();
        weighted / total as f64
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), SummaryError> {
        let mut rows = String::new();
        rows.push_str("# Simulation Summary\n\n");
        rows.push_str(&format!(
            "Run `{}`: {} rounds, variant `{}`, abstain below {:.2}\n\n",
            self.run_id, self.rounds, self.variant, self.abstain_below
        ));
        if self.skipped_combinations > 0 {
            rows.push_str(&format!(
                "Degenerate hint combinations skipped: {}\n\n",
                self.skipped_combinations
            ));
        }

        rows.push_str("| Seat | Rounds | Bag ✓ | Bag ✗ | Opp ✓ | Opp ✗ | Abstain | Success % | 95% CI | Precision % | Avg advised p | Avg bag odds |\n");
        rows.push_str("|------|--------|-------|-------|-------|-------|---------|-----------|--------|-------------|---------------|--------------|\n");

        for seat in &self.seats {
            let count = |label: &str| {
                seat.counts
                    .iter()
                    .find(|(name, _)| *name == label)
                    .map(|(_, n)| *n)
                    .unwrap_or(0)
            };
            rows.push_str(&format!(
                "| {name} | {rounds} | {bag_ok} | {bag_bad} | {opp_ok} | {opp_bad} | {abstain} | {success:.1}% | [{ci_low:.3}, {ci_high:.3}] | {precision:.1}% | {advised:.3} | {odds:.3} |\n",
                name = seat.seat,
                rounds = seat.rounds,
                bag_ok = count(RoundResult::BagCorrect.as_str()),
                bag_bad = count(RoundResult::BagWrong.as_str()),
                opp_ok = count(RoundResult::OpponentCorrect.as_str()),
                opp_bad = count(RoundResult::OpponentWrong.as_str()),
                abstain = count(RoundResult::Abstain.as_str()),
                success = seat.success_rate * 100.0,
                ci_low = seat.ci95.0,
                ci_high = seat.ci95.1,
                precision = seat.precision * 100.0,
                advised = seat.mean_advised_probability,
                odds = seat.mean_bag_odds,
            ));
        }

        fs::write(path.as_ref(), rows).map_err(|e| SummaryError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn z_score(level: f64) -> f64 {
    Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(0.5 + level / 2.0))
        .unwrap_or(CONFIDENCE_Z)
}

fn confidence_interval(samples: &[f64], z: f64) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    if samples.len() == 1 {
        return (mean, mean);
    }

    let variance = samples
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / (samples.len() as f64 - 1.0);
    let std_error = (variance / samples.len() as f64).sqrt();
    let margin = z * std_error;
    ((mean - margin).max(0.0), (mean + margin).min(1.0))
}
