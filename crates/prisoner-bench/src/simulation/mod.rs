mod export;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use prisoner_core::InferenceError;
use prisoner_core::eval::{Advice, GuessAdvisor, PosteriorTable, RoundEvaluator};
use prisoner_core::game::scenario::Scenario;
use prisoner_core::model::chip::Chip;
use prisoner_core::model::guess::{Guess, RoundResult};
use prisoner_core::model::hint::Hint;
use prisoner_core::model::player::Seat;
use prisoner_core::model::round::Round;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SimulationConfig};
use crate::summary::{SeatObservation, SummaryCollector, SummaryError};

pub use export::ArbitrationExport;

/// Primary entry point for running seeded simulations.
pub struct SimulationRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
    evaluator: RoundEvaluator,
    advisor: GuessAdvisor,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub rounds_played: usize,
    pub rows_written: usize,
    pub success_rate: f64,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub arbitration_path: Option<PathBuf>,
    pub telemetry_path: Option<PathBuf>,
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let variant = config.scenarios.variant;
        let evaluator = RoundEvaluator::new(config.priors.clone(), variant);
        let advisor = GuessAdvisor::new(config.priors.clone(), variant, config.advisor)?;

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            evaluator,
            advisor,
        })
    }

    /// Execute the simulation, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.scenarios.seed.unwrap_or(0));
        let mut collector = SummaryCollector::new(&self.config);
        let mut rows_written = 0usize;

        for round_index in 0..self.config.scenarios.rounds {
            let round_seed = rng.next_u64();
            let outcome = self.play_round(round_index, round_seed)?;
            collector.record_round(&outcome.observations(), outcome.table.skipped.len());
            write_round_row(&mut writer, &self.config, round_index, round_seed, &outcome)?;
            rows_written += 1;
        }

        writer.flush()?;

        let summary = collector.finalize();
        summary.write_markdown(&self.outputs.summary_md)?;

        let arbitration_path = match self.outputs.arbitration_json.as_ref() {
            Some(path) => {
                ensure_parent(path.parent())?;
                ArbitrationExport::build(&self.config.priors, self.config.scenarios.variant)?
                    .write(path)?;
                Some(path.clone())
            }
            None => None,
        };

        let telemetry_path = if self.logging_enabled {
            let dir = self
                .outputs
                .summary_md
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Some(dir.join("telemetry.jsonl"))
        } else {
            None
        };

        Ok(RunSummary {
            rounds_played: self.config.scenarios.rounds,
            rows_written,
            success_rate: summary.overall_success_rate(),
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            arbitration_path,
            telemetry_path,
        })
    }

    fn play_round(&self, round_index: usize, round_seed: u64) -> Result<RoundOutcome, RunnerError> {
        let scenario = Scenario::with_seed(
            self.config.priors.clone(),
            self.config.scenarios.variant,
            round_seed,
        )?;
        let round = scenario.round().clone();
        let table = self.evaluator.evaluate(&round)?;

        // Both players repeat the hint they received from the bag.
        let expressed = [round.hand(Seat::A).hint(), round.hand(Seat::B).hint()];

        let mut seats = Vec::with_capacity(Seat::LOOP.len());
        for seat in Seat::LOOP {
            let advice = self
                .advisor
                .advise(&round, seat, expressed[0], expressed[1])?;
            let result = round.judge(seat, &advice.guess);

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                event!(
                    target: "prisoner_bench::guess",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    round_index = round_index as u32,
                    seat = %seat,
                    guess = %advice.guess,
                    result = result.as_str(),
                    bag_p = advice.bag_probability(),
                    opp_p = advice.opponent_probability()
                );
            }

            seats.push(SeatOutcome {
                seat,
                advice,
                result,
            });
        }

        Ok(RoundOutcome {
            round,
            expressed,
            table,
            seats,
        })
    }
}

struct RoundOutcome {
    round: Round,
    expressed: [Hint; 2],
    table: PosteriorTable,
    seats: Vec<SeatOutcome>,
}

impl RoundOutcome {
    fn observations(&self) -> Vec<SeatObservation> {
        self.seats
            .iter()
            .map(|seat| SeatObservation {
                seat: seat.seat,
                result: seat.result,
                advised_probability: seat.advised_probability(),
                mean_bag_odds: self.table.mean_probability(seat.seat),
            })
            .collect()
    }
}

struct SeatOutcome {
    seat: Seat,
    advice: Advice,
    result: RoundResult,
}

impl SeatOutcome {
    fn advised_probability(&self) -> f64 {
        self.advice
            .bag_probability()
            .max(self.advice.opponent_probability())
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_round_row(
    writer: &mut BufWriter<File>,
    config: &SimulationConfig,
    round_index: usize,
    round_seed: u64,
    outcome: &RoundOutcome,
) -> Result<(), RunnerError> {
    let round = &outcome.round;
    let row = RoundLogRow {
        run_id: config.run_id.clone(),
        round_id: format!("R{round_index:05}"),
        round_index,
        round_seed,
        variant: config.scenarios.variant.as_str(),
        bag: *round.bag(),
        chips: [*round.hand(Seat::A).chip(), *round.hand(Seat::B).chip()],
        received: [round.hand(Seat::A).hint(), round.hand(Seat::B).hint()],
        expressed: outcome.expressed,
        combinations: outcome.table.outcomes.len(),
        skipped: outcome.table.skipped.len(),
        seats: outcome
            .seats
            .iter()
            .map(|seat| SeatLogRow {
                seat: seat.seat,
                guess: seat.advice.guess,
                result: seat.result,
                bag_probability: seat.advice.bag_probability(),
                opponent_probability: seat.advice.opponent_probability(),
                mean_bag_odds: outcome.table.mean_probability(seat.seat),
            })
            .collect(),
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct RoundLogRow {
    run_id: String,
    round_id: String,
    round_index: usize,
    round_seed: u64,
    variant: &'static str,
    bag: Chip,
    chips: [Chip; 2],
    received: [Hint; 2],
    expressed: [Hint; 2],
    combinations: usize,
    skipped: usize,
    seats: Vec<SeatLogRow>,
}

#[derive(Debug, Serialize)]
struct SeatLogRow {
    seat: Seat,
    guess: Guess,
    result: RoundResult,
    bag_probability: f64,
    opponent_probability: f64,
    mean_bag_odds: Option<f64>,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("summary error: {0}")]
    Summary(#[from] SummaryError),
}
