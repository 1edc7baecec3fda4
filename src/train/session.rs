use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::data::codec::{argmax_label, RecordCodec};
use crate::data::loader::load_window;
use crate::error::{Error, Result};
use crate::network::Network;
use crate::train::progress::ProgressThrottle;
use crate::train::run_config::RunConfig;
use crate::train::stats::{QuerySummary, RunningStats, ScorecardEntry, TrainSummary};

/// Owns the network and both datasets, drives training and evaluation
/// passes, and keeps the cumulative statistics.
///
/// At most one `train` or `query` call may run at a time; both take
/// `&mut self`, so a `Session` moved onto a worker thread stays exclusive.
#[derive(Debug)]
pub struct Session {
    network: Network,
    codec: RecordCodec,
    config: RunConfig,
    training_data: Vec<String>,
    evaluation_data: Vec<String>,
    scorecard: Vec<ScorecardEntry>,
    stats: RunningStats,
}

impl Session {
    pub fn with_network(network: Network, config: RunConfig) -> Session {
        let codec = RecordCodec::new(network.input_size(), network.output_size());
        Session {
            network,
            codec,
            config,
            training_data: Vec::new(),
            evaluation_data: Vec::new(),
            scorecard: Vec::new(),
            stats: RunningStats::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Replaces the training set with a window of `path`. On an empty or
    /// unreadable source the previous training set is kept.
    pub fn load_training_set<P: AsRef<Path>>(&mut self, path: P, max_count: usize, start_offset: usize) -> Result<usize> {
        let lines = fetch(path.as_ref(), max_count, start_offset)?;
        Ok(self.set_training_data(lines))
    }

    /// Replaces the evaluation set with a window of `path`. On an empty or
    /// unreadable source the previous evaluation set is kept.
    pub fn load_evaluation_set<P: AsRef<Path>>(&mut self, path: P, max_count: usize, start_offset: usize) -> Result<usize> {
        let lines = fetch(path.as_ref(), max_count, start_offset)?;
        Ok(self.set_evaluation_data(lines))
    }

    /// Installs already-read lines as the training set.
    pub fn set_training_data(&mut self, lines: Vec<String>) -> usize {
        self.training_data = lines;
        self.training_data.len()
    }

    /// Installs already-read lines as the evaluation set.
    pub fn set_evaluation_data(&mut self, lines: Vec<String>) -> usize {
        self.evaluation_data = lines;
        self.evaluation_data.len()
    }

    // -----------------------------------------------------------------------
    // Passes
    // -----------------------------------------------------------------------

    /// Trains on every training record, in file order, `epochs` times.
    ///
    /// `progress` receives the running record count, throttled to the
    /// configured interval, and always once more with the final count.
    /// A malformed record aborts the pass; updates already applied stay.
    pub fn train<F: FnMut(usize)>(&mut self, epochs: usize, mut progress: F) -> Result<TrainSummary> {
        info!(epochs, records = self.training_data.len(), "training started");
        let started = Instant::now();
        let mut throttle = ProgressThrottle::new(self.config.progress_interval);

        for epoch in 1..=epochs {
            debug!(epoch, epochs, "epoch started");
            for (i, line) in self.training_data.iter().enumerate() {
                if self.config.stop_requested() {
                    return Err(cancelled(throttle.count()));
                }

                let record = self.codec.decode(line).map_err(|e| e.at_record(i + 1))?;
                let targets = self.codec.encode_target(record.label).map_err(|e| e.at_record(i + 1))?;
                self.network.train_one(&record.inputs, &targets);

                throttle.tick(&mut progress);
            }
        }

        throttle.finish(&mut progress);

        let records = self.training_data.len().saturating_mul(epochs);
        self.stats.record_training(records);

        let summary = TrainSummary {
            records,
            epochs,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            records,
            total_trained = self.stats.total_trained,
            elapsed_ms = summary.elapsed_ms,
            "training finished"
        );
        Ok(summary)
    }

    /// Scores every evaluation record and rebuilds the scorecard.
    ///
    /// Running totals change only when the whole pass succeeds.
    pub fn query<F: FnMut(usize)>(&mut self, mut progress: F) -> Result<QuerySummary> {
        info!(records = self.evaluation_data.len(), "query started");
        let started = Instant::now();
        let mut throttle = ProgressThrottle::new(self.config.progress_interval);

        self.scorecard.clear();
        for (i, line) in self.evaluation_data.iter().enumerate() {
            if self.config.stop_requested() {
                return Err(cancelled(throttle.count()));
            }

            let record = self.codec.decode(line).map_err(|e| e.at_record(i + 1))?;
            let outputs = self.network.forward(&record.inputs);
            self.scorecard.push(ScorecardEntry {
                predicted: argmax_label(&outputs),
                actual: record.label,
            });

            throttle.tick(&mut progress);
        }

        throttle.finish(&mut progress);

        let correct = self.scorecard.iter().filter(|e| e.is_correct()).count();
        self.stats.record_evaluation(self.evaluation_data.len(), correct);

        let summary = QuerySummary {
            evaluated: self.evaluation_data.len(),
            correct,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            correct,
            evaluated = summary.evaluated,
            accuracy = self.stats.accuracy(),
            elapsed_ms = summary.elapsed_ms,
            "query finished"
        );
        Ok(summary)
    }

    // -----------------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------------

    /// Cumulative accuracy over every completed query, in percent.
    pub fn accuracy(&self) -> f64 {
        self.stats.accuracy()
    }

    /// Scorecard entry for an evaluation record, valid until the next query.
    pub fn record_info(&self, index: usize) -> Option<ScorecardEntry> {
        if self.evaluation_data.is_empty() {
            return None;
        }
        self.scorecard.get(index).copied()
    }

    /// Raw [0, 255] intensities of an evaluation record, for rendering.
    pub fn record_pixels(&self, index: usize) -> Result<Option<Vec<f64>>> {
        match self.evaluation_data.get(index) {
            None => Ok(None),
            Some(line) => {
                let (_, pixels) = self.codec.decode_raw(line).map_err(|e| e.at_record(index + 1))?;
                Ok(Some(pixels))
            }
        }
    }

    pub fn scorecard(&self) -> &[ScorecardEntry] {
        &self.scorecard
    }

    pub fn stats(&self) -> RunningStats {
        self.stats
    }

    pub fn total_trained(&self) -> usize {
        self.stats.total_trained
    }

    pub fn total_evaluated(&self) -> usize {
        self.stats.total_evaluated
    }

    pub fn total_correct(&self) -> usize {
        self.stats.total_correct
    }

    pub fn training_len(&self) -> usize {
        self.training_data.len()
    }

    pub fn evaluation_len(&self) -> usize {
        self.evaluation_data.len()
    }

    pub fn network(&self) -> &Network {
        &self.network
    }
}

fn fetch(path: &Path, max_count: usize, start_offset: usize) -> Result<Vec<String>> {
    let lines = load_window(path, max_count, start_offset);
    if lines.is_empty() {
        return Err(Error::EmptyDataset { path: path.to_path_buf() });
    }
    info!(records = lines.len(), "dataset loaded");
    Ok(lines)
}

fn cancelled(processed: usize) -> Error {
    warn!(processed, "pass cancelled");
    Error::Cancelled { processed }
}
