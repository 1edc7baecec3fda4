use std::fmt;

use serde::Serialize;

/// One evaluated record: what the network answered and what the label says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScorecardEntry {
    pub predicted: usize,
    pub actual: usize,
}

impl ScorecardEntry {
    pub fn is_correct(&self) -> bool {
        self.predicted == self.actual
    }
}

/// Counters that accumulate over every pass of a session and are never reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunningStats {
    pub total_trained: usize,
    pub total_evaluated: usize,
    pub total_correct: usize,
}

impl RunningStats {
    pub fn record_training(&mut self, records: usize) {
        self.total_trained = self.total_trained.saturating_add(records);
    }

    pub fn record_evaluation(&mut self, evaluated: usize, correct: usize) {
        self.total_evaluated = self.total_evaluated.saturating_add(evaluated);
        self.total_correct = self.total_correct.saturating_add(correct);
    }

    /// Cumulative accuracy in percent; 0 before anything was evaluated.
    pub fn accuracy(&self) -> f64 {
        percentage(self.total_correct, self.total_evaluated)
    }
}

/// Result of one `Session::train` call.
#[derive(Debug, Clone, Serialize)]
pub struct TrainSummary {
    /// Records in the training set times epochs.
    pub records: usize,
    pub epochs: usize,
    /// Wall-clock duration of the whole pass in milliseconds.
    pub elapsed_ms: u64,
}

impl fmt::Display for TrainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The neural network has been trained on {} records.", self.records)
    }
}

/// Result of one `Session::query` call.
#[derive(Debug, Clone, Serialize)]
pub struct QuerySummary {
    pub evaluated: usize,
    pub correct: usize,
    pub elapsed_ms: u64,
}

impl QuerySummary {
    /// Accuracy of this pass alone, in percent.
    pub fn accuracy(&self) -> f64 {
        percentage(self.correct, self.evaluated)
    }
}

impl fmt::Display for QuerySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records from dataset have been processed. Accuracy - {:.2}%",
            self.evaluated,
            self.accuracy()
        )
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}
