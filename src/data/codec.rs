//! Text record codec.
//!
//! A record is one line: an integer class label followed by exactly
//! `input_size` comma-separated pixel intensities in [0, 255]. Inputs are
//! rescaled into [0.01, 1.0] and targets use 0.01 / 0.99 rather than 0 / 1
//! so the sigmoid never has to saturate.

use crate::error::{Error, Result};

pub const TARGET_LOW: f64 = 0.01;
pub const TARGET_HIGH: f64 = 0.99;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A decoded record ready for the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub label: usize,
    pub inputs: Vec<f64>,
}

/// Encodes and decodes records for a fixed network shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCodec {
    pub input_size: usize,
    pub output_size: usize,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl RecordCodec {
    pub fn new(input_size: usize, output_size: usize) -> Self {
        RecordCodec { input_size, output_size }
    }

    /// Parses a line into its label and normalized inputs.
    pub fn decode(&self, line: &str) -> Result<Record> {
        let (label, pixels) = self.decode_raw(line)?;
        Ok(Record {
            label,
            inputs: pixels.into_iter().map(normalize_pixel).collect(),
        })
    }

    /// Parses a line into its label and the pixel intensities as written.
    pub fn decode_raw(&self, line: &str) -> Result<(usize, Vec<f64>)> {
        let mut fields = line.trim().split(',');

        // split() always yields at least one item.
        let label_field = fields.next().unwrap_or_default().trim();
        let label: i64 = label_field
            .parse()
            .map_err(|_| Error::format(format!("label '{}' is not an integer", label_field)))?;
        let label = self.check_label(label)?;

        let pixels = parse_pixels(fields)?;
        if pixels.len() != self.input_size {
            return Err(Error::format(format!(
                "expected {} pixel values, got {}",
                self.input_size,
                pixels.len()
            )));
        }

        Ok((label, pixels))
    }

    /// Target vector with `TARGET_HIGH` at `label` and `TARGET_LOW` elsewhere.
    pub fn encode_target(&self, label: usize) -> Result<Vec<f64>> {
        let label = self.check_label(label as i64)?;
        let mut target = vec![TARGET_LOW; self.output_size];
        target[label] = TARGET_HIGH;
        Ok(target)
    }

    fn check_label(&self, label: i64) -> Result<usize> {
        if label < 0 || label as u64 >= self.output_size as u64 {
            return Err(Error::LabelOutOfRange { record: None, label, output_size: self.output_size });
        }
        Ok(label as usize)
    }
}

/// Index of the largest output. Ties go to the lowest index.
pub fn argmax_label(outputs: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in outputs.iter().enumerate().skip(1) {
        if v > outputs[best] {
            best = i;
        }
    }
    best
}

/// Maps a [0, 255] intensity into [0.01, 1.0].
pub fn normalize_pixel(raw: f64) -> f64 {
    (raw / 255.0) * 0.99 + 0.01
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn parse_pixels<'a>(fields: impl Iterator<Item = &'a str>) -> Result<Vec<f64>> {
    fields
        .enumerate()
        .map(|(i, field)| {
            let field = field.trim();
            match field.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(Error::format(format!(
                    "pixel {} ('{}') is not a valid number",
                    i + 1,
                    field
                ))),
            }
        })
        .collect()
}
