//! Append-only history of import readings feeding the chart.

/// Reduced projection of a live snapshot kept for charting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Reading time, unix seconds
    pub timestamp: i64,
    /// Imported power in watts
    pub import_watts: f64,
}

/// Growing in-memory history of readings.
///
/// Never evicts; only the trailing slice is ever read.
#[derive(Debug, Default)]
pub struct ReadingWindow {
    readings: Vec<Reading>,
}

impl ReadingWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reading: Reading) {
        self.readings.push(reading);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// The most recent `width` import values, left-padded with zeros to exactly `width`
    pub fn trailing_imports(&self, width: usize) -> Vec<f64> {
        let start = self.readings.len().saturating_sub(width);
        let recent = &self.readings[start..];

        let mut series = vec![0.0; width - recent.len()];
        series.extend(recent.iter().map(|r| r.import_watts));
        series
    }
}
