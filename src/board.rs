use serde::Serialize;
use thiserror::Error;

use crate::batch::{parse_passenger_text, BatchOutcome};
use crate::config::Config;
use crate::validate::validate_batch;
use crate::vocab::Vocabulary;
use crate::{PassengerRecord, PaymentStatus, PlanError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub paid: usize,
    pub pending: usize,
    pub empty: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationStat {
    pub location: String,
    pub total: usize,
    pub paid: usize,
    pub pending: usize,
}

pub fn statistics(records: &[PassengerRecord], seat_count: u32) -> Statistics {
    let paid = records.iter().filter(|r| r.payment_status == PaymentStatus::Paid).count();
    Statistics {
        total: records.len(),
        paid,
        pending: records.len() - paid,
        empty: (seat_count as usize).saturating_sub(records.len()),
    }
}

/// Per-location counts, busiest first. Ties keep first-appearance order.
pub fn location_stats(records: &[PassengerRecord]) -> Vec<LocationStat> {
    let mut stats: Vec<LocationStat> = Vec::new();
    for r in records {
        let idx = match stats.iter().position(|s| s.location == r.location) {
            Some(i) => i,
            None => {
                stats.push(LocationStat { location: r.location.clone(), total: 0, paid: 0, pending: 0 });
                stats.len() - 1
            }
        };
        let entry = &mut stats[idx];
        entry.total += 1;
        match r.payment_status {
            PaymentStatus::Paid => entry.paid += 1,
            PaymentStatus::Pending => entry.pending += 1,
        }
    }
    stats.sort_by(|a, b| b.total.cmp(&a.total));
    stats
}

/// A batch that failed validation, with the parse results kept for feedback.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct Rejected {
    pub outcome: BatchOutcome,
    pub error: PlanError,
}

/// Current seat assignment. A new batch replaces it only once it validates.
#[derive(Debug, Clone)]
pub struct SeatBoard {
    seat_count: u32,
    vocab: Vocabulary,
    records: Vec<PassengerRecord>,
}

impl SeatBoard {
    pub fn new(seat_count: u32, vocab: Vocabulary) -> Self {
        SeatBoard { seat_count, vocab, records: Vec::new() }
    }

    pub fn from_config(cfg: &Config) -> Self {
        SeatBoard::new(cfg.seat_count, cfg.vocabulary())
    }

    pub fn seat_count(&self) -> u32 {
        self.seat_count
    }

    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    /// Parse and validate `text`. On error the previous records stay untouched.
    pub fn load(&mut self, text: &str) -> Result<BatchOutcome, Rejected> {
        let outcome = parse_passenger_text(text, &self.vocab);
        if let Err(error) = validate_batch(&outcome, self.seat_count) {
            return Err(Rejected { outcome, error });
        }
        self.records = outcome.records.clone();
        Ok(outcome)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn occupant(&self, seat: u32) -> Option<&PassengerRecord> {
        self.records.iter().find(|r| r.seat_number == seat)
    }

    pub fn statistics(&self) -> Statistics {
        statistics(&self.records, self.seat_count)
    }

    pub fn location_stats(&self) -> Vec<LocationStat> {
        location_stats(&self.records)
    }

    /// Records sorted by seat number.
    pub fn passenger_list(&self) -> Vec<&PassengerRecord> {
        let mut list: Vec<&PassengerRecord> = self.records.iter().collect();
        list.sort_by_key(|r| r.seat_number);
        list
    }
}
