use std::collections::HashSet;

use crate::batch::BatchOutcome;
use crate::{PassengerRecord, PlanError};

/// Seats outside `1..=capacity`, in record order.
pub fn out_of_range_seats(records: &[PassengerRecord], capacity: u32) -> Vec<u32> {
    records
        .iter()
        .map(|r| r.seat_number)
        .filter(|seat| !(1..=capacity).contains(seat))
        .collect()
}

/// Each seat that appears more than once, listed once, in first-seen order.
pub fn duplicate_seats(records: &[PassengerRecord]) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut dups = Vec::new();
    for seat in records.iter().map(|r| r.seat_number) {
        if !seen.insert(seat) && reported.insert(seat) {
            dups.push(seat);
        }
    }
    dups
}

/// Range check first, then duplicates. Either one rejects the whole batch.
pub fn validate_seats(records: &[PassengerRecord], capacity: u32) -> Result<(), PlanError> {
    let bad = out_of_range_seats(records, capacity);
    if !bad.is_empty() {
        return Err(PlanError::SeatOutOfRange { seats: bad, capacity });
    }
    let dups = duplicate_seats(records);
    if !dups.is_empty() {
        return Err(PlanError::DuplicateSeats { seats: dups });
    }
    Ok(())
}

/// Whole-batch checks: something to parse, something parsed, seats valid.
pub fn validate_batch(outcome: &BatchOutcome, capacity: u32) -> Result<(), PlanError> {
    if outcome.line_count == 0 {
        return Err(PlanError::EmptyInput);
    }
    if outcome.records.is_empty() {
        return Err(PlanError::NoPassengers { failed: outcome.diagnostics.len() });
    }
    validate_seats(&outcome.records, capacity)
}
