//! Parse free-form passenger roster lines into bus seat assignments.
//!
//! Input is one passenger per line in any of a handful of loose formats,
//! e.g. `1. 김진욱(입완, 양재, 1)` or `김진욱/양재/1/입완`. Each line becomes a
//! [`PassengerRecord`] or an [`ErrorDiagnostic`] explaining what is missing.
//! A batch is accepted only when every seat is in range and unique.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod batch;
pub mod board;
pub mod config;
pub mod files;
pub mod matcher;
pub mod report;
pub mod validate;
pub mod vocab;

pub use batch::{diagnose, parse_passenger_text, BatchOutcome, ErrorDiagnostic, Suggestion, Warning, WarningKind};
pub use board::{location_stats, statistics, LocationStat, Rejected, SeatBoard, Statistics};
pub use config::{load_config, Config, ConfigError};
pub use files::{emit_files, enumerate_rosters, sha256_hex, slugify, unique_slug, with_fingerprint, EmitError, EmitPaths, EnumerateError};
pub use matcher::{match_line, match_structural, strategies, FuzzyMatcher, LineMatch, LineMatcher, Strategy};
pub use report::{render_markdown, render_passenger_list, render_seat_map, report_json, Report};
pub use validate::{duplicate_seats, out_of_range_seats, validate_batch, validate_seats};
pub use vocab::{normalize_location, normalize_payment_status, KeywordTable, Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "입금완료",
            PaymentStatus::Pending => "입금예정",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerRecord {
    /// Explicit index from the line, or the running count + 1.
    pub order_number: u32,
    pub name: String,
    pub payment_status: PaymentStatus,
    pub location: String,
    /// Not range-checked here; see [`validate_seats`].
    pub seat_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("승객 정보를 입력해주세요")]
    EmptyInput,
    #[error("올바른 형식의 승객 정보를 찾을 수 없습니다 (실패 {failed}줄)")]
    NoPassengers { failed: usize },
    #[error("잘못된 좌석 번호가 있습니다: {} (좌석 번호는 1-{} 사이여야 합니다)", join_seats(.seats), .capacity)]
    SeatOutOfRange { seats: Vec<u32>, capacity: u32 },
    #[error("중복된 좌석 번호가 있습니다: {}", join_seats(.seats))]
    DuplicateSeats { seats: Vec<u32> },
}

fn join_seats(seats: &[u32]) -> String {
    seats.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", ")
}
