//! Plain-text and JSON renderings of a validated batch.

use crate::batch::{ErrorDiagnostic, Warning};
use crate::board::{location_stats, statistics};
use crate::{PassengerRecord, PaymentStatus};

const SEATS_PER_ROW: u32 = 4;

#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub title: &'a str,
    pub seat_count: u32,
    pub records: &'a [PassengerRecord],
    pub diagnostics: &'a [ErrorDiagnostic],
    pub warnings: &'a [Warning],
}

fn seat_cell(seat: u32, records: &[PassengerRecord]) -> String {
    match records.iter().find(|r| r.seat_number == seat) {
        Some(r) => {
            let mark = match r.payment_status {
                PaymentStatus::Paid => '●',
                PaymentStatus::Pending => '○',
            };
            format!("[{:>2} {}{}]", seat, mark, r.name)
        }
        None => format!("[{:>2} -]", seat),
    }
}

/// Two seats, an aisle, two seats per row.
pub fn render_seat_map(records: &[PassengerRecord], seat_count: u32) -> String {
    let mut rows = Vec::new();
    let mut seat = 1;
    while seat <= seat_count {
        let end = (seat + SEATS_PER_ROW - 1).min(seat_count);
        let cells: Vec<String> = (seat..=end).map(|s| seat_cell(s, records)).collect();
        let row = if cells.len() > 2 {
            format!("{}   {}", cells[..2].join(" "), cells[2..].join(" "))
        } else {
            cells.join(" ")
        };
        rows.push(row);
        seat = end + 1;
    }
    rows.join("\n")
}

pub fn render_location_stats(records: &[PassengerRecord], seat_count: u32) -> String {
    let mut out = Vec::new();
    for s in location_stats(records) {
        out.push(format!(
            "- {}: {}명 (입금완료 {}명 / 입금예정 {}명)",
            s.location, s.total, s.paid, s.pending
        ));
    }
    let t = statistics(records, seat_count);
    out.push(format!(
        "총 승객 {}명 · 입금완료 {}명 · 입금예정 {}명 · 빈 좌석 {}석",
        t.total, t.paid, t.pending, t.empty
    ));
    out.join("\n")
}

/// Sorted by seat number.
pub fn render_passenger_list(records: &[PassengerRecord]) -> String {
    let mut sorted: Vec<&PassengerRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.seat_number);
    sorted
        .iter()
        .map(|r| format!("- {}번 {} · {} · {}", r.seat_number, r.name, r.payment_status.label(), r.location))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_feedback(diagnostics: &[ErrorDiagnostic], warnings: &[Warning]) -> String {
    let mut out = Vec::new();
    for d in diagnostics {
        let hints: Vec<String> = d.suggestions.iter().map(|s| s.to_string()).collect();
        out.push(format!("- {}행 `{}`: {}", d.line, d.text, hints.join("; ")));
    }
    for w in warnings {
        out.push(format!("- {}행 경고: {}", w.line, w.message));
    }
    out.join("\n")
}

pub fn render_markdown(report: &Report) -> String {
    let mut md = format!("# {}\n\n## 좌석 배치\n\n```\n{}\n```\n", report.title, render_seat_map(report.records, report.seat_count));
    md.push_str(&format!("\n## 탑승지별 통계\n\n{}\n", render_location_stats(report.records, report.seat_count)));
    md.push_str(&format!("\n## 승객 목록\n\n{}\n", render_passenger_list(report.records)));
    if !report.diagnostics.is_empty() || !report.warnings.is_empty() {
        md.push_str(&format!("\n## 확인 필요\n\n{}\n", render_feedback(report.diagnostics, report.warnings)));
    }
    md
}

pub fn report_json(report: &Report) -> serde_json::Value {
    let diagnostics: Vec<serde_json::Value> = report
        .diagnostics
        .iter()
        .map(|d| {
            serde_json::json!({
                "line": d.line,
                "text": d.text,
                "suggestions": d.suggestions,
                "messages": d.suggestions.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            })
        })
        .collect();
    serde_json::json!({
        "title": report.title,
        "seat_count": report.seat_count,
        "records": report.records,
        "statistics": statistics(report.records, report.seat_count),
        "locations": location_stats(report.records),
        "diagnostics": diagnostics,
        "warnings": report.warnings,
    })
}
