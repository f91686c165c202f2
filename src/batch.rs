use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::matcher::{match_line, split_list_index, Strategy};
use crate::vocab::Vocabulary;
use crate::PassengerRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    MissingName,
    MissingSeat,
    MissingLocation,
    /// Every element looks present but no pattern fit.
    CheckFormat,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Suggestion::MissingName => "이름을 포함해주세요 (한글 2~4자)",
            Suggestion::MissingSeat => "좌석 번호를 포함해주세요",
            Suggestion::MissingLocation => "탑승지를 포함해주세요",
            Suggestion::CheckFormat => "형식을 확인해주세요. 예: 1. 김진욱(입완, 양재, 1)",
        };
        f.write_str(msg)
    }
}

/// A line no strategy could parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDiagnostic {
    /// 1-based, counted over non-blank lines only.
    pub line: usize,
    pub text: String,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    ShortName,
    UnknownLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub line: usize,
    pub kind: WarningKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub records: Vec<PassengerRecord>,
    /// Strategy that produced `records[i]`.
    pub strategies: Vec<Strategy>,
    pub diagnostics: Vec<ErrorDiagnostic>,
    pub warnings: Vec<Warning>,
    /// Number of non-blank lines seen.
    pub line_count: usize,
}

static NAME_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[가-힣]{2,}").unwrap());
static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static LOCATION_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[가-힣]{1,4}(?:역|구|동)").unwrap());

/// Parse every non-blank line. Failures become diagnostics; nothing aborts the batch.
pub fn parse_passenger_text(text: &str, vocab: &Vocabulary) -> BatchOutcome {
    let mut out = BatchOutcome::default();

    for (idx, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
        let line_no = idx + 1;
        out.line_count = line_no;
        let next_order = out.records.len() as u32 + 1;

        match match_line(line, next_order, vocab) {
            Some(m) => {
                out.warnings.extend(quality_warnings(line_no, &m.record, vocab));
                out.records.push(m.record);
                out.strategies.push(m.strategy);
            }
            None => out.diagnostics.push(diagnose(line_no, line, vocab)),
        }
    }

    out
}

fn quality_warnings(line: usize, record: &PassengerRecord, vocab: &Vocabulary) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if record.name.chars().count() < 2 {
        warnings.push(Warning {
            line,
            kind: WarningKind::ShortName,
            message: format!("이름이 너무 짧습니다: {}", record.name),
        });
    }
    if !vocab.mentions_known_location(&record.location) {
        warnings.push(Warning {
            line,
            kind: WarningKind::UnknownLocation,
            message: format!("알 수 없는 탑승지입니다: {}", record.location),
        });
    }
    warnings
}

/// Look for each element in the raw line and suggest whatever is missing.
pub fn diagnose(line_no: usize, line: &str, vocab: &Vocabulary) -> ErrorDiagnostic {
    let broad = vocab.payment.broad();
    let has_name = NAME_LIKE.find_iter(line).any(|m| {
        let token = m.as_str();
        !vocab.is_known_location(&vocab.location(token)) && broad.classify(token).is_none()
    });
    let (_, body) = split_list_index(line);
    let has_seat = NUMERIC.is_match(body);
    let has_location = vocab.mentions_known_location(line) || LOCATION_LIKE.is_match(line);

    let mut suggestions = Vec::new();
    if !has_name {
        suggestions.push(Suggestion::MissingName);
    }
    if !has_seat {
        suggestions.push(Suggestion::MissingSeat);
    }
    if !has_location {
        suggestions.push(Suggestion::MissingLocation);
    }
    if suggestions.is_empty() {
        suggestions.push(Suggestion::CheckFormat);
    }

    ErrorDiagnostic { line: line_no, text: line.trim().to_string(), suggestions }
}
