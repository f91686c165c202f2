//! Line matching strategies.
//!
//! A line is tried against the structural patterns in rank order; the first
//! one that matches and survives post-processing wins. The fuzzy matcher is
//! always last and only looks for loose name / seat / location tokens.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::vocab::Vocabulary;
use crate::PassengerRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// `1. 김진욱(입완, 양재, 1)`
    Paren,
    /// `1 김진욱 입완 양재 1`
    Spaced,
    /// `김진욱 양재 1번 입완`
    Natural,
    /// `김진욱/양재/1/입완`
    Slash,
    /// `김진욱: 양재, 1, 입완`
    Colon,
    /// `1. 김진욱(1, 양재, 입완)`
    ParenSwapped,
    Fuzzy,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Paren => "paren",
            Strategy::Spaced => "spaced",
            Strategy::Natural => "natural",
            Strategy::Slash => "slash",
            Strategy::Colon => "colon",
            Strategy::ParenSwapped => "paren-swapped",
            Strategy::Fuzzy => "fuzzy",
        }
    }
}

/// One way of turning a line into a record.
pub trait LineMatcher: Send + Sync {
    fn strategy(&self) -> Strategy;

    /// `next_order` is used when the line carries no explicit order number.
    fn match_line(&self, line: &str, next_order: u32, vocab: &Vocabulary) -> Option<PassengerRecord>;
}

/// Capture group indices for one structural pattern. Status and order are optional.
#[derive(Debug, Clone, Copy)]
struct FieldMap {
    order: Option<usize>,
    name: usize,
    status: usize,
    location: usize,
    seat: usize,
}

pub struct StructuralPattern {
    strategy: Strategy,
    regex: Regex,
    fields: FieldMap,
}

impl StructuralPattern {
    fn new(strategy: Strategy, pattern: &str, fields: FieldMap) -> Self {
        StructuralPattern { strategy, regex: Regex::new(pattern).unwrap(), fields }
    }
}

impl LineMatcher for StructuralPattern {
    fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn match_line(&self, line: &str, next_order: u32, vocab: &Vocabulary) -> Option<PassengerRecord> {
        let cap = self.regex.captures(line.trim())?;
        let text = |idx: usize| group(&cap, idx);

        let name = hangul_only(text(self.fields.name));
        let location = vocab.location(strip_punctuation(text(self.fields.location)));
        let seat_number = parse_positive(text(self.fields.seat))?;
        if name.is_empty() || location.is_empty() {
            return None;
        }
        let order_number = self
            .fields
            .order
            .and_then(|idx| parse_positive(text(idx)))
            .unwrap_or(next_order);

        Some(PassengerRecord {
            order_number,
            name,
            payment_status: vocab.payment_status(text(self.fields.status).trim()),
            location,
            seat_number,
        })
    }
}

fn group<'t>(cap: &Captures<'t>, idx: usize) -> &'t str {
    cap.get(idx).map(|m| m.as_str()).unwrap_or("")
}

const ORDER_PREFIX: &str = r"^(?:(\d+)\s*[.)]\s*)?";

static STRUCTURAL_PATTERNS: Lazy<Vec<StructuralPattern>> = Lazy::new(|| {
    vec![
        StructuralPattern::new(
            Strategy::Paren,
            &format!(r"{}([^(]+?)\s*\(\s*([^,()]+?)\s*,\s*([^,()]+?)\s*,\s*(\d+)\s*번?\s*\)", ORDER_PREFIX),
            FieldMap { order: Some(1), name: 2, status: 3, location: 4, seat: 5 },
        ),
        StructuralPattern::new(
            Strategy::Spaced,
            r"^(\d+)\s*[.)]?\s+(\S+)\s+(\S+)\s+(\S+)\s+(\d+)\s*번?$",
            FieldMap { order: Some(1), name: 2, status: 3, location: 4, seat: 5 },
        ),
        StructuralPattern::new(
            Strategy::Natural,
            r"^([^\s\d]+)\s+(\S+?)\s+(\d+)\s*(?:번|석)?(?:\s+(\S+))?$",
            FieldMap { order: None, name: 1, location: 2, seat: 3, status: 4 },
        ),
        StructuralPattern::new(
            Strategy::Slash,
            &format!(r"{}([^/]+?)\s*/\s*([^/]+?)\s*/\s*(\d+)\s*번?\s*(?:/\s*([^/]*?)\s*)?$", ORDER_PREFIX),
            FieldMap { order: Some(1), name: 2, location: 3, seat: 4, status: 5 },
        ),
        StructuralPattern::new(
            Strategy::Colon,
            &format!(r"{}([^:]+?)\s*:\s*([^,]+?)\s*,\s*(\d+)\s*번?\s*(?:,\s*(.+?))?\s*$", ORDER_PREFIX),
            FieldMap { order: Some(1), name: 2, location: 3, seat: 4, status: 5 },
        ),
        StructuralPattern::new(
            Strategy::ParenSwapped,
            &format!(r"{}([^(]+?)\s*\(\s*(\d+)\s*번?\s*,\s*([^,()]+?)\s*,\s*([^,()]+?)\s*\)", ORDER_PREFIX),
            FieldMap { order: Some(1), name: 2, seat: 3, location: 4, status: 5 },
        ),
    ]
});

static NAME_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[가-힣]{2,4}").unwrap());
static SEAT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\d])(\d{1,2})(?:\s*(?:좌석|번|석))?(?:[^\d]|$)").unwrap());
static LOCATION_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([가-힣]{2,4})(역|구)?").unwrap());
static LIST_INDEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)(?:\s*([.)])\s*|\s+)").unwrap());

/// Split a leading list index off the line. `3.` and `3)` always count; a bare
/// `3 ` only when another seat-like number follows it.
pub(crate) fn split_list_index(line: &str) -> (Option<u32>, &str) {
    let cap = match LIST_INDEX.captures(line) {
        Some(cap) => cap,
        None => return (None, line),
    };
    let body = &line[cap.get(0).map_or(0, |m| m.end())..];
    if cap.get(2).is_none() && !SEAT_TOKEN.is_match(body) {
        return (None, line);
    }
    (parse_positive(group(&cap, 1)), body)
}

/// Terminal strategy: find a name, a seat and a whitelisted location anywhere in the line.
pub struct FuzzyMatcher;

impl FuzzyMatcher {
    pub fn find_name(line: &str) -> Option<String> {
        NAME_RUN.find(line).map(|m| m.as_str().to_string())
    }

    /// A leading list index such as `3.` or `3 ` is not a seat.
    pub fn find_seat(line: &str) -> Option<u32> {
        let (_, body) = split_list_index(line);
        SEAT_TOKEN.captures(body).and_then(|c| parse_positive(group(&c, 1)))
    }

    /// First run whose canonical form is a known location, skipping the name.
    pub fn find_location(line: &str, name: &str, vocab: &Vocabulary) -> Option<String> {
        LOCATION_RUN.captures_iter(line).find_map(|cap| {
            let run = group(&cap, 1);
            if run == name {
                return None;
            }
            let whole = group(&cap, 0);
            [whole, run]
                .iter()
                .map(|token| vocab.location(token))
                .find(|canonical| canonical != name && vocab.is_known_location(canonical))
        })
    }
}

impl LineMatcher for FuzzyMatcher {
    fn strategy(&self) -> Strategy {
        Strategy::Fuzzy
    }

    fn match_line(&self, line: &str, next_order: u32, vocab: &Vocabulary) -> Option<PassengerRecord> {
        let name = Self::find_name(line)?;
        let seat_number = Self::find_seat(line)?;
        let location = Self::find_location(line, &name, vocab)?;
        let (index, _) = split_list_index(line);
        Some(PassengerRecord {
            order_number: index.unwrap_or(next_order),
            name,
            payment_status: vocab.payment_status_broad(line),
            location,
            seat_number,
        })
    }
}

static FUZZY: FuzzyMatcher = FuzzyMatcher;

/// All strategies in rank order, fuzzy last.
pub fn strategies() -> Vec<&'static dyn LineMatcher> {
    let mut out: Vec<&'static dyn LineMatcher> =
        STRUCTURAL_PATTERNS.iter().map(|p| p as &'static dyn LineMatcher).collect();
    out.push(&FUZZY);
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    pub strategy: Strategy,
    pub record: PassengerRecord,
}

/// Try every strategy in order and return the first hit.
pub fn match_line(line: &str, next_order: u32, vocab: &Vocabulary) -> Option<LineMatch> {
    strategies().into_iter().find_map(|m| {
        m.match_line(line, next_order, vocab)
            .map(|record| LineMatch { strategy: m.strategy(), record })
    })
}

/// Structural patterns only, no fuzzy fallback.
pub fn match_structural(line: &str, next_order: u32, vocab: &Vocabulary) -> Option<LineMatch> {
    STRUCTURAL_PATTERNS.iter().find_map(|p| {
        p.match_line(line, next_order, vocab)
            .map(|record| LineMatch { strategy: p.strategy(), record })
    })
}

pub fn is_hangul_syllable(c: char) -> bool {
    ('가'..='힣').contains(&c)
}

fn hangul_only(raw: &str) -> String {
    raw.chars().filter(|c| is_hangul_syllable(*c)).collect()
}

fn strip_punctuation(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}
