use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::PaymentStatus;

/// Two keyword sets checked in order: paid first, then pending.
/// Matching is substring containment, not whole-word.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordTable {
    pub paid: Vec<String>,
    pub pending: Vec<String>,
}

impl KeywordTable {
    /// Returns the first status whose keyword set has a hit, or None.
    pub fn classify(&self, raw: &str) -> Option<PaymentStatus> {
        let sets = [
            (PaymentStatus::Paid, &self.paid),
            (PaymentStatus::Pending, &self.pending),
        ];
        sets.iter()
            .find(|(_, words)| words.iter().any(|w| !w.is_empty() && raw.contains(w.as_str())))
            .map(|(status, _)| *status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentVocabulary {
    #[serde(default = "default_paid")]
    pub paid: Vec<String>,
    #[serde(default = "default_pending")]
    pub pending: Vec<String>,
    #[serde(default = "default_informal_paid")]
    pub informal_paid: Vec<String>,
    #[serde(default = "default_informal_pending")]
    pub informal_pending: Vec<String>,
}

impl Default for PaymentVocabulary {
    fn default() -> Self {
        PaymentVocabulary {
            paid: default_paid(),
            pending: default_pending(),
            informal_paid: default_informal_paid(),
            informal_pending: default_informal_pending(),
        }
    }
}

impl PaymentVocabulary {
    pub fn formal(&self) -> KeywordTable {
        KeywordTable { paid: self.paid.clone(), pending: self.pending.clone() }
    }

    /// Formal keywords plus the informal synonyms, used when the whole line is scanned.
    pub fn broad(&self) -> KeywordTable {
        KeywordTable {
            paid: self.paid.iter().chain(self.informal_paid.iter()).cloned().collect(),
            pending: self.pending.iter().chain(self.informal_pending.iter()).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationVocabulary {
    /// Recognized boarding locations. Used by the fuzzy matcher and for warnings.
    #[serde(default = "default_known_locations")]
    pub known: Vec<String>,
    /// Exact-match aliases such as `양재역 -> 양재`.
    #[serde(default = "default_location_aliases")]
    pub aliases: HashMap<String, String>,
}

impl Default for LocationVocabulary {
    fn default() -> Self {
        LocationVocabulary { known: default_known_locations(), aliases: default_location_aliases() }
    }
}

/// Keyword and location tables consulted by every matcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vocabulary {
    #[serde(default)]
    pub payment: PaymentVocabulary,
    #[serde(default)]
    pub locations: LocationVocabulary,
}

impl Vocabulary {
    /// Classify a status token. Unknown text counts as Pending.
    pub fn payment_status(&self, raw: &str) -> PaymentStatus {
        self.payment.formal().classify(raw).unwrap_or(PaymentStatus::Pending)
    }

    /// Same as `payment_status` but with the informal synonyms included.
    pub fn payment_status_broad(&self, raw: &str) -> PaymentStatus {
        self.payment.broad().classify(raw).unwrap_or(PaymentStatus::Pending)
    }

    pub fn location(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        match self.locations.aliases.get(trimmed) {
            Some(canonical) => canonical.clone(),
            None => trimmed.to_string(),
        }
    }

    pub fn is_known_location(&self, location: &str) -> bool {
        self.locations.known.iter().any(|k| k == location)
    }

    /// Loose check used for warnings: the location contains some known entry.
    pub fn mentions_known_location(&self, location: &str) -> bool {
        self.locations.known.iter().any(|k| !k.is_empty() && location.contains(k.as_str()))
    }
}

static DEFAULT_VOCABULARY: Lazy<Vocabulary> = Lazy::new(Vocabulary::default);

/// Classify with the built-in keyword sets.
pub fn normalize_payment_status(raw: &str) -> PaymentStatus {
    DEFAULT_VOCABULARY.payment_status(raw)
}

/// Canonicalize with the built-in alias table.
pub fn normalize_location(raw: &str) -> String {
    DEFAULT_VOCABULARY.location(raw)
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_paid() -> Vec<String> {
    strings(&["입완", "입금완료", "완료", "입금됨", "결제완료"])
}

fn default_pending() -> Vec<String> {
    strings(&["예정", "입금예정", "미입금", "대기", "예약"])
}

fn default_informal_paid() -> Vec<String> {
    strings(&["입금했", "송금완료", "송금했", "완납", "ㅇㅋ"])
}

fn default_informal_pending() -> Vec<String> {
    strings(&["미납", "아직", "나중에", "보류"])
}

fn default_known_locations() -> Vec<String> {
    strings(&["양재", "사당", "강남", "서초", "논현", "잠실", "교대", "신사"])
}

fn default_location_aliases() -> HashMap<String, String> {
    [
        ("양재역", "양재"),
        ("사당역", "사당"),
        ("강남역", "강남"),
        ("강남구", "강남"),
        ("서초역", "서초"),
        ("서초구", "서초"),
        ("논현역", "논현"),
        ("잠실역", "잠실"),
        ("교대역", "교대"),
        ("신사역", "신사"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
