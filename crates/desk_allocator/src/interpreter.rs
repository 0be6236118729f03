//! Rule-based query interpreter.
//!
//! Turns a free-text workspace request into [`StructuredConstraints`] using a
//! fixed, ordered set of phrase tables. Matching is case-insensitive and never
//! fails: text that matches no rule yields unconstrained fields.

use crate::clock::{Clock, next_day};
use crate::model::{DeskKind, StructuredConstraints, TimeOfDay};
use chrono::NaiveDate;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static FLOOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(1st|2nd|3rd|4th|5th)\s+floor\b").expect("valid floor regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Desk kind phrases, first match wins
pub const DESK_KIND_RULES: &[(&str, DeskKind)] = &[
    ("standing desk", DeskKind::Standing),
    ("regular desk", DeskKind::Regular),
    ("normal desk", DeskKind::Regular),
];

/// Team phrases in priority order, first match wins
pub const TEAM_RULES: &[(&str, &str)] = &[
    ("marketing team", "Marketing"),
    ("sales team", "Sales"),
    ("engineering team", "Engineering"),
];

/// Day a date phrase refers to, relative to the interpretation date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    Tomorrow,
}

impl RelativeDay {
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            RelativeDay::Today => today,
            RelativeDay::Tomorrow => next_day(today),
        }
    }
}

/// Date/time-of-day phrases, first match wins
pub const PERIOD_RULES: &[(&str, RelativeDay, TimeOfDay)] = &[
    ("tomorrow afternoon", RelativeDay::Tomorrow, TimeOfDay::Afternoon),
    ("tomorrow morning", RelativeDay::Tomorrow, TimeOfDay::Morning),
    ("tomorrow evening", RelativeDay::Tomorrow, TimeOfDay::Evening),
    ("today afternoon", RelativeDay::Today, TimeOfDay::Afternoon),
    ("today morning", RelativeDay::Today, TimeOfDay::Morning),
    ("today evening", RelativeDay::Today, TimeOfDay::Evening),
];

/// Feature phrases (any variant) and the tag they normalize to
pub const FEATURE_RULES: &[(&[&str], &str)] = &[
    (&["dual monitors", "dual-monitors"], "dual-monitors"),
    (&["ergonomic chair", "ergonomic-chair"], "ergonomic-chair"),
    (&["adjustable height", "adjustable-height"], "adjustable-height"),
    (&["near window", "near-window"], "near-window"),
    (&["quiet area", "quiet-area"], "quiet-area"),
];

/// Lowercases and collapses runs of whitespace to a single space
pub fn normalize(text: &str) -> String {
    WHITESPACE_RE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

pub fn match_desk_kind(normalized: &str) -> Option<DeskKind> {
    DESK_KIND_RULES
        .iter()
        .find(|(phrase, _)| normalized.contains(phrase))
        .map(|&(_, kind)| kind)
}

/// Ordinal immediately before "floor"; with several mentions the last one wins
pub fn match_floor(normalized: &str) -> Option<u32> {
    FLOOR_RE
        .captures_iter(normalized)
        .filter_map(|caps| {
            let ordinal = caps.get(1)?.as_str();
            ordinal
                .trim_end_matches(|c: char| c.is_ascii_alphabetic())
                .parse::<u32>()
                .ok()
        })
        .last()
}

pub fn match_team(normalized: &str) -> Option<&'static str> {
    TEAM_RULES
        .iter()
        .find(|(phrase, _)| normalized.contains(phrase))
        .map(|&(_, team)| team)
}

pub fn match_period(normalized: &str, today: NaiveDate) -> Option<(NaiveDate, TimeOfDay)> {
    PERIOD_RULES
        .iter()
        .find(|(phrase, _, _)| normalized.contains(phrase))
        .map(|&(_, day, period)| (day.resolve(today), period))
}

pub fn match_features(normalized: &str) -> Vec<&'static str> {
    FEATURE_RULES
        .iter()
        .filter(|(variants, _)| variants.iter().any(|v| normalized.contains(v)))
        .map(|&(_, tag)| tag)
        .collect()
}

/// Interprets `text` with "today" fixed to `today`.
pub fn interpret(text: &str, today: NaiveDate) -> StructuredConstraints {
    let normalized = normalize(text);
    let mut constraints = StructuredConstraints::new();

    constraints.desk_type = match_desk_kind(&normalized);
    constraints.location_floor = match_floor(&normalized);
    constraints.location_team = match_team(&normalized).map(str::to_string);
    if let Some((date, period)) = match_period(&normalized, today) {
        constraints.date = Some(date);
        constraints.time_period = Some(period);
    }
    for tag in match_features(&normalized) {
        constraints.add_feature(tag);
    }

    debug!("Parsed query {:?} -> {:?}", text, constraints);
    constraints
}

/// Interpreter bound to a date source
pub struct QueryInterpreter<C: Clock> {
    clock: C,
}

impl<C: Clock> QueryInterpreter<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Date source used to resolve "today"
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn interpret(&self, text: &str) -> StructuredConstraints {
        interpret(text, self.clock.today())
    }
}
