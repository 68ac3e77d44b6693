//! Greeting header and statistics cards shown above the batch list.

use chrono::Timelike;

use crate::batch::{resolve, BatchCollection};
use crate::config::SummaryConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    /// `"GOOD MORNING"`
    pub salutation: &'static str,
    /// `"Hello, Kwame"`
    pub headline: String,
    pub subline: &'static str,
}

pub fn greeting(farmer_name: &str, time: impl Timelike) -> Greeting {
    let salutation = match time.hour() {
        0..=11 => "GOOD MORNING",
        12..=16 => "GOOD AFTERNOON",
        _ => "GOOD EVENING",
    };

    Greeting {
        salutation,
        headline: format!("Hello, {}", farmer_name),
        subline: "Here's what's happening on your farm today.",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trend {
    pub value: String,
    pub positive: bool,
}

impl Trend {
    /// Parses `"+2.4%"` / `"-1%"`; an unsigned value counts as positive.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let (positive, value) = match raw.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, raw.strip_prefix('+').unwrap_or(raw)),
        };
        Some(Self {
            value: value.trim().to_string(),
            positive,
        })
    }

    /// `"↗ 2.4%"`
    pub fn badge(&self) -> String {
        let arrow = if self.positive { '↗' } else { '↘' };
        format!("{} {}", arrow, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub subtext: &'static str,
    pub trend: Option<Trend>,
}

/// The three headline statistics. Only the batch count is derived from the
/// collection; quality and income are configured display strings.
pub fn stat_cards(collection: &BatchCollection, summary: &SummaryConfig) -> Vec<StatCard> {
    let active = collection
        .iter()
        .filter(|b| !resolve(b.stage()).is_terminal)
        .count();

    vec![
        StatCard {
            label: "Total Batches",
            value: active.to_string(),
            subtext: "Active in processing",
            trend: None,
        },
        StatCard {
            label: "Avg Quality",
            value: summary.avg_quality.clone(),
            subtext: "Above regional average",
            trend: summary.quality_trend.as_deref().and_then(Trend::parse),
        },
        StatCard {
            label: "Total Income",
            value: summary.total_income.clone(),
            subtext: "Gross revenue YTD",
            trend: None,
        },
    ]
}
