use std::fmt;
use std::str::FromStr;

use super::types::{Batch, Stage};
use super::BatchError;

/// Stage selection for the batch list. `All` is the "no filter" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageFilter {
    #[default]
    All,
    Only(Stage),
}

impl StageFilter {
    /// Tab order on the dashboard.
    pub fn tabs() -> Vec<StageFilter> {
        std::iter::once(StageFilter::All)
            .chain(Stage::ALL.into_iter().map(StageFilter::Only))
            .collect()
    }

    pub fn matches(self, stage: Stage) -> bool {
        match self {
            StageFilter::All => true,
            StageFilter::Only(wanted) => wanted == stage,
        }
    }

    /// Tab caption: "All", "Fermenting", ...
    pub fn title(self) -> &'static str {
        match self {
            StageFilter::All => "All",
            StageFilter::Only(Stage::Fermenting) => "Fermenting",
            StageFilter::Only(Stage::Drying) => "Drying",
            StageFilter::Only(Stage::Sorting) => "Sorting",
            StageFilter::Only(Stage::Ready) => "Ready",
        }
    }
}

impl fmt::Display for StageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for StageFilter {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StageFilter::All);
        }
        s.parse::<Stage>().map(StageFilter::Only)
    }
}

/// Ordered subsequence of `batches` whose stage matches `filter`.
pub fn filter(batches: &[Batch], filter: StageFilter) -> Vec<&Batch> {
    batches.iter().filter(|b| filter.matches(b.stage())).collect()
}

/// Parses a tab token (case-insensitive) and filters by it.
pub fn filter_by_token<'a>(batches: &'a [Batch], token: &str) -> Result<Vec<&'a Batch>, BatchError> {
    let stage_filter: StageFilter = token.parse()?;
    Ok(filter(batches, stage_filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::seed::seed_batches;

    #[test]
    fn test_all_returns_everything_in_order() {
        let batches = seed_batches();
        let result = filter(&batches, StageFilter::All);
        assert_eq!(result.len(), batches.len());
        for (a, b) in result.iter().zip(batches.iter()) {
            assert_eq!(a.id(), b.id());
        }
    }

    #[test]
    fn test_capitalized_token_matches() {
        let batches = seed_batches();
        let result = filter_by_token(&batches, "Drying").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].stage(), Stage::Drying);
    }

    #[test]
    fn test_all_token_is_case_insensitive() {
        assert_eq!("ALL".parse::<StageFilter>().unwrap(), StageFilter::All);
        assert_eq!("all".parse::<StageFilter>().unwrap(), StageFilter::All);
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let batches = seed_batches();
        assert!(matches!(
            filter_by_token(&batches, "archived"),
            Err(BatchError::InvalidStage(_))
        ));
    }

    #[test]
    fn test_tabs_cover_every_stage() {
        let tabs = StageFilter::tabs();
        assert_eq!(tabs[0], StageFilter::All);
        assert_eq!(tabs.len(), Stage::ALL.len() + 1);
    }
}
