use super::status::{resolve, StatusDescriptor};
use super::types::{Batch, Metrics, Progress, Stage};

pub const MARKET_ACTION: &str = "List on Market";

/// Everything a batch card shows, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: String,
    pub date_line: String,
    pub stage: Stage,
    pub status: StatusDescriptor,
    /// `"Amelonado · 150 kg"` for batches created through the form.
    pub intake_line: Option<String>,
    pub body: CardBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardBody {
    /// Progress bar with a headline metric and an optional sub-metric.
    Progress {
        label: String,
        value: String,
        target: Option<String>,
        progress: Progress,
        sub_label: Option<String>,
    },
    /// Terminal stage: total weight and the market call-to-action, no bar.
    Terminal {
        total_weight: String,
        action: &'static str,
    },
}

impl CardView {
    pub fn from_batch(batch: &Batch) -> Self {
        let status = resolve(batch.stage());

        let body = match batch.metrics() {
            Metrics::InProgress {
                label,
                value,
                target,
                progress,
                sub_label,
            } => CardBody::Progress {
                label: label.clone(),
                value: value.clone(),
                target: target.clone(),
                progress: *progress,
                sub_label: sub_label.clone(),
            },
            Metrics::Final { value, .. } => CardBody::Terminal {
                total_weight: value.clone(),
                action: MARKET_ACTION,
            },
        };

        let intake_line = batch
            .intake()
            .map(|i| format!("{} · {} kg", i.variety, format_weight(i.weight_kg)));

        Self {
            title: batch.label().to_string(),
            date_line: batch.date_line(),
            stage: batch.stage(),
            status,
            intake_line,
            body,
        }
    }

    /// `"12% (Target: 7%)"`, or the bare value without a target.
    pub fn metric_line(&self) -> Option<String> {
        match &self.body {
            CardBody::Progress {
                value,
                target: Some(target),
                ..
            } => Some(format!("{} ({})", value, target)),
            CardBody::Progress { value, .. } => Some(value.clone()),
            CardBody::Terminal { .. } => None,
        }
    }

    pub fn progress(&self) -> Option<Progress> {
        match &self.body {
            CardBody::Progress { progress, .. } => Some(*progress),
            CardBody::Terminal { .. } => None,
        }
    }
}

/// Drops a trailing `.0` so whole kilograms read as integers.
fn format_weight(kg: f64) -> String {
    if kg.fract() == 0.0 {
        format!("{:.0}", kg)
    } else {
        format!("{}", kg)
    }
}

/// Text progress bar, e.g. `[██████░░░░]` for 60% at width 10.
pub fn progress_bar(progress: Progress, width: usize) -> String {
    let filled = (usize::from(progress.percent()) * width + 50) / 100;
    let filled = filled.min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::seed::seed_batches;

    #[test]
    fn test_ready_card_is_terminal() {
        let batches = seed_batches();
        let ready = batches.iter().find(|b| b.stage() == Stage::Ready).unwrap();
        let card = CardView::from_batch(ready);

        assert_eq!(card.status.label, "Ready for Sale");
        assert_eq!(
            card.body,
            CardBody::Terminal {
                total_weight: "50 kg".to_string(),
                action: "List on Market",
            }
        );
        assert_eq!(card.progress(), None);
        assert_eq!(card.metric_line(), None);
    }

    #[test]
    fn test_drying_card_metric_line_has_target() {
        let batches = seed_batches();
        let drying = batches.iter().find(|b| b.stage() == Stage::Drying).unwrap();
        let card = CardView::from_batch(drying);

        assert_eq!(card.metric_line().as_deref(), Some("12% (Target: 7%)"));
        assert_eq!(card.progress().map(|p| p.percent()), Some(60));
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(Progress::ZERO, 4), "[░░░░]");
        assert_eq!(progress_bar(Progress::COMPLETE, 4), "[████]");
        assert_eq!(progress_bar(Progress::new(50).unwrap(), 10), "[█████░░░░░]");
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(150.0), "150");
        assert_eq!(format_weight(12.5), "12.5");
    }
}
