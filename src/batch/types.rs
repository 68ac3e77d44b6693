use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::BatchError;

/// Lifecycle stage of a batch. The set is closed; every consumer matches on it
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Fermenting,
    Drying,
    Sorting,
    Ready,
}

impl Stage {
    /// All stages in lifecycle order.
    pub const ALL: [Stage; 4] = [Stage::Fermenting, Stage::Drying, Stage::Sorting, Stage::Ready];

    /// Lowercase token used in config files, CLI flags and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Fermenting => "fermenting",
            Stage::Drying => "drying",
            Stage::Sorting => "sorting",
            Stage::Ready => "ready",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = BatchError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| BatchError::InvalidStage(s.to_string()))
    }
}

/// Opaque batch identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Completion percentage, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    pub const ZERO: Progress = Progress(0);
    pub const COMPLETE: Progress = Progress(100);

    pub fn new(percent: u8) -> Result<Self, BatchError> {
        if percent > 100 {
            return Err(BatchError::ProgressOutOfRange(percent));
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Fraction in 0.0..=1.0, for gauges and fill levels.
    pub fn ratio(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

/// What the batch's date refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateCaption {
    Started,
    Completed,
}

impl DateCaption {
    pub fn as_str(self) -> &'static str {
        match self {
            DateCaption::Started => "Started",
            DateCaption::Completed => "Completed",
        }
    }
}

/// Stage-dependent display payload.
///
/// A batch in the terminal stage carries `Final` and therefore never has a
/// progress value; every other stage carries `InProgress`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metrics {
    InProgress {
        label: String,
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        progress: Progress,
        #[serde(skip_serializing_if = "Option::is_none")]
        sub_label: Option<String>,
    },
    Final {
        label: String,
        value: String,
    },
}

impl Metrics {
    pub fn in_progress(label: &str, value: &str, progress: Progress) -> Self {
        Metrics::InProgress {
            label: label.to_string(),
            value: value.to_string(),
            target: None,
            progress,
            sub_label: None,
        }
    }

    pub fn with_target(mut self, new_target: &str) -> Self {
        if let Metrics::InProgress { target, .. } = &mut self {
            *target = Some(new_target.to_string());
        }
        self
    }

    pub fn with_sub_label(mut self, new_sub_label: &str) -> Self {
        if let Metrics::InProgress { sub_label, .. } = &mut self {
            *sub_label = Some(new_sub_label.to_string());
        }
        self
    }

    pub fn total_weight(value: &str) -> Self {
        Metrics::Final {
            label: "Total Weight".to_string(),
            value: value.to_string(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Metrics::InProgress { label, .. } | Metrics::Final { label, .. } => label,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Metrics::InProgress { value, .. } | Metrics::Final { value, .. } => value,
        }
    }

    pub fn progress(&self) -> Option<Progress> {
        match self {
            Metrics::InProgress { progress, .. } => Some(*progress),
            Metrics::Final { .. } => None,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Metrics::Final { .. })
    }
}

/// Cocoa cultivars accepted by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variety {
    Amelonado,
    Amazonia,
    Trinitario,
    Criollo,
}

impl Variety {
    pub const ALL: [Variety; 4] = [
        Variety::Amelonado,
        Variety::Amazonia,
        Variety::Trinitario,
        Variety::Criollo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variety::Amelonado => "Amelonado",
            Variety::Amazonia => "Amazonia",
            Variety::Trinitario => "Trinitario",
            Variety::Criollo => "Criollo",
        }
    }
}

impl fmt::Display for Variety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variety {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Variety::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(token))
            .ok_or(())
    }
}

/// Intake data recorded when a batch is created through the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intake {
    pub weight_kg: f64,
    pub variety: Variety,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One unit of product moving through the processing lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch {
    id: BatchId,
    label: String,
    sequence: u64,
    date_caption: DateCaption,
    started_at: NaiveDate,
    stage: Stage,
    metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    intake: Option<Intake>,
}

impl Batch {
    /// Builds a batch, rejecting a metrics bundle whose shape does not match
    /// the stage.
    pub fn new(
        id: BatchId,
        sequence: u64,
        date_caption: DateCaption,
        started_at: NaiveDate,
        stage: Stage,
        metrics: Metrics,
    ) -> Result<Self, BatchError> {
        let terminal = super::status::resolve(stage).is_terminal;
        if terminal != metrics.is_final() {
            return Err(BatchError::MetricsMismatch { stage });
        }

        Ok(Self {
            id,
            label: format!("Batch #{}", sequence),
            sequence,
            date_caption,
            started_at,
            stage,
            metrics,
            intake: None,
        })
    }

    pub fn with_intake(mut self, intake: Intake) -> Self {
        self.intake = Some(intake);
        self
    }

    pub fn id(&self) -> &BatchId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn date_caption(&self) -> DateCaption {
        self.date_caption
    }

    pub fn started_at(&self) -> NaiveDate {
        self.started_at
    }

    /// `"Started: Oct 12, 2023"`
    pub fn date_line(&self) -> String {
        format!(
            "{}: {}",
            self.date_caption.as_str(),
            self.started_at.format("%b %-d, %Y")
        )
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn intake(&self) -> Option<&Intake> {
        self.intake.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, 12).unwrap()
    }

    #[test]
    fn test_stage_parse_is_case_insensitive() {
        assert_eq!("Drying".parse::<Stage>().unwrap(), Stage::Drying);
        assert_eq!("READY".parse::<Stage>().unwrap(), Stage::Ready);
        assert_eq!(" sorting ".parse::<Stage>().unwrap(), Stage::Sorting);
    }

    #[test]
    fn test_stage_parse_rejects_unknown() {
        let err = "roasting".parse::<Stage>().unwrap_err();
        assert!(matches!(err, BatchError::InvalidStage(ref s) if s == "roasting"));
    }

    #[test]
    fn test_progress_bounds() {
        assert_eq!(Progress::new(0).unwrap(), Progress::ZERO);
        assert_eq!(Progress::new(100).unwrap(), Progress::COMPLETE);
        assert!(matches!(
            Progress::new(101),
            Err(BatchError::ProgressOutOfRange(101))
        ));
    }

    #[test]
    fn test_ready_batch_rejects_progress_metrics() {
        let metrics = Metrics::in_progress("Progress", "Day 6 of 6", Progress::COMPLETE);
        let result = Batch::new(
            BatchId::new("x"),
            1,
            DateCaption::Completed,
            date(),
            Stage::Ready,
            metrics,
        );
        assert!(matches!(
            result,
            Err(BatchError::MetricsMismatch {
                stage: Stage::Ready
            })
        ));
    }

    #[test]
    fn test_in_progress_stage_rejects_final_metrics() {
        let result = Batch::new(
            BatchId::new("x"),
            1,
            DateCaption::Started,
            date(),
            Stage::Drying,
            Metrics::total_weight("50 kg"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_label_and_date_line() {
        let batch = Batch::new(
            BatchId::new("204"),
            204,
            DateCaption::Started,
            NaiveDate::from_ymd_opt(2023, 10, 8).unwrap(),
            Stage::Fermenting,
            Metrics::in_progress("Progress", "Day 3 of 6", Progress::new(50).unwrap()),
        )
        .unwrap();

        assert_eq!(batch.label(), "Batch #204");
        assert_eq!(batch.date_line(), "Started: Oct 8, 2023");
    }

    #[test]
    fn test_variety_parse() {
        assert_eq!("criollo".parse::<Variety>(), Ok(Variety::Criollo));
        assert!("Robusta".parse::<Variety>().is_err());
    }

    #[test]
    fn test_batch_json_shape() {
        let batch = Batch::new(
            BatchId::new("201"),
            201,
            DateCaption::Completed,
            date(),
            Stage::Ready,
            Metrics::total_weight("50 kg"),
        )
        .unwrap();

        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["stage"], "ready");
        assert_eq!(json["label"], "Batch #201");
        assert_eq!(json["metrics"]["value"], "50 kg");
        assert!(json["metrics"].get("progress").is_none());
        assert!(json.get("intake").is_none());
    }
}
