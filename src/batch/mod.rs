pub mod card;
pub mod collection;
pub mod factory;
pub mod filter;
pub mod form;
pub mod seed;
pub mod status;
pub mod types;

use thiserror::Error;

pub use card::{CardBody, CardView};
pub use collection::BatchCollection;
pub use factory::BatchFactory;
pub use filter::{filter, filter_by_token, StageFilter};
pub use form::{FieldError, NewBatchForm, ValidBatchForm, ValidationErrors};
pub use status::{resolve, Emphasis, StatusDescriptor};
pub use types::{Batch, BatchId, DateCaption, Intake, Metrics, Progress, Stage, Variety};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid stage '{0}': expected one of fermenting, drying, sorting, ready")]
    InvalidStage(String),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("no batch with id '{0}'")]
    NotFound(BatchId),

    #[error("progress {0} is outside 0..=100")]
    ProgressOutOfRange(u8),

    #[error("metrics bundle does not match stage '{stage}'")]
    MetricsMismatch { stage: Stage },

    #[error("batch id '{0}' is already in the collection")]
    DuplicateId(BatchId),
}
