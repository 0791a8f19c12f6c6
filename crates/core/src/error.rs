#[derive(Debug, thiserror::Error)]
pub enum IndexerError {
    #[error("booking record has no prisoner number")]
    MissingPrisonerNumber,
    #[error("booking record has no booking id")]
    MissingBookingId,
    #[error("invalid identity field: {0}")]
    InvalidIdentity(#[from] indexer_types::TypeError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("incentives error: {0}")]
    Incentives(#[from] incentives::IncentivesError),

    #[error("failed to serialize document: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize document: {0}")]
    Deserialization(serde_json::Error),
}

pub type IndexerResult<T> = std::result::Result<T, IndexerError>;
