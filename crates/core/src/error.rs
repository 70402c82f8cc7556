use thiserror::Error;

pub type PledgeBoardResult<T> = Result<T, PledgeBoardError>;

#[derive(Error, Debug)]
pub enum PledgeBoardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Organization not found: {0}")]
    OrganizationNotFound(uuid::Uuid),

    #[error("Campaign not found: {0}")]
    CampaignNotFound(uuid::Uuid),

    #[error("Campaign {id} is not accepting pledges (status: {status})")]
    CampaignNotAccepting { id: uuid::Uuid, status: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
