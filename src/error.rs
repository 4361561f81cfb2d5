use reqwest::StatusCode;
use thiserror::Error;

/// Why a whole parse was abandoned.
#[derive(Error, Debug)]
pub enum ParseFailure {
    #[error("no iCal data was provided")]
    MissingInput,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch iCal data from {url}")]
    ExternalService {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Timeout while fetching iCal data from {url}")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse iCal data")]
    DataProcessing(#[from] ParseFailure),
}

impl Error {
    /// Status an HTTP layer should answer with for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ExternalService { .. } | Self::Timeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::DataProcessing(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Fetch failures may succeed when the caller tries again; parse failures won't.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService { .. } | Self::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
