// errors.rs
use astra::Response;
use crate::domain::estimate::EstimateError;
use crate::domain::geo::ProjectionError;
use crate::domain::renovation::RenovationError;
use crate::model::ModelError;
use std::fmt;

/// Errors originating from either the server logic
/// (routing, bad parameters, etc.) or downstream layers (data, model).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    DataError(String),
    ModelError(String),
    XlsxError(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::DataError(msg) => write!(f, "Data Error: {msg}"),
            ServerError::ModelError(msg) => write!(f, "Model Error: {msg}"),
            ServerError::XlsxError(msg) => write!(f, "Spreadsheet Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::DataError(_)
            | ServerError::ModelError(_)
            | ServerError::XlsxError(_)
            | ServerError::InternalError => 500,
        }
    }
}

impl From<ProjectionError> for ServerError {
    fn from(err: ProjectionError) -> Self {
        ServerError::BadRequest(err.to_string())
    }
}

impl From<RenovationError> for ServerError {
    fn from(err: RenovationError) -> Self {
        ServerError::BadRequest(err.to_string())
    }
}

impl From<EstimateError<ModelError>> for ServerError {
    fn from(err: EstimateError<ModelError>) -> Self {
        match err {
            EstimateError::SchemaMismatch(_) => ServerError::DataError(err.to_string()),
            EstimateError::DivisionByZero
            | EstimateError::InvalidPrediction(_)
            | EstimateError::DeltaOverflow
            | EstimateError::Model(_) => ServerError::ModelError(err.to_string()),
        }
    }
}
