use crate::stores::StoreError;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Invalid argument or business rule violation
    #[error("{message}")]
    InvalidArgument { message: String },

    /// Collaborator store query error
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::NotFound { resource, id } => {
                format!("{resource} with ID {id} not found")
            }
            Error::InvalidArgument { message } => message.clone(),
            Error::Store(_) => "Internal server error".to_string(),
        }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
