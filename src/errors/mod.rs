use thiserror::Error;

use crate::stats::StatKind;

/// Why a password check failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("A password is required for this action")]
    MissingPassword,
    #[error("Incorrect password")]
    WrongPassword,
    #[error("No upload password has been configured")]
    NotConfigured,
}

/// Reasons an upload is turned away before anything is merged or saved
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
    #[error("'{0}' is not a .csv file")]
    InvalidFileType(String),
    #[error("File is {size} bytes; uploads are limited to {limit} bytes")]
    FileTooLarge { size: usize, limit: usize },
    #[error("CSV is missing required {kind} columns: {}", missing.join(", "))]
    MissingColumns { kind: StatKind, missing: Vec<String> },
    #[error("CSV needs a header row and at least one player row")]
    NoDataRows,
    #[error("This file has already been uploaded to this tournament")]
    DuplicateFile,
    #[error("Tournament {0} not found")]
    TournamentNotFound(i64),
    #[error("Failed to save tournament: {0:#}")]
    Storage(anyhow::Error),
}

impl UploadError {
    /// Stable identifier for API clients
    pub fn category(&self) -> &'static str {
        match self {
            UploadError::Unauthorized(_) => "unauthorized",
            UploadError::InvalidFileType(_) => "invalid_file_type",
            UploadError::FileTooLarge { .. } => "file_too_large",
            UploadError::MissingColumns { .. } => "missing_columns",
            UploadError::NoDataRows => "no_data_rows",
            UploadError::DuplicateFile => "duplicate_file",
            UploadError::TournamentNotFound(_) => "not_found",
            UploadError::Storage(_) => "storage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_columns() {
        let err = UploadError::MissingColumns {
            kind: StatKind::Pitching,
            missing: vec!["WHIP".to_string(), "FIP".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "CSV is missing required pitching columns: WHIP, FIP"
        );
        assert_eq!(err.category(), "missing_columns");
    }

    #[test]
    fn auth_errors_convert_into_upload_errors() {
        let err: UploadError = AuthError::WrongPassword.into();
        assert_eq!(err.category(), "unauthorized");
        assert_eq!(err.to_string(), "Incorrect password");
    }
}
