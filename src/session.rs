use sha2::{Digest, Sha256};

use crate::config::UploadSettings;
use crate::errors::AuthError;

/// Who is asking. Built once per request (or per CLI run) and handed to
/// every operation that mutates stored tournaments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    authorized: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { authorized: false }
    }

    /// The operator running the CLI on the host is trusted
    pub fn local_operator() -> Self {
        Self { authorized: true }
    }

    /// Check a supplied password against the configured one
    pub fn authenticate(provided: Option<&str>, settings: &UploadSettings) -> Result<Self, AuthError> {
        let expected = settings.password.as_deref().ok_or(AuthError::NotConfigured)?;
        let provided = provided
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(AuthError::MissingPassword)?;

        if digest(provided) != digest(expected) {
            return Err(AuthError::WrongPassword);
        }
        Ok(Self { authorized: true })
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn require_authorized(&self) -> Result<(), AuthError> {
        if self.authorized {
            Ok(())
        } else {
            Err(AuthError::MissingPassword)
        }
    }
}

/// Hex SHA-256 of `input`; also used to fingerprint uploaded files
pub fn digest(input: impl AsRef<[u8]>) -> String {
    format!("{:x}", Sha256::digest(input.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(password: Option<&str>) -> UploadSettings {
        UploadSettings {
            password: password.map(str::to_string),
            ..UploadSettings::default()
        }
    }

    #[test]
    fn correct_password_authorizes() {
        let session = Session::authenticate(Some("hunter2"), &settings(Some("hunter2"))).unwrap();
        assert!(session.is_authorized());
        assert!(session.require_authorized().is_ok());
    }

    #[test]
    fn wrong_or_missing_password_is_rejected() {
        let config = settings(Some("hunter2"));
        assert_eq!(
            Session::authenticate(Some("hunter3"), &config),
            Err(AuthError::WrongPassword)
        );
        assert_eq!(
            Session::authenticate(Some("  "), &config),
            Err(AuthError::MissingPassword)
        );
        assert_eq!(Session::authenticate(None, &config), Err(AuthError::MissingPassword));
    }

    #[test]
    fn unconfigured_password_rejects_everyone() {
        assert_eq!(
            Session::authenticate(Some("anything"), &settings(None)),
            Err(AuthError::NotConfigured)
        );
    }

    #[test]
    fn anonymous_sessions_cannot_mutate() {
        assert_eq!(
            Session::anonymous().require_authorized(),
            Err(AuthError::MissingPassword)
        );
        assert!(Session::local_operator().require_authorized().is_ok());
    }

    #[test]
    fn digest_is_hex_sha256() {
        assert_eq!(
            digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
