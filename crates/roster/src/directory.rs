//! Client abstraction for the user directory.
//!
//! The sync engine talks to [`DirectoryClient`] rather than to a concrete
//! service, so the GitHub-backed client and the scripted test doubles are
//! interchangeable. Errors deliberately stay coarse: the engine only ever
//! branches on "did the fetch succeed", so the taxonomy exists for
//! operator-facing messages, not for control flow.

mod errors;
mod types;

pub use errors::{DirectoryError, Result, short_error_message};
pub use types::DirectoryClient;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_login() {
        let err = DirectoryError::not_found("octocat");
        assert_eq!(err.to_string(), "Profile not found: octocat");

        let err = DirectoryError::forbidden("octocat");
        assert_eq!(err.to_string(), "Access forbidden for octocat");
    }

    #[test]
    fn remote_error_carries_the_status() {
        let err = DirectoryError::Remote { status: 502 };
        assert_eq!(err.to_string(), "Unexpected status 502 from directory");
    }

    #[test]
    fn short_error_message_takes_the_first_line() {
        let err = std::io::Error::other("top line\nwith detail below");
        assert_eq!(short_error_message(&err), "top line");
    }

    #[test]
    fn short_error_message_passes_single_lines_through() {
        let err = DirectoryError::network("connection refused");
        assert_eq!(short_error_message(&err), "Network error: connection refused");
    }

    #[test]
    fn rate_exhaustion_is_detectable() {
        assert!(DirectoryError::RateExhausted.is_rate_exhausted());
        assert!(!DirectoryError::not_found("x").is_rate_exhausted());
    }
}
