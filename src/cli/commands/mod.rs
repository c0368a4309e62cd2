//! CLI command implementations
//!
//! Every command returns the process exit code:
//!
//! | Code | Meaning                              |
//! |------|--------------------------------------|
//! | 0    | Success                              |
//! | 1    | Changes found but not delivered      |
//! | 2    | Configuration error                  |
//! | 4    | Scheduling service unreachable/failed|
//! | 5    | Persistence or other fatal error     |

pub mod check;
pub mod init;
pub mod show;
pub mod validate;

use crate::domain::ShiftWatchError;

/// Exit code when a notification could not be delivered
pub const EXIT_DELIVERY_FAILED: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for scheduling service failures
pub const EXIT_REMOTE: i32 = 4;
/// Exit code for everything else
pub const EXIT_FATAL: i32 = 5;

/// Maps an error to its exit code
pub fn exit_code_for(error: &ShiftWatchError) -> i32 {
    match error {
        ShiftWatchError::Configuration(_) | ShiftWatchError::Validation(_) => EXIT_CONFIG,
        e if e.is_remote() => EXIT_REMOTE,
        ShiftWatchError::Delivery(_) => EXIT_DELIVERY_FAILED,
        _ => EXIT_FATAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RemoteError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for(&ShiftWatchError::Configuration("x".into())),
            EXIT_CONFIG
        );
        assert_eq!(
            exit_code_for(&ShiftWatchError::Fetch(RemoteError::Timeout("x".into()))),
            EXIT_REMOTE
        );
        assert_eq!(
            exit_code_for(&ShiftWatchError::Lookup {
                subject_id: "P1".into(),
                source: RemoteError::from_status(500, "x"),
            }),
            EXIT_REMOTE
        );
        assert_eq!(
            exit_code_for(&ShiftWatchError::PersistenceWrite("x".into())),
            EXIT_FATAL
        );
        assert_eq!(
            exit_code_for(&ShiftWatchError::InvalidRecord("x".into())),
            EXIT_FATAL
        );
    }
}
