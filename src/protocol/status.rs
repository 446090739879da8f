use log::{Level, warn};

use crate::Error;

/// Message reported instead of any server supplied text, if the service did not recognize the
/// operation handle.
const INVALID_HANDLE_MESSAGE: &str = "invalid handle";

/// Outcome of a remote call as reported by the service. Variants hold the same meaning as the
/// status codes of the wire protocol.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum StatusCode {
    /// The call has been executed successfully.
    #[default]
    Success,
    /// The call has been executed successfully. There have been warnings.
    SuccessWithInfo,
    /// The operation the call refers to is still executing.
    StillExecuting,
    /// The call failed. The status carries an error message.
    Error,
    /// The service does not know the operation handle used in the call.
    InvalidHandle,
}

/// Status attached to each response of the remote service.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Status {
    pub status_code: StatusCode,
    /// Warnings emitted alongside [`StatusCode::SuccessWithInfo`].
    pub info_messages: Vec<String>,
    pub sql_state: Option<String>,
    pub error_code: Option<i32>,
    pub error_message: Option<String>,
}

impl Status {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::Error,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn invalid_handle() -> Self {
        Self {
            status_code: StatusCode::InvalidHandle,
            ..Self::default()
        }
    }

    /// [`StatusCode::Success`], [`StatusCode::SuccessWithInfo`] and
    /// [`StatusCode::StillExecuting`] are mapped to `Ok`. In case of
    /// [`StatusCode::SuccessWithInfo`] the info messages are logged. Error codes are mapped to
    /// [`Error::RemoteStatus`].
    ///
    /// `function` is the name of the remote call which returned this status. It is kept in the
    /// error to provide context.
    pub fn into_result(self, function: &'static str) -> Result<(), Error> {
        match self.status_code {
            StatusCode::Success | StatusCode::StillExecuting => Ok(()),
            StatusCode::SuccessWithInfo => {
                log_info_messages(function, &self.info_messages);
                Ok(())
            }
            StatusCode::Error => Err(Error::RemoteStatus {
                function,
                code: self.status_code,
                message: self.error_message.unwrap_or_default(),
            }),
            StatusCode::InvalidHandle => Err(Error::RemoteStatus {
                function,
                code: self.status_code,
                message: INVALID_HANDLE_MESSAGE.to_owned(),
            }),
        }
    }
}

/// Emits a warning for each info message attached to a successful status.
pub fn log_info_messages(function: &str, info_messages: &[String]) {
    if log::max_level() < Level::Warn {
        // Early return to safe work creating all these log records in case we would not log
        // anything.
        return;
    }
    for message in info_messages {
        warn!("{function}: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::{Status, StatusCode};
    use crate::Error;

    #[test]
    fn success_codes_are_ok() {
        assert!(Status::success().into_result("FetchResults").is_ok());
        let still_executing = Status {
            status_code: StatusCode::StillExecuting,
            ..Status::default()
        };
        assert!(still_executing.into_result("FetchResults").is_ok());
    }

    #[test]
    fn error_status_carries_server_message() {
        let result = Status::error("Query has been cancelled").into_result("FetchResults");

        match result {
            Err(Error::RemoteStatus {
                function,
                code,
                message,
            }) => {
                assert_eq!("FetchResults", function);
                assert_eq!(StatusCode::Error, code);
                assert_eq!("Query has been cancelled", message);
            }
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn invalid_handle_ignores_server_message() {
        let status = Status {
            error_message: Some("Operation 42 does not exist".to_owned()),
            ..Status::invalid_handle()
        };

        let error = status.into_result("CloseOperation").unwrap_err();

        assert!(matches!(
            &error,
            Error::RemoteStatus { message, .. } if message == "invalid handle"
        ));
    }
}
