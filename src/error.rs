use derive_more::Display;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Display)]
pub struct UnknownError(BoxedError);

impl std::error::Error for UnknownError {}

impl UnknownError {
    pub fn new(err: BoxedError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Display)]
struct StrError(pub Box<str>);

impl std::error::Error for StrError {}

impl<'a> From<&'a str> for UnknownError {
    fn from(err: &'a str) -> Self {
        UnknownError(Box::new(StrError(Box::from(err))))
    }
}

impl From<sqlx::error::Error> for UnknownError {
    fn from(err: sqlx::error::Error) -> Self {
        Self::new(err.into())
    }
}

pub mod service {
    use derive_more::Display;

    use crate::error::UnknownError;

    #[derive(Debug, Display)]
    pub enum DispatchError {
        #[display(fmt = "Dispatched operation timed out in {_0:?}")]
        Timeout(Option<std::time::Duration>),
        #[display(fmt = "IO error dispatching {_0}")]
        IO(std::io::Error),
        #[display(fmt = "Unknown dispatch error {_0}")]
        Unknown(UnknownError),
    }

    impl std::error::Error for DispatchError {}
}

pub mod persistence {
    use std::io;

    use derive_more::Display;

    use super::{service::DispatchError, UnknownError};

    pub type SqlState = String;

    #[derive(Debug, Display)]
    pub enum PersistenceError {
        #[display(fmt = "database error: {message} (SQLSTATE {code:?})")]
        Database {
            code: Option<SqlState>,
            message: String,
        },
        #[display(fmt = "persistence layer connection error: {_0}")]
        Connection(DispatchError),
        #[display(fmt = "account not found")]
        NotFound,
        #[display(fmt = "error decoding account data")]
        DecodeData,
        #[display(fmt = "unknown persistence error: {_0}")]
        Unknown(UnknownError),
    }

    impl std::error::Error for PersistenceError {}

    impl PersistenceError {
        pub fn is_not_found(&self) -> bool {
            matches!(self, Self::NotFound)
        }
    }

    type SqlxError = sqlx::error::Error;

    impl From<SqlxError> for PersistenceError {
        fn from(err: SqlxError) -> Self {
            match err {
                SqlxError::Configuration(_) => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::InvalidInput.into()))
                }
                SqlxError::Database(db) => Self::Database {
                    code: db.code().map(|code| code.into()),
                    message: db.message().into(),
                },
                SqlxError::Io(io) => Self::Connection(DispatchError::IO(io)),
                SqlxError::Tls(_) => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::ConnectionRefused.into()))
                }
                SqlxError::Protocol(msg) => Self::Connection(DispatchError::IO(io::Error::new(
                    io::ErrorKind::InvalidData,
                    msg,
                ))),
                SqlxError::RowNotFound => Self::NotFound,
                SqlxError::TypeNotFound { .. } => Self::DecodeData,
                SqlxError::ColumnIndexOutOfBounds { .. } => Self::DecodeData,
                SqlxError::ColumnNotFound(_) => Self::DecodeData,
                SqlxError::ColumnDecode { .. } => Self::DecodeData,
                SqlxError::Decode(_) => Self::DecodeData,
                SqlxError::PoolTimedOut => Self::Connection(DispatchError::Timeout(None)),
                SqlxError::PoolClosed => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::NotConnected.into()))
                }
                SqlxError::WorkerCrashed => {
                    tracing::error!("sqlx background worker crashed");
                    Self::Connection(DispatchError::Unknown(err.into()))
                }
                _ => PersistenceError::Unknown(err.into()),
            }
        }
    }
}

pub mod app {
    use derive_more::Display;

    use super::persistence::PersistenceError;

    #[derive(Debug, Display)]
    pub enum ApplicationError {
        #[display(fmt = "balance overflow: {balance} + {amount} does not fit the account balance")]
        BalanceOverflow { balance: i64, amount: i64 },
        #[display(fmt = "{_0}")]
        Persistence(PersistenceError),
    }

    impl std::error::Error for ApplicationError {}

    impl ApplicationError {
        pub fn is_not_found(&self) -> bool {
            matches!(self, Self::Persistence(err) if err.is_not_found())
        }
    }

    impl From<PersistenceError> for ApplicationError {
        fn from(err: PersistenceError) -> Self {
            Self::Persistence(err)
        }
    }
}

pub mod config {
    use derive_more::Display;

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    pub enum ConfigError {
        #[display(fmt = "missing env var {_0}")]
        Missing(&'static str),
        #[display(fmt = "invalid {name}: {value:?}")]
        Invalid { name: &'static str, value: String },
    }

    impl std::error::Error for ConfigError {}
}

pub mod http {
    use std::num::ParseIntError;

    use derive_more::Display;
    use salvo::{
        http::{Method, ParseError, StatusCode},
        writer::Json,
        Piece, Response,
    };
    use serde::{Deserialize, Serialize};

    use super::{app::ApplicationError, persistence::PersistenceError};

    /// Failure of a single request.
    ///
    /// Every kind renders the same way: status 400 and an [`ErrorResponse`]
    /// carrying the display text. Clients tell kinds apart only by message.
    #[derive(Debug, Display)]
    pub enum ApiError {
        #[display(fmt = "{_0}")]
        Payload(ParseError),
        #[display(fmt = "{_0}")]
        Decode(serde_json::Error),
        #[display(fmt = "invalid account id {value:?}: {source}")]
        InvalidId {
            value: String,
            source: ParseIntError,
        },
        #[display(fmt = "{_0}")]
        Persistence(PersistenceError),
        #[display(fmt = "{_0}")]
        Application(ApplicationError),
        #[display(fmt = "method not allowed {_0}")]
        MethodNotAllowed(Method),
    }

    impl std::error::Error for ApiError {}

    #[derive(Debug, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[display(fmt = "Response error: {error}")]
    pub struct ErrorResponse {
        #[serde(rename = "Error")]
        pub error: String,
    }

    impl From<ParseError> for ApiError {
        fn from(err: ParseError) -> Self {
            Self::Payload(err)
        }
    }

    impl From<serde_json::Error> for ApiError {
        fn from(err: serde_json::Error) -> Self {
            Self::Decode(err)
        }
    }

    impl From<PersistenceError> for ApiError {
        fn from(err: PersistenceError) -> Self {
            Self::Persistence(err)
        }
    }

    impl From<ApplicationError> for ApiError {
        fn from(err: ApplicationError) -> Self {
            match err {
                ApplicationError::Persistence(err) => Self::Persistence(err),
                err => Self::Application(err),
            }
        }
    }

    impl Piece for ApiError {
        fn render(self, res: &mut Response) {
            match &self {
                ApiError::Persistence(err) if !err.is_not_found() => {
                    tracing::warn!("request failed on storage: {err}")
                }
                err => tracing::debug!("request failed: {err}"),
            }

            res.set_status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: self.to_string(),
            }));
        }
    }

    #[cfg(test)]
    mod tests {
        use pretty_assertions::assert_eq;

        use super::*;

        #[test]
        fn error_response_uses_capitalized_key() {
            let body = ErrorResponse {
                error: "account not found".into(),
            };

            assert_eq!(
                serde_json::to_string(&body).unwrap(),
                r#"{"Error":"account not found"}"#
            );
        }

        #[test]
        fn application_errors_keep_storage_kinds_apart() {
            let err = ApiError::from(ApplicationError::from(PersistenceError::NotFound));
            assert!(matches!(err, ApiError::Persistence(PersistenceError::NotFound)));

            let err = ApiError::from(ApplicationError::BalanceOverflow {
                balance: 1,
                amount: i64::MAX,
            });
            assert!(matches!(err, ApiError::Application(_)));
            assert!(err.to_string().starts_with("balance overflow"));
        }

        #[test]
        fn method_not_allowed_names_the_method() {
            let err = ApiError::MethodNotAllowed(Method::PUT);
            assert_eq!(err.to_string(), "method not allowed PUT");
        }

        #[test]
        fn invalid_id_keeps_the_raw_value() {
            let source = "abc".parse::<i64>().unwrap_err();
            let err = ApiError::InvalidId {
                value: "abc".into(),
                source,
            };
            assert_eq!(
                err.to_string(),
                "invalid account id \"abc\": invalid digit found in string"
            );
        }
    }
}
