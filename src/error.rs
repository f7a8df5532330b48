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

impl From<sqlx::error::Error> for UnknownError {
    fn from(err: sqlx::error::Error) -> Self {
        Self::new(err.into())
    }
}

impl From<minijinja::Error> for UnknownError {
    fn from(err: minijinja::Error) -> Self {
        Self::new(err.into())
    }
}

pub mod app {
    use derive_more::Display;
    use salvo::{prelude::StatusError, writer::Text, Piece, Response};

    use super::{
        http::{BadRequest, ErrorResponse},
        persistence::PersistenceError,
        resource::NotFoundError,
        view::RenderError,
    };

    /// Failures that end a request with an error status.
    ///
    /// Validation failures are not part of this set, they are recovered by
    /// re-rendering the submitted form.
    #[derive(Debug, Display)]
    pub enum ApplicationError {
        BadRequest(BadRequest),
        NotFound(NotFoundError),
        Persistence(PersistenceError),
        Render(RenderError),
    }

    impl std::error::Error for ApplicationError {}

    impl From<BadRequest> for ApplicationError {
        fn from(err: BadRequest) -> Self {
            Self::BadRequest(err)
        }
    }

    impl From<NotFoundError> for ApplicationError {
        fn from(err: NotFoundError) -> Self {
            Self::NotFound(err)
        }
    }

    impl From<PersistenceError> for ApplicationError {
        fn from(err: PersistenceError) -> Self {
            match err {
                PersistenceError::NotFound(not_found) => Self::NotFound(not_found),
                err => Self::Persistence(err),
            }
        }
    }

    impl From<RenderError> for ApplicationError {
        fn from(err: RenderError) -> Self {
            Self::Render(err)
        }
    }

    impl Piece for ApplicationError {
        fn render(self, res: &mut Response) {
            let status = match &self {
                ApplicationError::BadRequest(_) => StatusError::bad_request(),
                ApplicationError::NotFound(_) => StatusError::not_found(),
                ApplicationError::Persistence(_) => StatusError::service_unavailable(),
                ApplicationError::Render(_) => StatusError::internal_server_error(),
            };
            res.render(Text::Plain(
                ErrorResponse::from_status_error(&status, self).to_string(),
            ));
            res.set_status_error(status);
        }
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

    use super::{resource::NotFoundError, service::DispatchError, UnknownError};

    pub type SqlState = String;

    #[derive(Debug, Display)]
    pub enum PersistenceError {
        #[display(fmt = "database persistence error: SQLSTATE {_0:?}")]
        Database(Option<SqlState>),
        #[display(fmt = "persistence layer connection error: {_0}")]
        Connection(DispatchError),
        #[display(fmt = "PersistenceError data not found: {_0}")]
        NotFound(NotFoundError),
        #[display(fmt = "PersistenceError resource without identity")]
        MissingIdentity,
        #[display(fmt = "PersistenceError decoding data")]
        DecodeData,
        #[display(fmt = "PersistenceError data migration")]
        DataMigration,
        #[display(fmt = "unknown persistence error: {_0}")]
        Unknown(UnknownError),
    }

    impl std::error::Error for PersistenceError {}

    impl From<NotFoundError> for PersistenceError {
        fn from(err: NotFoundError) -> Self {
            Self::NotFound(err)
        }
    }

    type SqlxError = sqlx::error::Error;

    impl From<SqlxError> for PersistenceError {
        fn from(err: SqlxError) -> Self {
            match err {
                SqlxError::Configuration(_) => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::InvalidInput.into()))
                }
                SqlxError::Database(db) => Self::Database(db.code().map(|code| code.into())),
                SqlxError::Io(io) => Self::Connection(DispatchError::IO(io)),
                SqlxError::Tls(_) => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::ConnectionRefused.into()))
                }
                SqlxError::Protocol(msg) => Self::Connection(DispatchError::IO(io::Error::new(
                    io::ErrorKind::InvalidData,
                    msg,
                ))),
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
                    tracing::error!("sqlx background worker error, {err}");
                    Self::Connection(DispatchError::Unknown(err.into()))
                }
                SqlxError::Migrate(_) => Self::DataMigration,
                _ => PersistenceError::Unknown(err.into()),
            }
        }
    }
}

pub mod resource {
    use derive_more::Display;
    use serde::Serialize;

    use crate::base::ResourceID;

    #[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize)]
    pub enum ValidationErrorKind {
        /// When a required property is missing.
        Required,

        /// Maximum inclusive string length.
        MaxLength(u64),
        /// Minimum inclusive string length.
        MinLength(u64),
        /// When the input doesn't match to a pattern.
        #[display(fmt = "Pattern({_0})")]
        Pattern(String),

        /// Inclusive lower bound exceeded.
        Minimum(i64),
        /// Inclusive higher bound exceeded.
        Maximum(i64),

        /// The input value doesn't match one or multiple required types.
        InvalidType,
    }

    impl std::error::Error for ValidationErrorKind {}

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ValidationError<R> {
        /// Resource value
        pub resource: R,
        /// Name of the resource
        pub resource_type: &'static str,
        /// Invalid resource fields
        pub fields: Vec<ValidationFieldError>,
    }

    impl<R> ValidationError<R> {
        pub fn from_resource(resource: R, fields: Vec<ValidationFieldError>) -> Self
        where
            R: ResourceID,
        {
            Self {
                resource,
                resource_type: R::resource_id(),
                fields,
            }
        }

        /// Whether any violation was recorded against `path`.
        #[cfg(test)]
        pub fn has_field(&self, path: &str) -> bool {
            self.fields.iter().any(|field| field.path == path)
        }
    }

    impl<R: std::fmt::Debug> std::error::Error for ValidationError<R> {}

    impl<R> std::fmt::Display for ValidationError<R> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_fmt(format_args!(
                "Invalid resource {}, fields {:?}",
                self.resource_type, self.fields
            ))
        }
    }

    #[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize)]
    #[display(fmt = "{path}: {value:?}, {kind:?}")]
    pub struct ValidationFieldError {
        /// Resource field path with invalid value
        pub path: String,
        /// Displayed invalid value
        pub value: String,
        /// Value type id
        pub type_id: &'static str,
        /// Kind of validation error
        pub kind: ValidationErrorKind,
        /// Message rendered next to the offending field
        pub message: String,
    }

    impl std::error::Error for ValidationFieldError {}

    impl ValidationFieldError {
        pub fn from_resource<T>(
            value: String,
            path: String,
            kind: ValidationErrorKind,
            message: String,
        ) -> Self
        where
            T: ResourceID,
        {
            Self {
                path,
                type_id: T::resource_id(),
                value,
                kind,
                message,
            }
        }
    }

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    #[display(fmt = "Resource {resource_type} of id {resource_id} not found")]
    pub struct NotFoundError {
        /// Resource id
        pub resource_id: i64,
        /// Name of the resource
        pub resource_type: &'static str,
    }

    impl NotFoundError {
        pub fn from_resource<R: ResourceID>(resource_id: i64) -> Self {
            Self {
                resource_id,
                resource_type: R::resource_id(),
            }
        }
    }

    impl std::error::Error for NotFoundError {}
}

pub mod view {
    use derive_more::Display;

    use super::UnknownError;

    #[derive(Debug, Display)]
    pub enum RenderError {
        #[display(fmt = "view {_0} has no template")]
        MissingTemplate(&'static str),
        #[display(fmt = "rendering view {view}: {source}")]
        Template {
            view: &'static str,
            source: UnknownError,
        },
    }

    impl std::error::Error for RenderError {}
}

pub mod http {
    use derive_more::Display;
    use salvo::{http::ParseError, prelude::StatusError};

    #[derive(Debug, Display, Clone)]
    pub enum BadRequest {
        InvalidContent,
        #[display(fmt = "InvalidPathParam({_0})")]
        InvalidPathParam(&'static str),
    }

    impl std::error::Error for BadRequest {}

    #[derive(Debug, Display, Clone)]
    #[display(fmt = "{title}: {message}")]
    pub struct ErrorResponse<T> {
        pub title: String,
        pub message: String,
        pub error: T,
    }

    impl<T> ErrorResponse<T> {
        pub fn from_status_error(status: &StatusError, err: T) -> Self {
            Self {
                title: status.name.clone(),
                message: status
                    .summary
                    .clone()
                    .unwrap_or_else(|| status.name.clone()),
                error: err,
            }
        }
    }

    impl From<ParseError> for BadRequest {
        fn from(_: ParseError) -> Self {
            BadRequest::InvalidContent
        }
    }
}
