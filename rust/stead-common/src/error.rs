use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn alloc(context: impl Into<String>, source: TryReserveError) -> Error {
        Error(
            ErrorKind::AllocationFailed {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn inconsistent(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Inconsistent {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("allocation failed for '{context}': {source}")]
    AllocationFailed {
        context: String,
        source: TryReserveError,
    },

    #[error("inconsistent index for '{element}': {message}")]
    Inconsistent { element: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<TryReserveError> for Error {
    fn from(e: TryReserveError) -> Self {
        Error::alloc("", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_arg_display() {
        let e = Error::invalid_arg("block_size", "block_size > 0");
        assert_eq!(e.to_string(), "invalid argument block_size: block_size > 0");
        assert!(matches!(e.kind(), ErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn test_alloc_from_try_reserve() {
        let mut v = Vec::<u64>::new();
        let source = v.try_reserve(usize::MAX).unwrap_err();
        let e: Error = source.into();
        assert!(matches!(e.into_kind(), ErrorKind::AllocationFailed { .. }));
    }

    #[test]
    fn test_inconsistent_display() {
        let e = Error::inconsistent("sparse[7]", "points past the dense array");
        assert_eq!(
            e.to_string(),
            "inconsistent index for 'sparse[7]': points past the dense array"
        );
    }
}
