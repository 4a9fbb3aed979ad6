use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("invalid argument: `{argument}` must be present")]
    InvalidArgument { argument: &'static str },

    #[error("unsupported: {type_name} cannot be default-constructed")]
    Unsupported { type_name: &'static str },

    #[error("type mismatch on field `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("no mapping registered from {source_type} to {destination_type}")]
    NotRegistered {
        source_type: &'static str,
        destination_type: &'static str,
    },

    #[error("{type_name} has no writable field `{field}`")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    #[error("conversion error: {0}")]
    Conversion(String),
}

impl MapError {
    pub fn invalid_argument(argument: &'static str) -> Self {
        MapError::InvalidArgument { argument }
    }

    pub fn unsupported<T: ?Sized>() -> Self {
        MapError::Unsupported {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn not_registered<S: ?Sized, D: ?Sized>() -> Self {
        MapError::NotRegistered {
            source_type: std::any::type_name::<S>(),
            destination_type: std::any::type_name::<D>(),
        }
    }
}

impl From<String> for MapError {
    fn from(s: String) -> Self {
        MapError::Conversion(s)
    }
}

impl From<&str> for MapError {
    fn from(s: &str) -> Self {
        MapError::Conversion(s.to_string())
    }
}
