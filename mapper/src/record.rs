use error::MapError;
use std::any::{Any, TypeId, type_name};
use std::fmt::{Debug, Formatter};

/// Describes one public field of a [`Record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub writable: bool,
}

impl Field {
    pub fn new<T: Any>(name: &'static str, writable: bool) -> Self {
        Field {
            name,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            writable,
        }
    }

    /// Whether a value read from `source` can be assigned to this field as is.
    pub fn accepts(&self, source: &Field) -> bool {
        self.writable && self.type_id == source.type_id
    }
}

/// An owned, type-erased field value on its way from a source to a destination.
pub struct FieldValue {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl FieldValue {
    pub fn new<T: Any + Send>(value: T) -> Self {
        FieldValue {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Unwraps the value as `T`, the declared type of `field`. No coercion is attempted.
    pub fn take<T: Any>(self, field: &'static str) -> Result<T, MapError> {
        let found = self.type_name;
        self.value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| MapError::TypeMismatch {
                field,
                expected: type_name::<T>(),
                found,
            })
    }
}

impl Debug for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A plain data holder whose public fields can be enumerated, read and written by name.
///
/// Usually derived with `#[derive(Record)]`.
pub trait Record: Any + Send + Sync + Sized {
    /// The participating fields, in declaration order.
    fn fields() -> &'static [Field];

    fn field(name: &str) -> Option<&'static Field> {
        Self::fields().iter().find(|field| field.name == name)
    }

    /// Clones the value of a readable field.
    fn read(&self, name: &str) -> Option<FieldValue>;

    /// Assigns a writable field, failing with `TypeMismatch` if the value has another type.
    fn write(&mut self, name: &str, value: FieldValue) -> Result<(), MapError>;

    /// A default-initialized instance, `None` if the type cannot be constructed without arguments.
    fn instantiate() -> Option<Self>;
}
