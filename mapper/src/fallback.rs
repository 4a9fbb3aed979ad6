use crate::record::Record;
use error::MapError;
use tracing::trace;

/// What [`auto_map`] would do for `S -> D`, derived from the field descriptors alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyPlan {
    /// Same name, writable, same type.
    pub copied: Vec<&'static str>,
    /// Same name and writable but a different type, one `TypeMismatch` each.
    pub mismatched: Vec<MapError>,
    /// No writable counterpart in the destination.
    pub skipped: Vec<&'static str>,
}

impl CopyPlan {
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty()
    }
}

pub fn plan<S: Record, D: Record>() -> CopyPlan {
    let mut plan = CopyPlan::default();
    for field in S::fields() {
        match D::field(field.name).filter(|target| target.writable) {
            Some(target) if target.accepts(field) => plan.copied.push(field.name),
            Some(target) => plan.mismatched.push(MapError::TypeMismatch {
                field: field.name,
                expected: target.type_name,
                found: field.type_name,
            }),
            None => plan.skipped.push(field.name),
        }
    }
    plan
}

/// Builds a default `D` and assigns every public field it shares by name with `source`.
///
/// Values are cloned as they are, a field whose types differ fails the whole call
/// with `TypeMismatch`. Fields present on one side only are left alone.
pub fn auto_map<S: Record, D: Record>(source: &S) -> Result<D, MapError> {
    let mut destination = D::instantiate().ok_or_else(MapError::unsupported::<D>)?;

    for field in S::fields() {
        let Some(target) = D::field(field.name) else {
            trace!(field = field.name, "no counterpart, skipping");
            continue;
        };
        if !target.writable {
            trace!(field = field.name, "read-only in destination, skipping");
            continue;
        }
        let Some(value) = source.read(field.name) else {
            continue;
        };
        destination.write(field.name, value)?;
        trace!(field = field.name, "copied");
    }

    Ok(destination)
}
