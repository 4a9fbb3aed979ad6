use crate::registry::Registry;
use std::any::type_name;

/// A group of related mapping registrations, applied with [`Registry::apply`].
pub trait Profile {
    fn configure(&self, registry: &Registry);

    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

impl<F: Fn(&Registry)> Profile for F {
    fn configure(&self, registry: &Registry) {
        self(registry)
    }
}
