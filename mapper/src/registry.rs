use crate::profile::Profile;
use dashmap::DashMap;
use error::MapError;
use std::any::{Any, TypeId, type_name};
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

/// A stored conversion function from `S` to `D`.
pub type Converter<S, D> = Arc<dyn Fn(&S) -> Result<D, MapError> + Send + Sync>;

/// Ordered (source, destination) key of a mapping.
#[derive(Clone, Copy, Debug)]
pub struct TypePair {
    source: TypeId,
    destination: TypeId,
    source_name: &'static str,
    destination_name: &'static str,
}

impl TypePair {
    pub fn of<S: ?Sized + 'static, D: ?Sized + 'static>() -> Self {
        TypePair {
            source: TypeId::of::<S>(),
            destination: TypeId::of::<D>(),
            source_name: type_name::<S>(),
            destination_name: type_name::<D>(),
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source_name
    }

    pub fn destination_name(&self) -> &'static str {
        self.destination_name
    }
}

// names are for diagnostics only
impl PartialEq for TypePair {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.destination == other.destination
    }
}

impl Eq for TypePair {}

impl Hash for TypePair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.destination.hash(state);
    }
}

impl Display for TypePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source_name, self.destination_name)
    }
}

struct Entry {
    // always a `Converter<S, D>` matching the key
    converter: Box<dyn Any + Send + Sync>,
}

/// Conversion functions keyed by type pair, safe to share between threads.
///
/// One registry per process is the usual setup: build it during start-up, fill it
/// through [`Profile`]s and hand it to the [`Mapper`](crate::Mapper)s that need it.
#[derive(Default)]
pub struct Registry {
    mappings: DashMap<TypePair, Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `converter` for `S -> D`, replacing any earlier registration.
    pub fn register<S, D, F>(&self, converter: F)
    where
        S: 'static,
        D: 'static,
        F: Fn(&S) -> D + Send + Sync + 'static,
    {
        let converter: Converter<S, D> = Arc::new(move |source: &S| Ok(converter(source)));
        self.insert(converter);
    }

    /// Like [`Registry::register`] for conversions that can fail.
    pub fn register_fallible<S, D, F>(&self, converter: F)
    where
        S: 'static,
        D: 'static,
        F: Fn(&S) -> Result<D, MapError> + Send + Sync + 'static,
    {
        let converter: Converter<S, D> = Arc::new(converter);
        self.insert(converter);
    }

    /// Registers a converter that may be absent, `None` is rejected with `InvalidArgument`.
    pub fn register_optional<S, D, F>(&self, converter: Option<F>) -> Result<(), MapError>
    where
        S: 'static,
        D: 'static,
        F: Fn(&S) -> D + Send + Sync + 'static,
    {
        let converter = converter.ok_or(MapError::invalid_argument("converter"))?;
        self.register(converter);
        Ok(())
    }

    fn insert<S: 'static, D: 'static>(&self, converter: Converter<S, D>) {
        let pair = TypePair::of::<S, D>();
        let entry = Entry {
            converter: Box::new(converter),
        };
        if self.mappings.insert(pair, entry).is_some() {
            debug!(%pair, "replaced mapping");
        } else {
            debug!(%pair, "registered mapping");
        }
    }

    /// The converter registered for `S -> D`, if any.
    pub fn lookup<S: 'static, D: 'static>(&self) -> Option<Converter<S, D>> {
        let entry = self.mappings.get(&TypePair::of::<S, D>())?;
        entry.converter.downcast_ref::<Converter<S, D>>().cloned()
    }

    pub fn contains<S: 'static, D: 'static>(&self) -> bool {
        self.mappings.contains_key(&TypePair::of::<S, D>())
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all registered pairs, sorted by type names.
    pub fn type_pairs(&self) -> Vec<TypePair> {
        let mut pairs: Vec<TypePair> = self.mappings.iter().map(|entry| *entry.key()).collect();
        pairs.sort_by_key(|pair| (pair.source_name, pair.destination_name));
        pairs
    }

    /// Lets `profile` register its mappings.
    pub fn apply<P: Profile + ?Sized>(&self, profile: &P) {
        let before = self.len();
        profile.configure(self);
        debug!(
            profile = profile.name(),
            added = self.len().saturating_sub(before),
            "applied mapping profile"
        );
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.type_pairs().iter().map(ToString::to_string))
            .finish()
    }
}
