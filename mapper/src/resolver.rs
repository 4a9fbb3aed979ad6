use crate::fallback;
use crate::profile::Profile;
use crate::record::Record;
use crate::registry::{Registry, TypePair};
use crate::sink::{DiagnosticSink, TracingSink};
use error::MapError;
use std::sync::Arc;

/// What [`Mapper::map`] does for a type pair without a registered converter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fallback {
    /// Copy same-named public fields.
    #[default]
    Auto,
    /// Fail with `NotRegistered`.
    Deny,
}

/// Resolves mappings against a shared [`Registry`].
#[derive(Clone)]
pub struct Mapper {
    registry: Arc<Registry>,
    sink: Arc<dyn DiagnosticSink>,
    fallback: Fallback,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Mapper {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::builder().registry(registry).build()
    }

    pub fn builder() -> MapperBuilder {
        MapperBuilder::default()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    /// Maps `source` to a new `D`.
    ///
    /// A converter registered for `S -> D` always wins and its result is returned
    /// unchanged. Otherwise the same-name field copy runs, unless the mapper denies
    /// fallbacks. Failures are reported to the sink and returned.
    pub fn map<S: Record, D: Record>(&self, source: &S) -> Result<D, MapError> {
        let result = match self.registry.lookup::<S, D>() {
            Some(converter) => converter(source),
            None => match self.fallback {
                Fallback::Auto => fallback::auto_map(source),
                Fallback::Deny => Err(MapError::not_registered::<S, D>()),
            },
        };
        result.inspect_err(|err| self.report::<S, D>(err))
    }

    /// [`Mapper::map`] for a source that may be absent, `None` fails with `InvalidArgument`.
    pub fn map_optional<S: Record, D: Record>(&self, source: Option<&S>) -> Result<D, MapError> {
        let source = source.ok_or(MapError::invalid_argument("source"))?;
        self.map(source)
    }

    /// Maps through a registered converter only, for types that are not records.
    pub fn convert<S: 'static, D: 'static>(&self, source: &S) -> Result<D, MapError> {
        let converter = self
            .registry
            .lookup::<S, D>()
            .ok_or_else(MapError::not_registered::<S, D>)?;
        converter(source).inspect_err(|err| self.report::<S, D>(err))
    }

    /// Checks up front whether `map::<S, D>` can succeed, without a source value.
    ///
    /// Registered pairs always pass. For the fallback path this fails with
    /// `Unsupported` or with the first `TypeMismatch` the copy would hit.
    pub fn check<S: Record, D: Record>(&self) -> Result<(), MapError> {
        if self.registry.contains::<S, D>() {
            return Ok(());
        }
        if self.fallback == Fallback::Deny {
            return Err(MapError::not_registered::<S, D>());
        }
        if D::instantiate().is_none() {
            return Err(MapError::unsupported::<D>());
        }
        match fallback::plan::<S, D>().mismatched.into_iter().next() {
            Some(mismatch) => Err(mismatch),
            None => Ok(()),
        }
    }

    fn report<S: 'static, D: 'static>(&self, error: &MapError) {
        let message = format!("mapping {} failed", TypePair::of::<S, D>());
        self.sink.report(&message, error);
    }
}

/// Configures a [`Mapper`]. Without a registry an empty one is created.
#[derive(Default)]
pub struct MapperBuilder {
    registry: Option<Arc<Registry>>,
    sink: Option<Arc<dyn DiagnosticSink>>,
    fallback: Fallback,
    profiles: Vec<Box<dyn Profile>>,
}

impl MapperBuilder {
    pub fn registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn sink<T: DiagnosticSink + 'static>(mut self, sink: T) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn shared_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Applied to the registry in order when the mapper is built.
    pub fn profile<P: Profile + 'static>(mut self, profile: P) -> Self {
        self.profiles.push(Box::new(profile));
        self
    }

    pub fn build(self) -> Mapper {
        let registry = self.registry.unwrap_or_default();
        for profile in &self.profiles {
            registry.apply(profile.as_ref());
        }
        Mapper {
            registry,
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink)),
            fallback: self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{DiagnosticSink, Fallback, MapError, Mapper, NullSink, Record, Registry};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tracing_test::traced_test;

    #[derive(Debug, Default, PartialEq, Record)]
    pub struct Person {
        pub name: String,
        pub age: u32,
    }

    #[derive(Debug, Default, PartialEq, Record)]
    pub struct PersonDto {
        pub id: u64,
        pub name: String,
        pub age: u32,
    }

    #[derive(Debug, Default, PartialEq, Record)]
    pub struct Contact {
        pub full_name: String,
    }

    #[derive(Debug, Default, PartialEq, Record)]
    pub struct Loose {
        pub age: i64,
    }

    #[derive(Debug, Record)]
    #[record(no_default)]
    pub struct Pinned {
        pub name: String,
    }

    #[derive(Default)]
    struct RecordingSink {
        reports: Mutex<Vec<(String, MapError)>>,
    }

    impl DiagnosticSink for RecordingSink {
        fn report(&self, message: &str, error: &MapError) {
            self.reports
                .lock()
                .push((message.to_string(), error.clone()));
        }
    }

    fn ada() -> Person {
        Person {
            name: "Ada".to_string(),
            age: 30,
        }
    }

    #[test]
    fn auto_maps_without_registration() {
        let mapper = Mapper::default();
        let dto: PersonDto = mapper.map(&ada()).unwrap();

        assert_eq!(dto.name, "Ada");
        assert_eq!(dto.age, 30);
        assert_eq!(dto.id, 0);
    }

    #[test]
    fn registered_converter_wins() {
        let registry = Arc::new(Registry::new());
        registry.register(|p: &Person| Contact {
            full_name: p.name.clone(),
        });
        registry.register(|p: &Person| PersonDto {
            id: 1,
            name: p.name.to_uppercase(),
            age: p.age,
        });
        let mapper = Mapper::new(registry);

        let contact: Contact = mapper.map(&ada()).unwrap();
        assert_eq!(contact.full_name, "Ada");

        let dto: PersonDto = mapper.map(&ada()).unwrap();
        assert_eq!(dto.name, "ADA");
        assert_eq!(dto.id, 1);
    }

    #[test]
    fn re_registration_replaces_converter() {
        let mapper = Mapper::default();
        mapper.registry().register(|_: &Person| Contact {
            full_name: "first".to_string(),
        });
        mapper.registry().register(|_: &Person| Contact {
            full_name: "second".to_string(),
        });

        let contact: Contact = mapper.map(&ada()).unwrap();
        assert_eq!(contact.full_name, "second");
    }

    #[test]
    fn registration_after_construction_is_visible() {
        let registry = Arc::new(Registry::new());
        let mapper = Mapper::new(registry.clone());

        let before: PersonDto = mapper.map(&ada()).unwrap();
        assert_eq!(before.id, 0);

        registry.register(|p: &Person| PersonDto {
            id: 7,
            name: p.name.clone(),
            age: p.age,
        });
        let after: PersonDto = mapper.map(&ada()).unwrap();
        assert_eq!(after.id, 7);
    }

    #[test]
    fn absent_source_is_invalid() {
        let mapper = Mapper::default();

        assert_eq!(
            mapper.map_optional::<Person, PersonDto>(None),
            Err(MapError::InvalidArgument { argument: "source" })
        );
        assert_eq!(
            mapper.map_optional::<Person, Contact>(None),
            Err(MapError::InvalidArgument { argument: "source" })
        );

        let dto: PersonDto = mapper.map_optional(Some(&ada())).unwrap();
        assert_eq!(dto.age, 30);
    }

    #[test]
    fn failures_reach_the_sink() {
        let sink = Arc::new(RecordingSink::default());
        let mapper = Mapper::builder().shared_sink(sink.clone()).build();

        let err = mapper.map::<Person, Loose>(&ada()).unwrap_err();
        assert!(matches!(err, MapError::TypeMismatch { field: "age", .. }));

        let err = mapper.map::<Person, Pinned>(&ada()).unwrap_err();
        assert!(matches!(err, MapError::Unsupported { .. }));

        let reports = sink.reports.lock();
        assert_eq!(reports.len(), 2);
        assert!(reports[0].0.starts_with("mapping "));
        assert!(reports[0].0.ends_with("Loose failed"));
        assert_eq!(reports[1].1, err);
    }

    #[test]
    fn invalid_arguments_are_not_reported() {
        let sink = Arc::new(RecordingSink::default());
        let mapper = Mapper::builder().shared_sink(sink.clone()).build();

        assert!(mapper.map_optional::<Person, PersonDto>(None).is_err());
        assert!(sink.reports.lock().is_empty());
    }

    #[test]
    fn silent_sink_keeps_errors() {
        let mapper = Mapper::builder().sink(NullSink).build();
        assert!(matches!(
            mapper.map::<Person, Loose>(&ada()),
            Err(MapError::TypeMismatch { .. })
        ));
    }

    #[test]
    #[traced_test]
    fn default_sink_logs() {
        let mapper = Mapper::default();
        assert!(mapper.map::<Person, Loose>(&ada()).is_err());
        assert!(logs_contain("type mismatch on field `age`"));
    }

    #[test]
    fn fallible_converter_errors_propagate() {
        let sink = Arc::new(RecordingSink::default());
        let mapper = Mapper::builder().shared_sink(sink.clone()).build();
        mapper.registry().register_fallible(|p: &Person| {
            if p.age < 18 {
                Err(MapError::from("minors have no contact"))
            } else {
                Ok(Contact {
                    full_name: p.name.clone(),
                })
            }
        });

        let child = Person {
            name: "Kim".to_string(),
            age: 9,
        };
        assert_eq!(
            mapper.map::<Person, Contact>(&child),
            Err(MapError::Conversion("minors have no contact".to_string()))
        );
        assert_eq!(sink.reports.lock().len(), 1);
    }

    #[test]
    fn deny_fallback() {
        let mapper = Mapper::builder().fallback(Fallback::Deny).build();

        let err = mapper.map::<Person, PersonDto>(&ada()).unwrap_err();
        assert!(matches!(err, MapError::NotRegistered { .. }));

        mapper.registry().register(|p: &Person| Contact {
            full_name: p.name.clone(),
        });
        let contact: Contact = mapper.map(&ada()).unwrap();
        assert_eq!(contact.full_name, "Ada");
    }

    #[test]
    fn convert_uses_registry_only() {
        let mapper = Mapper::default();
        assert_eq!(
            mapper.convert::<u32, String>(&5),
            Err(MapError::not_registered::<u32, String>())
        );

        mapper.registry().register(|n: &u32| format!("#{n}"));
        assert_eq!(mapper.convert::<u32, String>(&5), Ok("#5".to_string()));
    }

    #[test]
    fn check_before_use() {
        let mapper = Mapper::default();

        assert_eq!(mapper.check::<Person, PersonDto>(), Ok(()));
        assert_eq!(
            mapper.check::<Person, Loose>(),
            Err(MapError::TypeMismatch {
                field: "age",
                expected: "i64",
                found: "u32"
            })
        );
        assert!(matches!(
            mapper.check::<Person, Pinned>(),
            Err(MapError::Unsupported { .. })
        ));

        mapper.registry().register(|p: &Person| Loose { age: p.age.into() });
        assert_eq!(mapper.check::<Person, Loose>(), Ok(()));
        assert_eq!(mapper.map::<Person, Loose>(&ada()), Ok(Loose { age: 30 }));
    }

    #[test]
    fn builder_applies_profiles() {
        let mapper = Mapper::builder()
            .profile(|registry: &Registry| {
                registry.register(|p: &Person| Contact {
                    full_name: format!("{} ({})", p.name, p.age),
                })
            })
            .build();

        assert_eq!(mapper.registry().len(), 1);
        let contact: Contact = mapper.map(&ada()).unwrap();
        assert_eq!(contact.full_name, "Ada (30)");
    }
}
