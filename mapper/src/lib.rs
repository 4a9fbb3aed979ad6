//! Typed object-to-object mapping.
//!
//! A [`Registry`] stores conversion functions per (source, destination) type
//! pair. A [`Mapper`] resolves `map::<S, D>` against the registry and falls
//! back to copying same-named public fields when nothing is registered.
//!
//! ```
//! use mapper::{Mapper, Record, Registry};
//! use std::sync::Arc;
//!
//! #[derive(Default, Record)]
//! pub struct Person {
//!     pub name: String,
//!     pub age: u32,
//! }
//!
//! #[derive(Default, Record)]
//! pub struct PersonDto {
//!     pub id: u64,
//!     pub name: String,
//!     pub age: u32,
//! }
//!
//! let mapper = Mapper::new(Arc::new(Registry::new()));
//! let dto: PersonDto = mapper.map(&Person { name: "Ada".into(), age: 30 }).unwrap();
//!
//! assert_eq!(dto.name, "Ada");
//! assert_eq!(dto.age, 30);
//! assert_eq!(dto.id, 0);
//! ```

extern crate self as mapper;

pub use error::MapError;
pub use fallback::{CopyPlan, auto_map, plan};
pub use r#macro::Record;
pub use resolver::{Fallback, Mapper, MapperBuilder};
pub use profile::Profile;
pub use record::{Field, FieldValue, Record};
pub use registry::{Converter, Registry, TypePair};
pub use sink::{DiagnosticSink, NullSink, TracingSink};

mod fallback;
mod profile;
mod record;
mod registry;
mod resolver;
mod sink;
