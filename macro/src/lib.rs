use proc_macro::TokenStream;

mod limited;
mod record;

/// A procedural macro to time a test and fail it if it exceeds a duration.
///
/// Usage:
/// ```
/// use r#macro::limited;
///
/// #[limited(s = 100)]
/// fn my_test() {
///     // ... test code
/// }
///
/// #[limited(ms = 1000)]
///  fn my_other_test() {
///     // ... test code
/// }
/// ```
#[proc_macro_attribute]
pub fn limited(args: TokenStream, item: TokenStream) -> TokenStream {
    limited::limited_impl(args, item)
}

/// Derives `mapper::Record`, exposing the `pub` named fields of a struct to the
/// fallback copier.
///
/// # Attributes
///
/// - `#[record(no_default)]` on the struct: the type has no parameterless
///   construction path, fallback mapping into it fails with `Unsupported`.
///   Without it the struct must implement `Default`.
/// - `#[record(skip)]` on a field: the field does not take part in mapping.
/// - `#[record(readonly)]` on a field: the field is read as a source but
///   never written as a destination.
///
/// Private fields are ignored. Every participating field type must be
/// `Clone + Send + 'static`.
///
/// ```ignore
/// #[derive(Default, Record)]
/// pub struct PersonDto {
///     pub name: String,
///     pub age: u32,
///     #[record(readonly)]
///     pub id: u64,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record_impl(input)
}
