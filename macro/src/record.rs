//! Implementation of `#[derive(Record)]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Attribute, Data, DeriveInput, Field, Fields, Ident, Type, Visibility, parse_macro_input};

struct RecordField<'a> {
    ident: &'a Ident,
    name: String,
    ty: &'a Type,
    readonly: bool,
}

#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    readonly: bool,
}

pub fn derive_record_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic types",
        ));
    }

    let empty = Punctuated::<Field, Comma>::new();
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => &empty,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Record requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(input, "Record only works on structs"));
        }
    };

    let no_default = parse_container_attrs(&input.attrs)?;

    let mut fields = vec![];
    for field in named {
        // only public fields take part
        if !matches!(field.vis, Visibility::Public(_)) {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        fields.push(RecordField {
            ident,
            name: ident.unraw().to_string(),
            ty: &field.ty,
            readonly: attrs.readonly,
        });
    }

    let descriptors = fields.iter().map(|f| {
        let field_name = &f.name;
        let ty = f.ty;
        let writable = !f.readonly;
        quote! { ::mapper::Field::new::<#ty>(#field_name, #writable) }
    });

    let reads = fields.iter().map(|f| {
        let field_name = &f.name;
        let ident = f.ident;
        quote! {
            #field_name => ::core::option::Option::Some(
                ::mapper::FieldValue::new(::core::clone::Clone::clone(&self.#ident))
            ),
        }
    });

    let writes = fields.iter().filter(|f| !f.readonly).map(|f| {
        let field_name = &f.name;
        let ident = f.ident;
        let ty = f.ty;
        quote! {
            #field_name => {
                self.#ident = value.take::<#ty>(#field_name)?;
                ::core::result::Result::Ok(())
            }
        }
    });

    let instantiate = if no_default {
        quote! { ::core::option::Option::None }
    } else {
        quote! { ::core::option::Option::Some(<Self as ::core::default::Default>::default()) }
    };

    Ok(quote! {
        impl ::mapper::Record for #name {
            fn fields() -> &'static [::mapper::Field] {
                static FIELDS: ::std::sync::OnceLock<::std::vec::Vec<::mapper::Field>> =
                    ::std::sync::OnceLock::new();
                FIELDS.get_or_init(|| ::std::vec![#(#descriptors),*])
            }

            fn read(&self, name: &str) -> ::core::option::Option<::mapper::FieldValue> {
                match name {
                    #(#reads)*
                    _ => ::core::option::Option::None,
                }
            }

            fn write(
                &mut self,
                name: &str,
                value: ::mapper::FieldValue,
            ) -> ::core::result::Result<(), ::mapper::MapError> {
                match name {
                    #(#writes)*
                    _ => {
                        ::core::mem::drop(value);
                        ::core::result::Result::Err(::mapper::MapError::UnknownField {
                            type_name: ::core::any::type_name::<Self>(),
                            field: ::std::string::ToString::to_string(name),
                        })
                    }
                }
            }

            fn instantiate() -> ::core::option::Option<Self> {
                #instantiate
            }
        }
    })
}

/// `#[record(no_default)]`
fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut no_default = false;
    for attr in attrs {
        if attr.path().is_ident("record") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("no_default") {
                    no_default = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported record attribute, expected `no_default`"))
                }
            })?;
        }
    }
    Ok(no_default)
}

/// `#[record(skip)]`, `#[record(readonly)]`
fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs {
        if attr.path().is_ident("record") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else if meta.path.is_ident("readonly") {
                    parsed.readonly = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported field attribute, expected `skip` or `readonly`"))
                }
            })?;
        }
    }
    Ok(parsed)
}
