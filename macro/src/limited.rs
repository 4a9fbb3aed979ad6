use proc_macro::TokenStream;
use quote::quote;
use std::time::Duration;
use syn::Expr::Lit;
use syn::Lit::Int;
use syn::punctuated::Punctuated;
use syn::{Attribute, Ident, ItemFn, Meta, Token, parse_macro_input};

const DEFAULT_LIMIT: Duration = Duration::from_millis(1000);

pub fn limited_impl(args: TokenStream, item: TokenStream) -> TokenStream {
    let args: Punctuated<Meta, Token![,]> =
        parse_macro_input!(args with Punctuated::parse_terminated);
    let duration = match parse_limit(&args) {
        Ok(duration) => duration,
        Err(err) => return err.to_compile_error().into(),
    };

    let mut input = parse_macro_input!(item as ItemFn);
    let original_fn_name = input.sig.ident.clone();

    let new_fn_name = Ident::new(
        &format!("_timed_{}", original_fn_name),
        original_fn_name.span(),
    );

    let helper_fn_name = Ident::new(
        &format!("_timed_helper_{}", original_fn_name),
        original_fn_name.span(),
    );

    // the wrapper takes over the original name and attributes (#[test], ...)
    input.sig.ident = new_fn_name.clone();
    let attributes: Vec<Attribute> = input.attrs.drain(..).collect();

    let duration_ms = duration.as_millis() as u64;

    let generated = quote! {
        #(#attributes)*
        fn #original_fn_name() {
            let start = ::std::time::Instant::now();
            let duration_limit = ::std::time::Duration::from_millis(#duration_ms);

            let finished = ::std::sync::Arc::new(::std::sync::atomic::AtomicBool::new(false));
            let finished_clone = finished.clone();

            let handle = ::std::thread::Builder::new()
                .name("limited_runner".to_string())
                .spawn(|| #helper_fn_name(finished_clone))
                .unwrap();

            while !finished.load(::std::sync::atomic::Ordering::SeqCst) && !handle.is_finished() {
                if start.elapsed() > duration_limit {
                    panic!(
                        "Test duration of {:?} exceeded the limit of {:?}",
                        start.elapsed(),
                        duration_limit
                    );
                }
                ::std::thread::sleep(::std::time::Duration::from_millis(10));
            }
            handle.join().unwrap();
        }

        fn #helper_fn_name(flag: ::std::sync::Arc<::std::sync::atomic::AtomicBool>) {
            #new_fn_name();
            flag.store(true, ::std::sync::atomic::Ordering::SeqCst);
        }

        #input
    };

    generated.into()
}

/// Reads `ms = ..`, `s = ..` or `min = ..` from the attribute arguments.
fn parse_limit(args: &Punctuated<Meta, Token![,]>) -> syn::Result<Duration> {
    let Some(Meta::NameValue(nv)) = args.first() else {
        return Ok(DEFAULT_LIMIT);
    };
    let Some(ident) = nv.path.get_ident() else {
        return Err(syn::Error::new_spanned(&nv.path, "expected `ms`, `s` or `min`"));
    };
    let Lit(expr_lit) = &nv.value else {
        return Err(syn::Error::new_spanned(&nv.value, "expected an integer literal"));
    };
    let Int(lit_int) = &expr_lit.lit else {
        return Err(syn::Error::new_spanned(&expr_lit.lit, "expected an integer literal"));
    };
    let num: u64 = lit_int.base10_parse()?;

    match ident.to_string().as_str() {
        "ms" => Ok(Duration::from_millis(num)),
        "s" => Ok(Duration::from_secs(num)),
        "min" => Ok(Duration::from_secs(num * 60)),
        _ => Err(syn::Error::new_spanned(ident, "expected `ms`, `s` or `min`")),
    }
}
