use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, ReturnType, parse_macro_input};

pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut func = parse_macro_input!(item as ItemFn);
    let label = if attr.is_empty() {
        func.sig.ident.to_string()
    } else {
        parse_macro_input!(attr as LitStr).value()
    };

    if func.sig.asyncness.is_some() {
        return syn::Error::new_spanned(&func.sig, "timer does not support async functions")
            .to_compile_error()
            .into();
    }

    let ret_ty = match &func.sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    };
    let body = &func.block;

    // The closure keeps early `return` and `?` inside the measured span.
    let wrapped: syn::Block = syn::parse_quote! {{
        let __timer_start = std::time::Instant::now();
        #[allow(clippy::redundant_closure_call)]
        let __timer_result: #ret_ty = (move || #body)();
        log::info!(
            "{}: time={:.3}s",
            #label,
            __timer_start.elapsed().as_secs_f64()
        );
        __timer_result
    }};
    func.block = Box::new(wrapped);

    TokenStream::from(quote! { #func })
}
