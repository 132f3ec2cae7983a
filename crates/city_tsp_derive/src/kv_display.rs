use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, LitStr};

use crate::attrs::{self, KvField, KvMode};

/// `Display` as one aligned `key = value` line per field, each on its own tab-indented
/// line after a leading newline, so the whole struct reads well after a log prefix.
pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let fields = attrs::named_fields(input, "KvDisplay")?;
    let mut kept = Vec::new();
    for field in &fields.named {
        if let Some(kv) = KvField::parse(field)? {
            kept.push(kv);
        }
    }

    let width = kept.iter().map(|kv| kv.key.len()).max().unwrap_or(0);
    let template: String = kept
        .iter()
        .map(|kv| format!("\n\t{:<width$} = {{}}", kv.key))
        .collect();
    let template = LitStr::new(&template, input.ident.span());
    let values = kept.iter().map(value_expr);

    let ident = &input.ident;
    Ok(quote! {
        impl std::fmt::Display for #ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, #template, #(#values),*)
            }
        }
    })
}

fn value_expr(kv: &KvField) -> TokenStream {
    let field = &kv.ident;
    match kv.mode {
        KvMode::Display => quote! { &self.#field },
        KvMode::Len => quote! { self.#field.len() },
        KvMode::Path => quote! { self.#field.display() },
        KvMode::OrDash => quote! {
            if self.#field.is_empty() { "-" } else { self.#field.as_str() }
        },
    }
}
