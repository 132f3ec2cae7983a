use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Path, Type, TypePath};

/// Parses `raw` into the field type, through `parse_with` when given. Expects `name`
/// in scope for error messages.
pub fn value_parse_expr(raw: &Ident, ty: &Type, parse_with: Option<&Path>) -> TokenStream {
    match parse_with {
        Some(parse_with) => quote! { #parse_with(&#raw)? },
        None => quote! {
            #raw.parse::<#ty>().map_err(|e| {
                crate::Error::invalid_input(format!("Invalid value for --{name}: {} ({e})", #raw))
            })?
        },
    }
}

/// Bare `--flag` means true; `--flag=<bool>` accepts the usual spellings.
pub fn flag_value_expr() -> TokenStream {
    quote! {
        match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None => true,
            Some("1" | "true" | "yes" | "on") => true,
            Some("0" | "false" | "no" | "off") => false,
            Some(_) => {
                return Err(crate::Error::invalid_input(format!(
                    "Invalid boolean for --{name}: {} (expected true/false)",
                    value.as_deref().unwrap_or_default()
                )));
            }
        }
    }
}

pub fn is_bool(ty: &Type) -> bool {
    matches!(ty, Type::Path(TypePath { qself: None, path }) if path.is_ident("bool"))
}

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.char_indices() {
        if ch.is_ascii_uppercase() && idx != 0 {
            out.push('-');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}
