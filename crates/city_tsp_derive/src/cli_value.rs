use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, spanned::Spanned};

use crate::attrs::{self, ValueVariant};

/// Generates `VARIANTS`, a case-insensitive `parse`, `as_str` and `Display` for a
/// unit-only enum.
pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "CliValue can only be derived for enums",
        ));
    };

    let option = attrs::value_option_name(input)?;
    let variants = data
        .variants
        .iter()
        .map(ValueVariant::parse)
        .collect::<syn::Result<Vec<_>>>()?;

    let expected = variants
        .iter()
        .map(|variant| variant.canonical.as_str())
        .collect::<Vec<_>>()
        .join("|");
    let idents: Vec<_> = variants.iter().map(|variant| &variant.ident).collect();
    let canonicals: Vec<_> = variants.iter().map(|variant| &variant.canonical).collect();
    let parse_arms = variants.iter().map(|variant| {
        let ident = &variant.ident;
        let spellings = variant.spellings();
        quote! { #(#spellings)|* => Ok(Self::#ident), }
    });

    let ident = &input.ident;
    Ok(quote! {
        impl #ident {
            /// Every variant, in declaration order.
            pub const VARIANTS: &'static [Self] = &[#(Self::#idents),*];

            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option,
                        raw,
                        #expected
                    ))),
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    #(Self::#idents => #canonicals,)*
                }
            }
        }

        impl std::fmt::Display for #ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    })
}
