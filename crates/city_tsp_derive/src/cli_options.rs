use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, LitStr};

use crate::{
    attrs::{self, OptionField},
    utils,
};

/// Generates `split_arg` and `apply_cli_option` for an options struct.
///
/// `apply_cli_option` returns `Ok(false)` for names it does not own, so callers can
/// layer their own handling for anything else.
pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let fields = attrs::named_fields(input, "CliOptions")?;
    let mut arms = Vec::new();
    for field in &fields.named {
        if let Some(option) = OptionField::parse(field)? {
            arms.extend(option_arms(&option));
        }
    }

    let ident = &input.ident;
    Ok(quote! {
        impl #ident {
            /// Splits `name=value`, or takes the next argument as the value unless it is
            /// another `--option`.
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((name, value)) = raw_name.split_once('=') {
                    return (name.to_string(), Some(value.to_string()));
                }
                let value = args.next_if(|next| !next.starts_with("--"));
                (raw_name.to_string(), value)
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms)*
                    _ => Ok(false),
                }
            }
        }
    })
}

fn option_arms(option: &OptionField) -> Vec<TokenStream> {
    let field = &option.ident;
    let long = LitStr::new(&option.long, field.span());

    if option.flag {
        let negated = LitStr::new(&format!("no-{}", option.long), field.span());
        let parse_flag = utils::flag_value_expr();
        return vec![
            quote! {
                #long => {
                    self.#field = #parse_flag;
                    Ok(true)
                }
            },
            quote! {
                #negated => {
                    if value.is_some() {
                        return Err(crate::Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    self.#field = false;
                    Ok(true)
                }
            },
        ];
    }

    let raw = format_ident!("raw");
    let parse_value = utils::value_parse_expr(&raw, &option.ty, option.parse_with.as_ref());
    vec![quote! {
        #long => {
            let #raw = value.ok_or_else(|| {
                crate::Error::invalid_input(format!("Missing value for --{name}"))
            })?;
            self.#field = #parse_value;
            Ok(true)
        }
    }]
}
