//! Procedural macros for the `city-tsp` workspace.
//!
//! - `CliOptions`: `--name value` / `--name=value` / `--[no-]flag` parsing for an
//!   options struct.
//! - `CliValue`: string spellings for unit enums used as option values.
//! - `KvDisplay`: aligned `key = value` rendering for logging option structs.
//! - `#[timer]`: info-level wall time of a function.
//!
//! Generated code refers to `crate::Error` and `crate::Result`, so the deriving crate
//! must provide both.

mod attrs;
mod cli_options;
mod cli_value;
mod kv_display;
mod timer;
mod utils;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

#[proc_macro_attribute]
pub fn timer(attr: TokenStream, item: TokenStream) -> TokenStream {
    timer::timer_inner(attr, item)
}

#[proc_macro_derive(CliOptions, attributes(cli))]
pub fn derive_cli_options(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    finish(cli_options::expand(&input))
}

#[proc_macro_derive(CliValue, attributes(cli_value, cli))]
pub fn derive_cli_value(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    finish(cli_value::expand(&input))
}

#[proc_macro_derive(KvDisplay, attributes(kv))]
pub fn derive_kv_display(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    finish(kv_display::expand(&input))
}

fn finish(expanded: syn::Result<proc_macro2::TokenStream>) -> TokenStream {
    expanded.unwrap_or_else(syn::Error::into_compile_error).into()
}
