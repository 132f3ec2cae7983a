//! Attribute parsing shared by the derives. Each parsed type is the complete view of
//! one field or variant, so code generation never touches raw attributes.

use syn::{
    Attribute, Data, DeriveInput, Field, Fields, FieldsNamed, Ident, LitStr, Path, Type,
    Variant, spanned::Spanned,
};

use crate::utils;

pub fn named_fields<'a>(input: &'a DeriveInput, derive: &str) -> syn::Result<&'a FieldsNamed> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            format!("{derive} can only be derived for structs"),
        ));
    };
    match &data.fields {
        Fields::Named(fields) => Ok(fields),
        _ => Err(syn::Error::new(
            input.span(),
            format!("{derive} requires named fields"),
        )),
    }
}

/// Runs `f` on every `#[name(...)]` attribute in `attrs`.
fn for_each_meta(
    attrs: &[Attribute],
    name: &str,
    mut f: impl FnMut(syn::meta::ParseNestedMeta<'_>) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(name)) {
        attr.parse_nested_meta(&mut f)?;
    }
    Ok(())
}

/// A struct field driven by `#[cli(long = "..", parse_with = "..", flag)]`.
pub struct OptionField {
    pub ident: Ident,
    pub ty: Type,
    pub long: String,
    pub parse_with: Option<Path>,
    pub flag: bool,
}

impl OptionField {
    /// `None` for fields without a `long` name; those are not settable from the command line.
    pub fn parse(field: &Field) -> syn::Result<Option<Self>> {
        let mut long = None;
        let mut parse_with = None;
        let mut flag = false;

        for_each_meta(&field.attrs, "cli", |meta| {
            if meta.path.is_ident("long") {
                long = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("parse_with") {
                let lit: LitStr = meta.value()?.parse()?;
                parse_with = Some(lit.parse::<Path>()?);
            } else if meta.path.is_ident("flag") {
                flag = true;
            } else {
                return Err(meta.error("unsupported cli attribute; expected long/parse_with/flag"));
            }
            Ok(())
        })?;

        let (Some(ident), Some(long)) = (field.ident.clone(), long) else {
            return Ok(None);
        };
        if flag && !utils::is_bool(&field.ty) {
            return Err(syn::Error::new(field.span(), "cli flag fields must be `bool`"));
        }
        if flag && parse_with.is_some() {
            return Err(syn::Error::new(
                field.span(),
                "cli flag fields do not take parse_with",
            ));
        }

        Ok(Some(Self {
            ident,
            ty: field.ty.clone(),
            long,
            parse_with,
            flag,
        }))
    }
}

/// A unit enum variant with its canonical command-line spelling and aliases.
pub struct ValueVariant {
    pub ident: Ident,
    pub canonical: String,
    pub aliases: Vec<String>,
}

impl ValueVariant {
    pub fn parse(variant: &Variant) -> syn::Result<Self> {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.span(),
                "CliValue only supports enums with unit variants",
            ));
        }

        let mut canonical = utils::to_kebab_case(&variant.ident.to_string());
        let mut aliases = Vec::new();
        for_each_meta(&variant.attrs, "cli", |meta| {
            let value = meta.value()?.parse::<LitStr>()?.value();
            if meta.path.is_ident("name") {
                canonical = value;
            } else if meta.path.is_ident("alias") {
                aliases.push(value);
            } else {
                return Err(meta.error("unsupported cli attribute; expected name/alias"));
            }
            Ok(())
        })?;

        Ok(Self {
            ident: variant.ident.clone(),
            canonical,
            aliases,
        })
    }

    /// Every accepted spelling, canonical first.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Option name used in `CliValue` error messages: `#[cli_value(option = "..")]`, or the
/// kebab-cased enum name.
pub fn value_option_name(input: &DeriveInput) -> syn::Result<String> {
    let mut option = utils::to_kebab_case(&input.ident.to_string());
    for_each_meta(&input.attrs, "cli_value", |meta| {
        if !meta.path.is_ident("option") {
            return Err(meta.error("unsupported cli_value attribute; expected option = \"...\""));
        }
        option = meta.value()?.parse::<LitStr>()?.value();
        Ok(())
    })?;
    Ok(option)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KvMode {
    Display,
    Len,
    Path,
    /// Empty strings render as `-`.
    OrDash,
}

impl KvMode {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "display" => Ok(Self::Display),
            "len" => Ok(Self::Len),
            "path" => Ok(Self::Path),
            "or_dash" => Ok(Self::OrDash),
            other => Err(syn::Error::new(
                lit.span(),
                format!("unsupported kv fmt mode: {other}"),
            )),
        }
    }
}

/// A struct field rendered by `KvDisplay`; skipped fields never produce one.
pub struct KvField {
    pub ident: Ident,
    pub key: String,
    pub mode: KvMode,
}

impl KvField {
    pub fn parse(field: &Field) -> syn::Result<Option<Self>> {
        let Some(ident) = field.ident.clone() else {
            return Ok(None);
        };
        let mut key = ident.to_string();
        let mut mode = KvMode::Display;
        let mut skip = false;

        for_each_meta(&field.attrs, "kv", |meta| {
            if meta.path.is_ident("name") {
                key = meta.value()?.parse::<LitStr>()?.value();
            } else if meta.path.is_ident("fmt") {
                mode = KvMode::parse(&meta.value()?.parse()?)?;
            } else if meta.path.is_ident("skip") {
                skip = true;
            } else {
                return Err(meta.error("unsupported kv attribute; expected name/fmt/skip"));
            }
            Ok(())
        })?;

        Ok((!skip).then_some(Self { ident, key, mode }))
    }
}

#[cfg(test)]
mod tests {
    use syn::{DeriveInput, parse_quote};

    use super::{KvField, KvMode, OptionField, ValueVariant, value_option_name};

    #[test]
    fn option_field_reads_long_and_flag() {
        let input: DeriveInput = parse_quote! {
            struct Opts {
                #[cli(long = "full-path", flag)]
                full_path: bool,
                #[cli(long = "algorithm", parse_with = "Algo::parse")]
                algorithm: Algo,
                hidden: u32,
            }
        };
        let fields = super::named_fields(&input, "CliOptions").expect("named");
        let parsed: Vec<Option<OptionField>> = fields
            .named
            .iter()
            .map(|field| OptionField::parse(field).expect("parse"))
            .collect();

        let flag = parsed[0].as_ref().expect("flag field");
        assert_eq!(flag.long, "full-path");
        assert!(flag.flag && flag.parse_with.is_none());

        let algo = parsed[1].as_ref().expect("value field");
        assert!(!algo.flag && algo.parse_with.is_some());

        assert!(parsed[2].is_none());
    }

    #[test]
    fn flag_on_non_bool_is_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Opts {
                #[cli(long = "count", flag)]
                count: usize,
            }
        };
        let fields = super::named_fields(&input, "CliOptions").expect("named");
        assert!(OptionField::parse(&fields.named[0]).is_err());
    }

    #[test]
    fn value_variant_collects_aliases() {
        let variant: syn::Variant = parse_quote! {
            #[cli(alias = "nn")]
            #[cli(alias = "nearest")]
            NearestNeighbor
        };
        let parsed = ValueVariant::parse(&variant).expect("parse");
        assert_eq!(
            parsed.spellings().collect::<Vec<_>>(),
            vec!["nearest-neighbor", "nn", "nearest"]
        );
    }

    #[test]
    fn value_option_name_defaults_to_kebab_enum_name() {
        let plain: DeriveInput = parse_quote! { enum LogFormat { Compact } };
        assert_eq!(value_option_name(&plain).expect("name"), "log-format");

        let named: DeriveInput = parse_quote! {
            #[cli_value(option = "algorithm")]
            enum AlgorithmSelection { All }
        };
        assert_eq!(value_option_name(&named).expect("name"), "algorithm");
    }

    #[test]
    fn kv_field_modes_and_skip() {
        let input: DeriveInput = parse_quote! {
            struct Opts {
                #[kv(fmt = "or_dash", name = "out")]
                output: String,
                #[kv(skip)]
                secret: String,
            }
        };
        let fields = super::named_fields(&input, "KvDisplay").expect("named");
        let output = KvField::parse(&fields.named[0]).expect("parse").expect("kept");
        assert_eq!(output.key, "out");
        assert_eq!(output.mode, KvMode::OrDash);
        assert!(KvField::parse(&fields.named[1]).expect("parse").is_none());
    }
}
