//! Procedural macros for tui-combobox

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level options for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Name reported by `Action::name()` instead of the variant identifier
    #[darling(default)]
    rename: Option<String>,
}

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

/// Derive macro for the Action trait
///
/// Generates `name()` returning the variant name, or the value of
/// `#[action(rename = "...")]` when present.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum FormAction {
///     Replace(FormData),
///     #[action(rename = "CountrySelected")]
///     Country(String),
///     Quit,
/// }
///
/// assert_eq!(FormAction::Quit.name(), "Quit");
/// assert_eq!(FormAction::Country("ca".into()).name(), "CountrySelected");
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let variant_str = v
            .rename
            .clone()
            .unwrap_or_else(|| variant_name.to_string());

        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #variant_str
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #variant_str
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #variant_str
            },
        }
    });

    let expanded: TokenStream2 = quote! {
        impl ::tui_combobox::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro for the BindingContext trait
///
/// Generates `name()`, `from_name()` and `all()` from the enum's unit
/// variants, using snake_case names.
///
/// # Example
/// ```ignore
/// #[derive(BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
/// enum ComboboxContext {
///     Closed,
///     Open,
/// }
///
/// assert_eq!(ComboboxContext::Open.name(), "open");
/// assert_eq!(ComboboxContext::from_name("closed"), Some(ComboboxContext::Closed));
/// ```
#[proc_macro_derive(BindingContext)]
pub fn derive_binding_context(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let data = match &input.data {
        syn::Data::Enum(data) => data,
        _ => {
            return syn::Error::new_spanned(&input, "BindingContext can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    if let Some(variant) = data
        .variants
        .iter()
        .find(|v| !matches!(v.fields, syn::Fields::Unit))
    {
        return syn::Error::new_spanned(
            variant,
            "BindingContext can only be derived for enums with unit variants",
        )
        .to_compile_error()
        .into();
    }

    let variant_names: Vec<_> = data.variants.iter().map(|v| &v.ident).collect();
    let variant_strings: Vec<_> = variant_names
        .iter()
        .map(|v| to_snake_case(&v.to_string()))
        .collect();

    let name_arms = variant_names
        .iter()
        .zip(variant_strings.iter())
        .map(|(v, s)| quote! { #name::#v => #s });

    let from_name_arms = variant_names
        .iter()
        .zip(variant_strings.iter())
        .map(|(v, s)| quote! { #s => ::core::option::Option::Some(#name::#v) });

    let all_variants = variant_names.iter().map(|v| quote! { #name::#v });

    let expanded: TokenStream2 = quote! {
        impl ::tui_combobox::BindingContext for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }

            fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#from_name_arms,)*
                    _ => ::core::option::Option::None,
                }
            }

            fn all() -> &'static [Self] {
                static ALL: &[#name] = &[#(#all_variants),*];
                ALL
            }
        }
    };

    TokenStream::from(expanded)
}
