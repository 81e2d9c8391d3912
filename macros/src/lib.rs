use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, LitStr, Meta, Token, ext::IdentExt,
    parse_macro_input,
};

/// Derive `env_populate::Populate` for a struct with named fields.
///
/// Scalar fields opt in with `#[field(env = "VAR_NAME")]`. Fields whose type
/// is another `Populate` struct are recursed into without an attribute.
#[proc_macro_derive(Populate, attributes(field))]
pub fn derive_populate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_populate(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_populate(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let struct_name_str = struct_name.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Extract fields from the struct
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "#[derive(Populate)] only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "#[derive(Populate)] only supports structs",
            ));
        }
    };

    let mut populate_steps = Vec::new();
    let mut descriptors = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let field_name_str = field_name.unraw().to_string();
        let field_type = &field.ty;

        let config = parse_field_config(field)?;
        let env_key = match &config.env_var {
            Some(var) => quote! { ::core::option::Option::Some(#var) },
            None => quote! { ::core::option::Option::None },
        };

        populate_steps.push(quote! {
            ::env_populate::field::resolve(
                &mut self.#field_name,
                #struct_name_str,
                #field_name_str,
                #env_key,
                env,
                require_value_present,
            )?;
        });

        descriptors.push(quote! {
            ::env_populate::FieldDescriptor::of::<#field_type>(#field_name_str, #env_key)
        });
    }

    Ok(quote! {
        impl #impl_generics ::env_populate::Populate for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn populate_from(
                &mut self,
                env: &dyn ::env_populate::Lookup,
                require_value_present: bool,
            ) -> ::core::result::Result<(), ::env_populate::PopulateError> {
                #(#populate_steps)*
                ::core::result::Result::Ok(())
            }

            fn fields() -> ::std::vec::Vec<::env_populate::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }

        impl #impl_generics ::env_populate::EnvField for #struct_name #ty_generics #where_clause {
            const KIND: ::env_populate::FieldKind = ::env_populate::FieldKind::Record;
            const TYPE_NAME: &'static str = #struct_name_str;

            fn populate_field(
                &mut self,
                _key: ::core::option::Option<&str>,
                env: &dyn ::env_populate::Lookup,
                require_value_present: bool,
            ) -> ::core::result::Result<(), ::env_populate::PopulateError> {
                ::env_populate::Populate::populate_from(self, env, require_value_present)
            }

            fn nested_fields() -> ::std::vec::Vec<::env_populate::FieldDescriptor> {
                <Self as ::env_populate::Populate>::fields()
            }
        }
    })
}

#[derive(Debug, Default)]
struct FieldConfig {
    env_var: Option<LitStr>,
}

/// Parse `#[field(env = "VAR_NAME")]`; fields without the attribute get an empty config
fn parse_field_config(field: &Field) -> syn::Result<FieldConfig> {
    let mut config = FieldConfig::default();
    let mut seen: Option<&Attribute> = None;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("field")) {
        if seen.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate #[field(...)] attribute",
            ));
        }
        seen = Some(attr);

        let list = match &attr.meta {
            Meta::List(list) => list,
            _ => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "field attribute must be a list: #[field(env = \"...\")]",
                ));
            }
        };

        list.parse_nested_meta(|meta| {
            if meta.path.is_ident("env") {
                if config.env_var.is_some() {
                    return Err(meta.error("duplicate `env` key"));
                }
                meta.input.parse::<Token![=]>()?;
                config.env_var = Some(meta.input.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported field option, expected `env = \"VAR_NAME\"`"))
            }
        })?;

        if config.env_var.is_none() {
            return Err(syn::Error::new_spanned(
                attr,
                "field must have env = \"VAR_NAME\"",
            ));
        }
    }

    Ok(config)
}
