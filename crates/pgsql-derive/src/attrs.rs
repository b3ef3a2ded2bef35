//! Field attribute parsing shared by both derives.

use proc_macro2::{TokenStream, TokenTree};
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, Generics, Ident, Result, Type, parse_quote};

/// A field that maps to a column.
pub struct ColumnField {
    pub ident: Ident,
    pub column: String,
    pub ty: Type,
}

impl ColumnField {
    /// `self.<field>` converted into a bound-parameter fragment.
    pub fn value_expr(&self) -> TokenStream {
        let ident = &self.ident;
        quote! {
            ::pgsql::Fragment::Param(::std::convert::Into::<::pgsql::Value>::into(
                ::std::clone::Clone::clone(&self.#ident),
            ))
        }
    }
}

/// Collect the column fields of a named-field struct.
pub fn column_fields(input: &DeriveInput, derive: &str) -> Result<Vec<ColumnField>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    format!("{derive} can only be derived for structs with named fields"),
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                format!("{derive} can only be derived for structs"),
            ));
        }
    };

    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        let mut column = None;
        let mut skip = false;
        for attr in &field.attrs {
            if !attr.path().is_ident("pgsql") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("column") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    column = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported pgsql attribute, expected `column` or `skip`"))
                }
            })?;
        }

        if skip {
            continue;
        }
        let column = column.unwrap_or_else(|| ident.to_string());
        out.push(ColumnField {
            ident,
            column,
            ty: field.ty.clone(),
        });
    }

    Ok(out)
}

/// The input generics with `Clone + Into<Value>` required of every column
/// field whose type names a type parameter.
pub fn bounded_generics(input: &DeriveInput, fields: &[ColumnField]) -> Generics {
    let mut generics = input.generics.clone();
    let params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    if params.is_empty() {
        return generics;
    }

    let where_clause = generics.make_where_clause();
    for field in fields {
        if mentions_any(field.ty.to_token_stream(), &params) {
            let ty = &field.ty;
            where_clause.predicates.push(parse_quote! {
                #ty: ::std::clone::Clone + ::std::convert::Into<::pgsql::Value>
            });
        }
    }
    generics
}

fn mentions_any(tokens: TokenStream, params: &[Ident]) -> bool {
    tokens.into_iter().any(|tt| match tt {
        TokenTree::Ident(ident) => params.contains(&ident),
        TokenTree::Group(group) => mentions_any(group.stream(), params),
        _ => false,
    })
}
