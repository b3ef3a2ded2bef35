//! Updateable derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::attrs::{bounded_generics, column_fields};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let fields = column_fields(&input, "Updateable")?;
    let name = &input.ident;
    let generics = bounded_generics(&input, &fields);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let assignments = fields.iter().map(|f| {
        let column = &f.column;
        let value = f.value_expr();
        quote! { ::pgsql::Assignment::new(#column, #value) }
    });

    Ok(quote! {
        impl #impl_generics ::pgsql::Updateable for #name #ty_generics #where_clause {
            fn update_data(&self) -> ::std::vec::Vec<::pgsql::Assignment> {
                ::std::vec![#(#assignments),*]
            }
        }
    })
}
