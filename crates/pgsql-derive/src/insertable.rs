//! Insertable derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::attrs::{bounded_generics, column_fields};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let fields = column_fields(&input, "Insertable")?;
    let name = &input.ident;
    let generics = bounded_generics(&input, &fields);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let columns = fields.iter().map(|f| &f.column);
    let values = fields.iter().map(|f| f.value_expr());

    Ok(quote! {
        impl #impl_generics ::pgsql::Insertable for #name #ty_generics #where_clause {
            fn insert_data(
                &self,
            ) -> (
                ::std::vec::Vec<::std::string::String>,
                ::pgsql::ValuesStatement,
            ) {
                let columns: ::std::vec::Vec<::std::string::String> =
                    ::std::vec![#(::std::string::String::from(#columns)),*];
                let row: ::std::vec::Vec<::pgsql::Fragment> = ::std::vec![#(#values),*];
                (columns, ::pgsql::ValuesStatement::new().row(row))
            }
        }
    })
}
