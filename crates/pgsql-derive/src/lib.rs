//! Derive macros for pgsql
//!
//! Provides `#[derive(Insertable)]` and `#[derive(Updateable)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod insertable;
mod updateable;

/// Derive `Insertable` for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use pgsql::Insertable;
///
/// #[derive(Insertable)]
/// struct NewUser {
///     username: String,
///     #[pgsql(column = "email_address")]
///     email: Option<String>,
///     #[pgsql(skip)]
///     password_confirmation: String,
/// }
///
/// insert("users").data(&new_user);
/// // insert into users (username, email_address) values ($1,$2)
/// ```
///
/// Columns follow field declaration order. Every non-skipped field type must
/// be `Clone + Into<pgsql::Value>`.
///
/// # Attributes
///
/// - `#[pgsql(column = "name")]` - Map field to a different column name
/// - `#[pgsql(skip)]` - Leave the field out
#[proc_macro_derive(Insertable, attributes(pgsql))]
pub fn derive_insertable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    insertable::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive `Updateable` for a struct with named fields.
///
/// Produces one `column = value` assignment per non-skipped field, in
/// declaration order. Accepts the same attributes as `Insertable`.
#[proc_macro_derive(Updateable, attributes(pgsql))]
pub fn derive_updateable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    updateable::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
