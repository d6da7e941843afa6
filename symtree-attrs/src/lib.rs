mod structures;

use proc_macro::TokenStream;
use quote::ToTokens;
use structures::ErrorKindTarget;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for unit structs and structs with named fields. The `ErrorKind`
/// trait must be in scope where the derive is used.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use symtree_attrs::ErrorKind;
/// use symtree_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "this exponent is not a constant", labels = ["this exponent"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | Required. The message displayed at the top of the error, and by `Display`.   |
/// | `labels`    | The text of the labels that point to each span of the error, in order.       |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression that should evaluate to a [`String`] (or, for `labels`, an
/// iterable of strings). For structs with named fields, the expression is evaluated with the
/// members of the struct in scope, so they can be used in the expression (tuple structs are not
/// supported).
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    parse_macro_input!(item as ErrorKindTarget)
        .into_token_stream()
        .into()
}
