mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `ErrorKind` trait from `glmin-error` for the given struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```ignore
/// use glmin_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = "child not found",
///     labels = ["this node does not hold the child"],
///     help = "this is a bug in the tree builder",
/// )]
/// pub struct ChildNotFound;
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                        |
/// | --------- | ---------------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the error when it is displayed.                |
/// | `labels`  | An iterable of label texts; the `n`th label points at the `n`th span of the error. |
/// | `help`    | Optional help text for the error, describing what the user can do to fix it.       |
///
/// Each tag accepts an expression. The expressions are evaluated inside the generated methods, so
/// fields can be accessed through `self` (e.g. `format!("found {}", self.found)`).
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    let (impl_generics, ty_generics, where_clause) = target.generics.split_for_impl();
    quote! {
        impl #impl_generics ::glmin_error::ErrorKind for #name #ty_generics #where_clause {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            #target
        }
    }.into()
}
