extern crate proc_macro;

use syn::parse_macro_input;

/// Generates the blade names, grades, product tables and complement maps of
/// an algebra as `pub(crate)` constants
#[proc_macro]
pub fn blade_tables(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let algebra = parse_macro_input!(input as algebra::Algebra);
    let tokens = algebra.define_tables();
    tokens.into()
}
