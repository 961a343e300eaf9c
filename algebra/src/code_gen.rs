use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote, ToTokens};
use strum::IntoEnumIterator;

use crate::{Algebra, Complement, Product, ProductKind};

impl ProductKind {
    pub fn const_ident(self) -> Ident {
        match self {
            ProductKind::Geometric => format_ident!("GEOMETRIC"),
            ProductKind::Wedge => format_ident!("WEDGE"),
            ProductKind::Antiwedge => format_ident!("ANTIWEDGE"),
        }
    }
}

impl Complement {
    pub fn const_ident(self) -> Ident {
        match self {
            Complement::Right => format_ident!("RIGHT_COMPLEMENT"),
            Complement::Left => format_ident!("LEFT_COMPLEMENT"),
        }
    }
}

impl ToTokens for Product {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let index = Literal::usize_unsuffixed(self.index);
        let sign = match self.sign {
            1 => quote!(1),
            -1 => quote!(-1),
            _ => quote!(0),
        };
        tokens.extend(quote!((#index, #sign)));
    }
}

impl Algebra {
    /// Row `lhs`, column `rhs` holds the product of the blades at those canonical indices
    pub fn table(&self, kind: ProductKind) -> Vec<Vec<Product>> {
        (0..self.len())
            .map(|lhs| {
                (0..self.len())
                    .map(|rhs| self.product(kind, lhs, rhs))
                    .collect()
            })
            .collect()
    }

    pub fn complements(&self, side: Complement) -> Vec<Product> {
        (0..self.len())
            .map(|blade| self.complement(side, blade))
            .collect()
    }

    /// Emits the blade names, grades, product tables and complement maps as
    /// `pub(crate)` constants indexed by canonical blade order.
    pub fn define_tables(&self) -> TokenStream {
        let count = Literal::usize_unsuffixed(self.len());

        let names = self
            .names()
            .map(|name| if name == "s" { "1" } else { name })
            .collect::<Vec<_>>();

        let grades = self.grades().map(Literal::u32_unsuffixed);

        let tables = ProductKind::iter().map(|kind| {
            let ident = kind.const_ident();
            let rows = self.table(kind).into_iter().map(|row| quote!([#(#row),*]));
            quote! {
                pub(crate) const #ident: [[(usize, i8); BLADE_COUNT]; BLADE_COUNT] = [#(#rows),*];
            }
        });

        let complements = Complement::iter().map(|side| {
            let ident = side.const_ident();
            let entries = self.complements(side);
            quote! {
                pub(crate) const #ident: [(usize, i8); BLADE_COUNT] = [#(#entries),*];
            }
        });

        quote! {
            pub(crate) const BLADE_COUNT: usize = #count;
            pub(crate) const NAMES: [&str; BLADE_COUNT] = [#(#names),*];
            pub(crate) const GRADES: [u32; BLADE_COUNT] = [#(#grades),*];
            #(#tables)*
            #(#complements)*
        }
    }
}
