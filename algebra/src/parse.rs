use crate::Square;
use proc_macro2::Span;
use syn::{
    braced,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token::Brace,
    Error, Ident, LitInt, Token,
};

/// `bases { e0 ^ 2 == 0, e1 ^ 2 == 1, .. }, blades { s, e0, .., e0123 }`,
/// the blades giving storage order and orientation
pub struct Algebra {
    bases: Bases,
    _comma: Token![,],
    blades: Blades,
}

impl Parse for Algebra {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        Ok(Algebra {
            bases: input.parse()?,
            _comma: input.parse()?,
            blades: input.parse()?,
        })
    }
}

impl Parse for crate::Algebra {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let Algebra { bases, blades, .. } = input.parse()?;
        let bases = bases.bases.into_iter().map(crate::Basis::from);
        let names = blades.blades.iter().map(Ident::to_string);
        crate::Algebra::new_with_blades(bases, names).map_err(|msg| Error::new(blades.token.0, msg))
    }
}

pub struct Bases {
    _token: Keyword,
    _brace: Brace,
    bases: Punctuated<Basis, Token![,]>,
}

impl Parse for Bases {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let content;
        Ok(Self {
            _token: Keyword::expect(input, "bases")?,
            _brace: braced!(content in input),
            bases: content.parse_terminated(Basis::parse, Token![,])?,
        })
    }
}

pub struct Blades {
    token: Keyword,
    _brace: Brace,
    blades: Punctuated<Ident, Token![,]>,
}

impl Parse for Blades {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let content;
        Ok(Self {
            token: Keyword::expect(input, "blades")?,
            _brace: braced!(content in input),
            blades: content.parse_terminated(Ident::parse, Token![,])?,
        })
    }
}

struct Keyword(Span);

impl Keyword {
    fn expect(input: ParseStream, keyword: &str) -> syn::Result<Self> {
        let ident = input.parse::<Ident>()?;
        if ident == keyword {
            Ok(Keyword(ident.span()))
        } else {
            Err(Error::new(
                ident.span(),
                format!("expected '{keyword}', found {ident}"),
            ))
        }
    }
}

pub struct Basis {
    char: Char,
    _caret: Token![^],
    _two: Two,
    _eq: Token![==],
    square: Square,
}

impl From<Basis> for crate::Basis {
    fn from(value: Basis) -> Self {
        let Basis { char, square, .. } = value;
        crate::Basis {
            char: char.char,
            square,
        }
    }
}

impl Parse for Basis {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        Ok(Basis {
            char: input.parse()?,
            _caret: input.parse()?,
            _two: input.parse()?,
            _eq: input.parse()?,
            square: input.parse()?,
        })
    }
}

/// A basis written as a single character (`x`) or as `e` and a character (`e0`)
pub struct Char {
    char: char,
}

impl Parse for Char {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let ident = input.parse::<Ident>()?;
        let string = ident.to_string();
        let chars = string.chars().collect::<Vec<_>>();
        match chars.as_slice() {
            [char] | ['e', char] => Ok(Char { char: *char }),
            _ => Err(Error::new(
                ident.span(),
                format!("basis must be a single character: {string}"),
            )),
        }
    }
}

struct Two;

impl Parse for Two {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let lit_int = input.parse::<LitInt>()?;
        if lit_int.base10_parse::<i32>()? == 2 {
            Ok(Two)
        } else {
            Err(Error::new(lit_int.span(), "expected 2"))
        }
    }
}

impl Parse for Square {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let lit_int = input.parse::<LitInt>()?;
        match lit_int.base10_parse::<i32>()? {
            0 => Ok(Square::Zero),
            1 => Ok(Square::Pos),
            _ => Err(Error::new(lit_int.span(), "expected 1 or 0")),
        }
    }
}
