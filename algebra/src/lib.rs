//! Combinatorial rules of a Clifford algebra given by the squares of its
//! bases and the names (orientations) of its blades.
//!
//! The [`Algebra`] is evaluated at compile time by the `macros` crate, which
//! emits flat product tables as constants. Nothing here allocates at runtime
//! in the crate that uses those tables.

pub mod blade;

mod code_gen;
mod parse;


use itertools::Itertools;
use strum::EnumIter;

use crate::blade::Blade;

pub trait IsEven {
    fn is_even(&self) -> bool;
}

impl IsEven for u32 {
    fn is_even(&self) -> bool {
        self & 1 != 1
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Algebra {
    pub bases: Vec<Basis>,
    pub blades: Vec<NamedBlade>,
}

/// A blade in canonical storage order, with the orientation its name implies
/// relative to the ascending product of its generators.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NamedBlade {
    pub name: String,
    pub blade: Blade,
}

/// Result of multiplying two blades given by their canonical index
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Product {
    pub index: usize,
    pub sign: i8,
}

impl Product {
    const ZERO: Product = Product { index: 0, sign: 0 };

    pub fn is_zero(self) -> bool {
        self.sign == 0
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumIter)]
pub enum ProductKind {
    Geometric,
    Wedge,
    Antiwedge,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumIter)]
pub enum Complement {
    Right,
    Left,
}

impl Algebra {
    /// Blades in the order given by `names`, each oriented as written.
    ///
    /// Every generator subset must be named exactly once. The scalar is named `s`.
    pub fn new_with_blades<B, I, N>(bases: I, names: N) -> Result<Self, String>
    where
        Basis: From<B>,
        I: IntoIterator<Item = B>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let bases = bases.into_iter().map(Basis::from).collect::<Vec<_>>();

        if !bases.iter().map(|b| b.char).all_unique() {
            return Err("all bases must be unique".to_string());
        }

        let blades = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                let blade = parse_blade(&bases, name)?;
                Ok(NamedBlade {
                    name: name.to_string(),
                    blade,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        let expected = 1usize << bases.len();
        if blades.len() != expected {
            return Err(format!(
                "expected {expected} blades, found {}",
                blades.len()
            ));
        }

        if let Some(dup) = blades.iter().map(|b| b.blade.bits()).duplicates().next() {
            return Err(format!("generator set {dup:b} is named more than once"));
        }

        Ok(Algebra { bases, blades })
    }

    pub fn dim(&self) -> u32 {
        self.bases.len() as u32
    }

    pub fn len(&self) -> usize {
        self.blades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blades.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.blades.iter().map(|b| b.name.as_str())
    }

    pub fn grades(&self) -> impl Iterator<Item = u32> + '_ {
        self.blades.iter().map(|b| b.blade.grade())
    }

    fn index_of(&self, bits: u32) -> usize {
        self.blades
            .iter()
            .position(|b| b.blade.bits() == bits)
            .unwrap_or_else(|| unreachable!("every generator set is named"))
    }

    /// Expresses a signed bitset blade against the named orientation
    fn product_from(&self, blade: Blade) -> Product {
        if blade.is_zero() {
            return Product::ZERO;
        }
        let index = self.index_of(blade.bits());
        let orientation = self.blades[index].blade.sign();
        Product {
            index,
            sign: blade.sign() * orientation,
        }
    }

    pub fn product(&self, kind: ProductKind, lhs: usize, rhs: usize) -> Product {
        match kind {
            ProductKind::Geometric => self.geo(lhs, rhs),
            ProductKind::Wedge => self.wedge(lhs, rhs),
            ProductKind::Antiwedge => self.antiwedge(lhs, rhs),
        }
    }

    pub fn geo(&self, lhs: usize, rhs: usize) -> Product {
        let lhs = self.blades[lhs].blade;
        let rhs = self.blades[rhs].blade;
        let overlap = Blade(lhs.bits() & rhs.bits());

        let mut product = lhs.product(rhs);
        for basis in self.iter_bases(overlap) {
            product = product.product(basis.square.blade());
        }
        self.product_from(product)
    }

    pub fn wedge(&self, lhs: usize, rhs: usize) -> Product {
        if self.blades[lhs].blade.is_disjoint(self.blades[rhs].blade) {
            self.geo(lhs, rhs)
        } else {
            Product::ZERO
        }
    }

    /// Regressive product, the wedge taken between right complements
    pub fn antiwedge(&self, lhs: usize, rhs: usize) -> Product {
        let lhs = self.right_comp(lhs);
        let rhs = self.right_comp(rhs);
        let wedge = self.wedge(lhs.index, rhs.index);
        if wedge.is_zero() {
            return Product::ZERO;
        }
        let output = self.left_comp(wedge.index);
        Product {
            index: output.index,
            sign: lhs.sign * rhs.sign * wedge.sign * output.sign,
        }
    }

    pub fn complement(&self, side: Complement, blade: usize) -> Product {
        match side {
            Complement::Right => self.right_comp(blade),
            Complement::Left => self.left_comp(blade),
        }
    }

    /// `blade ^ right_comp(blade)` is the named pseudoscalar
    pub fn right_comp(&self, blade: usize) -> Product {
        let comp = self.complement_index(blade);
        Product {
            index: comp,
            sign: self.wedge(blade, comp).sign,
        }
    }

    /// `left_comp(blade) ^ blade` is the named pseudoscalar
    pub fn left_comp(&self, blade: usize) -> Product {
        let comp = self.complement_index(blade);
        Product {
            index: comp,
            sign: self.wedge(comp, blade).sign,
        }
    }

    fn complement_index(&self, blade: usize) -> usize {
        let full = Blade::pseudoscalar(self.dim()).bits();
        self.index_of(full ^ self.blades[blade].blade.bits())
    }

    fn iter_bases(&self, set: Blade) -> impl Iterator<Item = Basis> + '_ {
        self.bases
            .iter()
            .enumerate()
            .filter_map(move |(i, b)| set.contains(i as u32).then_some(*b))
    }
}

fn parse_blade(bases: &[Basis], name: &str) -> Result<Blade, String> {
    if name == "s" {
        return Ok(Blade::scalar());
    }

    let chars = match name.strip_prefix('e') {
        Some(rest) if !bases.iter().any(|b| b.char == 'e') => rest,
        _ => name,
    };

    if !chars.chars().all_unique() {
        return Err(format!("blade repeats a basis: {name}"));
    }

    chars.chars().try_fold(Blade::scalar(), |product, char| {
        let i = bases
            .iter()
            .position(|b| b.char == char)
            .ok_or_else(|| format!("char does not correspond to a basis: {char}"))?;
        Ok(product.product(Blade::generator(i as u32)))
    })
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Basis {
    pub char: char,
    pub square: Square,
}

impl Basis {
    pub fn pos(char: char) -> Self {
        Square::Pos.basis(char)
    }

    pub fn zero(char: char) -> Self {
        Square::Zero.basis(char)
    }
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum Square {
    #[default]
    Pos,
    Zero,
}

impl Square {
    pub fn basis(self, char: char) -> Basis {
        Basis { char, square: self }
    }

    pub fn blade(self) -> Blade {
        match self {
            Self::Pos => Blade::scalar(),
            Self::Zero => Blade::zero(),
        }
    }
}

/// Projective geometric algebra of 3D space with the blade names used by
/// plane-based PGA: `e0` squares to zero and `e1`, `e2`, `e3` to one.
pub fn pga_3d() -> Algebra {
    let bases = [
        Basis::zero('0'),
        Basis::pos('1'),
        Basis::pos('2'),
        Basis::pos('3'),
    ];
    let names = [
        "s", "e0", "e1", "e2", "e3", "e01", "e02", "e03", "e23", "e31", "e12", "e032", "e013",
        "e021", "e123", "e0123",
    ];
    Algebra::new_with_blades(bases, names)
        .unwrap_or_else(|err| unreachable!("pga_3d blade names are valid: {err}"))
}
