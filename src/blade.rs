use std::fmt;
use std::str::FromStr;

use strum::EnumIter;

use crate::Error;

macros::blade_tables! {
    bases {
        e0 ^ 2 == 0,
        e1 ^ 2 == 1,
        e2 ^ 2 == 1,
        e3 ^ 2 == 1,
    },
    blades {
        s, e0, e1, e2, e3, e01, e02, e03, e23, e31, e12, e032, e013, e021, e123, e0123
    }
}

/// Basis blade of 3D PGA in canonical storage order.
///
/// Each blade is oriented as its name is written, so `E31` is `e3 e1` and
/// `E032` is `e0 e3 e2`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, EnumIter)]
#[repr(u8)]
pub enum Blade {
    Scalar = 0,
    E0 = 1,
    E1 = 2,
    E2 = 3,
    E3 = 4,
    E01 = 5,
    E02 = 6,
    E03 = 7,
    E23 = 8,
    E31 = 9,
    E12 = 10,
    E032 = 11,
    E013 = 12,
    E021 = 13,
    E123 = 14,
    E0123 = 15,
}

impl Blade {
    pub const ALL: [Blade; BLADE_COUNT] = [
        Blade::Scalar,
        Blade::E0,
        Blade::E1,
        Blade::E2,
        Blade::E3,
        Blade::E01,
        Blade::E02,
        Blade::E03,
        Blade::E23,
        Blade::E31,
        Blade::E12,
        Blade::E032,
        Blade::E013,
        Blade::E021,
        Blade::E123,
        Blade::E0123,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Blade> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    pub fn grade(self) -> u32 {
        GRADES[self.index()]
    }

    /// Generators in the order the name writes them, `0` for the null generator
    pub fn generators(self) -> impl Iterator<Item = u8> {
        self.name()
            .strip_prefix('e')
            .unwrap_or_default()
            .bytes()
            .map(|b| b - b'0')
    }

    /// Contains the null generator `e0`
    pub fn is_ideal(self) -> bool {
        self.generators().any(|g| g == 0)
    }

    /// (-1)^(g(g-1)/2)
    pub fn reverse_sign(grade: u32) -> i8 {
        let swaps = grade * grade.saturating_sub(1) / 2;
        if swaps % 2 == 0 {
            1
        } else {
            -1
        }
    }

    /// Geometric product of two blades with its sign, which is zero when
    /// `e0` meets itself
    pub fn multiply(self, rhs: Blade) -> (Blade, i8) {
        Self::entry(GEOMETRIC[self.index()][rhs.index()])
    }

    pub fn wedge(self, rhs: Blade) -> (Blade, i8) {
        Self::entry(WEDGE[self.index()][rhs.index()])
    }

    pub fn antiwedge(self, rhs: Blade) -> (Blade, i8) {
        Self::entry(ANTIWEDGE[self.index()][rhs.index()])
    }

    /// `self ^ right_complement(self) == e0123`
    pub fn right_complement(self) -> (Blade, i8) {
        Self::entry(RIGHT_COMPLEMENT[self.index()])
    }

    /// `left_complement(self) ^ self == e0123`
    pub fn left_complement(self) -> (Blade, i8) {
        Self::entry(LEFT_COMPLEMENT[self.index()])
    }

    fn entry((index, sign): (usize, i8)) -> (Blade, i8) {
        (Self::ALL[index], sign)
    }
}

impl fmt::Display for Blade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Blade {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "s" {
            return Ok(Blade::Scalar);
        }
        NAMES
            .iter()
            .position(|name| *name == s)
            .and_then(Blade::from_index)
            .ok_or_else(|| Error::UnknownBlade(s.to_string()))
    }
}
