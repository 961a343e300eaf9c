use crate::IsEven;

/// Generator bitset of a basis blade, bit `i` set when generator `i` is a factor.
///
/// The two high bits carry the sign of the blade and whether a product has
/// vanished, so a blade doubles as the result of multiplying two blades.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Blade(pub u32);

impl std::fmt::Debug for Blade {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "Blade(0)");
        }
        let sign = if self.is_positive() { '+' } else { '-' };
        write!(f, "Blade({sign}{:04b})", self.bits())
    }
}

impl Ord for Blade {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bits()
            .cmp(&other.bits())
            .then(self.is_negative().cmp(&other.is_negative()).reverse())
    }
}

impl PartialOrd for Blade {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Blade {
    const SIGN: u32 = 1 << 31;
    const ZERO: u32 = 1 << 30;
    const FLAGS: u32 = Self::SIGN | Self::ZERO;

    pub const fn scalar() -> Self {
        Self(0)
    }

    pub const fn zero() -> Self {
        Self(Self::ZERO)
    }

    pub const fn generator(i: u32) -> Self {
        Self(1 << i)
    }

    pub const fn pseudoscalar(dim: u32) -> Self {
        Self(!(u32::MAX << dim))
    }

    /// The generator bits without sign or zero flags
    pub const fn bits(self) -> u32 {
        self.0 & !Self::FLAGS
    }

    pub const fn is_positive(self) -> bool {
        self.0 & Self::SIGN != Self::SIGN && !self.is_zero()
    }

    pub const fn is_negative(self) -> bool {
        self.0 & Self::SIGN == Self::SIGN && !self.is_zero()
    }

    pub const fn is_zero(self) -> bool {
        self.0 & Self::ZERO == Self::ZERO
    }

    /// +1, -1, or 0 for a vanished product
    pub const fn sign(self) -> i8 {
        if self.is_zero() {
            0
        } else if self.is_negative() {
            -1
        } else {
            1
        }
    }

    pub const fn grade(self) -> u32 {
        self.bits().count_ones()
    }

    pub const fn contains(self, i: u32) -> bool {
        let flag = 1 << i;
        self.0 & flag == flag
    }

    pub const fn is_disjoint(self, rhs: Self) -> bool {
        self.bits() & rhs.bits() == 0
    }

    pub fn generators(self) -> impl Iterator<Item = u32> {
        let bits = self.bits();
        (0..u32::BITS - 2).filter(move |i| bits & (1 << i) != 0)
    }

    /// (-1)^(g(g-1)/2), the sign picked up by reversing the order of `grade` generators
    pub fn reverse_sign(grade: u32) -> i8 {
        let swaps = grade * grade.saturating_sub(1) / 2;
        if swaps.is_even() {
            1
        } else {
            -1
        }
    }

    pub fn rev(self) -> Self {
        if Self::reverse_sign(self.grade()) < 0 {
            -self
        } else {
            self
        }
    }

    /// Product of two blades ignoring the metric: shared generators cancel,
    /// and the sign counts the swaps needed to sort the concatenated factors.
    pub fn product(self, rhs: Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }

        let lhs_bits = self.bits();
        let swaps: u32 = rhs
            .generators()
            .map(|i| (lhs_bits >> (i + 1)).count_ones())
            .sum();

        let output = self ^ rhs;
        if swaps.is_even() {
            output
        } else {
            -output
        }
    }
}

impl std::ops::Neg for Blade {
    type Output = Self;
    fn neg(self) -> Self {
        if self.is_zero() {
            self
        } else {
            Self(self.0 ^ Self::SIGN)
        }
    }
}

impl std::ops::BitXor for Blade {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Blade;

    #[test]
    fn pos_and_neg_scalar() {
        let s = Blade::scalar();
        assert_eq!(s, s);
        assert_eq!(-s, -s);
        assert_ne!(-s, s);
    }

    #[test]
    fn zero_has_no_sign() {
        let z = Blade::zero();
        assert_eq!(z, -z);
        assert_eq!(0, z.sign());
        assert!(!z.is_positive());
        assert!(!z.is_negative());
    }

    #[test]
    fn grade_ignores_flags() {
        assert_eq!(0, Blade::scalar().grade());
        assert_eq!(0, Blade::zero().grade());
        assert_eq!(2, (-Blade(0b11)).grade());
        assert_eq!(4, Blade::pseudoscalar(4).grade());
    }

    #[test]
    fn generators_ascending() {
        let b = -Blade(0b1101);
        assert_eq!(vec![0, 2, 3], b.generators().collect::<Vec<_>>());
    }

    #[test]
    fn reverse_sign_formula() {
        assert_eq!(1, Blade::reverse_sign(0));
        assert_eq!(1, Blade::reverse_sign(1));
        assert_eq!(-1, Blade::reverse_sign(2));
        assert_eq!(-1, Blade::reverse_sign(3));
        assert_eq!(1, Blade::reverse_sign(4));
        assert_eq!(1, Blade::reverse_sign(5));
    }

    #[test]
    fn rev_blade() {
        assert_eq!(Blade(0), Blade(0).rev());
        assert_eq!(Blade(0b1), Blade(0b1).rev());
        assert_eq!(-Blade(0b11), Blade(0b11).rev());
        assert_eq!(-Blade(0b111), Blade(0b111).rev());
        assert_eq!(Blade(0b1111), Blade(0b1111).rev());
    }

    #[test]
    fn product_anticommutes() {
        let e1 = Blade::generator(1);
        let e2 = Blade::generator(2);
        assert_eq!(Blade(0b110), e1.product(e2));
        assert_eq!(-Blade(0b110), e2.product(e1));
    }

    #[test]
    fn product_counts_swaps() {
        // e3 e1 e2 -> e1 e2 e3 takes two swaps
        let e3 = Blade::generator(3);
        let e12 = Blade(0b110);
        assert_eq!(Blade(0b1110), e3.product(e12));

        // e23 e1 -> e1 e23 takes two swaps
        let e23 = Blade(0b1100);
        let e1 = Blade::generator(1);
        assert_eq!(Blade(0b1110), e23.product(e1));
    }

    #[test]
    fn product_multiplies_signs() {
        let e1 = Blade::generator(1);
        let e2 = Blade::generator(2);
        assert_eq!(-Blade(0b110), (-e1).product(e2));
        assert_eq!(Blade(0b110), (-e1).product(-e2));
    }

    #[test]
    fn ordering_by_bits() {
        assert!(Blade(0b1) < Blade(0b10));
        assert!(-Blade(0b1) < Blade(0b1));
    }
}
