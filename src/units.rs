//! Length units. Everything is laid out in PDF points (1/72 inch); the other
//! units exist to make configuration readable and convert into [`Pt`].

use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

const POINTS_PER_INCH: f32 = 72.0;
const MM_PER_INCH: f32 = 25.4;

/// A length in PDF points
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    DerefMut,
    From,
    Into,
    Display,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display)]
#[display("{_0}in")]
pub struct In(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

impl Pt {
    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * POINTS_PER_INCH)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 * POINTS_PER_INCH / MM_PER_INCH)
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// Dividing two lengths gives a plain ratio
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_inches_and_millimetres() {
        assert_eq!(Pt::from(In(0.5)), Pt(36.0));
        assert_eq!(Pt::from(Mm(25.4)), Pt(72.0));
    }

    #[test]
    fn sums_lengths() {
        let total: Pt = [Pt(100.0), Pt(25.0), Pt(75.0)].into_iter().sum();
        assert_eq!(total, Pt(200.0));
        assert_eq!(Pt(10.0) * 2.0 - Pt(5.0), Pt(15.0));
    }
}
