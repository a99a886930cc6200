//! Element-wise arithmetic between histograms, and between a histogram and
//! a scalar.
//!
//! Histogram-with-histogram combinations can fail on a shape mismatch, so they
//! are named methods returning [`Result`]. Histogram-with-scalar combinations
//! can't fail and are also available as `&hist ⊕ scalar` and `hist ⊕= scalar`
//! through the `std::ops` operators.
//! Nothing here touches the under/overflow counters of an existing histogram;
//! out-of-place results are new histograms and start with empty flows.

use crate::element::Element;
use crate::hist::Histogram;
use log::warn;
use ndarray::Zip;
use simplehist_common::{Result, SimpleHistError};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
}

impl BinaryOp {
    pub fn apply<T: Element>(self, lhs: T, rhs: T) -> T {
        match self {
            BinaryOp::Add => lhs.wrapping_add(rhs),
            BinaryOp::Sub => lhs.wrapping_sub(rhs),
            BinaryOp::Mul => lhs.wrapping_mul(rhs),
            BinaryOp::Div => lhs.true_div(rhs),
            BinaryOp::FloorDiv => lhs.floor_div(rhs),
        }
    }

    fn is_division(self) -> bool {
        matches!(self, BinaryOp::Div | BinaryOp::FloorDiv)
    }
}

fn warn_on_integer_zero_divisor<'a, T: Element>(
    op: BinaryOp,
    divisors: impl IntoIterator<Item = &'a T>,
) {
    if !(T::IS_INTEGER && op.is_division()) {
        return;
    }
    let zeros = divisors.into_iter().filter(|d| d.is_zero()).count();
    if zeros > 0 {
        warn!("{:?}: {} integer bins divided by zero, results set to 0", op, zeros);
    }
}

impl<T: Element> Histogram<T> {
    fn check_shape(&self, other: &Histogram<T>) -> Result<()> {
        if self.data().shape() != other.data().shape() {
            return Err(SimpleHistError::ShapeMismatch {
                left: self.data().shape().to_vec(),
                right: other.data().shape().to_vec(),
            });
        }
        Ok(())
    }

    /// `self ⊕ other` bin by bin, as a new histogram on `self`'s bins.
    pub fn combine(&self, other: &Histogram<T>, op: BinaryOp) -> Result<Histogram<T>> {
        self.check_shape(other)?;
        warn_on_integer_zero_divisor(op, other.data());
        let data = Zip::from(self.data())
            .and(other.data())
            .map_collect(|&a, &b| op.apply(a, b));
        Ok(self.rewrap(data))
    }

    /// `self ⊕= other` bin by bin. Only the data changes.
    pub fn combine_in_place(&mut self, other: &Histogram<T>, op: BinaryOp) -> Result<&mut Self> {
        self.check_shape(other)?;
        warn_on_integer_zero_divisor(op, other.data());
        Zip::from(self.data_mut())
            .and(other.data())
            .for_each(|a, &b| *a = op.apply(*a, b));
        Ok(self)
    }

    pub fn combine_scalar(&self, rhs: T, op: BinaryOp) -> Histogram<T> {
        warn_on_integer_zero_divisor(op, [&rhs]);
        self.rewrap(self.data().mapv(|a| op.apply(a, rhs)))
    }

    pub fn combine_scalar_in_place(&mut self, rhs: T, op: BinaryOp) -> &mut Self {
        warn_on_integer_zero_divisor(op, [&rhs]);
        self.data_mut().mapv_inplace(|a| op.apply(a, rhs));
        self
    }

    pub fn add(&self, other: &Histogram<T>) -> Result<Histogram<T>> {
        self.combine(other, BinaryOp::Add)
    }

    pub fn subtract(&self, other: &Histogram<T>) -> Result<Histogram<T>> {
        self.combine(other, BinaryOp::Sub)
    }

    pub fn multiply(&self, other: &Histogram<T>) -> Result<Histogram<T>> {
        self.combine(other, BinaryOp::Mul)
    }

    pub fn divide(&self, other: &Histogram<T>) -> Result<Histogram<T>> {
        self.combine(other, BinaryOp::Div)
    }

    pub fn floor_divide(&self, other: &Histogram<T>) -> Result<Histogram<T>> {
        self.combine(other, BinaryOp::FloorDiv)
    }

    pub fn add_in_place(&mut self, other: &Histogram<T>) -> Result<&mut Self> {
        self.combine_in_place(other, BinaryOp::Add)
    }

    pub fn subtract_in_place(&mut self, other: &Histogram<T>) -> Result<&mut Self> {
        self.combine_in_place(other, BinaryOp::Sub)
    }

    pub fn multiply_in_place(&mut self, other: &Histogram<T>) -> Result<&mut Self> {
        self.combine_in_place(other, BinaryOp::Mul)
    }

    pub fn divide_in_place(&mut self, other: &Histogram<T>) -> Result<&mut Self> {
        self.combine_in_place(other, BinaryOp::Div)
    }

    pub fn floor_divide_in_place(&mut self, other: &Histogram<T>) -> Result<&mut Self> {
        self.combine_in_place(other, BinaryOp::FloorDiv)
    }
}

macro_rules! impl_scalar_op {
    ($Op:ident, $op_fn:ident, $OpAssign:ident, $op_assign_fn:ident, $kind:expr) => {
        impl<T: Element> $Op<T> for &Histogram<T> {
            type Output = Histogram<T>;

            fn $op_fn(self, rhs: T) -> Histogram<T> {
                self.combine_scalar(rhs, $kind)
            }
        }

        impl<T: Element> $OpAssign<T> for Histogram<T> {
            fn $op_assign_fn(&mut self, rhs: T) {
                self.combine_scalar_in_place(rhs, $kind);
            }
        }
    };
}

impl_scalar_op!(Add, add, AddAssign, add_assign, BinaryOp::Add);
impl_scalar_op!(Sub, sub, SubAssign, sub_assign, BinaryOp::Sub);
impl_scalar_op!(Mul, mul, MulAssign, mul_assign, BinaryOp::Mul);
impl_scalar_op!(Div, div, DivAssign, div_assign, BinaryOp::Div);

// `scalar + hist` and `scalar * hist` for the primitive element types.
macro_rules! impl_commutative_scalar_lhs {
    ($($t:ty),*) => {$(
        impl Add<&Histogram<$t>> for $t {
            type Output = Histogram<$t>;

            fn add(self, rhs: &Histogram<$t>) -> Histogram<$t> {
                rhs.combine_scalar(self, BinaryOp::Add)
            }
        }

        impl Add<Histogram<$t>> for $t {
            type Output = Histogram<$t>;

            fn add(self, rhs: Histogram<$t>) -> Histogram<$t> {
                rhs.combine_scalar(self, BinaryOp::Add)
            }
        }

        impl Mul<&Histogram<$t>> for $t {
            type Output = Histogram<$t>;

            fn mul(self, rhs: &Histogram<$t>) -> Histogram<$t> {
                rhs.combine_scalar(self, BinaryOp::Mul)
            }
        }

        impl Mul<Histogram<$t>> for $t {
            type Output = Histogram<$t>;

            fn mul(self, rhs: Histogram<$t>) -> Histogram<$t> {
                rhs.combine_scalar(self, BinaryOp::Mul)
            }
        }
    )*};
}

impl_commutative_scalar_lhs!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
