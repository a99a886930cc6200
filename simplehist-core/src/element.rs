use num_traits::{Num, NumCast};
use std::fmt::Debug;

/// Numeric type usable as histogram bin storage.
///
/// Floats use their own `+`, `-` and `*`; integers wrap on overflow instead
/// of panicking. Division is pinned down here because floats and integers
/// disagree on it:
///
/// - floats: `true_div` is IEEE division, `floor_div` rounds the quotient
///   toward negative infinity from the `fmod` remainder, so `1.0 // 0.1` is
///   `9.0` rather than `(1.0 / 0.1).floor() == 10.0`;
/// - integers: `true_div` truncates toward zero, `floor_div` rounds toward
///   negative infinity, and division by zero gives `0`.
pub trait Element: Copy + Num + NumCast + PartialOrd + Debug + Send + Sync + 'static {
    const IS_INTEGER: bool;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn true_div(self, rhs: Self) -> Self;
    fn floor_div(self, rhs: Self) -> Self;
}

macro_rules! impl_element_float {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const IS_INTEGER: bool = false;

            fn wrapping_add(self, rhs: Self) -> Self {
                self + rhs
            }

            fn wrapping_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            fn wrapping_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            fn true_div(self, rhs: Self) -> Self {
                self / rhs
            }

            fn floor_div(self, rhs: Self) -> Self {
                if rhs == 0.0 {
                    return self / rhs;
                }
                let rem = self % rhs;
                let mut div = (self - rem) / rhs;
                if rem != 0.0 && ((rhs < 0.0) != (rem < 0.0)) {
                    div -= 1.0;
                }
                if div == 0.0 {
                    return <$t>::copysign(0.0, self / rhs);
                }
                let floored = div.floor();
                if div - floored > 0.5 {
                    floored + 1.0
                } else {
                    floored
                }
            }
        }
    )*};
}

macro_rules! impl_element_signed {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const IS_INTEGER: bool = true;

            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            fn true_div(self, rhs: Self) -> Self {
                if rhs == 0 { 0 } else { self.wrapping_div(rhs) }
            }

            fn floor_div(self, rhs: Self) -> Self {
                if rhs == 0 {
                    return 0;
                }
                let q = self.wrapping_div(rhs);
                if self.wrapping_rem(rhs) != 0 && ((self < 0) != (rhs < 0)) {
                    q - 1
                } else {
                    q
                }
            }
        }
    )*};
}

macro_rules! impl_element_unsigned {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const IS_INTEGER: bool = true;

            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            fn true_div(self, rhs: Self) -> Self {
                self.checked_div(rhs).unwrap_or(0)
            }

            fn floor_div(self, rhs: Self) -> Self {
                self.checked_div(rhs).unwrap_or(0)
            }
        }
    )*};
}

impl_element_float!(f32, f64);
impl_element_signed!(i8, i16, i32, i64, isize);
impl_element_unsigned!(u8, u16, u32, u64, usize);
