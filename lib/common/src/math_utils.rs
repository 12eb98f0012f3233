/* 数值工具：加法及溢出策略 */
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("{ty} overflow: {lhs} + {rhs}")]
    Overflow {
        ty: &'static str,
        lhs: String,
        rhs: String,
    },
    #[error("unknown overflow policy `{0}`, expected wrap, saturate or checked")]
    UnknownPolicy(String),
}

/// A primitive numeric type that `add` and its variants accept.
///
/// Integers report overflow when the mathematical sum does not fit the type.
/// Floats never do: `f64::MAX + f64::MAX` is `inf` under IEEE-754.
pub trait Number: Copy + PartialEq + PartialOrd + fmt::Debug + fmt::Display + Add<Output = Self> {
    const ZERO: Self;
    const MIN: Self;
    const MAX: Self;
    /// Rust name of the type, used in error messages.
    const NAME: &'static str;

    /// Two's-complement sum and whether it wrapped.
    fn overflowing_sum(self, rhs: Self) -> (Self, bool);

    fn saturating_sum(self, rhs: Self) -> Self;
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {$(
        impl Number for $ty {
            const ZERO: Self = 0;
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;
            const NAME: &'static str = stringify!($ty);

            fn overflowing_sum(self, rhs: Self) -> (Self, bool) {
                self.overflowing_add(rhs)
            }

            fn saturating_sum(self, rhs: Self) -> Self {
                self.saturating_add(rhs)
            }
        }
    )*};
}

macro_rules! impl_float {
    ($($ty:ty),*) => {$(
        impl Number for $ty {
            const ZERO: Self = 0.0;
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;
            const NAME: &'static str = stringify!($ty);

            fn overflowing_sum(self, rhs: Self) -> (Self, bool) {
                (self + rhs, false)
            }

            fn saturating_sum(self, rhs: Self) -> Self {
                self + rhs
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

/// Returns `a + b`.
///
/// Integer sums wrap around at the type boundary in every build profile, so
/// `add(i32::MAX, 1) == i32::MIN`. For sums that fit the type this is exactly
/// the native `+`.
pub fn add<T: Number>(a: T, b: T) -> T {
    a.overflowing_sum(b).0
}

/// Returns `a + b` clamped to `T::MIN..=T::MAX`.
pub fn saturating_add<T: Number>(a: T, b: T) -> T {
    a.saturating_sum(b)
}

/// Returns `a + b`, or [`MathError::Overflow`] when the sum does not fit `T`.
pub fn checked_add<T: Number>(a: T, b: T) -> Result<T, MathError> {
    match a.overflowing_sum(b) {
        (sum, false) => Ok(sum),
        (_, true) => Err(MathError::Overflow {
            ty: T::NAME,
            lhs: a.to_string(),
            rhs: b.to_string(),
        }),
    }
}

/// What to do when a sum leaves the representable range.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    #[default]
    Wrap,
    Saturate,
    Checked,
}

impl OverflowPolicy {
    pub fn name(self) -> &'static str {
        match self {
            OverflowPolicy::Wrap => "wrap",
            OverflowPolicy::Saturate => "saturate",
            OverflowPolicy::Checked => "checked",
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OverflowPolicy {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrap" => Ok(OverflowPolicy::Wrap),
            "saturate" => Ok(OverflowPolicy::Saturate),
            "checked" => Ok(OverflowPolicy::Checked),
            _ => Err(MathError::UnknownPolicy(s.to_owned())),
        }
    }
}

/// Adds under the given policy. Only [`OverflowPolicy::Checked`] can fail.
pub fn add_with<T: Number>(policy: OverflowPolicy, a: T, b: T) -> Result<T, MathError> {
    match policy {
        OverflowPolicy::Wrap => Ok(add(a, b)),
        OverflowPolicy::Saturate => Ok(saturating_add(a, b)),
        OverflowPolicy::Checked => checked_add(a, b),
    }
}

#[cfg(test)]
mod tests {
    use crate::math_utils::*;

    #[test]
    fn test_add_positive_numbers() {
        assert_eq!(add(2, 3), 5);
        println!("test_add_positive_numbers passed");
    }

    #[test]
    fn test_add_matches_native_addition() {
        for _ in 0..10_000 {
            let a = fastrand::i32(i32::MIN / 2..i32::MAX / 2);
            let b = fastrand::i32(i32::MIN / 2..i32::MAX / 2);
            assert_eq!(add(a, b), a + b);

            let a = fastrand::u64(..u64::MAX / 2);
            let b = fastrand::u64(..u64::MAX / 2);
            assert_eq!(add(a, b), a + b);
        }
    }

    #[test]
    fn test_commutative_and_identity() {
        for _ in 0..10_000 {
            let a = fastrand::i64(..);
            let b = fastrand::i64(..);
            assert_eq!(add(a, b), add(b, a));
            assert_eq!(saturating_add(a, b), saturating_add(b, a));
            assert_eq!(add(a, 0), a);
            assert_eq!(checked_add(a, i64::ZERO), Ok(a));

            let x = fastrand::f64() * 1e9;
            let y = fastrand::f64() * -1e9;
            assert_eq!(add(x, y), add(y, x));
            assert_eq!(add(x, 0.0), x);
        }
    }

    #[test]
    fn test_i8_exhaustive() {
        // 每一对 i8 都和 i16 中的精确结果比较
        for a in i8::MIN..=i8::MAX {
            for b in i8::MIN..=i8::MAX {
                let exact = a as i16 + b as i16;
                let fits = (i8::MIN as i16..=i8::MAX as i16).contains(&exact);

                assert_eq!(add(a, b), exact as i8);
                assert_eq!(checked_add(a, b).is_ok(), fits);
                assert_eq!(saturating_add(a, b) as i16, exact.clamp(i8::MIN as i16, i8::MAX as i16));
            }
        }
    }

    #[test]
    fn test_boundary() {
        assert_eq!(add(i32::MAX, 1), i32::MIN);
        assert_eq!(add(i32::MIN, -1), i32::MAX);
        assert_eq!(add(u8::MAX, u8::MAX), 254);
        assert_eq!(add(i64::MAX, i64::MIN), -1);

        assert_eq!(saturating_add(i32::MAX, 1), i32::MAX);
        assert_eq!(saturating_add(i32::MIN, -1), i32::MIN);
        assert_eq!(saturating_add(u8::MAX, u8::MAX), u8::MAX);

        assert_eq!(
            checked_add(i32::MAX, 1),
            Err(MathError::Overflow {
                ty: "i32",
                lhs: "2147483647".into(),
                rhs: "1".into(),
            })
        );
        assert_eq!(checked_add(u128::MAX, 0), Ok(u128::MAX));

        assert!(add(f64::MAX, f64::MAX).is_infinite());
        assert!(checked_add(f32::MAX, f32::MAX).unwrap().is_infinite());
        assert!(add(f64::NAN, 1.0).is_nan());
    }

    fn check_limits<T: Number>() {
        assert_eq!(saturating_add(T::MAX, T::MAX), T::MAX);
        assert_eq!(saturating_add(T::MIN, T::MIN), T::MIN);
        assert_eq!(add(T::MAX, T::ZERO), T::MAX);
        assert_eq!(checked_add(T::MIN, T::ZERO), Ok(T::MIN));
        assert!(checked_add(T::MAX, T::MAX).is_err());
        assert!(T::MIN < T::MAX);
    }

    #[test]
    fn test_integer_limits() {
        check_limits::<i8>();
        check_limits::<i16>();
        check_limits::<i32>();
        check_limits::<i64>();
        check_limits::<i128>();
        check_limits::<isize>();
        check_limits::<u8>();
        check_limits::<u16>();
        check_limits::<u32>();
        check_limits::<u64>();
        check_limits::<u128>();
        check_limits::<usize>();
    }

    #[test]
    fn test_overflow_message() {
        let err = checked_add(u8::MAX, 1).unwrap_err();
        assert_eq!(err.to_string(), "u8 overflow: 255 + 1");
    }

    #[test]
    fn test_policy() {
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::Wrap);
        assert_eq!("wrap".parse::<OverflowPolicy>(), Ok(OverflowPolicy::Wrap));
        assert_eq!(" Saturate ".parse::<OverflowPolicy>(), Ok(OverflowPolicy::Saturate));
        assert_eq!("CHECKED".parse::<OverflowPolicy>(), Ok(OverflowPolicy::Checked));
        assert_eq!(
            "clamp".parse::<OverflowPolicy>(),
            Err(MathError::UnknownPolicy("clamp".into()))
        );
        assert_eq!(OverflowPolicy::Saturate.to_string(), "saturate");

        assert_eq!(add_with(OverflowPolicy::Wrap, i16::MAX, 1), Ok(i16::MIN));
        assert_eq!(add_with(OverflowPolicy::Saturate, i16::MAX, 1), Ok(i16::MAX));
        assert!(add_with(OverflowPolicy::Checked, i16::MAX, 1).is_err());
        assert_eq!(add_with(OverflowPolicy::Checked, 2, 3), Ok(5));
    }
}
