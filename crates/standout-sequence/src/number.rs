//! Numeric support for checked aggregation.

/// Numbers that can be summed without silent wrap-around.
///
/// Implemented for all primitive integer types. Floats are left out because
/// they saturate to infinity instead of overflowing; use
/// [`QueryableSequence::sum_of`](crate::QueryableSequence::sum_of) for them.
pub trait CheckedAdd: Sized + Copy {
    /// The additive identity.
    const ZERO: Self;

    /// Adds `rhs`, returning `None` on overflow.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_checked_add {
    ($($t:ty),*) => {
        $(
            impl CheckedAdd for $t {
                const ZERO: Self = 0;

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }
            }
        )*
    };
}

impl_checked_add!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
