//! Numbers and numerics.

use crate::dual::DualComponent;
use num_traits as nt;
use std::fmt;

/// Gathers traits useful for working with generic floating point types.
///
/// Every algebraic type in this crate is generic over this trait, which is
/// implemented for `f32` and `f64`. Floats can always be used as the
/// components of a [`Dual`](crate::Dual) number.
pub trait Float:
    nt::Float
    + approx::AbsDiffEq<Epsilon = Self>
    + approx::RelativeEq
    + fmt::Debug
    + fmt::Display
    + DualComponent
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const ONE_HALF: Self;
    /// Tolerance used when comparing quaternions and dual quaternions for
    /// approximate equality unless another epsilon is given.
    const DEFAULT_EPSILON: Self;
}

macro_rules! impl_float {
    ($f:tt) => {
        impl Float for $f {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const ONE_HALF: Self = 0.5;
            const DEFAULT_EPSILON: Self = 2e-4;
        }
    };
}

impl_float!(f32);
impl_float!(f64);
