//! Dual numbers.

use crate::{num::Float, quaternion::Quaternion};
use std::ops::{Add, Mul, Neg, Sub};

/// A dual number `real + ε·dual`, where `ε² = 0`.
///
/// The components can be any type with ring-like arithmetic (see
/// [`DualComponent`]). With scalar components, the dual part carries
/// first-order sensitivity information through every operation. With
/// [`Quaternion`] components, the dual number is a
/// [`DualQuaternion`](crate::DualQuaternion) representing a rigid transform.
///
/// Products keep the operand order of the components, so the algebra is
/// also valid for noncommutative components.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dual<T> {
    real: T,
    dual: T,
}

/// A type that can be used for the components of a [`Dual`] number.
pub trait DualComponent:
    Copy + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn identity() -> Self;
}

macro_rules! impl_dual_component_for_float {
    ($f:ty) => {
        impl DualComponent for $f {
            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn identity() -> Self {
                1.0
            }
        }
    };
}

impl_dual_component_for_float!(f32);
impl_dual_component_for_float!(f64);

impl<F: Float> DualComponent for Quaternion<F> {
    #[inline]
    fn zero() -> Self {
        Quaternion::zero()
    }

    #[inline]
    fn identity() -> Self {
        Quaternion::identity()
    }
}

impl<T: DualComponent> Dual<T> {
    /// Creates a new dual number with the given real and dual parts.
    #[inline]
    pub const fn new(real: T, dual: T) -> Self {
        Self { real, dual }
    }

    /// Creates a dual number with the given real part and zero dual part.
    #[inline]
    pub fn from_real(real: T) -> Self {
        Self::new(real, T::zero())
    }

    /// The multiplicative identity `(1, 0)`.
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::identity(), T::zero())
    }

    /// The additive identity `(0, 0)`.
    #[inline]
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    /// Returns the real part.
    #[inline]
    pub fn real(&self) -> T {
        self.real
    }

    /// Returns the dual part.
    #[inline]
    pub fn dual(&self) -> T {
        self.dual
    }
}

impl<F: Float> Dual<F> {
    /// Returns the dual conjugate `real − ε·dual`.
    ///
    /// Dual quaternions use a different conjugate, see
    /// [`DualQuaternion::conjugate`](crate::DualQuaternion::conjugate).
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            real: self.real,
            dual: -self.dual,
        }
    }

    /// Computes the square root of the dual scalar, `√a + ε·a'/(2√a)`, which
    /// propagates the derivative of the square root into the dual part.
    ///
    /// # Panics
    /// If the real part is not positive.
    pub fn sqrt(&self) -> Self {
        assert!(
            self.real > F::ZERO,
            "Tried to take square root of dual scalar with non-positive real part"
        );
        let root = self.real.sqrt();
        Self {
            real: root,
            dual: self.dual / (F::TWO * root),
        }
    }
}

impl_binop!(Add, add, [T: DualComponent], Dual<T>, Dual<T>, Dual<T>, |a, b| {
    Dual::new(a.real + b.real, a.dual + b.dual)
});

impl_binop!(Sub, sub, [T: DualComponent], Dual<T>, Dual<T>, Dual<T>, |a, b| {
    Dual::new(a.real - b.real, a.dual - b.dual)
});

impl_binop!(Mul, mul, [T: DualComponent], Dual<T>, Dual<T>, Dual<T>, |a, b| {
    Dual::new(a.real * b.real, a.real * b.dual + a.dual * b.real)
});

impl_binop!(Div, div, [F: Float], Dual<F>, Dual<F>, Dual<F>, |a, b| {
    debug_assert!(b.real != F::ZERO, "Tried to divide by dual scalar with zero real part");
    Dual {
        real: a.real / b.real,
        dual: (a.dual * b.real - a.real * b.dual) / (b.real * b.real),
    }
});

impl_binop!(Mul, mul, [F: Float], Dual<F>, F, Dual<F>, |a, b| {
    Dual {
        real: a.real * *b,
        dual: a.dual * *b,
    }
});

impl_binop!(Div, div, [F: Float], Dual<F>, F, Dual<F>, |a, b| {
    Dual {
        real: a.real / *b,
        dual: a.dual / *b,
    }
});

impl_unary_op!(Neg, neg, [T: DualComponent], Dual<T>, Dual<T>, |a| {
    Dual::new(-a.real, -a.dual)
});

impl<T> approx::AbsDiffEq for Dual<T>
where
    T: DualComponent + approx::AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.real.abs_diff_eq(&other.real, epsilon) && self.dual.abs_diff_eq(&other.dual, epsilon)
    }
}

impl<T> approx::RelativeEq for Dual<T>
where
    T: DualComponent + approx::RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.real.relative_eq(&other.real, epsilon, max_relative)
            && self.dual.relative_eq(&other.dual, epsilon, max_relative)
    }
}
