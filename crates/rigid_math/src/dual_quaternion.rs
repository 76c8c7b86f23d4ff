//! Dual quaternions representing rigid-body transforms.

use crate::{dual::Dual, num::Float, quaternion::Quaternion};
use nalgebra::Vector3;

/// A dual number with [`Quaternion`] components, `r + ε·d`.
///
/// A unit dual quaternion represents a rigid transform: `r` is the unit
/// rotation quaternion and `d = ½·t·r`, where `t` is the translation
/// embedded in a pure quaternion. The product `a·b` is the transform that
/// applies `b` first and then `a`.
pub type DualQuaternion<F> = Dual<Quaternion<F>>;

impl<F: Float> Dual<Quaternion<F>> {
    /// Creates a transform that only rotates, using the given unit rotation
    /// quaternion.
    #[inline]
    pub fn make_rotation(rotation: &Quaternion<F>) -> Self {
        Self::from_real(*rotation)
    }

    /// Creates a transform that only translates by the given vector.
    #[inline]
    pub fn make_translation(translation: &Vector3<F>) -> Self {
        Self::new(
            Quaternion::identity(),
            Quaternion::make_pure(translation) * F::ONE_HALF,
        )
    }

    /// Creates the transform that first rotates with the given unit rotation
    /// quaternion and then translates by the given vector.
    ///
    /// # Panics
    /// If the rotation quaternion does not have unit norm.
    pub fn make_coordinate_system(rotation: &Quaternion<F>, translation: &Vector3<F>) -> Self {
        assert!(
            rotation.is_unit(),
            "Tried to create coordinate system with non-unit rotation {rotation:?}"
        );
        Self::new(
            *rotation,
            Quaternion::make_pure(translation) * rotation * F::ONE_HALF,
        )
    }

    /// Returns the rotation quaternion (the real part).
    #[inline]
    pub fn rotation(&self) -> Quaternion<F> {
        self.real()
    }

    /// Extracts the translation `t` from the imaginary part of `2·d·r̄`.
    #[inline]
    pub fn translation(&self) -> Vector3<F> {
        (self.dual() * self.real().conjugate() * F::TWO).imag()
    }

    /// Returns the quaternion conjugate `(r̄, d̄)`, where both parts are
    /// conjugated as quaternions.
    ///
    /// Unlike the conjugate of dual scalars, the dual part is not negated.
    /// The product `D·D̄` is a dual scalar (see
    /// [`Self::norm_squared`]), and for unit transforms this is the inverse.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.real().conjugate(), self.dual().conjugate())
    }

    /// Returns the combined (quaternion and dual) conjugate `(r̄, −d̄)`.
    ///
    /// For a unit transform `D` and a point `p`, the sandwich
    /// `D·(1 + ε·p)·(r̄, −d̄)` equals `1 + ε·(r·p·r̄ + t)`, which is what
    /// [`Self::transform_point`] evaluates.
    #[inline]
    pub fn combined_conjugate(&self) -> Self {
        Self::new(self.real().conjugate(), -self.dual().conjugate())
    }

    /// Computes `D·D̄`, which is a dual scalar `(|r|², 2·r⋅d)`.
    ///
    /// # Panics
    /// If the imaginary parts of the product exceed
    /// [`Float::DEFAULT_EPSILON`] scaled by `max(1, |r|·(|r| + |d|))`, which
    /// indicates a non-finite dual quaternion.
    pub fn norm_squared(&self) -> Dual<F> {
        let product = self * self.conjugate();
        let (real, dual) = (product.real(), product.dual());

        // Rounding in the product grows with the size of the operands
        let real_norm = self.real().norm();
        let tolerance =
            F::DEFAULT_EPSILON * F::ONE.max(real_norm * (real_norm + self.dual().norm()));

        assert!(
            real.imag_norm() <= tolerance && dual.imag_norm() <= tolerance,
            "Product of dual quaternion with its conjugate is not a dual scalar: {product:?}"
        );
        Dual::new(real.w(), dual.w())
    }

    /// Computes the dual scalar norm `√(D·D̄)`.
    #[inline]
    pub fn norm(&self) -> Dual<F> {
        self.norm_squared().sqrt()
    }

    /// Returns the dual quaternion divided by its dual scalar norm, which has
    /// a unit rotation part and a dual part orthogonal to it.
    #[inline]
    pub fn normalized(&self) -> Self {
        self / self.norm()
    }

    /// Whether this is a unit dual quaternion (a valid rigid transform),
    /// meaning that `r⋅r ≈ 1` to within [`Float::DEFAULT_EPSILON`] and
    /// `r⋅d ≈ 0` to within [`Float::DEFAULT_EPSILON`] scaled by
    /// `max(1, |d|)`.
    pub fn is_unit(&self) -> bool {
        let real = self.real();
        let dual = self.dual();
        (real.dot(&real) - F::ONE).abs() <= F::DEFAULT_EPSILON
            && real.dot(&dual).abs() <= F::DEFAULT_EPSILON * F::ONE.max(dual.norm())
    }

    /// Computes the multiplicative inverse `D̄ / (D·D̄)`. For a unit
    /// transform this is simply the conjugate.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.norm_squared()
    }

    /// Applies the transform to the given point with the full dual
    /// quaternion sandwich `D·(1 + ε·p)·D*`, where `D*` is the
    /// [combined conjugate](Self::combined_conjugate).
    ///
    /// The transform is assumed to be a unit dual quaternion.
    pub fn transform_point(&self, point: &Vector3<F>) -> Vector3<F> {
        let encoded = Self::new(Quaternion::identity(), Quaternion::encode_point(point));
        (self * encoded * self.combined_conjugate()).dual().imag()
    }

    /// Blends linearly between the raw components of the two transforms and
    /// renormalizes the result.
    ///
    /// This is a cheap approximation of interpolation along the shortest
    /// screw motion, not the exact geodesic. `pct = 0` gives `begin` and
    /// `pct = 1` gives `end` (assuming both are unit transforms).
    pub fn blend(begin: &Self, end: &Self, pct: F) -> Self {
        (begin * (F::ONE - pct) + end * pct).normalized()
    }
}

impl_binop!(Mul, mul, [F: Float], Dual<Quaternion<F>>, F, Dual<Quaternion<F>>, |a, b| {
    Dual::new(a.real() * *b, a.dual() * *b)
});

impl_binop!(Div, div, [F: Float], Dual<Quaternion<F>>, F, Dual<Quaternion<F>>, |a, b| {
    Dual::new(a.real() / *b, a.dual() / *b)
});

// Division by a dual scalar `s + ε·s'`
impl_binop!(
    Div,
    div,
    [F: Float],
    Dual<Quaternion<F>>,
    Dual<F>,
    Dual<Quaternion<F>>,
    |a, b| {
        let s = b.real();
        let ds = b.dual();
        assert!(
            s != F::ZERO,
            "Tried to divide dual quaternion by dual scalar with zero real part"
        );
        Dual::new(a.real() / s, (a.dual() * s - a.real() * ds) / (s * s))
    }
);
