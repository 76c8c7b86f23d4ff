//! Quaternions.

use crate::num::Float;
use nalgebra::{Matrix3, Vector3};

/// A quaternion `w + i·𝐢 + j·𝐣 + k·𝐤`.
///
/// A quaternion of unit norm represents a rotation. Other quaternions are
/// general elements of the (noncommutative) quaternion algebra, which is
/// needed for intermediate values such as the logarithm of a rotation or the
/// translational part of a dual quaternion.
///
/// Exact equality is available through [`PartialEq`], but since practically
/// every algebraic identity only holds up to rounding, comparisons should
/// normally go through the [`approx`] traits, whose default epsilon is
/// [`Float::DEFAULT_EPSILON`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quaternion<F> {
    w: F,
    i: F,
    j: F,
    k: F,
}

impl<F: Float> Quaternion<F> {
    /// Creates a new quaternion with the given real part and imaginary
    /// components.
    #[inline]
    pub const fn new(w: F, i: F, j: F, k: F) -> Self {
        Self { w, i, j, k }
    }

    /// Creates a quaternion with the given real part and no imaginary part.
    #[inline]
    pub fn from_real(w: F) -> Self {
        Self::new(w, F::ZERO, F::ZERO, F::ZERO)
    }

    /// Creates a quaternion from the given real part and imaginary vector.
    #[inline]
    pub fn from_parts(real: F, imag: &Vector3<F>) -> Self {
        Self::new(real, imag.x, imag.y, imag.z)
    }

    /// Creates a pure quaternion (zero real part) with the given vector as
    /// imaginary part.
    #[inline]
    pub fn make_pure(imag: &Vector3<F>) -> Self {
        Self::from_parts(F::ZERO, imag)
    }

    /// Embeds the given point in a pure quaternion so that it can be rotated
    /// with [`Self::passively_rotate_encoded_point`]. The point is recovered
    /// with [`Self::imag`].
    #[inline]
    pub fn encode_point(point: &Vector3<F>) -> Self {
        Self::make_pure(point)
    }

    /// The multiplicative identity `1`.
    #[inline]
    pub fn identity() -> Self {
        Self::from_real(F::ONE)
    }

    /// The additive identity `0`.
    #[inline]
    pub fn zero() -> Self {
        Self::from_real(F::ZERO)
    }

    /// Creates the unit quaternion representing a rotation by the given
    /// angle (in radians) about the given axis. The axis does not have to be
    /// normalized, but it must be non-zero.
    ///
    /// # Panics
    /// If the axis has zero length.
    pub fn make_rotation(angle: F, axis: &Vector3<F>) -> Self {
        let axis_length = (axis.x * axis.x + axis.y * axis.y + axis.z * axis.z).sqrt();
        assert!(
            axis_length > F::ZERO,
            "Tried to create rotation about zero axis"
        );
        let half_angle = angle * F::ONE_HALF;
        let scale = half_angle.sin() / axis_length;
        Self::new(
            half_angle.cos(),
            axis.x * scale,
            axis.y * scale,
            axis.z * scale,
        )
    }

    /// Returns the real part.
    #[inline]
    pub fn w(&self) -> F {
        self.w
    }

    /// Returns the coefficient of `𝐢`.
    #[inline]
    pub fn i(&self) -> F {
        self.i
    }

    /// Returns the coefficient of `𝐣`.
    #[inline]
    pub fn j(&self) -> F {
        self.j
    }

    /// Returns the coefficient of `𝐤`.
    #[inline]
    pub fn k(&self) -> F {
        self.k
    }

    /// Returns the real part.
    #[inline]
    pub fn real(&self) -> F {
        self.w
    }

    /// Returns the imaginary part as a vector.
    #[inline]
    pub fn imag(&self) -> Vector3<F> {
        Vector3::new(self.i, self.j, self.k)
    }

    /// Returns the conjugate, which has the imaginary part negated.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.i, -self.j, -self.k)
    }

    /// Computes the four-dimensional dot product with the given quaternion.
    #[inline]
    pub fn dot(&self, other: &Self) -> F {
        self.w * other.w + self.i * other.i + self.j * other.j + self.k * other.k
    }

    /// Computes the squared norm, which is the real part of `q·q̄`.
    #[inline]
    pub fn norm_squared(&self) -> F {
        self.dot(self)
    }

    /// Computes the norm (magnitude).
    #[inline]
    pub fn norm(&self) -> F {
        self.norm_squared().sqrt()
    }

    /// Computes the length of the imaginary part.
    #[inline]
    pub fn imag_norm(&self) -> F {
        (self.i * self.i + self.j * self.j + self.k * self.k).sqrt()
    }

    /// Computes the multiplicative inverse `q̄ / |q|²`.
    ///
    /// # Panics
    /// If the quaternion is zero.
    pub fn inverse(&self) -> Self {
        let norm_squared = self.norm_squared();
        assert!(
            norm_squared > F::ZERO,
            "Tried to invert zero quaternion"
        );
        self.conjugate() / norm_squared
    }

    /// Returns the quaternion scaled to unit norm.
    ///
    /// # Panics
    /// If the quaternion is zero.
    pub fn normalized(&self) -> Self {
        let norm = self.norm();
        assert!(norm > F::ZERO, "Tried to normalize zero quaternion");
        self / norm
    }

    /// Whether the quaternion has unit norm to within
    /// [`Float::DEFAULT_EPSILON`].
    #[inline]
    pub fn is_unit(&self) -> bool {
        (self.norm_squared() - F::ONE).abs() <= F::DEFAULT_EPSILON
    }

    /// Returns the unit rotation axis and the rotation angle in radians
    /// (in `[0, 2π]`), or [`None`] if the rotation is too close to the
    /// identity for the axis to be defined.
    ///
    /// The quaternion is assumed to have unit norm.
    pub fn axis_angle(&self) -> Option<(Vector3<F>, F)> {
        let imag_norm = self.imag_norm();
        if imag_norm <= F::epsilon() {
            return None;
        }
        let angle = F::TWO * imag_norm.atan2(self.w);
        let inv_imag_norm = F::ONE / imag_norm;
        let axis = Vector3::new(
            self.i * inv_imag_norm,
            self.j * inv_imag_norm,
            self.k * inv_imag_norm,
        );
        Some((axis, angle))
    }

    /// Rotates the given encoded point (a pure quaternion) with the given
    /// unit rotation quaternion by the sandwich product `r·p·r̄`.
    #[inline]
    pub fn passively_rotate_encoded_point(rotation: &Self, encoded_point: &Self) -> Self {
        rotation * encoded_point * rotation.conjugate()
    }

    /// Rotates the given vector with this unit rotation quaternion.
    #[inline]
    pub fn rotate_vector(&self, vector: &Vector3<F>) -> Vector3<F> {
        Self::passively_rotate_encoded_point(self, &Self::encode_point(vector)).imag()
    }

    /// Returns the rotation that applies `first` and then `second`, which is
    /// the product `second·first`.
    #[inline]
    pub fn compose_rotations(first: &Self, second: &Self) -> Self {
        second * first
    }

    /// Raises the quaternion to the given real power using its polar form
    /// `|q|(cos θ + n̂ sin θ)`, with `θ = atan2(|v|, w)`.
    ///
    /// When the imaginary part vanishes the direction `n̂` is undefined, and
    /// the result is the real power `|q|ⁿ cos(nθ)` (which for a positive real
    /// part is simply `wⁿ`).
    pub fn pow(&self, exponent: F) -> Self {
        let imag_norm = self.imag_norm();
        let norm = self.norm();
        let angle = imag_norm.atan2(self.w);
        let scaled_angle = exponent * angle;
        let norm_pow = norm.powf(exponent);

        if imag_norm <= F::epsilon() {
            return Self::from_real(norm_pow * scaled_angle.cos());
        }

        let imag_scale = norm_pow * scaled_angle.sin() / imag_norm;
        Self::new(
            norm_pow * scaled_angle.cos(),
            self.i * imag_scale,
            self.j * imag_scale,
            self.k * imag_scale,
        )
    }

    /// Computes the quaternion exponential `eʷ(cos|v| + v/|v| sin|v|)`.
    ///
    /// This is valid for any quaternion, not only pure ones, and is the
    /// inverse of [`Self::log`] whenever `|v| < π`.
    pub fn exp(&self) -> Self {
        let imag_norm = self.imag_norm();
        let exp_w = self.w.exp();

        // sin|v|/|v| → 1
        let imag_scale = if imag_norm <= F::epsilon() {
            exp_w
        } else {
            exp_w * imag_norm.sin() / imag_norm
        };

        Self::new(
            exp_w * imag_norm.cos(),
            self.i * imag_scale,
            self.j * imag_scale,
            self.k * imag_scale,
        )
    }

    /// Computes the principal quaternion logarithm
    /// `ln|q| + v/|v| atan2(|v|, w)`.
    ///
    /// This is valid for any non-zero quaternion, not only unit ones.
    pub fn log(&self) -> Self {
        let imag_norm = self.imag_norm();
        let norm = self.norm();

        // atan2(|v|, w)/|v| → 1/|q| for positive w
        let imag_scale = if imag_norm <= F::epsilon() {
            F::ONE / norm
        } else {
            imag_norm.atan2(self.w) / imag_norm
        };

        Self::new(
            norm.ln(),
            self.i * imag_scale,
            self.j * imag_scale,
            self.k * imag_scale,
        )
    }

    /// Spherical linear interpolation `begin·(b̄egin·end)ᵗ` between two unit
    /// rotation quaternions, following the geodesic from `begin` (at `t = 0`)
    /// to `end` (at `t = 1`).
    pub fn slerp(begin: &Self, end: &Self, t: F) -> Self {
        begin * (begin.conjugate() * end).pow(t)
    }

    /// Computes the 3x3 rotation matrix corresponding to this unit
    /// quaternion.
    pub fn to_rotation_matrix(&self) -> Matrix3<F> {
        let Self { w, i, j, k } = *self;
        let two = F::TWO;
        Matrix3::new(
            F::ONE - two * (j * j + k * k),
            two * (i * j - w * k),
            two * (i * k + w * j),
            two * (i * j + w * k),
            F::ONE - two * (i * i + k * k),
            two * (j * k - w * i),
            two * (i * k - w * j),
            two * (j * k + w * i),
            F::ONE - two * (i * i + j * j),
        )
    }
}

impl_binop!(Add, add, [F: Float], Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion::new(a.w + b.w, a.i + b.i, a.j + b.j, a.k + b.k)
});

impl_binop!(Sub, sub, [F: Float], Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion::new(a.w - b.w, a.i - b.i, a.j - b.j, a.k - b.k)
});

// Hamilton product
impl_binop!(Mul, mul, [F: Float], Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion::new(
        a.w * b.w - a.i * b.i - a.j * b.j - a.k * b.k,
        a.w * b.i + a.i * b.w + a.j * b.k - a.k * b.j,
        a.w * b.j - a.i * b.k + a.j * b.w + a.k * b.i,
        a.w * b.k + a.i * b.j - a.j * b.i + a.k * b.w,
    )
});

impl_binop!(Mul, mul, [F: Float], Quaternion<F>, F, Quaternion<F>, |a, b| {
    let b = *b;
    Quaternion::new(a.w * b, a.i * b, a.j * b, a.k * b)
});

impl_binop!(Div, div, [F: Float], Quaternion<F>, F, Quaternion<F>, |a, b| {
    let inv_b = F::ONE / *b;
    Quaternion::new(a.w * inv_b, a.i * inv_b, a.j * inv_b, a.k * inv_b)
});

impl_unary_op!(Neg, neg, [F: Float], Quaternion<F>, Quaternion<F>, |a| {
    Quaternion::new(-a.w, -a.i, -a.j, -a.k)
});

impl<F: Float> approx::AbsDiffEq for Quaternion<F> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::DEFAULT_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.i.abs_diff_eq(&other.i, epsilon)
            && self.j.abs_diff_eq(&other.j, epsilon)
            && self.k.abs_diff_eq(&other.k, epsilon)
    }
}

impl<F: Float> approx::RelativeEq for Quaternion<F> {
    fn default_max_relative() -> F {
        F::DEFAULT_EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
        self.w.relative_eq(&other.w, epsilon, max_relative)
            && self.i.relative_eq(&other.i, epsilon, max_relative)
            && self.j.relative_eq(&other.j, epsilon, max_relative)
            && self.k.relative_eq(&other.k, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use approx::{abs_diff_eq, assert_abs_diff_eq};
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    type Quat = Quaternion<f64>;

    const EPSILON: f64 = 1e-9;

    fn unit_x() -> Vector3<f64> {
        Vector3::new(1.0, 0.0, 0.0)
    }

    fn unit_y() -> Vector3<f64> {
        Vector3::new(0.0, 1.0, 0.0)
    }

    fn unit_z() -> Vector3<f64> {
        Vector3::new(0.0, 0.0, 1.0)
    }

    fn test_rotations() -> [Quat; 3] {
        [
            Quat::identity(),
            Quat::make_rotation(36.3_f64.to_radians(), &unit_y()),
            Quat::make_rotation(FRAC_PI_2, &Vector3::new(1.0, 1.0, 1.0)),
        ]
    }

    prop_compose! {
        fn axis_strategy()(
            x in -1.0_f64..1.0,
            y in -1.0_f64..1.0,
            z in -1.0_f64..1.0,
        ) -> Vector3<f64> {
            let axis = Vector3::new(x, y, z);
            if axis.norm() < 1e-3 { unit_z() } else { axis }
        }
    }

    prop_compose! {
        fn rotation_strategy()(
            axis in axis_strategy(),
            angle in -PI..PI,
        ) -> Quat {
            Quat::make_rotation(angle, &axis)
        }
    }

    #[test]
    fn creating_quaternion_from_components_works() {
        let q = Quat::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.w(), 1.0);
        assert_eq!(q.i(), 2.0);
        assert_eq!(q.j(), 3.0);
        assert_eq!(q.k(), 4.0);
        assert_eq!(q.imag(), Vector3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn creating_quaternion_from_real_works() {
        let q = Quat::from_real(5.0);
        assert_eq!(q.real(), 5.0);
        assert_eq!(q.imag(), Vector3::zeros());
    }

    #[test]
    fn encoding_point_gives_pure_quaternion() {
        let point = Vector3::new(0.0, 2.0, 3.0);
        let encoded = Quat::encode_point(&point);
        assert_eq!(encoded.w(), 0.0);
        assert_eq!(encoded.imag(), point);
    }

    #[test]
    fn conjugate_negates_imaginary_part() {
        let q = Quat::new(1.0, -2.0, 3.0, -4.0);
        assert_eq!(q.conjugate(), Quat::new(1.0, 2.0, -3.0, 4.0));
    }

    #[test]
    fn hamilton_product_of_basis_elements_works() {
        let i = Quat::new(0.0, 1.0, 0.0, 0.0);
        let j = Quat::new(0.0, 0.0, 1.0, 0.0);
        let k = Quat::new(0.0, 0.0, 0.0, 1.0);
        let minus_one = Quat::from_real(-1.0);

        assert_eq!(&i * &i, minus_one);
        assert_eq!(&j * &j, minus_one);
        assert_eq!(&k * &k, minus_one);
        assert_eq!(&i * &j, k);
        assert_eq!(&j * &k, i);
        assert_eq!(&k * &i, j);
    }

    #[test]
    fn hamilton_product_is_noncommutative() {
        let i = Quat::new(0.0, 1.0, 0.0, 0.0);
        let j = Quat::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, -(j * i));
    }

    #[test]
    fn scalar_multiplication_and_division_work() {
        let q = Quat::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q * 2.0, Quat::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(q / 2.0, Quat::new(0.5, 1.0, 1.5, 2.0));
    }

    #[test]
    fn addition_and_subtraction_work() {
        let a = Quat::new(1.0, 2.0, 3.0, 4.0);
        let b = Quat::new(2.0, 1.0, 1.0, 1.0);
        assert_eq!(a + b, Quat::new(3.0, 3.0, 4.0, 5.0));
        assert_eq!(a - b, Quat::new(-1.0, 1.0, 2.0, 3.0));
    }

    #[test]
    fn norm_works() {
        let q = Quat::new(1.0, 2.0, 2.0, 4.0);
        assert_abs_diff_eq!(q.norm_squared(), 25.0, epsilon = EPSILON);
        assert_abs_diff_eq!(q.norm(), 5.0, epsilon = EPSILON);
        assert_abs_diff_eq!((q * q.conjugate()).w(), 25.0, epsilon = EPSILON);
    }

    #[test]
    fn inverse_gives_identity_for_non_unit_quaternion() {
        let q = Quat::new(1.0, 2.0, -0.5, 3.0);
        assert_abs_diff_eq!(q * q.inverse(), Quat::identity(), epsilon = EPSILON);
        assert_abs_diff_eq!(q.inverse() * q, Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    #[should_panic]
    fn inverting_zero_quaternion_fails() {
        Quat::zero().inverse();
    }

    #[test]
    fn unit_rotations_times_conjugate_give_identity() {
        for q in test_rotations() {
            assert_abs_diff_eq!(q.norm(), 1.0);
            assert!(q.is_unit());
            assert_abs_diff_eq!(q * q.conjugate(), Quat::identity());
        }
    }

    #[test]
    fn approximate_equality_uses_default_tolerance() {
        let q = Quat::new(1.0, 0.0, 0.0, 0.0);
        assert!(abs_diff_eq!(q, Quat::new(1.0001, 0.0, 0.0, -0.0001)));
        assert!(!abs_diff_eq!(q, Quat::new(1.001, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn making_rotation_gives_half_angle_encoding() {
        let angle = 1.2;
        let q = Quat::make_rotation(angle, &Vector3::new(0.0, 0.0, 3.0));
        assert_abs_diff_eq!(
            q,
            Quat::new((0.6_f64).cos(), 0.0, 0.0, (0.6_f64).sin()),
            epsilon = EPSILON
        );
    }

    #[test]
    #[should_panic]
    fn making_rotation_about_zero_axis_fails() {
        Quat::make_rotation(1.0, &Vector3::zeros());
    }

    #[test]
    fn axis_angle_inverts_make_rotation() {
        let axis = Vector3::new(1.0, -2.0, 0.5).normalize();
        let q = Quat::make_rotation(2.0, &axis);
        let (extracted_axis, extracted_angle) = q.axis_angle().unwrap();
        assert_abs_diff_eq!(extracted_axis, axis, epsilon = EPSILON);
        assert_abs_diff_eq!(extracted_angle, 2.0, epsilon = EPSILON);
    }

    #[test]
    fn axis_angle_of_identity_is_none() {
        assert!(Quat::identity().axis_angle().is_none());
    }

    #[test]
    fn rotating_point_about_z_works() {
        let q = Quat::make_rotation(FRAC_PI_2, &unit_z());
        let rotated = Quat::passively_rotate_encoded_point(&q, &Quat::encode_point(&unit_x()));
        assert_abs_diff_eq!(rotated.w(), 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(rotated.imag(), unit_y(), epsilon = EPSILON);
    }

    #[test]
    fn rotating_vector_agrees_with_rotation_matrix() {
        let q = Quat::make_rotation(0.7, &Vector3::new(1.0, 2.0, 3.0));
        let vector = Vector3::new(-1.0, 0.5, 2.0);
        assert_abs_diff_eq!(
            q.rotate_vector(&vector),
            q.to_rotation_matrix() * vector,
            epsilon = EPSILON
        );
    }

    #[test]
    fn composing_rotations_applies_first_rotation_first() {
        let about_z = Quat::make_rotation(FRAC_PI_2, &unit_z());
        let about_x = Quat::make_rotation(FRAC_PI_2, &unit_x());
        let composed = Quat::compose_rotations(&about_z, &about_x);

        // x → y under the first rotation, then y → z under the second
        assert_abs_diff_eq!(composed.rotate_vector(&unit_x()), unit_z(), epsilon = EPSILON);
    }

    #[test]
    fn squaring_rotation_doubles_angle() {
        let angle = 0.4;
        let axis = Vector3::new(0.3, -1.0, 0.2);
        let q = Quat::make_rotation(angle, &axis);
        let doubled = Quat::make_rotation(2.0 * angle, &axis);

        assert_abs_diff_eq!(q.pow(2.0), q * q);
        assert_abs_diff_eq!(q.pow(2.0), doubled);
    }

    #[test]
    fn pow_of_real_quaternion_is_real_power() {
        let q = Quat::from_real(4.0);
        assert_abs_diff_eq!(q.pow(0.5), Quat::from_real(2.0), epsilon = EPSILON);
        assert_abs_diff_eq!(q.pow(0.0), Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn pow_scales_norm() {
        let q = Quat::make_rotation(0.8, &unit_x()) * 3.0;
        assert_abs_diff_eq!(q.pow(2.0), q * q, epsilon = 1e-6);
        assert_abs_diff_eq!(q.pow(-1.0), q.inverse(), epsilon = 1e-6);
    }

    #[test]
    fn exp_inverts_log_for_test_rotations() {
        for q in test_rotations() {
            assert_abs_diff_eq!(q.log().exp(), q);
        }
    }

    #[test]
    fn log_inverts_exp_for_test_rotations() {
        for q in test_rotations() {
            assert_abs_diff_eq!(q.exp().log(), q);
        }
    }

    #[test]
    fn exp_and_log_are_inverses_for_non_unit_quaternion() {
        let q = Quat::new(2.0, 0.3, -0.4, 0.5);
        assert_abs_diff_eq!(q.log().exp(), q, epsilon = 1e-6);
        assert_abs_diff_eq!(q.exp().log(), q, epsilon = 1e-6);
    }

    #[test]
    fn log_of_rotation_is_half_angle_times_axis() {
        let q = Quat::make_rotation(1.0, &unit_y());
        assert_abs_diff_eq!(q.log(), Quat::new(0.0, 0.0, 0.5, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn slerp_hits_endpoints() {
        let begin = Quat::make_rotation(0.3, &unit_x());
        let end = Quat::make_rotation(1.1, &Vector3::new(0.0, 1.0, 1.0));
        assert_abs_diff_eq!(Quat::slerp(&begin, &end, 0.0), begin);
        assert_abs_diff_eq!(Quat::slerp(&begin, &end, 1.0), end);
    }

    #[test]
    fn slerp_of_quarter_turn_samples_evenly_spaced_rotations() {
        let begin = Quat::identity();
        let end = Quat::make_rotation(FRAC_PI_2, &unit_z());
        for step in 0..=9 {
            let t = f64::from(step) / 9.0;
            let expected = Quat::make_rotation(f64::from(step * 10).to_radians(), &unit_z());
            assert_abs_diff_eq!(Quat::slerp(&begin, &end, t), expected);
        }
    }

    proptest! {
        #[test]
        fn should_preserve_unit_norm_under_multiplication(
            a in rotation_strategy(),
            b in rotation_strategy(),
        ) {
            prop_assert!((a * b).is_unit());
        }
    }

    proptest! {
        #[test]
        fn should_give_identity_when_multiplying_rotation_with_conjugate(
            q in rotation_strategy(),
        ) {
            prop_assert!(abs_diff_eq!(q * q.conjugate(), Quat::identity()));
        }
    }

    proptest! {
        #[test]
        fn should_preserve_vector_length_when_rotating(
            q in rotation_strategy(),
            vector in axis_strategy(),
        ) {
            prop_assert!(abs_diff_eq!(q.rotate_vector(&vector).norm(), vector.norm(), epsilon = 1e-9));
        }
    }

    proptest! {
        #[test]
        fn should_hit_endpoints_when_slerping(
            begin in rotation_strategy(),
            end in rotation_strategy(),
        ) {
            prop_assert!(abs_diff_eq!(Quat::slerp(&begin, &end, 0.0), begin));
            prop_assert!(abs_diff_eq!(Quat::slerp(&begin, &end, 1.0), end));
        }
    }
}
