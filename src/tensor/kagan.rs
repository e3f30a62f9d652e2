//! Kagan angle: the minimum rotation between two double-couple sources.
//!
//! Kagan, Y. (2007), "Simplified algorithms for calculating double-couple
//! rotation", Geophys. J. Int. 171, 411-418.

use nalgebra::Matrix3;

use super::moment::{build_tensor, plane_to_tensor, principal_frame, MomentTensor};

/// Nominal magnitude used when building tensors for orientation only.
const NOMINAL_MAGNITUDE: f64 = 6.0;

/// Orthonormal right-handed frame with columns `[P, N, T]`.
fn orientation(m: &Matrix3<f64>) -> Matrix3<f64> {
    let ([p, n, t], _) = principal_frame(m);
    Matrix3::from_columns(&[p, n, t])
}

fn rotation_angle(r1: &Matrix3<f64>, r2: &Matrix3<f64>) -> f64 {
    let trace = (r1 * r2.transpose()).trace();
    ((trace - 1.0) / 2.0).clamp(-1.0, 1.0).acos()
}

/// Minimum rotation angle (degrees) between two tensors' principal frames.
///
/// The base frame is compared along with the three variants obtained by
/// flipping two axes at a time, which are the equivalent representations of
/// a double couple.
pub fn kagan_angle_between(m1: &Matrix3<f64>, m2: &Matrix3<f64>) -> f64 {
    let r1 = orientation(m1);
    let r2 = orientation(m2);

    let mut theta = rotation_angle(&r1, &r2);
    for j in 0..3 {
        let k = (j + 1) % 3;
        let mut r3 = r2;
        r3.set_column(j, &(-r2.column(j).into_owned()));
        r3.set_column(k, &(-r2.column(k).into_owned()));
        theta = theta.min(rotation_angle(&r1, &r3));
    }
    theta.to_degrees()
}

/// Kagan angle (degrees) between two fault descriptions.
///
/// For double couples the result lies in `[0, 120]`.
pub fn kagan_angle(
    strike1: f64,
    dip1: f64,
    rake1: f64,
    strike2: f64,
    dip2: f64,
    rake2: f64,
) -> f64 {
    let m1 = build_tensor(&plane_to_tensor(strike1, dip1, rake1, NOMINAL_MAGNITUDE));
    let m2 = build_tensor(&plane_to_tensor(strike2, dip2, rake2, NOMINAL_MAGNITUDE));
    kagan_angle_between(&m1, &m2)
}

impl MomentTensor {
    /// Kagan angle between this tensor and another.
    pub fn kagan_angle(&self, other: &MomentTensor) -> f64 {
        kagan_angle_between(&self.matrix(), &other.matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::auxiliary_plane;
    use crate::tensor::NodalPlane;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_identical_is_zero() {
        let k = kagan_angle(108.0, 47.0, -98.0, 108.0, 47.0, -98.0);
        assert!(k.abs() < 1e-5, "got {}", k);
    }

    #[test]
    fn test_known_solutions() {
        // three solutions for the same event from different methods
        let mww = (108.0, 47.0, -98.0);
        let mwc = (111.0, 46.0, -94.0);
        let mwb = (311.0, 47.0, -85.0);

        let k1 = kagan_angle(mww.0, mww.1, mww.2, mwc.0, mwc.1, mwc.2);
        let k2 = kagan_angle(mww.0, mww.1, mww.2, mwb.0, mwb.1, mwb.2);
        let k3 = kagan_angle(mwc.0, mwc.1, mwc.2, mwb.0, mwb.1, mwb.2);
        assert!((k1 - 3.07).abs() < 0.15, "mww-mwc {}", k1);
        assert!((k2 - 14.43).abs() < 0.15, "mww-mwb {}", k2);
        assert!((k3 - 13.95).abs() < 0.15, "mwc-mwb {}", k3);
    }

    #[test]
    fn test_auxiliary_plane_is_same_source() {
        let plane = NodalPlane::new(35.0, 62.0, 140.0);
        let aux = auxiliary_plane(&plane);
        let k = kagan_angle(plane.strike, plane.dip, plane.rake, aux.strike, aux.dip, aux.rake);
        assert!(k < 1e-4, "got {}", k);
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        for _ in 0..100 {
            let a: (f64, f64, f64) = (
                rng.random_range(0.0..360.0),
                rng.random_range(1.0..89.0),
                rng.random_range(-179.0..179.0),
            );
            let b: (f64, f64, f64) = (
                rng.random_range(0.0..360.0),
                rng.random_range(1.0..89.0),
                rng.random_range(-179.0..179.0),
            );
            let ab = kagan_angle(a.0, a.1, a.2, b.0, b.1, b.2);
            let ba = kagan_angle(b.0, b.1, b.2, a.0, a.1, a.2);
            assert!((ab - ba).abs() < 1e-6, "{} vs {}", ab, ba);
            assert!((0.0..=120.0 + 1e-9).contains(&ab), "out of range {}", ab);
        }
    }

    #[test]
    fn test_tensor_method_matches_angles() {
        let a = MomentTensor::from_angles(10.0, 30.0, 90.0, 7.0);
        let b = MomentTensor::from_angles(30.0, 40.0, 80.0, 5.0);
        let k = a.kagan_angle(&b);
        let expected = kagan_angle(10.0, 30.0, 90.0, 30.0, 40.0, 80.0);
        assert!((k - expected).abs() < 1e-6);
    }
}
