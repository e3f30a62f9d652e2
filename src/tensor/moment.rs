//! Moment tensor construction and principal-axis decomposition.
//!
//! Components are given in the spherical (r, t, p) basis (up, south, east).
//! Decomposition works in a local North-East-Down frame, where a vector with
//! a non-negative Down component plunges into the Earth.

use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use serde::{Deserialize, Serialize};

use crate::geometry::normalize_azimuth;

/// Below this, `sin(dip)` is treated as zero (horizontal plane).
const DIP_EPSILON: f64 = 1e-10;

/// The six independent components of a symmetric moment tensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensorComponents {
    pub mrr: f64,
    pub mtt: f64,
    pub mpp: f64,
    pub mrt: f64,
    pub mrp: f64,
    pub mtp: f64,
}

impl TensorComponents {
    pub fn new(mrr: f64, mtt: f64, mpp: f64, mrt: f64, mrp: f64, mtp: f64) -> Self {
        Self {
            mrr,
            mtt,
            mpp,
            mrt,
            mrp,
            mtp,
        }
    }

    pub fn as_array(&self) -> [f64; 6] {
        [self.mrr, self.mtt, self.mpp, self.mrt, self.mrp, self.mtp]
    }

    pub fn from_array(a: [f64; 6]) -> Self {
        Self::new(a[0], a[1], a[2], a[3], a[4], a[5])
    }

    /// True when every component is finite and at least one is non-zero.
    pub fn is_valid(&self) -> bool {
        let a = self.as_array();
        a.iter().all(|v| v.is_finite()) && a.iter().any(|v| *v != 0.0)
    }

    /// Largest absolute component value.
    pub fn max_abs(&self) -> f64 {
        self.as_array().iter().fold(0.0_f64, |m, v| m.max(v.abs()))
    }

    /// Converts to the North-East-Down frame.
    fn to_ned(self) -> Matrix3<f64> {
        let nn = self.mtt;
        let ee = self.mpp;
        let dd = self.mrr;
        let ne = -self.mtp;
        let nd = self.mrt;
        let ed = -self.mrp;
        Matrix3::new(nn, ne, nd, ne, ee, ed, nd, ed, dd)
    }
}

/// A principal axis of a moment tensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrincipalAxis {
    /// Azimuth in degrees, `[0, 360)`.
    pub azimuth: f64,
    /// Plunge in degrees, `[0, 90]`.
    pub plunge: f64,
    /// Eigenvalue associated with this axis.
    pub value: f64,
}

/// A fault plane orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodalPlane {
    /// Strike in degrees, `[0, 360)`.
    pub strike: f64,
    /// Dip in degrees, `[0, 90]`.
    pub dip: f64,
    /// Rake in degrees, `[-180, 180]`.
    pub rake: f64,
}

impl NodalPlane {
    pub fn new(strike: f64, dip: f64, rake: f64) -> Self {
        Self { strike, dip, rake }
    }
}

/// The result of decomposing a tensor into principal axes and nodal planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposition {
    pub t: PrincipalAxis,
    pub n: PrincipalAxis,
    pub p: PrincipalAxis,
    pub np1: NodalPlane,
    pub np2: NodalPlane,
}

/// Builds the symmetric 3x3 tensor in the (r, t, p) basis.
pub fn build_tensor(c: &TensorComponents) -> Matrix3<f64> {
    Matrix3::new(
        c.mrr, c.mrt, c.mrp, //
        c.mrt, c.mtt, c.mtp, //
        c.mrp, c.mtp, c.mpp,
    )
}

/// Reads the six components back out of a symmetric (r, t, p) matrix.
pub fn components_of(m: &Matrix3<f64>) -> TensorComponents {
    TensorComponents::new(m[(0, 0)], m[(1, 1)], m[(2, 2)], m[(0, 1)], m[(0, 2)], m[(1, 2)])
}

/// Canonical principal frame of a symmetric tensor.
///
/// Returns the eigenvectors `(p, n, t)` for the smallest, middle and largest
/// eigenvalue together with those eigenvalues. `p` and `t` point downward
/// (non-negative last component) and `n` is signed so that `p x n = t`.
pub(crate) fn principal_frame(m: &Matrix3<f64>) -> ([Vector3<f64>; 3], [f64; 3]) {
    let eig = SymmetricEigen::new(*m);
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eig.eigenvalues[a].total_cmp(&eig.eigenvalues[b]));

    let column = |i: usize| -> Vector3<f64> { eig.eigenvectors.column(i).into_owned().normalize() };
    let down = |v: Vector3<f64>| if v.z < 0.0 { -v } else { v };

    let p = down(column(order[0]));
    let t = down(column(order[2]));
    let mut n = column(order[1]);
    if p.cross(&n).dot(&t) < 0.0 {
        n = -n;
    }
    let values = [
        eig.eigenvalues[order[0]],
        eig.eigenvalues[order[1]],
        eig.eigenvalues[order[2]],
    ];
    ([p, n, t], values)
}

/// Converts an NED direction into (azimuth, plunge) in degrees.
fn axis_angles(v: &Vector3<f64>) -> (f64, f64) {
    let v = if v.z < 0.0 { -v } else { *v };
    let plunge = v.z.clamp(-1.0, 1.0).asin().to_degrees();
    let azimuth = normalize_azimuth(v.y.atan2(v.x).to_degrees());
    (azimuth, plunge)
}

/// Converts a (normal, slip) pair in NED to strike/dip/rake.
fn plane_from_vectors(normal: Vector3<f64>, slip: Vector3<f64>) -> NodalPlane {
    // the normal must point up into the hanging wall
    let (n, u) = if normal.z > 0.0 { (-normal, -slip) } else { (normal, slip) };

    let dip = (-n.z).clamp(-1.0, 1.0).acos();
    let sin_dip = dip.sin();
    if sin_dip.abs() < DIP_EPSILON {
        let rake = (-u.y).atan2(u.x);
        return NodalPlane::new(0.0, 0.0, rake.to_degrees());
    }
    let strike = (-n.x).atan2(n.y);
    let rake = (-u.z / sin_dip).atan2(u.x * strike.cos() + u.y * strike.sin());
    NodalPlane::new(
        normalize_azimuth(strike.to_degrees()),
        dip.to_degrees(),
        rake.to_degrees(),
    )
}

/// Unit normal and slip vectors (NED) of a fault plane.
fn plane_vectors(plane: &NodalPlane) -> (Vector3<f64>, Vector3<f64>) {
    let (ss, cs) = plane.strike.to_radians().sin_cos();
    let (sd, cd) = plane.dip.to_radians().sin_cos();
    let (sr, cr) = plane.rake.to_radians().sin_cos();
    let normal = Vector3::new(-sd * ss, sd * cs, -cd);
    let slip = Vector3::new(cr * cs + cd * sr * ss, cr * ss - cd * sr * cs, -sr * sd);
    (normal, slip)
}

/// Derives the auxiliary nodal plane from one nodal plane.
pub fn auxiliary_plane(plane: &NodalPlane) -> NodalPlane {
    let (normal, slip) = plane_vectors(plane);
    plane_from_vectors(slip, normal)
}

/// Decomposes a symmetric (r, t, p) tensor into principal axes and nodal planes.
pub fn decompose(m: &Matrix3<f64>) -> Decomposition {
    let ned = components_of(m).to_ned();
    let ([p, n, t], [pv, nv, tv]) = principal_frame(&ned);

    let axis = |v: &Vector3<f64>, value: f64| {
        let (azimuth, plunge) = axis_angles(v);
        PrincipalAxis {
            azimuth,
            plunge,
            value,
        }
    };

    let sqrt2 = std::f64::consts::SQRT_2;
    let normal = (t + p) / sqrt2;
    let slip = (t - p) / sqrt2;
    let np1 = plane_from_vectors(normal, slip);
    let np2 = plane_from_vectors(slip, normal);

    Decomposition {
        t: axis(&t, tv),
        n: axis(&n, nv),
        p: axis(&p, pv),
        np1,
        np2,
    }
}

/// Converts a fault plane to tensor components in N·m.
///
/// The scalar moment is `10^(1.5·Mw + 16.1)` dyne-cm. For pure orientation
/// work the magnitude is irrelevant.
pub fn plane_to_tensor(strike: f64, dip: f64, rake: f64, magnitude: f64) -> TensorComponents {
    let m0 = 10f64.powf(1.5 * magnitude + 16.1) * 1e-7;
    let (ss, cs) = strike.to_radians().sin_cos();
    let (s2s, c2s) = (2.0 * strike).to_radians().sin_cos();
    let (sd, cd) = dip.to_radians().sin_cos();
    let (s2d, c2d) = (2.0 * dip).to_radians().sin_cos();
    let (sr, cr) = rake.to_radians().sin_cos();

    let mrr = m0 * s2d * sr;
    let mtt = -m0 * (sd * cr * s2s + s2d * sr * ss * ss);
    let mpp = m0 * (sd * cr * s2s - s2d * sr * cs * cs);
    let mrt = -m0 * (cd * cr * cs + c2d * sr * ss);
    let mrp = m0 * (cd * cr * ss - c2d * sr * cs);
    let mtp = -m0 * (sd * cr * c2s + 0.5 * s2d * sr * s2s);
    TensorComponents::new(mrr, mtt, mpp, mrt, mrp, mtp)
}

/// A moment tensor with its derived axes and nodal planes.
///
/// Immutable once built; everything is derived from the six components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentTensor {
    pub components: TensorComponents,
    pub t: PrincipalAxis,
    pub n: PrincipalAxis,
    pub p: PrincipalAxis,
    pub np1: NodalPlane,
    pub np2: NodalPlane,
    /// Network or study the solution came from.
    pub source: Option<String>,
    /// Solution type (Mww, Mwb, ...).
    pub kind: Option<String>,
}

impl MomentTensor {
    /// Builds a tensor from its six components.
    pub fn from_components(components: TensorComponents) -> Self {
        let d = decompose(&build_tensor(&components));
        Self {
            components,
            t: d.t,
            n: d.n,
            p: d.p,
            np1: d.np1,
            np2: d.np2,
            source: None,
            kind: None,
        }
    }

    /// Builds a double-couple tensor from a fault plane and magnitude.
    pub fn from_angles(strike: f64, dip: f64, rake: f64, magnitude: f64) -> Self {
        Self::from_components(plane_to_tensor(strike, dip, rake, magnitude))
    }

    /// Attaches provenance tags.
    pub fn with_provenance(mut self, source: impl Into<String>, kind: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self.kind = Some(kind.into());
        self
    }

    pub fn matrix(&self) -> Matrix3<f64> {
        build_tensor(&self.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn angle_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    fn same_plane(a: &NodalPlane, b: &NodalPlane, tol: f64) -> bool {
        angle_diff(a.strike, b.strike) < tol
            && (a.dip - b.dip).abs() < tol
            && angle_diff(a.rake, b.rake) < tol
    }

    #[test]
    fn test_build_tensor_symmetric() {
        let c = TensorComponents::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let m = build_tensor(&c);
        assert_eq!(m, m.transpose());
        assert_eq!(components_of(&m), c);
    }

    #[test]
    fn test_pure_thrust_axes() {
        // 45 degree thrust striking north: T vertical, P horizontal east-west
        let mt = MomentTensor::from_angles(0.0, 45.0, 90.0, 6.0);
        assert!((mt.t.plunge - 90.0).abs() < 1e-6, "T plunge {}", mt.t.plunge);
        assert!(mt.p.plunge.abs() < 1e-6, "P plunge {}", mt.p.plunge);
        assert!(
            angle_diff(mt.p.azimuth, 90.0) < 1e-6 || angle_diff(mt.p.azimuth, 270.0) < 1e-6,
            "P azimuth {}",
            mt.p.azimuth
        );
        assert!(mt.n.plunge.abs() < 1e-6);
    }

    #[test]
    fn test_shallow_thrust_axis_plunges() {
        let (strike, dip) = (307.0, 15.0);
        let mt = MomentTensor::from_angles(strike, dip, 90.0, 7.0);
        assert!((mt.t.plunge - (45.0 + dip)).abs() < 1e-6, "T {}", mt.t.plunge);
        assert!((mt.p.plunge - (45.0 - dip)).abs() < 1e-6, "P {}", mt.p.plunge);
        assert!(angle_diff(mt.p.azimuth, strike - 90.0) < 1e-6, "P az {}", mt.p.azimuth);
    }

    #[test]
    fn test_eigenvalue_ordering() {
        let mt = MomentTensor::from_angles(120.0, 60.0, -30.0, 5.5);
        assert!(mt.p.value <= mt.n.value && mt.n.value <= mt.t.value);
        assert!(mt.n.value.abs() < 1e-6 * mt.t.value.abs());
    }

    #[test]
    fn test_plane_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let strike = rng.random_range(0.0..360.0);
            let dip = rng.random_range(5.0..85.0);
            let rake = rng.random_range(-175.0..175.0);
            let input = NodalPlane::new(strike, dip, rake);
            let mt = MomentTensor::from_angles(strike, dip, rake, 6.0);
            assert!(
                same_plane(&mt.np1, &input, 1e-4) || same_plane(&mt.np2, &input, 1e-4),
                "input {:?} np1 {:?} np2 {:?}",
                input,
                mt.np1,
                mt.np2
            );
        }
    }

    #[test]
    fn test_canonical_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let c = TensorComponents::from_array([
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            ]);
            let mt = MomentTensor::from_components(c);
            for axis in [mt.t, mt.n, mt.p] {
                assert!((0.0..360.0).contains(&axis.azimuth), "azimuth {}", axis.azimuth);
                assert!((0.0..=90.0).contains(&axis.plunge), "plunge {}", axis.plunge);
            }
            for plane in [mt.np1, mt.np2] {
                assert!((0.0..360.0).contains(&plane.strike), "strike {}", plane.strike);
                assert!((0.0..=90.0).contains(&plane.dip), "dip {}", plane.dip);
                assert!((-180.0..=180.0).contains(&plane.rake), "rake {}", plane.rake);
            }
        }
    }

    #[test]
    fn test_decomposition_is_deterministic_under_scaling() {
        let c = TensorComponents::new(1.1e19, -2.3e19, 1.2e19, 4.0e18, -7.7e18, 3.1e18);
        let scaled = TensorComponents::from_array(c.as_array().map(|v| v * 1e-10));
        let a = MomentTensor::from_components(c);
        let b = MomentTensor::from_components(scaled);
        assert!(same_plane(&a.np1, &b.np1, 1e-6));
        assert!((a.t.azimuth - b.t.azimuth).abs() < 1e-6);
    }

    #[test]
    fn test_auxiliary_plane() {
        // vertical strike-slip: auxiliary plane is the orthogonal vertical plane
        let aux = auxiliary_plane(&NodalPlane::new(0.0, 90.0, 0.0));
        assert!((aux.dip - 90.0).abs() < 1e-6, "dip {}", aux.dip);
        assert!(
            angle_diff(aux.strike, 90.0) < 1e-6 || angle_diff(aux.strike, 270.0) < 1e-6,
            "strike {}",
            aux.strike
        );

        let plane = NodalPlane::new(40.0, 30.0, 75.0);
        let back = auxiliary_plane(&auxiliary_plane(&plane));
        assert!(same_plane(&plane, &back, 1e-6), "{:?} vs {:?}", plane, back);
    }

    #[test]
    fn test_plane_to_tensor_moment() {
        // a vertical strike-slip on a north-striking fault only has mtp
        let c = plane_to_tensor(0.0, 90.0, 0.0, 6.0);
        let m0 = 10f64.powf(1.5 * 6.0 + 16.1) * 1e-7;
        assert!((c.mtp.abs() - m0).abs() < 1e-6 * m0);
        assert!(c.mrr.abs() < 1e-6 * m0);
        assert!(c.mrt.abs() < 1e-6 * m0);
    }

    #[test]
    fn test_provenance() {
        let mt = MomentTensor::from_angles(10.0, 20.0, 30.0, 6.0).with_provenance("us", "Mww");
        assert_eq!(mt.source.as_deref(), Some("us"));
        assert_eq!(mt.kind.as_deref(), Some("Mww"));
    }
}
