use glam::DVec3;

pub(crate) trait ToRobust {
    fn to_robust(self) -> robust::Coord3D<f64>;
}

impl ToRobust for DVec3 {
    fn to_robust(self) -> robust::Coord3D<f64> {
        robust::Coord3D {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

/// The signed volume of the tetrahedron `(a, b, c, p)`: the determinant of
/// the 4x4 homogeneous matrix whose rows are `a`, `b`, `c`, `p` each
/// augmented with a trailing 1.
///
/// Computed with [`robust::orient3d`] rather than a naive `f64`
/// determinant so that the strict sign test the hull builder relies on
/// (§4.1: "no tolerance is applied; exact zero is the only coplanar
/// signal") is immune to cancellation error — `orient3d` falls back to
/// arbitrary-precision arithmetic whenever the fast floating-point path
/// can't certify its own sign.
pub(crate) fn signed_volume(a: DVec3, b: DVec3, c: DVec3, p: DVec3) -> f64 {
    robust::orient3d(a.to_robust(), b.to_robust(), c.to_robust(), p.to_robust())
}
