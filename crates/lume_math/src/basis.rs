//! Orthonormal basis construction and reflection.

use crate::Vec3;

/// Build an orthonormal basis `(tangent, bitangent)` around a unit normal.
///
/// The helper axis is world Y when the normal is nearly parallel to world X
/// (`|n.x| > 0.9`), world X otherwise, so the Gram-Schmidt step never
/// degenerates. Deterministic given the normal: the same input always yields
/// the same frame, which keeps seeded renders reproducible.
pub fn build_orthonormal_basis(normal: Vec3) -> (Vec3, Vec3) {
    let helper = if normal.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };

    let tangent = (helper - normal * helper.dot(normal)).normalize();
    let bitangent = normal.cross(tangent);

    (tangent, bitangent)
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
