//! Ray/sphere intersection and closest-hit selection.

use lume_core::{Material, Scene};
use lume_math::{Ray, Vec3};

/// Offset applied to reported hit points along the surface normal, so
/// shadow/visibility rays cast from them cannot re-hit their own surface.
pub const HIT_OFFSET: f32 = 1e-4;

/// Result of intersecting a ray against the scene.
///
/// Exactly one variant holds per query. Surface normals are unit length and
/// outward-facing; hit points are already offset by [`HIT_OFFSET`].
#[derive(Clone, Copy, Debug)]
pub enum Intersection {
    /// The ray hit nothing.
    Miss,
    /// The ray hit a scene sphere.
    Surface {
        point: Vec3,
        normal: Vec3,
        material: Material,
    },
    /// The ray hit the light's sphere.
    Light { point: Vec3, radiance: Vec3 },
}

/// Intersect a ray against one sphere.
///
/// Solves `|origin + t*direction - center|^2 = radius^2`. A non-positive
/// discriminant is a miss, as is a sphere entirely behind the origin;
/// otherwise the smaller positive root is taken. Returns the offset hit
/// point and the outward unit normal.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<(Vec3, Vec3)> {
    let oc = center - ray.origin;
    let a = ray.direction.length_squared();
    let h = ray.direction.dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant <= 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Smaller positive root wins; both roots behind the origin is a miss
    let mut root = (h - sqrtd) / a;
    if root <= 0.0 {
        root = (h + sqrtd) / a;
        if root <= 0.0 {
            return None;
        }
    }

    let hit = ray.at(root);
    let normal = (hit - center).normalize();

    Some((hit + normal * HIT_OFFSET, normal))
}

/// Find the closest intersection of a ray with the scene.
///
/// Linear scan: the light's sphere is tested first, then every scene sphere
/// in order. Among all hits the smallest `|point - origin|` wins; ties break
/// to the first object tested, so results are deterministic.
pub fn closest_hit(ray: &Ray, scene: &Scene) -> Intersection {
    let mut best = Intersection::Miss;
    let mut best_dist = f32::INFINITY;

    if let Some((point, _)) = intersect_sphere(ray, scene.light.center, scene.light.radius) {
        best_dist = (point - ray.origin).length();
        best = Intersection::Light {
            point,
            radiance: scene.light.radiance(),
        };
    }

    for sphere in &scene.spheres {
        if let Some((point, normal)) = intersect_sphere(ray, sphere.center, sphere.radius) {
            let dist = (point - ray.origin).length();
            if dist < best_dist {
                best_dist = dist;
                best = Intersection::Surface {
                    point,
                    normal,
                    material: sphere.material,
                };
            }
        }
    }

    best
}
