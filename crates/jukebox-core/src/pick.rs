use glam::Vec3;

use crate::constants::HOVER_SCALE_BOOST;

/// A pickable scene object, hit-tested as a sphere.
///
/// The target set is fixed and insertion-ordered at startup; `pickable`
/// permanently excludes decorative objects from hit-testing regardless of
/// geometric intersection.
#[derive(Clone, Debug)]
pub struct PickTarget {
    pub position: Vec3,
    pub radius: f32,
    pub scale: Vec3,
    pub pickable: bool,
}

impl PickTarget {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius,
            scale: Vec3::ONE,
            pickable: true,
        }
    }
}

/// The fixed target set plus the single-slot hover state.
#[derive(Clone, Debug, Default)]
pub struct TargetSet {
    targets: Vec<PickTarget>,
    hovered: Option<usize>,
    original_scale: Vec3,
}

/// Nearest positive intersection of a ray with a sphere, if any.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

impl TargetSet {
    pub fn new(targets: Vec<PickTarget>) -> Self {
        Self {
            targets,
            hovered: None,
            original_scale: Vec3::ONE,
        }
    }

    pub fn targets(&self) -> &[PickTarget] {
        &self.targets
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Hit-test a world-space ray against every pickable target.
    ///
    /// Nearest hit wins: the target with the smallest ray parameter is
    /// returned when several overlap under the ray.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<usize> {
        let mut best = None::<(usize, f32)>;
        for (i, target) in self.targets.iter().enumerate() {
            if !target.pickable {
                continue;
            }
            if let Some(t) = ray_sphere(ray_origin, ray_dir, target.position, target.radius) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }
        best.map(|(i, _t)| i)
    }

    /// Apply a pick result to the hover state.
    ///
    /// At most one target is hovered at a time. A previously hovered target
    /// always gets its original scale back before the boost is applied to a
    /// new one, so hover moving directly between two targets cannot leak an
    /// inflated scale.
    pub fn update_hover(&mut self, hit: Option<usize>) {
        if hit == self.hovered {
            return;
        }
        if let Some(prev) = self.hovered.take() {
            self.targets[prev].scale = self.original_scale;
        }
        if let Some(i) = hit {
            self.original_scale = self.targets[i].scale;
            self.targets[i].scale *= HOVER_SCALE_BOOST;
            self.hovered = Some(i);
        }
    }
}
