use glam::{Mat4, Vec3};
use rand::Rng;

/// Hard cap on the light registry; mirrors the shader's light array length.
pub const MAX_LIGHTS: usize = 8;

/// Planar range for randomized new-light placement (x and z axes).
const RANDOM_RANGE: f32 = 1.5;

/// Fixed height for newly added lights.
const SPAWN_HEIGHT: f32 = 1.0;

/// Default intensity for all three terms of a new light (0-255 channels).
const WHITE: [f32; 3] = [255.0, 255.0, 255.0];

/// A single point/directional light.
///
/// Intensities use 0-255 channels like the materials; they are scaled to
/// [0, 1] when marshaled into uniforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub position: Vec3,

    /// Ambient intensity.
    pub ia: [f32; 3],
    /// Diffuse intensity.
    pub id: [f32; 3],
    /// Specular intensity.
    pub is: [f32; 3],

    /// When set, `position` is interpreted as a direction, not a point.
    pub directional: bool,

    /// Inactive lights contribute no illumination but stay in the registry.
    pub active: bool,
}

/// Result of an `add_light` attempt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AddLightOutcome {
    /// The light was appended at this index.
    Added(usize),
    /// The registry already holds [`MAX_LIGHTS`]; nothing changed.
    Full,
}

/// Ordered collection of lights.
///
/// Lights are only ever appended (up to [`MAX_LIGHTS`]); removal is out of
/// scope. Panel indices are valid by construction, so access is by plain
/// indexing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightRig {
    lights: Vec<Light>,
}

impl LightRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a light at a randomized planar position with white
    /// intensities, or reports [`AddLightOutcome::Full`] at capacity.
    pub fn add_light(&mut self, rng: &mut impl Rng) -> AddLightOutcome {
        if self.lights.len() == MAX_LIGHTS {
            return AddLightOutcome::Full;
        }

        let position = Vec3::new(
            rng.gen_range(-RANDOM_RANGE..=RANDOM_RANGE),
            SPAWN_HEIGHT,
            rng.gen_range(-RANDOM_RANGE..=RANDOM_RANGE),
        );

        self.lights.push(Light {
            position,
            ia: WHITE,
            id: WHITE,
            is: WHITE,
            directional: false,
            active: true,
        });

        AddLightOutcome::Added(self.lights.len() - 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Light> {
        self.lights.iter_mut()
    }

    /// Rotates every light's position by `step_deg` degrees: around the X
    /// axis for even indices, around Y for odd ones. The rotated position is
    /// written back, so repeated steps orbit the light.
    ///
    /// Deterministic: the same angle and starting positions always produce
    /// the same output positions.
    pub fn animate(&mut self, step_deg: f32) {
        let angle = step_deg.to_radians();
        let around_x = Mat4::from_rotation_x(angle);
        let around_y = Mat4::from_rotation_y(angle);

        for (index, light) in self.lights.iter_mut().enumerate() {
            let rotation = if index % 2 == 0 { around_x } else { around_y };
            light.position = rotation.transform_point3(light.position);
        }
    }
}

impl std::ops::Index<usize> for LightRig {
    type Output = Light;

    fn index(&self, index: usize) -> &Light {
        &self.lights[index]
    }
}

impl std::ops::IndexMut<usize> for LightRig {
    fn index_mut(&mut self, index: usize) -> &mut Light {
        &mut self.lights[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn add_light_succeeds_exactly_eight_times_from_empty() {
        let mut rig = LightRig::new();
        let mut rng = rng();

        for expected in 0..MAX_LIGHTS {
            assert_eq!(rig.add_light(&mut rng), AddLightOutcome::Added(expected));
        }

        assert_eq!(rig.add_light(&mut rng), AddLightOutcome::Full);
        assert_eq!(rig.len(), MAX_LIGHTS);
    }

    #[test]
    fn ninth_add_leaves_registry_unchanged() {
        let mut rig = LightRig::new();
        let mut rng = rng();

        // Scenario: one default light, then seven adds fill the registry.
        for _ in 0..8 {
            rig.add_light(&mut rng);
        }
        let before = rig.clone();

        assert_eq!(rig.add_light(&mut rng), AddLightOutcome::Full);
        assert_eq!(rig, before);
    }

    #[test]
    fn new_lights_spawn_in_planar_range_with_white_intensities() {
        let mut rig = LightRig::new();
        let mut rng = rng();
        rig.add_light(&mut rng);

        let light = &rig[0];
        assert!(light.position.x.abs() <= RANDOM_RANGE);
        assert!((light.position.y - SPAWN_HEIGHT).abs() < f32::EPSILON);
        assert!(light.position.z.abs() <= RANDOM_RANGE);
        assert_eq!(light.ia, WHITE);
        assert_eq!(light.id, WHITE);
        assert_eq!(light.is, WHITE);
        assert!(!light.directional);
        assert!(light.active);
    }

    #[test]
    fn animate_is_deterministic() {
        let mut rng = rng();
        let mut a = LightRig::new();
        a.add_light(&mut rng);
        a.add_light(&mut rng);
        a.add_light(&mut rng);
        let mut b = a.clone();

        a.animate(1.0);
        b.animate(1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn animate_alternates_axes_by_index() {
        let mut rig = LightRig::new();
        let mut rng = rng();
        rig.add_light(&mut rng);
        rig.add_light(&mut rng);

        rig[0].position = Vec3::new(0.0, 1.0, 0.0);
        rig[1].position = Vec3::new(0.0, 1.0, 0.0);

        rig.animate(90.0);

        // Even index rotates around X: +Y goes to +Z.
        assert!((rig[0].position - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        // Odd index rotates around Y: +Y is on the axis, unchanged.
        assert!((rig[1].position - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-5);
    }
}
