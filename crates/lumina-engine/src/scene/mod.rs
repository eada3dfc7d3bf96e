//! Scene state.
//!
//! Responsibilities:
//! - hold everything a frame reads: camera, render options, selected
//!   primitive + materials, and the light registry
//! - keep mutation trivial: the control panel writes fields in place and the
//!   renderer observes a fully-settled state on the same thread
//!
//! No backend types leak in here; the render module marshals this state into
//! uniforms.

mod camera;
mod light;
mod material;
mod options;
mod primitive;

pub use camera::{Camera, FOVY_MAX, FOVY_MIN};
pub use light::{AddLightOutcome, Light, LightRig, MAX_LIGHTS};
pub use material::Material;
pub use options::RenderOptions;
pub use primitive::Primitive;

/// Background clear color (linear RGBA), matching the global ambient tone.
pub const CLEAR_COLOR: [f64; 4] = [0.2, 0.2, 0.2, 1.0];

/// Process-wide scene state, owned by the application loop.
///
/// The panel holds no copies: it edits these fields through its binding
/// table, and the frame renderer reads them once per frame.
#[derive(Debug, Clone)]
pub struct SceneState {
    pub camera: Camera,
    pub options: RenderOptions,

    /// Selected figure and its live-editable material.
    pub figure: Primitive,
    pub figure_material: Material,

    /// Fixed-material slab under the figure.
    pub base_material: Material,

    pub lights: LightRig,
}

impl SceneState {
    /// Builds the startup scene: default camera/options/materials and one
    /// light at a randomized planar position.
    pub fn new(rng: &mut impl rand::Rng) -> Self {
        let mut lights = LightRig::new();
        // One initial light; capacity is 8, so this cannot fail.
        let _ = lights.add_light(rng);

        Self {
            camera: Camera::default(),
            options: RenderOptions::default(),
            figure: Primitive::Sphere,
            figure_material: Material::figure_default(),
            base_material: Material::base_default(),
            lights,
        }
    }
}
