/// Phong reflectivity coefficients.
///
/// Channels are 0-255 (the panel's color pickers edit them directly) and are
/// scaled to [0, 1] when marshaled into uniforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Ambient reflectivity.
    pub ka: [f32; 3],
    /// Diffuse reflectivity.
    pub kd: [f32; 3],
    /// Specular reflectivity.
    pub ks: [f32; 3],
    /// Specular exponent, non-negative.
    pub shininess: f32,
}

impl Material {
    /// Startup material for the user-editable figure.
    pub fn figure_default() -> Self {
        Self {
            ka: [0.0, 25.0, 0.0],
            kd: [0.0, 100.0, 0.0],
            ks: [255.0, 255.0, 255.0],
            shininess: 50.0,
        }
    }

    /// Fixed material for the base slab.
    pub fn base_default() -> Self {
        Self {
            ka: [15.0, 15.0, 10.0],
            kd: [60.0, 40.0, 15.0],
            ks: [65.0, 65.0, 65.0],
            shininess: 150.0,
        }
    }
}
