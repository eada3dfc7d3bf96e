/// Render options, four independent toggles.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RenderOptions {
    /// Cull back faces.
    pub back_face_culling: bool,
    /// Depth-test draws (z-buffer).
    pub z_buffer: bool,
    /// Draw a small marker sphere at each light position.
    pub show_lights: bool,
    /// Orbit the lights a little every frame.
    pub animate_lights: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            back_face_culling: true,
            z_buffer: true,
            show_lights: true,
            animate_lights: false,
        }
    }
}
