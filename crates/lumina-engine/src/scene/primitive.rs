/// The closed set of drawable figures.
///
/// A closed enum (rather than a name tag) gives the draw dispatch
/// compile-time exhaustiveness.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    Sphere,
    Cube,
    Pyramid,
    Cylinder,
    Torus,
}

impl Primitive {
    /// All variants, in the order the panel's dropdown lists them.
    pub const ALL: [Primitive; 5] = [
        Primitive::Sphere,
        Primitive::Cube,
        Primitive::Pyramid,
        Primitive::Cylinder,
        Primitive::Torus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Primitive::Sphere => "Sphere",
            Primitive::Cube => "Cube",
            Primitive::Pyramid => "Pyramid",
            Primitive::Cylinder => "Cylinder",
            Primitive::Torus => "Torus",
        }
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
