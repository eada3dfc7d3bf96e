//! Lumina engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the viewer,
//! plus the scene core: transform stack, scene state, light registry,
//! procedural meshes and the per-frame renderer.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod transform;
pub mod scene;
pub mod mesh;
pub mod render;
