//! Frame rendering.
//!
//! Split in two, in the draw-stream style:
//! - `frame` assembles a renderer-agnostic [`FramePlan`] from the scene
//!   (pure, testable — this is where the per-frame ordering rules live)
//! - `scene_renderer` marshals the plan into uniforms and wgpu draw calls
//!
//! Renderers issue GPU commands via wgpu and own their GPU resources
//! (pipelines, buffers, meshes).

mod frame;
mod scene_renderer;

pub use frame::{
    ANIMATION_STEP_DEG, DrawCall, DrawKind, FrameGlobals, FramePlan, LIGHT_TAG_SENTINEL, assemble,
};
pub use scene_renderer::{PipelineKey, SceneRenderer};
