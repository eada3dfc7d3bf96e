use glam::{Mat4, Vec3};

use crate::scene::{Light, Material, Primitive, RenderOptions, SceneState};
use crate::transform::MatrixStack;

/// Tag value meaning "not drawing a light marker".
pub const LIGHT_TAG_SENTINEL: i32 = -1;

/// Degrees each light orbits per animated frame.
pub const ANIMATION_STEP_DEG: f32 = 1.0;

/// Uniform scale applied to the marker sphere at each light position.
const LIGHT_MARKER_SCALE: f32 = 0.05;

/// Base slab placement: dropped below the figure and flattened.
const BASE_OFFSET_Y: f32 = -0.55;
const BASE_SCALE_XZ: f32 = 3.0;
const BASE_SCALE_Y: f32 = 0.1;

/// What a draw call is for; the renderer does not care, tests and debugging
/// do.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawKind {
    LightMarker(usize),
    Base,
    Figure,
}

/// One mesh draw with its fully composed model-view and material.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub kind: DrawKind,
    pub mesh: Primitive,
    pub model_view: Mat4,
    pub material: Material,
    /// Light index while drawing that light's marker, else the sentinel.
    pub light_tag: i32,
}

/// Frame-global uniform values, captured once per frame after the animation
/// step so every draw in the frame observes the same settled state.
#[derive(Debug, Clone)]
pub struct FrameGlobals {
    /// Base model-view (equals the view matrix before any object transform).
    pub model_view: Mat4,
    pub projection: Mat4,
    /// Inverse-transpose of the base model-view.
    pub normals: Mat4,
    /// Inverse-transpose of the view alone.
    pub view_normals: Mat4,
    pub view: Mat4,
    pub lights: Vec<Light>,
}

/// Everything the scene renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct FramePlan {
    pub globals: FrameGlobals,
    pub options: RenderOptions,
    pub draws: Vec<DrawCall>,
}

/// Assembles the frame in its strict order:
///
/// 1. view matrix from the camera;
/// 2. projection matrix from the camera (aspect comes from the caller, who
///    recomputes it on resize — camera near/far apply everywhere);
/// 3. the view matrix becomes the transform stack's base;
/// 4. frame globals are captured (after the animation step, so markers and
///    shading agree on light positions);
/// 5. lights: when shown, one marker per light, each inside a matched
///    push/pop, tagged with its index; the tag reverts to the sentinel for
///    everything else;
/// 6. base: translated/flattened cube with the fixed base material;
/// 7. figure: the selected primitive on the untransformed base matrix.
///
/// The stack is guaranteed to return at its pre-frame depth.
pub fn assemble(scene: &mut SceneState, aspect: f32, stack: &mut MatrixStack) -> FramePlan {
    let view = scene.camera.view_matrix();
    let projection = scene.camera.projection_matrix(aspect);

    stack.load(view);

    // Animation precedes the light snapshot: the original applied the
    // rotation per light just before uploading that light's uniforms, and
    // rotating one light never reads another, so a single step up front is
    // equivalent. Lights only move while their markers are shown.
    if scene.options.show_lights && scene.options.animate_lights {
        scene.lights.animate(ANIMATION_STEP_DEG);
    }

    let base_model_view = stack.current();
    let globals = FrameGlobals {
        model_view: base_model_view,
        projection,
        normals: base_model_view.inverse().transpose(),
        view_normals: view.inverse().transpose(),
        view,
        lights: scene.lights.iter().cloned().collect(),
    };

    let mut draws = Vec::with_capacity(scene.lights.len() + 2);

    // Phase A — light markers.
    if scene.options.show_lights {
        for (index, light) in scene.lights.iter().enumerate() {
            stack.saved(|stack| {
                stack.translate(light.position);
                stack.scale(Vec3::splat(LIGHT_MARKER_SCALE));
                // Markers shade from the tag; the material is ignored.
                draws.push(DrawCall {
                    kind: DrawKind::LightMarker(index),
                    mesh: Primitive::Sphere,
                    model_view: stack.current(),
                    material: scene.figure_material.clone(),
                    light_tag: index as i32,
                });
            });
        }
    }

    // Phase B — base slab.
    stack.saved(|stack| {
        stack.translate(Vec3::new(0.0, BASE_OFFSET_Y, 0.0));
        stack.scale(Vec3::new(BASE_SCALE_XZ, BASE_SCALE_Y, BASE_SCALE_XZ));
        draws.push(DrawCall {
            kind: DrawKind::Base,
            mesh: Primitive::Cube,
            model_view: stack.current(),
            material: scene.base_material.clone(),
            light_tag: LIGHT_TAG_SENTINEL,
        });
    });

    // Phase C — selected figure, on the untransformed base matrix.
    draws.push(DrawCall {
        kind: DrawKind::Figure,
        mesh: scene.figure,
        model_view: stack.current(),
        material: scene.figure_material.clone(),
        light_tag: LIGHT_TAG_SENTINEL,
    });

    FramePlan {
        globals,
        options: scene.options,
        draws,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn test_scene() -> SceneState {
        let mut rng = StdRng::seed_from_u64(11);
        SceneState::new(&mut rng)
    }

    fn mats_close(a: Mat4, b: Mat4) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array().iter())
            .all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn stack_depth_is_restored_after_a_frame() {
        let mut scene = test_scene();
        let mut stack = MatrixStack::new();
        let depth = stack.depth();

        assemble(&mut scene, 16.0 / 9.0, &mut stack);

        assert_eq!(stack.depth(), depth);
    }

    #[test]
    fn cube_scenario_emits_one_figure_draw_on_the_base_matrix() {
        // Camera{eye=(-5,3,3), at=0, up=+Y, fovy=35, near=0.1, far=20},
        // selected object Cube.
        let mut scene = test_scene();
        scene.figure = Primitive::Cube;

        let mut stack = MatrixStack::new();
        let plan = assemble(&mut scene, 1.5, &mut stack);

        let figures: Vec<_> = plan
            .draws
            .iter()
            .filter(|d| d.kind == DrawKind::Figure)
            .collect();
        assert_eq!(figures.len(), 1);

        let figure = figures[0];
        assert_eq!(figure.mesh, Primitive::Cube);
        assert_eq!(figure.light_tag, LIGHT_TAG_SENTINEL);
        // Untransformed top of stack = the view matrix itself.
        assert!(mats_close(figure.model_view, scene.camera.view_matrix()));
    }

    #[test]
    fn light_markers_follow_registry_order_and_tags() {
        let mut scene = test_scene();
        let mut rng = StdRng::seed_from_u64(12);
        scene.lights.add_light(&mut rng);
        scene.lights.add_light(&mut rng);

        let mut stack = MatrixStack::new();
        let plan = assemble(&mut scene, 1.0, &mut stack);

        let markers: Vec<_> = plan
            .draws
            .iter()
            .filter(|d| matches!(d.kind, DrawKind::LightMarker(_)))
            .collect();
        assert_eq!(markers.len(), 3);

        for (index, marker) in markers.iter().enumerate() {
            assert_eq!(marker.kind, DrawKind::LightMarker(index));
            assert_eq!(marker.light_tag, index as i32);
            assert_eq!(marker.mesh, Primitive::Sphere);
        }
    }

    #[test]
    fn hidden_lights_emit_no_markers_and_do_not_animate() {
        let mut scene = test_scene();
        scene.options.show_lights = false;
        scene.options.animate_lights = true;
        let before = scene.lights[0].position;

        let mut stack = MatrixStack::new();
        let plan = assemble(&mut scene, 1.0, &mut stack);

        assert!(
            plan.draws
                .iter()
                .all(|d| !matches!(d.kind, DrawKind::LightMarker(_)))
        );
        assert_eq!(scene.lights[0].position, before);
    }

    #[test]
    fn animation_moves_lights_and_markers_agree_with_globals() {
        let mut scene = test_scene();
        scene.options.animate_lights = true;
        scene.lights[0].position = Vec3::new(0.0, 1.0, 0.0);

        let mut stack = MatrixStack::new();
        let plan = assemble(&mut scene, 1.0, &mut stack);

        // The registry was stepped once.
        let moved = scene.lights[0].position;
        assert!((moved - Vec3::new(0.0, 1.0, 0.0)).length() > 0.0);

        // The marker transform and the light snapshot use the same
        // post-animation position.
        assert_eq!(plan.globals.lights[0].position, moved);
        let marker = plan
            .draws
            .iter()
            .find(|d| d.kind == DrawKind::LightMarker(0))
            .unwrap();
        let expected = plan.globals.view
            * Mat4::from_translation(moved)
            * Mat4::from_scale(Vec3::splat(LIGHT_MARKER_SCALE));
        assert!(mats_close(marker.model_view, expected));
    }

    #[test]
    fn base_slab_is_translated_and_flattened() {
        let mut scene = test_scene();
        let mut stack = MatrixStack::new();
        let plan = assemble(&mut scene, 1.0, &mut stack);

        let base = plan
            .draws
            .iter()
            .find(|d| d.kind == DrawKind::Base)
            .unwrap();
        assert_eq!(base.mesh, Primitive::Cube);
        assert_eq!(base.material, Material::base_default());

        let expected = plan.globals.view
            * Mat4::from_translation(Vec3::new(0.0, BASE_OFFSET_Y, 0.0))
            * Mat4::from_scale(Vec3::new(BASE_SCALE_XZ, BASE_SCALE_Y, BASE_SCALE_XZ));
        assert!(mats_close(base.model_view, expected));
    }

    #[test]
    fn draw_order_is_lights_then_base_then_figure() {
        let mut scene = test_scene();
        let mut stack = MatrixStack::new();
        let plan = assemble(&mut scene, 1.0, &mut stack);

        let kinds: Vec<_> = plan.draws.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DrawKind::LightMarker(0), DrawKind::Base, DrawKind::Figure]
        );
    }
}
