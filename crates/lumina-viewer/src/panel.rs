//! The control panel.
//!
//! Every editable scene field goes through a [`Binding`]: a label plus a
//! [`Control`] pointing at the field it edits. Sections build their binding
//! lists up front and a single widget walk renders them, so the mapping
//! "panel row -> scene field" lives in one table per section instead of
//! being scattered through ad-hoc widget code.

use std::ops::RangeInclusive;

use egui::Ui;
use glam::Vec3;
use rand::Rng;

use lumina_engine::scene::{
    AddLightOutcome, Camera, FOVY_MAX, FOVY_MIN, Light, MAX_LIGHTS, Material, Primitive,
    RenderOptions, SceneState,
};

/// Widget backing one binding. All numeric fields are edited in place.
/// Drag ranges clamp what the widget will write, keeping fields like
/// near/far inside the values the camera can sensibly consume.
enum Control<'a> {
    Toggle(&'a mut bool),
    Slider {
        value: &'a mut f32,
        range: RangeInclusive<f32>,
    },
    Drag {
        value: &'a mut f32,
        speed: f64,
        range: Option<RangeInclusive<f32>>,
    },
    Vector {
        value: &'a mut Vec3,
        speed: f64,
        /// Applied to each component.
        range: Option<RangeInclusive<f32>>,
    },
    /// RGB channels on the 0-255 scale used by lights and materials.
    Color(&'a mut [f32; 3]),
}

struct Binding<'a> {
    label: &'a str,
    control: Control<'a>,
}

/// Builds the whole panel for one frame. `rng` feeds new-light placement.
pub fn draw(ctx: &egui::Context, scene: &mut SceneState, rng: &mut impl Rng) {
    egui::Window::new("Scene")
        .default_width(280.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.collapsing("Options", |ui| {
                show_bindings(ui, option_bindings(&mut scene.options));
            });

            ui.collapsing("Camera", |ui| {
                show_bindings(ui, camera_bindings(&mut scene.camera));
            });

            ui.collapsing("Figure", |ui| {
                egui::ComboBox::from_label("Shape")
                    .selected_text(scene.figure.label())
                    .show_ui(ui, |ui| {
                        for primitive in Primitive::ALL {
                            ui.selectable_value(&mut scene.figure, primitive, primitive.label());
                        }
                    });
                show_bindings(ui, material_bindings(&mut scene.figure_material));
            });

            ui.collapsing("Lights", |ui| {
                for index in 0..scene.lights.len() {
                    ui.collapsing(format!("Light {index}"), |ui| {
                        show_bindings(ui, light_bindings(&mut scene.lights[index]));
                    });
                }

                if ui.button("Add light").clicked()
                    && scene.lights.add_light(rng) == AddLightOutcome::Full
                {
                    log::warn!("light limit reached ({MAX_LIGHTS})");
                }
                if scene.lights.len() == MAX_LIGHTS {
                    ui.label(format!("Light limit reached ({MAX_LIGHTS})"));
                }
            });
        });
}

fn show_bindings(ui: &mut Ui, bindings: Vec<Binding<'_>>) {
    for binding in bindings {
        match binding.control {
            Control::Toggle(value) => {
                ui.checkbox(value, binding.label);
            }
            Control::Slider { value, range } => {
                ui.add(egui::Slider::new(value, range).text(binding.label));
            }
            Control::Drag {
                value,
                speed,
                range,
            } => {
                ui.horizontal(|ui| {
                    let mut drag = egui::DragValue::new(value).speed(speed);
                    if let Some(range) = range {
                        drag = drag.range(range);
                    }
                    ui.add(drag);
                    ui.label(binding.label);
                });
            }
            Control::Vector {
                value,
                speed,
                range,
            } => {
                ui.horizontal(|ui| {
                    for component in [&mut value.x, &mut value.y, &mut value.z] {
                        let mut drag = egui::DragValue::new(component).speed(speed);
                        if let Some(range) = &range {
                            drag = drag.range(range.clone());
                        }
                        ui.add(drag);
                    }
                    ui.label(binding.label);
                });
            }
            Control::Color(channels) => {
                ui.horizontal(|ui| {
                    let mut rgb = to_unit_rgb(*channels);
                    if ui.color_edit_button_rgb(&mut rgb).changed() {
                        *channels = from_unit_rgb(rgb);
                    }
                    ui.label(binding.label);
                });
            }
        }
    }
}

fn option_bindings(options: &mut RenderOptions) -> Vec<Binding<'_>> {
    vec![
        Binding {
            label: "Backface culling",
            control: Control::Toggle(&mut options.back_face_culling),
        },
        Binding {
            label: "Depth test",
            control: Control::Toggle(&mut options.z_buffer),
        },
        Binding {
            label: "Show lights",
            control: Control::Toggle(&mut options.show_lights),
        },
        Binding {
            label: "Animate lights",
            control: Control::Toggle(&mut options.animate_lights),
        },
    ]
}

/// Range the Near/Far drags may take, matching the camera defaults' span.
const NEAR_FAR_RANGE: RangeInclusive<f32> = 0.1..=20.0;

/// Up-vector components stay normalized-ish.
const UP_RANGE: RangeInclusive<f32> = -1.0..=1.0;

fn camera_bindings(camera: &mut Camera) -> Vec<Binding<'_>> {
    vec![
        Binding {
            label: "Fovy",
            control: Control::Slider {
                value: &mut camera.fovy,
                range: FOVY_MIN..=FOVY_MAX,
            },
        },
        Binding {
            label: "Near",
            control: Control::Drag {
                value: &mut camera.near,
                speed: 0.01,
                range: Some(NEAR_FAR_RANGE),
            },
        },
        Binding {
            label: "Far",
            control: Control::Drag {
                value: &mut camera.far,
                speed: 0.1,
                range: Some(NEAR_FAR_RANGE),
            },
        },
        Binding {
            label: "Eye",
            control: Control::Vector {
                value: &mut camera.eye,
                speed: 0.05,
                range: None,
            },
        },
        Binding {
            label: "At",
            control: Control::Vector {
                value: &mut camera.at,
                speed: 0.05,
                range: None,
            },
        },
        Binding {
            label: "Up",
            control: Control::Vector {
                value: &mut camera.up,
                speed: 0.05,
                range: Some(UP_RANGE),
            },
        },
    ]
}

fn material_bindings(material: &mut Material) -> Vec<Binding<'_>> {
    vec![
        Binding {
            label: "Ka",
            control: Control::Color(&mut material.ka),
        },
        Binding {
            label: "Kd",
            control: Control::Color(&mut material.kd),
        },
        Binding {
            label: "Ks",
            control: Control::Color(&mut material.ks),
        },
        Binding {
            label: "Shininess",
            control: Control::Drag {
                value: &mut material.shininess,
                speed: 1.0,
                range: Some(0.0..=f32::MAX),
            },
        },
    ]
}

fn light_bindings(light: &mut Light) -> Vec<Binding<'_>> {
    vec![
        Binding {
            label: "Active",
            control: Control::Toggle(&mut light.active),
        },
        Binding {
            label: "Directional",
            control: Control::Toggle(&mut light.directional),
        },
        Binding {
            label: "Position",
            control: Control::Vector {
                value: &mut light.position,
                speed: 0.05,
                range: None,
            },
        },
        Binding {
            label: "Ambient",
            control: Control::Color(&mut light.ia),
        },
        Binding {
            label: "Diffuse",
            control: Control::Color(&mut light.id),
        },
        Binding {
            label: "Specular",
            control: Control::Color(&mut light.is),
        },
    ]
}

fn to_unit_rgb(channels: [f32; 3]) -> [f32; 3] {
    [
        channels[0] / 255.0,
        channels[1] / 255.0,
        channels[2] / 255.0,
    ]
}

fn from_unit_rgb(rgb: [f32; 3]) -> [f32; 3] {
    [rgb[0] * 255.0, rgb[1] * 255.0, rgb[2] * 255.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn fovy_slider_shares_the_camera_bounds() {
        let mut camera = Camera::default();
        let bindings = camera_bindings(&mut camera);
        let fovy = bindings.iter().find(|b| b.label == "Fovy").unwrap();
        match &fovy.control {
            Control::Slider { range, .. } => {
                assert_eq!(*range.start(), FOVY_MIN);
                assert_eq!(*range.end(), FOVY_MAX);
            }
            _ => panic!("fovy must be a slider"),
        }
    }

    #[test]
    fn camera_drags_stay_inside_their_legal_ranges() {
        let mut camera = Camera::default();
        let bindings = camera_bindings(&mut camera);

        let range_of = |label: &str| -> Option<RangeInclusive<f32>> {
            match &bindings.iter().find(|b| b.label == label).unwrap().control {
                Control::Drag { range, .. } => range.clone(),
                Control::Vector { range, .. } => range.clone(),
                _ => panic!("{label} must be a drag"),
            }
        };

        // Near and far are confined to the span the defaults sit in; the
        // drags cannot produce a non-positive near or push it past far's cap.
        assert_eq!(range_of("Near"), Some(NEAR_FAR_RANGE));
        assert_eq!(range_of("Far"), Some(NEAR_FAR_RANGE));

        // Up components stay in [-1, 1]; eye and at roam freely.
        assert_eq!(range_of("Up"), Some(UP_RANGE));
        assert_eq!(range_of("Eye"), None);
        assert_eq!(range_of("At"), None);
    }

    #[test]
    fn shininess_drag_has_a_non_negative_floor() {
        let mut material = Material::figure_default();
        let bindings = material_bindings(&mut material);
        let shininess = bindings.iter().find(|b| b.label == "Shininess").unwrap();
        match &shininess.control {
            Control::Drag { range, .. } => {
                assert_eq!(*range.as_ref().unwrap().start(), 0.0);
            }
            _ => panic!("shininess must be a drag"),
        }
    }

    #[test]
    fn section_labels_are_unique() {
        let mut camera = Camera::default();
        let mut labels: Vec<&str> = camera_bindings(&mut camera)
            .iter()
            .map(|b| b.label)
            .collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 6);
    }

    #[test]
    fn color_channel_scaling_round_trips() {
        let channels = [0.0, 127.5, 255.0];
        let unit = to_unit_rgb(channels);
        assert_eq!(unit, [0.0, 0.5, 1.0]);
        assert_eq!(from_unit_rgb(unit), channels);
    }

    #[test]
    fn panel_runs_headless() {
        let ctx = egui::Context::default();
        let mut scene = SceneState::new(&mut StdRng::seed_from_u64(3));
        let mut rng = StdRng::seed_from_u64(4);

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            draw(ctx, &mut scene, &mut rng);
        });
    }
}
