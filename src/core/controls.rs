// Tuning panel model: each control binds a labelled, ranged input to one field
// of `SceneParams` through an accessor.

use super::color::{format_hex, linear_to_srgb, parse_hex, srgb_to_linear};
use super::params::SceneParams;
use std::f32::consts::PI;

/// How a colour field relates to the `#rrggbb` shown in the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorEncoding {
    /// Field is linear; the hex is sRGB.
    Srgb,
    /// Field holds the hex components as-is.
    Raw,
}

#[derive(Clone, Copy)]
pub enum Binding {
    Scalar {
        min: f32,
        max: f32,
        step: f32,
        field: fn(&mut SceneParams) -> &mut f32,
    },
    Color {
        encoding: ColorEncoding,
        field: fn(&mut SceneParams) -> &mut [f32; 3],
    },
    Toggle {
        field: fn(&mut SceneParams) -> &mut bool,
    },
}

#[derive(Clone, Copy)]
pub struct Control {
    pub label: &'static str,
    pub binding: Binding,
}

pub struct Section {
    pub title: &'static str,
    pub open: bool,
    pub controls: Vec<Control>,
}

/// Whether a write through a control changed the bound field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Unchanged,
    Changed,
}

impl Control {
    fn slider(
        label: &'static str,
        min: f32,
        max: f32,
        step: f32,
        field: fn(&mut SceneParams) -> &mut f32,
    ) -> Self {
        Self {
            label,
            binding: Binding::Scalar {
                min,
                max,
                step,
                field,
            },
        }
    }

    fn color(
        label: &'static str,
        encoding: ColorEncoding,
        field: fn(&mut SceneParams) -> &mut [f32; 3],
    ) -> Self {
        Self {
            label,
            binding: Binding::Color { encoding, field },
        }
    }

    fn toggle(label: &'static str, field: fn(&mut SceneParams) -> &mut bool) -> Self {
        Self {
            label,
            binding: Binding::Toggle { field },
        }
    }

    pub fn scalar(&self, params: &mut SceneParams) -> Option<f32> {
        match self.binding {
            Binding::Scalar { field, .. } => Some(*field(params)),
            _ => None,
        }
    }

    /// Clamp `value` into the control's range and store it.
    pub fn set_scalar(&self, params: &mut SceneParams, value: f32) -> Applied {
        match self.binding {
            Binding::Scalar { min, max, field, .. } if value.is_finite() => {
                let slot = field(params);
                let v = value.clamp(min, max);
                if *slot == v {
                    Applied::Unchanged
                } else {
                    *slot = v;
                    Applied::Changed
                }
            }
            _ => Applied::Unchanged,
        }
    }

    pub fn color_hex(&self, params: &mut SceneParams) -> Option<String> {
        match self.binding {
            Binding::Color { encoding, field } => {
                let c = *field(params);
                Some(match encoding {
                    ColorEncoding::Srgb => format_hex(c.map(linear_to_srgb)),
                    ColorEncoding::Raw => format_hex(c),
                })
            }
            _ => None,
        }
    }

    pub fn set_color_hex(&self, params: &mut SceneParams, hex: &str) -> Applied {
        let (encoding, field) = match self.binding {
            Binding::Color { encoding, field } => (encoding, field),
            _ => return Applied::Unchanged,
        };
        let Some(rgb) = parse_hex(hex) else {
            return Applied::Unchanged;
        };
        let value = match encoding {
            ColorEncoding::Srgb => rgb.map(srgb_to_linear),
            ColorEncoding::Raw => rgb,
        };
        let slot = field(params);
        if *slot == value {
            Applied::Unchanged
        } else {
            *slot = value;
            Applied::Changed
        }
    }

    pub fn flag(&self, params: &mut SceneParams) -> Option<bool> {
        match self.binding {
            Binding::Toggle { field } => Some(*field(params)),
            _ => None,
        }
    }

    pub fn set_flag(&self, params: &mut SceneParams, on: bool) -> Applied {
        match self.binding {
            Binding::Toggle { field } => {
                let slot = field(params);
                if *slot == on {
                    Applied::Unchanged
                } else {
                    *slot = on;
                    Applied::Changed
                }
            }
            _ => Applied::Unchanged,
        }
    }
}

pub fn spot_light_section() -> Section {
    Section {
        title: "Spot Light",
        open: true,
        controls: vec![
            Control::color("color", ColorEncoding::Srgb, |p| &mut p.light.color),
            Control::slider("intensity", 0.0, 2.0, 0.01, |p| &mut p.light.intensity),
            Control::slider("distance", 0.0, 10.0, 0.01, |p| &mut p.light.distance),
            Control::slider("angle", 0.0, PI, 0.01, |p| &mut p.light.angle),
            Control::slider("penumbra", 0.0, 1.0, 0.01, |p| &mut p.light.penumbra),
            Control::slider("decay", 1.0, 2.0, 0.01, |p| &mut p.light.decay),
            Control::slider("focus", 0.0, 1.0, 0.01, |p| &mut p.light.shadow_focus),
            Control::toggle("shadows", |p| &mut p.light.shadows),
        ],
    }
}

pub fn background_section() -> Section {
    Section {
        title: "Background Shader",
        open: true,
        controls: vec![
            Control::slider("total", 0.0, 200.0, 1.0, |p| &mut p.background.total),
            Control::slider("minSize", 0.0, 10.0, 0.01, |p| &mut p.background.min_size),
            Control::slider("maxSize", 0.0, 10.0, 0.01, |p| &mut p.background.max_size),
            Control::slider("yDistribution", 0.0, 1.0, 0.01, |p| {
                &mut p.background.y_distribution
            }),
            Control::slider("noiseIntensity", 0.0, 10.0, 0.01, |p| {
                &mut p.background.noise_intensity
            }),
            Control::slider("noiseDefinition", 0.0, 1.0, 0.01, |p| {
                &mut p.background.noise_definition
            }),
            Control::color("bgColor", ColorEncoding::Raw, |p| &mut p.background.bg_color),
            Control::color("rectColor", ColorEncoding::Raw, |p| {
                &mut p.background.rect_color
            }),
            Control::slider("glowPosX", -10.0, 10.0, 0.01, |p| {
                &mut p.background.glow_pos[0]
            }),
            Control::slider("glowPosY", -10.0, 10.0, 0.01, |p| {
                &mut p.background.glow_pos[1]
            }),
        ],
    }
}

/// Added once the mesh has loaded.
pub fn material_section() -> Section {
    Section {
        title: "Lucy Material",
        open: true,
        controls: vec![
            Control::slider("ior", 0.0, 2.0, 0.01, |p| &mut p.material.ior),
            Control::slider("transmission", 0.0, 1.0, 0.001, |p| {
                &mut p.material.transmission
            }),
            Control::slider("roughness", 0.0, 1.0, 0.01, |p| &mut p.material.roughness),
            Control::slider("metalness", 0.0, 1.0, 0.01, |p| &mut p.material.metalness),
            Control::slider("envMapIntensity", 0.0, 3.0, 0.01, |p| {
                &mut p.material.env_map_intensity
            }),
            Control::toggle("flatShading", |p| &mut p.material.flat_shading),
        ],
    }
}
