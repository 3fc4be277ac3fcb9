// Host-side tests for the tuning panel model, colour conversion and the
// default scene parameters.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod scene_core {
    pub mod color {
        include!("../src/core/color.rs");
    }
    pub mod controls {
        include!("../src/core/controls.rs");
    }
    pub mod params {
        include!("../src/core/params.rs");
    }
}

use scene_core::color::*;
use scene_core::controls::*;
use scene_core::params::*;

fn find(section: &Section, label: &str) -> Control {
    *section
        .controls
        .iter()
        .find(|c| c.label == label)
        .unwrap_or_else(|| panic!("no control {label}"))
}

#[test]
fn sections_expose_expected_controls() {
    let labels = |s: Section| s.controls.iter().map(|c| c.label).collect::<Vec<_>>();
    assert_eq!(
        labels(spot_light_section()),
        ["color", "intensity", "distance", "angle", "penumbra", "decay", "focus", "shadows"]
    );
    assert_eq!(
        labels(background_section()),
        [
            "total",
            "minSize",
            "maxSize",
            "yDistribution",
            "noiseIntensity",
            "noiseDefinition",
            "bgColor",
            "rectColor",
            "glowPosX",
            "glowPosY"
        ]
    );
    assert_eq!(
        labels(material_section()),
        ["ior", "transmission", "roughness", "metalness", "envMapIntensity", "flatShading"]
    );
}

#[test]
fn slider_writes_are_clamped_to_range() {
    let mut params = SceneParams::default();
    let decay = find(&spot_light_section(), "decay");
    assert_eq!(decay.set_scalar(&mut params, 9.0), Applied::Changed);
    assert_eq!(params.light.decay, 2.0);
    assert_eq!(decay.set_scalar(&mut params, -3.0), Applied::Changed);
    assert_eq!(params.light.decay, 1.0);
    assert_eq!(decay.scalar(&mut params), Some(1.0));
}

#[test]
fn unchanged_and_invalid_writes_report_unchanged() {
    let mut params = SceneParams::default();
    let total = find(&background_section(), "total");
    assert_eq!(total.set_scalar(&mut params, 60.0), Applied::Unchanged);
    assert_eq!(total.set_scalar(&mut params, f32::NAN), Applied::Unchanged);
    assert_eq!(params.background.total, 60.0);

    // kind mismatch
    assert_eq!(total.set_flag(&mut params, true), Applied::Unchanged);
    assert_eq!(total.set_color_hex(&mut params, "#ffffff"), Applied::Unchanged);
    assert_eq!(total.color_hex(&mut params), None);
    assert_eq!(total.flag(&mut params), None);
}

#[test]
fn glow_sliders_address_each_component() {
    let mut params = SceneParams::default();
    let section = background_section();
    find(&section, "glowPosX").set_scalar(&mut params, 3.5);
    find(&section, "glowPosY").set_scalar(&mut params, -1.25);
    assert_eq!(params.background.glow_pos, [3.5, -1.25]);
}

#[test]
fn spot_colour_round_trips_through_srgb() {
    let mut params = SceneParams::default();
    let color = find(&spot_light_section(), "color");
    assert_eq!(color.color_hex(&mut params).as_deref(), Some("#031a6b"));

    assert_eq!(color.set_color_hex(&mut params, "#ff8000"), Applied::Changed);
    let expected = hex_to_linear(0xff8000);
    for (a, b) in params.light.color.iter().zip(expected) {
        assert!((a - b).abs() < 1e-6);
    }
    assert_eq!(color.color_hex(&mut params).as_deref(), Some("#ff8000"));
}

#[test]
fn background_colours_are_raw_components() {
    let mut params = SceneParams::default();
    let bg = find(&background_section(), "bgColor");
    assert_eq!(bg.color_hex(&mut params).as_deref(), Some("#03296b"));
    assert_eq!(bg.set_color_hex(&mut params, "#ff0000"), Applied::Changed);
    assert_eq!(params.background.bg_color, [1.0, 0.0, 0.0]);
    assert_eq!(bg.set_color_hex(&mut params, "nonsense"), Applied::Unchanged);
    assert_eq!(params.background.bg_color, [1.0, 0.0, 0.0]);
}

#[test]
fn toggles_flip_flags() {
    let mut params = SceneParams::default();
    let shadows = find(&spot_light_section(), "shadows");
    assert_eq!(shadows.flag(&mut params), Some(true));
    assert_eq!(shadows.set_flag(&mut params, false), Applied::Changed);
    assert!(!params.light.shadows);
    assert_eq!(shadows.set_flag(&mut params, false), Applied::Unchanged);

    let flat = find(&material_section(), "flatShading");
    flat.set_flag(&mut params, true);
    assert!(params.material.flat_shading);
}

#[test]
fn default_parameters() {
    let p = SceneParams::default();
    assert_eq!(p.light.intensity, 5.0);
    assert_eq!(p.light.angle, std::f32::consts::PI);
    assert!(p.light.shadows);
    assert_eq!(p.background.total, 60.0);
    assert_eq!(p.background.glow_pos, [-2.0, 0.0]);
    assert!((p.material.ior - 1.5).abs() < 1e-6);
    assert_eq!(p.material.transmission, 0.141);
    assert!(!p.material.flat_shading);
}

#[test]
fn reflectivity_maps_onto_ior() {
    assert!((ior_from_reflectivity(0.0) - 1.0).abs() < 1e-6);
    assert!((ior_from_reflectivity(0.5) - 1.5).abs() < 1e-6);
    assert!((ior_from_reflectivity(1.0) - 1.4 / 0.6).abs() < 1e-6);
    // out-of-range reflectivity is clamped
    assert_eq!(ior_from_reflectivity(3.0), ior_from_reflectivity(1.0));
    assert_eq!(ior_from_reflectivity(-1.0), 1.0);
}

#[test]
fn hex_parsing_and_formatting() {
    assert_eq!(parse_hex("#ff0000"), Some([1.0, 0.0, 0.0]));
    assert_eq!(parse_hex("00ff00"), Some([0.0, 1.0, 0.0]));
    assert_eq!(parse_hex("#fff"), None);
    assert_eq!(parse_hex("#gg0000"), None);
    assert_eq!(format_hex([1.0, 0.5, 0.0]), "#ff8000");
    assert_eq!(format_hex([2.0, -1.0, 0.0]), "#ff0000");
    assert_eq!(hex_to_rgb(0x0000ff), [0.0, 0.0, 1.0]);
}

#[test]
fn srgb_transfer_round_trips() {
    for i in 0..=20 {
        let c = i as f32 / 20.0;
        let back = linear_to_srgb(srgb_to_linear(c));
        assert!((back - c).abs() < 1e-4, "{c} -> {back}");
    }
    assert!(srgb_to_linear(0.5) < 0.5);
}
