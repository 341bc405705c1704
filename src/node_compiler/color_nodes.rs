//! Generators for color nodes (Gamma, HSV, Invert, BrightContrast, LightFalloff,
//! RGBCurves, Mix).

use super::operand;
use crate::modes::{FalloffMode, GammaMode, MixMode};

/// Compile a Gamma node.
///
/// Converts between linear and sRGB-encoded color with a fixed 2.2 exponent,
/// applied per channel.
pub fn compile_gamma(mode: GammaMode, color: &str) -> String {
    match mode {
        GammaMode::LinearToSrgb => format!("pow({color}, vec3(1.0 / 2.2))"),
        GammaMode::SrgbToLinear => format!("pow({color}, vec3(2.2))"),
    }
}

/// Compile an HSV node.
///
/// Shifts hue (0.5 means no shift), scales saturation and value, then blends
/// with the original color by `fac`. Relies on caller-provided `rgb2hsv` and
/// `hsv2rgb` helpers.
pub fn compile_hsv(hue: &str, saturation: &str, value: &str, fac: &str, color: &str) -> String {
    let hsv = format!("rgb2hsv({color})");
    let (hue, saturation, value) = (operand(hue), operand(saturation), operand(value));
    format!(
        "mix({color}, hsv2rgb(vec3(fract({hsv}.x + {hue} + 0.5), clamp({hsv}.y * {saturation}, 0.0, 1.0), {hsv}.z * {value})), {fac})"
    )
}

pub fn compile_invert(fac: &str, color: &str) -> String {
    format!("mix({color}, vec3(1.0) - {}, {fac})", operand(color))
}

/// Compile a BrightContrast node.
///
/// `max((1 + contrast) * c + (bright - contrast / 2), 0)`
pub fn compile_bright_contrast(color: &str, bright: &str, contrast: &str) -> String {
    let (color, bright, contrast) = (operand(color), operand(bright), operand(contrast));
    format!(
        "max((1.0 + {contrast}) * {color} + vec3({bright} - {contrast} * 0.5), vec3(0.0))"
    )
}

/// Compile a LightFalloff node.
pub fn compile_light_falloff(mode: FalloffMode, distance: &str) -> String {
    let distance = operand(distance);
    match mode {
        FalloffMode::Quadratic => format!("(1.0 / ({distance} * {distance}))"),
        FalloffMode::Linear => format!("(1.0 / {distance})"),
        FalloffMode::Constant => "1.0".to_string(),
    }
}

/// Compile an RGBCurves node.
///
/// Each channel is remapped through the matching channel of a 1D curve texture.
pub fn compile_rgb_curves(fac: &str, color: &str, curve: &str) -> String {
    let c = operand(color);
    format!(
        "mix({color}, vec3(texture({curve}, {c}.r).r, texture({curve}, {c}.g).g, texture({curve}, {c}.b).b), {fac})"
    )
}

/// Compile a Mix node.
///
/// Only the `Mix` mode reads the factor; the arithmetic blends combine the two
/// colors directly.
pub fn compile_mix(mode: MixMode, fac: &str, a: &str, b: &str) -> String {
    let (x, y) = (operand(a), operand(b));
    match mode {
        MixMode::Mix => format!("mix({a}, {b}, {fac})"),
        MixMode::Add => format!("({x} + {y})"),
        MixMode::Multiply => format!("({x} * {y})"),
        MixMode::Screen => format!("(vec3(1.0) - (vec3(1.0) - {x}) * (vec3(1.0) - {y}))"),
        MixMode::Subtract => format!("({x} - {y})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma() {
        assert_eq!(
            compile_gamma(GammaMode::LinearToSrgb, "c"),
            "pow(c, vec3(1.0 / 2.2))"
        );
        assert_eq!(compile_gamma(GammaMode::SrgbToLinear, "c"), "pow(c, vec3(2.2))");
    }

    #[test]
    fn test_mix_modes() {
        assert_eq!(compile_mix(MixMode::Mix, "0.5", "A", "B"), "mix(A, B, 0.5)");
        assert_eq!(compile_mix(MixMode::Add, "0.5", "A", "B"), "(A + B)");
        assert_eq!(compile_mix(MixMode::Multiply, "0.5", "A", "B"), "(A * B)");
        assert_eq!(
            compile_mix(MixMode::Screen, "0.5", "A", "B"),
            "(vec3(1.0) - (vec3(1.0) - A) * (vec3(1.0) - B))"
        );
        assert_eq!(compile_mix(MixMode::Subtract, "0.5", "A", "B"), "(A - B)");
    }

    #[test]
    fn test_light_falloff() {
        assert_eq!(
            compile_light_falloff(FalloffMode::Quadratic, "d"),
            "(1.0 / (d * d))"
        );
        assert_eq!(compile_light_falloff(FalloffMode::Linear, "d"), "(1.0 / d)");
        assert_eq!(compile_light_falloff(FalloffMode::Constant, "d"), "1.0");
    }

    #[test]
    fn test_hsv_uses_external_helpers() {
        let out = compile_hsv("0.5", "1.0", "1.0", "1.0", "c");
        assert!(out.starts_with("mix(c, hsv2rgb(vec3(fract(rgb2hsv(c).x + 0.5 + 0.5)"));
        assert!(out.contains("clamp(rgb2hsv(c).y * 1.0, 0.0, 1.0)"));
        assert!(out.ends_with(", 1.0)"));
    }

    #[test]
    fn test_rgb_curves_samples_each_channel() {
        let out = compile_rgb_curves("f", "c", "curve_tex");
        assert!(out.contains("texture(curve_tex, c.r).r"));
        assert!(out.contains("texture(curve_tex, c.g).g"));
        assert!(out.contains("texture(curve_tex, c.b).b"));
    }

    #[test]
    fn test_invert_and_bright_contrast() {
        assert_eq!(compile_invert("f", "c"), "mix(c, vec3(1.0) - c, f)");
        assert_eq!(
            compile_bright_contrast("c", "b", "k"),
            "max((1.0 + k) * c + vec3(b - k * 0.5), vec3(0.0))"
        );
    }

    #[test]
    fn test_compound_inputs_keep_their_grouping() {
        let d = "surface_normal.x + 1.0";
        assert_eq!(
            compile_light_falloff(FalloffMode::Quadratic, d),
            "(1.0 / ((surface_normal.x + 1.0) * (surface_normal.x + 1.0)))"
        );
        assert_eq!(
            compile_light_falloff(FalloffMode::Linear, d),
            "(1.0 / (surface_normal.x + 1.0))"
        );
        assert_eq!(
            compile_invert("f", "c + k"),
            "mix(c + k, vec3(1.0) - (c + k), f)"
        );
        assert_eq!(
            compile_bright_contrast("c + k", "b - 0.1", "x + 1.0"),
            "max((1.0 + (x + 1.0)) * (c + k) + vec3((b - 0.1) - (x + 1.0) * 0.5), vec3(0.0))"
        );
        assert!(compile_rgb_curves("f", "c + k", "t").contains("texture(t, (c + k).r).r"));
        assert_eq!(
            compile_mix(MixMode::Subtract, "0.5", "a + b", "c"),
            "((a + b) - c)"
        );
        assert_eq!(
            compile_mix(MixMode::Mix, "x + 1.0", "a + b", "c"),
            "mix(a + b, c, x + 1.0)"
        );
        assert!(compile_hsv("x + 1.0", "1.0", "1.0", "1.0", "c").contains("rgb2hsv(c).x + (x + 1.0) + 0.5"));
    }
}
