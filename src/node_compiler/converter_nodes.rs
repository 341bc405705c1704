//! Generators for converter nodes (Clamp, ColorRamp, CombineColor, Math, RGBToBW,
//! SeparateColor).

use super::operand;
use crate::modes::{ClampMode, ColorChannel, MathOperation};

/// Rec. 709 luma weights.
pub const LUMA_WEIGHTS: &str = "vec3(0.2126,0.7152,0.0722)";

/// Compile a Clamp node.
///
/// `MinOnly` and `MaxOnly` ignore the unused bound.
pub fn compile_clamp(mode: ClampMode, value: &str, min: &str, max: &str) -> String {
    match mode {
        ClampMode::MinMax => format!("clamp({value}, {min}, {max})"),
        ClampMode::MinOnly => format!("max({value}, {min})"),
        ClampMode::MaxOnly => format!("min({value}, {max})"),
    }
}

/// Compile a ColorRamp node.
///
/// Two-stop linear ramp: the factor is clamped to `[low, high]` and remapped to
/// `[0, 1]` before blending. A degenerate range is guarded against division by
/// zero.
pub fn compile_color_ramp(
    fac: &str,
    low_color: &str,
    high_color: &str,
    low: &str,
    high: &str,
) -> String {
    let (lo, hi) = (operand(low), operand(high));
    format!(
        "mix({low_color}, {high_color}, (clamp({fac}, {low}, {high}) - {lo}) / max({hi} - {lo}, 0.00001))"
    )
}

pub fn compile_combine_color(r: &str, g: &str, b: &str) -> String {
    format!("vec3({r}, {g}, {b})")
}

/// Compile a Math node.
///
/// Division yields `0.0` when the divisor is zero.
pub fn compile_math(op: MathOperation, a: &str, b: &str) -> String {
    let (x, y) = (operand(a), operand(b));
    match op {
        MathOperation::Add => format!("({x} + {y})"),
        MathOperation::Subtract => format!("({x} - {y})"),
        MathOperation::Multiply => format!("({x} * {y})"),
        MathOperation::Divide => format!("({y} == 0.0 ? 0.0 : {x} / {y})"),
        MathOperation::Power => format!("pow({a}, {b})"),
        MathOperation::Modulo => format!("mod({a}, {b})"),
        MathOperation::Minimum => format!("min({a}, {b})"),
        MathOperation::Maximum => format!("max({a}, {b})"),
    }
}

pub fn compile_rgb_to_bw(color: &str) -> String {
    format!("dot({color}, {LUMA_WEIGHTS})")
}

pub fn compile_separate_color(channel: ColorChannel, color: &str) -> String {
    format!("({color}).{}", channel.swizzle())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_ops() {
        assert_eq!(compile_math(MathOperation::Add, "a", "b"), "(a + b)");
        assert_eq!(compile_math(MathOperation::Subtract, "a", "b"), "(a - b)");
        assert_eq!(compile_math(MathOperation::Multiply, "a", "b"), "(a * b)");
        assert_eq!(compile_math(MathOperation::Power, "a", "b"), "pow(a, b)");
        assert_eq!(compile_math(MathOperation::Modulo, "a", "b"), "mod(a, b)");
        assert_eq!(compile_math(MathOperation::Minimum, "a", "b"), "min(a, b)");
        assert_eq!(compile_math(MathOperation::Maximum, "a", "b"), "max(a, b)");
    }

    #[test]
    fn test_divide_guards_zero() {
        assert_eq!(
            compile_math(MathOperation::Divide, "x", "0.0"),
            "(0.0 == 0.0 ? 0.0 : x / 0.0)"
        );
    }

    #[test]
    fn test_clamp_modes() {
        assert_eq!(compile_clamp(ClampMode::MinMax, "v", "lo", "hi"), "clamp(v, lo, hi)");
        assert_eq!(compile_clamp(ClampMode::MinOnly, "v", "lo", "hi"), "max(v, lo)");
        assert_eq!(compile_clamp(ClampMode::MaxOnly, "v", "lo", "hi"), "min(v, hi)");
    }

    #[test]
    fn test_rgb_to_bw() {
        assert_eq!(
            compile_rgb_to_bw("vec3(1,0,0)"),
            "dot(vec3(1,0,0), vec3(0.2126,0.7152,0.0722))"
        );
    }

    #[test]
    fn test_color_ramp() {
        assert_eq!(
            compile_color_ramp("f", "c1", "c2", "0.2", "0.8"),
            "mix(c1, c2, (clamp(f, 0.2, 0.8) - 0.2) / max(0.8 - 0.2, 0.00001))"
        );
    }

    #[test]
    fn test_separate_and_combine() {
        assert_eq!(compile_separate_color(ColorChannel::Green, "c"), "(c).g");
        assert_eq!(compile_combine_color("r", "g", "b"), "vec3(r, g, b)");
    }

    #[test]
    fn test_compound_inputs_keep_their_grouping() {
        assert_eq!(
            compile_math(MathOperation::Divide, "2.0", "surface_normal.x + 1.0"),
            "((surface_normal.x + 1.0) == 0.0 ? 0.0 : 2.0 / (surface_normal.x + 1.0))"
        );
        assert_eq!(
            compile_math(MathOperation::Multiply, "x + 1.0", "y"),
            "((x + 1.0) * y)"
        );
        assert_eq!(
            compile_math(MathOperation::Power, "x + 1.0", "2.0"),
            "pow(x + 1.0, 2.0)"
        );
        assert_eq!(
            compile_color_ramp("f", "c1", "c2", "x + 1.0", "0.8"),
            "mix(c1, c2, (clamp(f, x + 1.0, 0.8) - (x + 1.0)) / max(0.8 - (x + 1.0), 0.00001))"
        );
        assert_eq!(compile_separate_color(ColorChannel::Red, "x + 1.0"), "(x + 1.0).r");
    }
}
