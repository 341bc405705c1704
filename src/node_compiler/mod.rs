//! Code generation for material nodes.
//!
//! Every generator returns a single GLSL expression without a statement
//! terminator. Expressions built from infix operators are parenthesized so a
//! caller can splice them anywhere. Statements are only ever emitted by the
//! evaluator, which binds each expression to a symbol.

pub mod color_nodes;
pub mod converter_nodes;
pub mod shader_nodes;
pub mod vector_nodes;

use std::borrow::Cow;

use crate::node::{MaterialNode, NodeKind};

/// Generate the expression for a node of `kind` from its resolved inputs.
///
/// `inputs` holds one expression per declared socket, in declaration order.
/// Passing any other number of inputs is a caller bug and panics.
pub fn generate_code(kind: NodeKind, inputs: &[String]) -> String {
    let expected = kind.sockets().len();
    assert_eq!(
        inputs.len(),
        expected,
        "{} expects {expected} inputs, got {}",
        kind.type_name(),
        inputs.len()
    );

    match kind {
        // Color nodes
        NodeKind::Gamma(mode) => {
            let [color] = args(inputs);
            color_nodes::compile_gamma(mode, color)
        }
        NodeKind::Hsv => {
            let [hue, saturation, value, fac, color] = args(inputs);
            color_nodes::compile_hsv(hue, saturation, value, fac, color)
        }
        NodeKind::Invert => {
            let [fac, color] = args(inputs);
            color_nodes::compile_invert(fac, color)
        }
        NodeKind::BrightContrast => {
            let [color, bright, contrast] = args(inputs);
            color_nodes::compile_bright_contrast(color, bright, contrast)
        }
        NodeKind::LightFalloff(mode) => {
            let [distance] = args(inputs);
            color_nodes::compile_light_falloff(mode, distance)
        }
        NodeKind::RgbCurves => {
            let [fac, color, curve] = args(inputs);
            color_nodes::compile_rgb_curves(fac, color, curve)
        }
        NodeKind::Mix(mode) => {
            let [fac, a, b] = args(inputs);
            color_nodes::compile_mix(mode, fac, a, b)
        }

        // Converter nodes
        NodeKind::Clamp(mode) => {
            let [value, min, max] = args(inputs);
            converter_nodes::compile_clamp(mode, value, min, max)
        }
        NodeKind::ColorRamp => {
            let [fac, low_color, high_color, low, high] = args(inputs);
            converter_nodes::compile_color_ramp(fac, low_color, high_color, low, high)
        }
        NodeKind::CombineColor => {
            let [r, g, b] = args(inputs);
            converter_nodes::compile_combine_color(r, g, b)
        }
        NodeKind::Math(op) => {
            let [a, b] = args(inputs);
            converter_nodes::compile_math(op, a, b)
        }
        NodeKind::RgbToBw => {
            let [color] = args(inputs);
            converter_nodes::compile_rgb_to_bw(color)
        }
        NodeKind::SeparateColor(channel) => {
            let [color] = args(inputs);
            converter_nodes::compile_separate_color(channel, color)
        }
        NodeKind::VectorMath(op) => {
            let [a, b] = args(inputs);
            vector_nodes::compile_vector_math(op, a, b)
        }

        // Shader nodes
        NodeKind::DiffuseShader => {
            let [color, normal, direction] = args(inputs);
            shader_nodes::compile_diffuse(color, normal, direction)
        }
        NodeKind::Emission => {
            let [color, strength] = args(inputs);
            shader_nodes::compile_emission(color, strength)
        }
        NodeKind::MaterialOutput => {
            let [surface, alpha] = args(inputs);
            shader_nodes::compile_material_output(surface, alpha)
        }
    }
}

impl MaterialNode {
    /// Generate this node's expression. Pure: the node is never modified.
    pub fn generate_code(&self, inputs: &[String]) -> String {
        generate_code(self.kind(), inputs)
    }
}

fn args<const N: usize>(inputs: &[String]) -> [&str; N] {
    std::array::from_fn(|i| inputs[i].as_str())
}

/// `expr` made safe to place next to an infix operator, the ternary or a
/// swizzle.
///
/// Identifiers, numbers, calls, swizzle chains and already parenthesized
/// expressions pass through untouched; anything else is wrapped.
pub(crate) fn operand(expr: &str) -> Cow<'_, str> {
    let trimmed = expr.trim();
    let mut depth = 0usize;
    let atomic = !trimmed.is_empty()
        && trimmed.chars().all(|ch| match ch {
            '(' | '[' => {
                depth += 1;
                true
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                true
            }
            _ if depth > 0 => true,
            c => c.is_ascii_alphanumeric() || c == '_' || c == '.',
        });
    if atomic {
        Cow::Borrowed(expr)
    } else {
        Cow::Owned(format!("({trimmed})"))
    }
}
