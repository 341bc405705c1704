//! Generator for the VectorMath node.

use super::operand;
use crate::modes::VectorOperation;

/// Compile a VectorMath node.
///
/// The output is always a vec3: the dot product is broadcast to all three
/// components, and `Normalize` only reads the first vector.
pub fn compile_vector_math(op: VectorOperation, a: &str, b: &str) -> String {
    let (x, y) = (operand(a), operand(b));
    match op {
        VectorOperation::Add => format!("({x} + {y})"),
        VectorOperation::Subtract => format!("({x} - {y})"),
        VectorOperation::CrossProduct => format!("cross({a}, {b})"),
        VectorOperation::DotProduct => format!("vec3(dot({a}, {b}))"),
        VectorOperation::Normalize => format!("normalize({a})"),
    }
}
