//! Generators for shader and output nodes.

use super::operand;

/// Compile a DiffuseShader node.
///
/// Evaluates `LambertianBRDF(normal, direction, albedo)`, which the host shader
/// must declare.
pub fn compile_diffuse(color: &str, normal: &str, direction: &str) -> String {
    format!("LambertianBRDF({normal}, {direction}, {color})")
}

pub fn compile_emission(color: &str, strength: &str) -> String {
    format!("({} * {})", operand(color), operand(strength))
}

pub fn compile_material_output(surface: &str, alpha: &str) -> String {
    format!("vec4({surface}, {alpha})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diffuse_argument_order() {
        assert_eq!(
            compile_diffuse("albedo", "n", "l"),
            "LambertianBRDF(n, l, albedo)"
        );
    }

    #[test]
    fn test_output_and_emission() {
        assert_eq!(compile_material_output("vec3_0", "1.0"), "vec4(vec3_0, 1.0)");
        assert_eq!(compile_emission("c", "2.0"), "(c * 2.0)");
    }

    #[test]
    fn test_emission_groups_compound_inputs() {
        assert_eq!(compile_emission("c + k", "x + 1.0"), "((c + k) * (x + 1.0))");
    }
}
