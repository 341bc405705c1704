//! Shader validation using the naga library.
//!
//! Generated bodies reference helpers (`LambertianBRDF`, `rgb2hsv`, `hsv2rgb`)
//! and ambient inputs (`surface_normal`, `light_direction`) that a host shader
//! provides. [`fragment_shader`] plays that host so a body can be checked in
//! isolation.

use anyhow::{Context, Result, anyhow, bail};

use crate::evaluator::CompiledShader;
use crate::types::TypeTag;

/// Reference implementations of the helper functions generated code calls.
pub const HELPER_FUNCTIONS: &str = r#"vec3 rgb2hsv(vec3 c) {
    vec4 K = vec4(0.0, -1.0 / 3.0, 2.0 / 3.0, -1.0);
    vec4 p = mix(vec4(c.bg, K.wz), vec4(c.gb, K.xy), vec4(step(c.b, c.g)));
    vec4 q = mix(vec4(p.xyw, c.r), vec4(c.r, p.yzx), vec4(step(p.x, c.r)));
    float d = q.x - min(q.w, q.y);
    float e = 1.0e-10;
    return vec3(abs(q.z + (q.w - q.y) / (6.0 * d + e)), d / (q.x + e), q.x);
}

vec3 hsv2rgb(vec3 c) {
    vec4 K = vec4(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    vec3 p = abs(fract(c.xxx + K.xyz) * 6.0 - K.www);
    return c.z * mix(K.xxx, clamp(p - K.xxx, vec3(0.0), vec3(1.0)), vec3(c.y));
}

vec3 LambertianBRDF(vec3 n, vec3 l, vec3 albedo) {
    return albedo * max(dot(normalize(n), normalize(l)), 0.0) / 3.14159265;
}
"#;

/// Wrap a compiled body into a complete `#version 450` fragment shader.
///
/// The body must end with `return`; other result bindings have no value to hand
/// back to `main`.
pub fn fragment_shader(shader: &CompiledShader) -> Result<String> {
    if !shader.source.contains(&format!("return {};", shader.result.name)) {
        bail!("fragment wrapper needs a body compiled with the `return` result binding");
    }
    let ret = shader.result.ty;
    let to_vec4 = match ret {
        TypeTag::Float => "vec4(vec3(value), 1.0)",
        TypeTag::Vec2 => "vec4(value, 0.0, 1.0)",
        TypeTag::Vec3 => "vec4(value, 1.0)",
        TypeTag::Vec4 => "value",
        TypeTag::Sampler1D | TypeTag::Sampler2D => {
            bail!("material output cannot be an opaque {ret} value")
        }
    };

    let body = indent(&shader.source, 1);
    Ok(format!(
        "#version 450\n\nlayout(location = 0) in vec3 v_normal;\nlayout(location = 1) in vec3 v_light_dir;\nlayout(location = 0) out vec4 out_color;\n\n{HELPER_FUNCTIONS}\n{ret_ty} evaluate_material(vec3 surface_normal, vec3 light_direction) {{\n{body}}}\n\nvoid main() {{\n    {ret_ty} value = evaluate_material(v_normal, v_light_dir);\n    out_color = {to_vec4};\n}}\n",
        ret_ty = ret.glsl(),
    ))
}

/// Parse and validate a GLSL fragment shader with naga.
pub fn validate_glsl(source: &str) -> Result<naga::Module> {
    let module = parse_glsl(source)?;
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| anyhow!("GLSL validation failed: {e:?}\n{}", numbered(source)))?;
    Ok(module)
}

/// Validate GLSL and say which material produced it.
pub fn validate_glsl_with_context(source: &str, context: &str) -> Result<naga::Module> {
    validate_glsl(source).with_context(|| format!("{context} generated invalid GLSL"))
}

/// Translate a GLSL fragment shader to WGSL.
pub fn glsl_to_wgsl(source: &str) -> Result<String> {
    let module = parse_glsl(source)?;

    let info = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| anyhow!("GLSL validation failed: {e:?}"))?;

    naga::back::wgsl::write_string(
        &module,
        &info,
        naga::back::wgsl::WriterFlags::EXPLICIT_TYPES,
    )
    .map_err(|e| anyhow!("WGSL writer failed: {e:?}"))
}

/// Validate WGSL source code using naga's parser.
pub fn validate_wgsl(source: &str) -> Result<naga::Module> {
    naga::front::wgsl::parse_str(source)
        .map_err(|e| anyhow!("WGSL validation failed:\n  {e}\n{}", numbered(source)))
}

fn parse_glsl(source: &str) -> Result<naga::Module> {
    let mut parser = naga::front::glsl::Frontend::default();
    let options = naga::front::glsl::Options {
        stage: naga::ShaderStage::Fragment,
        defines: Default::default(),
    };
    parser
        .parse(&options, source)
        .map_err(|e| anyhow!("GLSL parse failed: {e:?}\n{}", numbered(source)))
}

fn indent(text: &str, level: usize) -> String {
    let pad = "    ".repeat(level);
    let mut out = String::with_capacity(text.len() + level * 4);
    for line in text.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(&pad);
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Source with line numbers, for error reports.
fn numbered(source: &str) -> String {
    let mut output = String::from("Generated source:\n---\n");
    for (line_num, line) in source.lines().enumerate() {
        output.push_str(&format!("{:4} | {}\n", line_num + 1, line));
    }
    output.push_str("---\n");
    output
}
