//! Core value types shared by sockets, symbols and code generation.

use std::fmt;
use std::str::FromStr;

/// GLSL value type carried by sockets and node outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Sampler1D,
    Sampler2D,
}

impl TypeTag {
    /// Returns the GLSL type name for this value type.
    pub fn glsl(self) -> &'static str {
        match self {
            TypeTag::Float => "float",
            TypeTag::Vec2 => "vec2",
            TypeTag::Vec3 => "vec3",
            TypeTag::Vec4 => "vec4",
            TypeTag::Sampler1D => "sampler1D",
            TypeTag::Sampler2D => "sampler2D",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glsl())
    }
}

impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "float" | "f32" => TypeTag::Float,
            "vec2" | "vec2f" => TypeTag::Vec2,
            "vec3" | "vec3f" | "color" => TypeTag::Vec3,
            "vec4" | "vec4f" => TypeTag::Vec4,
            "sampler1D" => TypeTag::Sampler1D,
            "sampler2D" => TypeTag::Sampler2D,
            other => return Err(format!("unknown value type: {other}")),
        })
    }
}

/// A typed literal used by an unconnected socket.
///
/// `text` is already valid GLSL source and is spliced into expressions verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueLiteral {
    pub ty: TypeTag,
    pub text: String,
}

impl ValueLiteral {
    pub fn new(ty: TypeTag, text: impl Into<String>) -> Self {
        Self {
            ty,
            text: text.into(),
        }
    }

    pub fn float(v: f32) -> Self {
        Self::new(TypeTag::Float, fmt_float(v))
    }

    /// `vec3(v)` splat.
    pub fn vec3_splat(v: f32) -> Self {
        Self::new(TypeTag::Vec3, format!("vec3({})", fmt_float(v)))
    }

    pub fn vec3(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            TypeTag::Vec3,
            format!("vec3({}, {}, {})", fmt_float(x), fmt_float(y), fmt_float(z)),
        )
    }
}

/// Format a float for GLSL, removing trailing zeros but keeping a decimal point
/// so the literal never reads as an integer.
pub fn fmt_float(v: f32) -> String {
    if !v.is_finite() {
        return "0.0".to_string();
    }
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0');
    let mut out = s.to_string();
    if out.ends_with('.') {
        out.push('0');
    }
    if out == "-0.0" {
        out = "0.0".to_string();
    }
    out
}
