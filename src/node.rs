//! Material nodes, their sockets and the catalog of node kinds.

use crate::error::{GraphError, GraphResult};
use crate::graph::NodeId;
use crate::modes::{
    ClampMode, ColorChannel, FalloffMode, GammaMode, MathOperation, MixMode, VectorOperation,
};
use crate::types::TypeTag::{Float, Sampler1D, Vec3, Vec4};
use crate::types::{TypeTag, ValueLiteral};

/// What an input socket is bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketBinding {
    Literal(ValueLiteral),
    Connected(NodeId),
}

/// A named, typed input slot on a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Socket {
    name: &'static str,
    ty: TypeTag,
    binding: Option<SocketBinding>,
}

impl Socket {
    fn from_spec(spec: &SocketSpec) -> Self {
        Self {
            name: spec.name,
            ty: spec.ty,
            binding: spec.default_literal(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> TypeTag {
        self.ty
    }

    pub fn binding(&self) -> Option<&SocketBinding> {
        self.binding.as_ref()
    }

    pub fn producer(&self) -> Option<NodeId> {
        match self.binding {
            Some(SocketBinding::Connected(id)) => Some(id),
            _ => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.producer().is_some()
    }
}

/// Declared shape of a socket: name, type and optional default literal text.
#[derive(Clone, Copy, Debug)]
pub struct SocketSpec {
    pub name: &'static str,
    pub ty: TypeTag,
    pub default: Option<&'static str>,
}

impl SocketSpec {
    const fn new(name: &'static str, ty: TypeTag, default: &'static str) -> Self {
        Self {
            name,
            ty,
            default: Some(default),
        }
    }

    const fn required(name: &'static str, ty: TypeTag) -> Self {
        Self {
            name,
            ty,
            default: None,
        }
    }

    fn default_literal(&self) -> Option<SocketBinding> {
        self.default
            .map(|text| SocketBinding::Literal(ValueLiteral::new(self.ty, text)))
    }
}

const GAMMA_SOCKETS: &[SocketSpec] = &[SocketSpec::new("Color", Vec3, "vec3(1.0)")];
const HSV_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Hue", Float, "0.5"),
    SocketSpec::new("Saturation", Float, "1.0"),
    SocketSpec::new("Value", Float, "1.0"),
    SocketSpec::new("Fac", Float, "1.0"),
    SocketSpec::new("Color", Vec3, "vec3(0.8)"),
];
const INVERT_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Fac", Float, "1.0"),
    SocketSpec::new("Color", Vec3, "vec3(0.0)"),
];
const BRIGHT_CONTRAST_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Color", Vec3, "vec3(1.0)"),
    SocketSpec::new("Bright", Float, "0.0"),
    SocketSpec::new("Contrast", Float, "0.0"),
];
const LIGHT_FALLOFF_SOCKETS: &[SocketSpec] = &[SocketSpec::new("Distance", Float, "1.0")];
const RGB_CURVES_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Fac", Float, "1.0"),
    SocketSpec::new("Color", Vec3, "vec3(1.0)"),
    SocketSpec::required("Curve", Sampler1D),
];
const MIX_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Fac", Float, "0.5"),
    SocketSpec::new("Color1", Vec3, "vec3(0.5)"),
    SocketSpec::new("Color2", Vec3, "vec3(0.5)"),
];
const CLAMP_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Value", Float, "1.0"),
    SocketSpec::new("Min", Float, "0.0"),
    SocketSpec::new("Max", Float, "1.0"),
];
const COLOR_RAMP_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Fac", Float, "0.5"),
    SocketSpec::new("Color1", Vec3, "vec3(0.0)"),
    SocketSpec::new("Color2", Vec3, "vec3(1.0)"),
    SocketSpec::new("Low", Float, "0.0"),
    SocketSpec::new("High", Float, "1.0"),
];
const COMBINE_COLOR_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Red", Float, "0.0"),
    SocketSpec::new("Green", Float, "0.0"),
    SocketSpec::new("Blue", Float, "0.0"),
];
const MATH_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Value1", Float, "0.5"),
    SocketSpec::new("Value2", Float, "0.5"),
];
const RGB_TO_BW_SOCKETS: &[SocketSpec] = &[SocketSpec::new("Color", Vec3, "vec3(0.5)")];
const SEPARATE_COLOR_SOCKETS: &[SocketSpec] = &[SocketSpec::new("Color", Vec3, "vec3(0.8)")];
const VECTOR_MATH_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Vector1", Vec3, "vec3(0.0)"),
    SocketSpec::new("Vector2", Vec3, "vec3(0.0)"),
];
const DIFFUSE_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Color", Vec3, "vec3(0.8)"),
    SocketSpec::new("Normal", Vec3, "surface_normal"),
    SocketSpec::new("Direction", Vec3, "light_direction"),
];
const EMISSION_SOCKETS: &[SocketSpec] = &[
    SocketSpec::new("Color", Vec3, "vec3(1.0)"),
    SocketSpec::new("Strength", Float, "1.0"),
];
const OUTPUT_SOCKETS: &[SocketSpec] = &[
    SocketSpec::required("Surface", Vec3),
    SocketSpec::new("Alpha", Float, "1.0"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeCategory {
    Color,
    Converter,
    Shader,
    Output,
}

/// The closed catalog of node kinds. Modes are part of the kind and never change
/// after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Gamma(GammaMode),
    Hsv,
    Invert,
    BrightContrast,
    LightFalloff(FalloffMode),
    RgbCurves,
    Mix(MixMode),
    Clamp(ClampMode),
    ColorRamp,
    CombineColor,
    Math(MathOperation),
    RgbToBw,
    SeparateColor(ColorChannel),
    VectorMath(VectorOperation),
    DiffuseShader,
    Emission,
    MaterialOutput,
}

impl NodeKind {
    /// Every kind with its default mode, in catalog order.
    pub const CATALOG: &'static [NodeKind] = &[
        NodeKind::Gamma(GammaMode::SrgbToLinear),
        NodeKind::Hsv,
        NodeKind::Invert,
        NodeKind::BrightContrast,
        NodeKind::LightFalloff(FalloffMode::Constant),
        NodeKind::RgbCurves,
        NodeKind::Mix(MixMode::Mix),
        NodeKind::Clamp(ClampMode::MinMax),
        NodeKind::ColorRamp,
        NodeKind::CombineColor,
        NodeKind::Math(MathOperation::Add),
        NodeKind::RgbToBw,
        NodeKind::SeparateColor(ColorChannel::Red),
        NodeKind::VectorMath(VectorOperation::Add),
        NodeKind::DiffuseShader,
        NodeKind::Emission,
        NodeKind::MaterialOutput,
    ];

    /// Name used by authored documents.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Gamma(_) => "Gamma",
            NodeKind::Hsv => "HSV",
            NodeKind::Invert => "Invert",
            NodeKind::BrightContrast => "BrightContrast",
            NodeKind::LightFalloff(_) => "LightFalloff",
            NodeKind::RgbCurves => "RGBCurves",
            NodeKind::Mix(_) => "Mix",
            NodeKind::Clamp(_) => "Clamp",
            NodeKind::ColorRamp => "ColorRamp",
            NodeKind::CombineColor => "CombineColor",
            NodeKind::Math(_) => "Math",
            NodeKind::RgbToBw => "RGBToBW",
            NodeKind::SeparateColor(_) => "SeparateColor",
            NodeKind::VectorMath(_) => "VectorMath",
            NodeKind::DiffuseShader => "DiffuseShader",
            NodeKind::Emission => "Emission",
            NodeKind::MaterialOutput => "MaterialOutput",
        }
    }

    /// Look up a kind by its document name, with its default mode.
    pub fn from_type_name(name: &str) -> Option<NodeKind> {
        Self::CATALOG
            .iter()
            .copied()
            .find(|k| k.type_name() == name)
    }

    /// Replace the mode of this kind by parsing `mode`.
    ///
    /// Kinds without a mode reject every name.
    pub fn with_mode(self, mode: &str) -> GraphResult<NodeKind> {
        Ok(match self {
            NodeKind::Gamma(_) => NodeKind::Gamma(mode.parse()?),
            NodeKind::LightFalloff(_) => NodeKind::LightFalloff(mode.parse()?),
            NodeKind::Mix(_) => NodeKind::Mix(mode.parse()?),
            NodeKind::Clamp(_) => NodeKind::Clamp(mode.parse()?),
            NodeKind::Math(_) => NodeKind::Math(mode.parse()?),
            NodeKind::SeparateColor(_) => NodeKind::SeparateColor(mode.parse()?),
            NodeKind::VectorMath(_) => NodeKind::VectorMath(mode.parse()?),
            other => return Err(GraphError::unknown_mode(other.type_name(), mode)),
        })
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            NodeKind::Gamma(_)
            | NodeKind::Hsv
            | NodeKind::Invert
            | NodeKind::BrightContrast
            | NodeKind::LightFalloff(_)
            | NodeKind::RgbCurves
            | NodeKind::Mix(_) => NodeCategory::Color,
            NodeKind::Clamp(_)
            | NodeKind::ColorRamp
            | NodeKind::CombineColor
            | NodeKind::Math(_)
            | NodeKind::RgbToBw
            | NodeKind::SeparateColor(_)
            | NodeKind::VectorMath(_) => NodeCategory::Converter,
            NodeKind::DiffuseShader | NodeKind::Emission => NodeCategory::Shader,
            NodeKind::MaterialOutput => NodeCategory::Output,
        }
    }

    /// Declared sockets in argument order.
    pub fn sockets(&self) -> &'static [SocketSpec] {
        match self {
            NodeKind::Gamma(_) => GAMMA_SOCKETS,
            NodeKind::Hsv => HSV_SOCKETS,
            NodeKind::Invert => INVERT_SOCKETS,
            NodeKind::BrightContrast => BRIGHT_CONTRAST_SOCKETS,
            NodeKind::LightFalloff(_) => LIGHT_FALLOFF_SOCKETS,
            NodeKind::RgbCurves => RGB_CURVES_SOCKETS,
            NodeKind::Mix(_) => MIX_SOCKETS,
            NodeKind::Clamp(_) => CLAMP_SOCKETS,
            NodeKind::ColorRamp => COLOR_RAMP_SOCKETS,
            NodeKind::CombineColor => COMBINE_COLOR_SOCKETS,
            NodeKind::Math(_) => MATH_SOCKETS,
            NodeKind::RgbToBw => RGB_TO_BW_SOCKETS,
            NodeKind::SeparateColor(_) => SEPARATE_COLOR_SOCKETS,
            NodeKind::VectorMath(_) => VECTOR_MATH_SOCKETS,
            NodeKind::DiffuseShader => DIFFUSE_SOCKETS,
            NodeKind::Emission => EMISSION_SOCKETS,
            NodeKind::MaterialOutput => OUTPUT_SOCKETS,
        }
    }

    pub fn output_type(&self) -> TypeTag {
        match self {
            NodeKind::LightFalloff(_)
            | NodeKind::Clamp(_)
            | NodeKind::Math(_)
            | NodeKind::RgbToBw
            | NodeKind::SeparateColor(_) => Float,
            NodeKind::MaterialOutput => Vec4,
            _ => Vec3,
        }
    }
}

/// A node instance: a name, a kind and its sockets in declared order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialNode {
    name: String,
    kind: NodeKind,
    sockets: Vec<Socket>,
}

impl MaterialNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            sockets: kind.sockets().iter().map(Socket::from_spec).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn output_type(&self) -> TypeTag {
        self.kind.output_type()
    }

    pub fn sockets(&self) -> &[Socket] {
        &self.sockets
    }

    pub fn socket(&self, name: &str) -> Option<&Socket> {
        self.sockets.iter().find(|s| s.name == name)
    }

    /// Producers feeding this node, in socket order.
    pub fn producers(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.sockets.iter().filter_map(Socket::producer)
    }

    fn socket_mut(&mut self, socket: &str) -> GraphResult<&mut Socket> {
        let node = &self.name;
        self.sockets
            .iter_mut()
            .find(|s| s.name == socket)
            .ok_or_else(|| GraphError::unknown_socket(node.clone(), socket))
    }

    /// Bind `socket` to GLSL source text of type `ty`.
    pub fn add_value(&mut self, socket: &str, ty: TypeTag, text: impl Into<String>) -> GraphResult<()> {
        self.set_value(socket, ValueLiteral::new(ty, text))
    }

    /// Bind `socket` to a literal, dropping any connection.
    pub fn set_value(&mut self, socket: &str, literal: ValueLiteral) -> GraphResult<()> {
        let node = self.name.clone();
        let slot = self.socket_mut(socket)?;
        if slot.ty != literal.ty {
            return Err(GraphError::type_mismatch(node, socket, slot.ty, literal.ty));
        }
        slot.binding = Some(SocketBinding::Literal(literal));
        Ok(())
    }

    /// Bind `socket` to the output of `producer`, dropping any literal.
    ///
    /// Cycles and producer types are checked when the graph is evaluated.
    pub fn connect(&mut self, socket: &str, producer: NodeId) -> GraphResult<()> {
        self.socket_mut(socket)?.binding = Some(SocketBinding::Connected(producer));
        Ok(())
    }

    /// Restore the declared default of `socket`.
    pub fn disconnect(&mut self, socket: &str) -> GraphResult<()> {
        let kind = self.kind;
        let slot = self.socket_mut(socket)?;
        slot.binding = kind
            .sockets()
            .iter()
            .find(|s| s.name == socket)
            .and_then(SocketSpec::default_literal);
        Ok(())
    }
}
