use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::config::CompileOptions;
use crate::graph::{NodeGraph, NodeId};
use crate::node::{MaterialNode, NodeKind};
use crate::types::{TypeTag, ValueLiteral, fmt_float};

/// Authored material: nodes, their socket bindings and the output node id.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MaterialDoc {
    pub version: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub nodes: Vec<DocNode>,
    /// Id of the node whose value the material produces.
    pub output: String,
    #[serde(default)]
    pub options: Option<CompileOptions>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    pub created: Option<String>,
    pub modified: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DocNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub mode: Option<String>,
    /// Socket name -> binding. Sockets not listed keep their defaults.
    #[serde(default)]
    pub inputs: BTreeMap<String, InputBinding>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum InputBinding {
    Link {
        link: String,
    },
    Value {
        value: serde_json::Value,
        #[serde(rename = "type", default)]
        value_type: Option<String>,
    },
}

/// A loaded material: the graph plus the options it asked for.
#[derive(Debug, Clone)]
pub struct LoadedMaterial {
    pub name: String,
    pub graph: NodeGraph,
    pub options: CompileOptions,
}

pub fn load_material_from_path(path: impl AsRef<std::path::Path>) -> Result<LoadedMaterial> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read material json at {}", path.display()))?;
    load_material_from_str(&text)
        .with_context(|| format!("failed to load material {}", path.display()))
}

pub fn load_material_from_str(text: &str) -> Result<LoadedMaterial> {
    let doc: MaterialDoc = serde_json::from_str(text).context("failed to parse material json")?;
    build_graph(&doc)
}

/// Build a [`NodeGraph`] from a document.
///
/// Unknown modes degrade to the node's default mode with a warning; every
/// other authoring problem is an error.
#[tracing::instrument(skip(doc), fields(name = %doc.metadata.name, nodes = doc.nodes.len()))]
pub fn build_graph(doc: &MaterialDoc) -> Result<LoadedMaterial> {
    let mut graph = NodeGraph::new();
    let mut ids: HashMap<&str, NodeId> = HashMap::new();

    for n in &doc.nodes {
        let kind = resolve_kind(n)?;
        let id = graph.add_node(MaterialNode::new(n.id.clone(), kind));
        if ids.insert(n.id.as_str(), id).is_some() {
            bail!("duplicate node id: {}", n.id);
        }
    }

    for n in &doc.nodes {
        let consumer = ids[n.id.as_str()];
        for (socket, binding) in &n.inputs {
            match binding {
                InputBinding::Link { link } => {
                    let producer = ids.get(link.as_str()).copied().ok_or_else(|| {
                        anyhow!("{}.{socket} links to missing node: {link}", n.id)
                    })?;
                    graph.connect(consumer, socket, producer)?;
                }
                InputBinding::Value { value, value_type } => {
                    let declared = graph
                        .node(consumer)?
                        .socket(socket)
                        .map(|s| s.ty())
                        .ok_or_else(|| anyhow!("node {} has no socket {socket}", n.id))?;
                    let annotated = value_type
                        .as_deref()
                        .map(str::parse::<TypeTag>)
                        .transpose()
                        .map_err(|e| anyhow!("{}.{socket}: {e}", n.id))?;
                    let (shape, text) = literal_text(value)
                        .with_context(|| format!("invalid value for {}.{socket}", n.id))?;
                    // Numbers and arrays carry their own type; only strings
                    // take the annotation or the socket's declared type.
                    let ty = match (shape, annotated) {
                        (Some(shape), Some(t)) if shape != t => {
                            bail!("{}.{socket}: {shape} value annotated as {t}", n.id)
                        }
                        (Some(shape), _) => shape,
                        (None, Some(t)) => t,
                        (None, None) => declared,
                    };
                    graph.set_value(consumer, socket, ValueLiteral::new(ty, text))?;
                }
            }
        }
    }

    let root = ids
        .get(doc.output.as_str())
        .copied()
        .ok_or_else(|| anyhow!("output references missing node: {}", doc.output))?;
    graph.set_root(root)?;

    Ok(LoadedMaterial {
        name: doc.metadata.name.clone(),
        graph,
        options: doc.options.clone().unwrap_or_default(),
    })
}

fn resolve_kind(n: &DocNode) -> Result<NodeKind> {
    let kind = NodeKind::from_type_name(&n.node_type)
        .ok_or_else(|| anyhow!("unsupported material node type: {}", n.node_type))?;
    let Some(mode) = n.mode.as_deref() else {
        return Ok(kind);
    };
    match kind.with_mode(mode) {
        Ok(k) => Ok(k),
        Err(e) if e.is_recoverable() => {
            tracing::warn!(node = %n.id, "{e}; using {}", describe_mode(kind));
            Ok(kind)
        }
        Err(e) => Err(e.into()),
    }
}

fn describe_mode(kind: NodeKind) -> String {
    match kind {
        NodeKind::Gamma(m) => m.to_string(),
        NodeKind::LightFalloff(m) => m.to_string(),
        NodeKind::Mix(m) => m.to_string(),
        NodeKind::Clamp(m) => m.to_string(),
        NodeKind::Math(m) => m.to_string(),
        NodeKind::SeparateColor(m) => m.to_string(),
        NodeKind::VectorMath(m) => m.to_string(),
        other => format!("{} without a mode", other.type_name()),
    }
}

/// GLSL text for a JSON literal, with the type its shape implies.
///
/// Numbers are floats and arrays of 2 to 4 numbers are vectors. A number is
/// never splatted to a vector. Strings are GLSL source and have no type of
/// their own.
fn literal_text(value: &serde_json::Value) -> Result<(Option<TypeTag>, String)> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Ok((None, s.clone())),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(|v| (Some(TypeTag::Float), fmt_float(v as f32)))
            .ok_or_else(|| anyhow!("number out of range: {n}")),
        serde_json::Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|v| {
                    v.as_f64()
                        .map(|x| fmt_float(x as f32))
                        .ok_or_else(|| anyhow!("vector components must be numbers"))
                })
                .collect::<Result<_>>()?;
            let ty = match parts.len() {
                2 => TypeTag::Vec2,
                3 => TypeTag::Vec3,
                4 => TypeTag::Vec4,
                n => bail!("vector literal must have 2 to 4 components, got {n}"),
            };
            Ok((Some(ty), format!("{ty}({})", parts.join(", "))))
        }
        other => bail!("unsupported literal: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::modes::MathOperation;
    use crate::node::SocketBinding;

    const DOC: &str = r#"{
        "version": "1.0",
        "metadata": { "name": "ramp-demo" },
        "nodes": [
            { "id": "ramp", "type": "ColorRamp",
              "inputs": { "Fac": { "link": "div" }, "Color2": { "value": [1.0, 0.5, 0.0] } } },
            { "id": "div", "type": "Math", "mode": "Divide",
              "inputs": { "Value1": { "value": 1 }, "Value2": { "value": "0.0", "type": "float" } } },
            { "id": "unused", "type": "Gamma" }
        ],
        "output": "ramp"
    }"#;

    #[test]
    fn builds_graph_with_links_literals_and_root() {
        let material = load_material_from_str(DOC).unwrap();
        assert_eq!(material.name, "ramp-demo");
        let graph = &material.graph;
        assert_eq!(graph.len(), 3);

        let ramp = graph.find("ramp").unwrap();
        let div = graph.find("div").unwrap();
        assert_eq!(graph.root(), Some(ramp));

        let ramp_node = graph.node(ramp).unwrap();
        assert_eq!(
            ramp_node.socket("Fac").and_then(|s| s.binding()),
            Some(&SocketBinding::Connected(div))
        );
        assert_eq!(
            ramp_node.socket("Color2").and_then(|s| s.binding()),
            Some(&SocketBinding::Literal(ValueLiteral::new(
                TypeTag::Vec3,
                "vec3(1.0, 0.5, 0.0)"
            )))
        );
        let div_node = graph.node(div).unwrap();
        assert_eq!(div_node.kind(), NodeKind::Math(MathOperation::Divide));
        assert_eq!(
            div_node.socket("Value1").and_then(|s| s.binding()),
            Some(&SocketBinding::Literal(ValueLiteral::float(1.0)))
        );
    }

    #[test]
    fn unknown_mode_degrades_to_default() {
        let doc = r#"{ "version": "1.0", "output": "m",
            "nodes": [ { "id": "m", "type": "Math", "mode": "Sqrt" } ] }"#;
        let material = load_material_from_str(doc).unwrap();
        let m = material.graph.find("m").unwrap();
        assert_eq!(
            material.graph.node(m).unwrap().kind(),
            NodeKind::Math(MathOperation::Add)
        );
    }

    #[test]
    fn literal_type_mismatch_is_reported() {
        let doc = r#"{ "version": "1.0", "output": "m",
            "nodes": [ { "id": "m", "type": "Math",
                "inputs": { "Value1": { "value": "ramp_tex", "type": "sampler1D" } } } ] }"#;
        let err = load_material_from_str(doc).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GraphError>(),
            Some(&GraphError::type_mismatch(
                "m",
                "Value1",
                TypeTag::Float,
                TypeTag::Sampler1D
            ))
        );
    }

    #[test]
    fn value_shape_must_match_socket_type() {
        let short_color = r#"{ "version": "1.0", "output": "mix",
            "nodes": [ { "id": "mix", "type": "Mix",
                "inputs": { "Color1": { "value": [1.0, 2.0] } } } ] }"#;
        let err = load_material_from_str(short_color).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GraphError>(),
            Some(&GraphError::type_mismatch("mix", "Color1", TypeTag::Vec3, TypeTag::Vec2))
        );

        let vector_factor = r#"{ "version": "1.0", "output": "mix",
            "nodes": [ { "id": "mix", "type": "Mix",
                "inputs": { "Fac": { "value": [0.1, 0.2, 0.3] } } } ] }"#;
        let err = load_material_from_str(vector_factor).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GraphError>(),
            Some(&GraphError::type_mismatch("mix", "Fac", TypeTag::Float, TypeTag::Vec3))
        );

        let scalar_color = r#"{ "version": "1.0", "output": "mix",
            "nodes": [ { "id": "mix", "type": "Mix",
                "inputs": { "Color2": { "value": 0.5 } } } ] }"#;
        let err = load_material_from_str(scalar_color).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GraphError>(),
            Some(&GraphError::type_mismatch("mix", "Color2", TypeTag::Vec3, TypeTag::Float))
        );
    }

    #[test]
    fn annotation_cannot_retype_a_number_or_array() {
        let doc = r#"{ "version": "1.0", "output": "mix",
            "nodes": [ { "id": "mix", "type": "Mix",
                "inputs": { "Color1": { "value": [1.0, 2.0], "type": "vec3" } } } ] }"#;
        let err = format!("{:#}", load_material_from_str(doc).unwrap_err());
        assert!(err.contains("mix.Color1: vec2 value annotated as vec3"), "{err}");

        let doc = r#"{ "version": "1.0", "output": "m",
            "nodes": [ { "id": "m", "type": "Math",
                "inputs": { "Value1": { "value": 2, "type": "float" } } } ] }"#;
        let material = load_material_from_str(doc).unwrap();
        let m = material.graph.find("m").unwrap();
        assert_eq!(
            material.graph.node(m).unwrap().socket("Value1").and_then(|s| s.binding()),
            Some(&SocketBinding::Literal(ValueLiteral::float(2.0)))
        );
    }

    #[test]
    fn authoring_errors() {
        let missing_link = r#"{ "version": "1.0", "output": "m",
            "nodes": [ { "id": "m", "type": "Math", "inputs": { "Value1": { "link": "nope" } } } ] }"#;
        let err = format!("{:#}", load_material_from_str(missing_link).unwrap_err());
        assert!(err.contains("links to missing node: nope"), "{err}");

        let unknown_type = r#"{ "version": "1.0", "output": "m",
            "nodes": [ { "id": "m", "type": "Voronoi" } ] }"#;
        let err = format!("{:#}", load_material_from_str(unknown_type).unwrap_err());
        assert!(err.contains("unsupported material node type: Voronoi"), "{err}");

        let duplicate = r#"{ "version": "1.0", "output": "m",
            "nodes": [ { "id": "m", "type": "Math" }, { "id": "m", "type": "Math" } ] }"#;
        let err = format!("{:#}", load_material_from_str(duplicate).unwrap_err());
        assert!(err.contains("duplicate node id: m"), "{err}");

        let missing_output = r#"{ "version": "1.0", "output": "x",
            "nodes": [ { "id": "m", "type": "Math" } ] }"#;
        let err = format!("{:#}", load_material_from_str(missing_output).unwrap_err());
        assert!(err.contains("output references missing node: x"), "{err}");
    }

    #[test]
    fn options_are_carried_through() {
        let doc = r#"{ "version": "1.0", "output": "m",
            "nodes": [ { "id": "m", "type": "Math" } ],
            "options": { "indent": "    ", "node_comments": true } }"#;
        let material = load_material_from_str(doc).unwrap();
        assert_eq!(material.options.indent, "    ");
        assert!(material.options.node_comments);
    }
}
