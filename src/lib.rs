//! Compiles material node graphs into GLSL source.
//!
//! - `node` / `node_compiler`: the node catalog and per-node code generators
//! - `graph`: node arena, root designation and dependency ordering
//! - `symbols` / `evaluator`: symbol allocation and the compile pass
//! - `dsl`: JSON material documents
//! - `validation`: naga-based checking of generated shaders
//!
//! The main entry points are:
//! - `compile_graph`: compile a graph built in code
//! - `dsl::load_material_from_path`: load a JSON material

pub mod config;
pub mod dsl;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod modes;
pub mod node;
pub mod node_compiler;
pub mod symbols;
pub mod types;
pub mod validation;

pub use config::{CompileOptions, ResultBinding};
pub use error::{GraphError, GraphResult};
pub use evaluator::{CompiledShader, GraphEvaluator, compile_graph, compile_graph_with_options};
pub use graph::{NodeGraph, NodeId};
pub use modes::{
    ClampMode, ColorChannel, FalloffMode, GammaMode, MathOperation, MixMode, VectorOperation,
};
pub use node::{MaterialNode, NodeCategory, NodeKind, Socket, SocketBinding};
pub use symbols::{Symbol, SymbolTable};
pub use types::{TypeTag, ValueLiteral};
