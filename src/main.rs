use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use node_forge_material::{CompileOptions, ResultBinding, compile_graph_with_options, dsl, validation};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Emit {
    #[default]
    Body,
    Shader,
    Wgsl,
}

#[derive(Debug, Default, Clone)]
struct Cli {
    material: Option<PathBuf>,
    options: Option<PathBuf>,
    emit: Emit,
    validate: bool,
}

fn parse_cli(args: &[String]) -> Result<Cli> {
    let mut cli = Cli::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--material" => {
                let Some(v) = args.get(i + 1) else {
                    return Err(anyhow!("missing value for --material"));
                };
                cli.material = Some(PathBuf::from(v));
                i += 2;
            }
            "--options" => {
                let Some(v) = args.get(i + 1) else {
                    return Err(anyhow!("missing value for --options"));
                };
                cli.options = Some(PathBuf::from(v));
                i += 2;
            }
            "--shader" => {
                cli.emit = Emit::Shader;
                i += 1;
            }
            "--wgsl" => {
                cli.emit = Emit::Wgsl;
                i += 1;
            }
            "--validate" => {
                cli.validate = true;
                i += 1;
            }
            other => {
                return Err(anyhow!(
                    "unknown argument: {other} (supported: --material <doc.json>, --options <options.json>, --shader, --wgsl, --validate)"
                ));
            }
        }
    }
    Ok(cli)
}

fn run(material_path: &Path, cli: &Cli) -> Result<()> {
    let material = dsl::load_material_from_path(material_path)?;
    let options = match cli.options.as_deref() {
        Some(path) => CompileOptions::load(path)?,
        None => material.options.clone(),
    };
    let needs_shader = cli.validate || cli.emit != Emit::Body;
    if needs_shader && options.result != ResultBinding::Return {
        return Err(anyhow!(
            "--shader, --wgsl and --validate need the `return` result binding"
        ));
    }

    let shader = compile_graph_with_options(&material.graph, options)
        .with_context(|| format!("material {} failed to compile", material_path.display()))?;

    if !needs_shader {
        print!("{}", shader.source);
        return Ok(());
    }

    let glsl = validation::fragment_shader(&shader)?;
    if cli.validate {
        validation::validate_glsl_with_context(&glsl, &format!("material {}", material.name))?;
        eprintln!("[validate] {}: ok", material_path.display());
    }

    match cli.emit {
        Emit::Body => print!("{}", shader.source),
        Emit::Shader => print!("{glsl}"),
        Emit::Wgsl => print!("{}", validation::glsl_to_wgsl(&glsl)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_cli(&argv)?;

    let material_path = cli
        .material
        .clone()
        .ok_or_else(|| anyhow!("--material <doc.json> is required"))?;
    run(&material_path, &cli)
}
