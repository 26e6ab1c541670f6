//! `diagnorm normalize`: the shell adapter over the engine.
//!
//! 1. Resolve the configuration (`--config`, discovered `diagnorm.toml`, or defaults)
//! 2. Read every input (`-` is stdin)
//! 3. Normalize the inputs in parallel
//! 4. Render the collections in input order

use diagnorm_diagnostics::{DiagnosticCollection, DiagnosticRenderer, TerminalRenderer};
use diagnorm_engine::{Normalizer, Payload};
use rayon::prelude::*;
use tracing::debug;

use crate::pipeline::{read_input, resolve_config};
use crate::{GlobalArgs, NormalizeArgs, ReportFormat};

/// Runs the `diagnorm normalize` command.
///
/// Returns exit code 0 if every collection succeeded, 1 otherwise.
pub fn run(args: &NormalizeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let normalizer = Normalizer::new(&config);

    let inputs: Vec<String> = if args.inputs.is_empty() {
        vec!["-".to_string()]
    } else {
        args.inputs.clone()
    };
    let bodies = inputs
        .iter()
        .map(|input| read_input(input))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(inputs = bodies.len(), "normalizing compiler responses");

    let collections = normalize_all(&normalizer, &bodies, args.file.as_deref());

    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color, args.verbose_text);
            print!("{}", render_text(&renderer, &inputs, &collections, global.quiet));
        }
        ReportFormat::Json => {
            let json = if collections.len() == 1 {
                serde_json::to_string_pretty(&collections[0])?
            } else {
                serde_json::to_string_pretty(&collections)?
            };
            println!("{json}");
        }
    }

    Ok(exit_code(&collections))
}

/// Normalizes every body in parallel; the result keeps input order.
fn normalize_all(
    normalizer: &Normalizer,
    bodies: &[String],
    file: Option<&str>,
) -> Vec<DiagnosticCollection> {
    bodies
        .par_iter()
        .map(|body| {
            let payload = Payload::from_text(body);
            match file {
                Some(file) => normalizer.normalize_for_file(&payload, file),
                None => normalizer.normalize(&payload),
            }
        })
        .collect()
}

fn render_text(
    renderer: &TerminalRenderer,
    inputs: &[String],
    collections: &[DiagnosticCollection],
    quiet: bool,
) -> String {
    let mut out = String::new();
    let many = collections.len() > 1;
    for (input, collection) in inputs.iter().zip(collections) {
        if many {
            out.push_str(&format!("==> {input} <==\n"));
        }
        if quiet {
            out.push_str(collection.summary_message());
            out.push('\n');
        } else {
            out.push_str(&renderer.render_collection(collection));
        }
    }
    out
}

fn exit_code(collections: &[DiagnosticCollection]) -> i32 {
    if collections.iter().all(DiagnosticCollection::success) {
        0
    } else {
        1
    }
}
