//! `diagnorm rules`: lists the suggestion rules in evaluation order.

use diagnorm_engine::SuggestionEngine;

use crate::pipeline::resolve_config;
use crate::GlobalArgs;

/// Runs the `diagnorm rules` command. Always returns exit code 0.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let engine = SuggestionEngine::new(&config.suggest);
    print!("{}", format_rules(&engine));
    Ok(0)
}

fn format_rules(engine: &SuggestionEngine) -> String {
    let rules = engine.rules();
    let width = rules.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (name, description) in rules {
        let state = if engine.is_enabled(name) { "" } else { " (disabled)" };
        out.push_str(&format!("{name:<width$}  {description}{state}\n"));
    }
    out
}
