use bunki::prelude::*;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use tracing_subscriber::EnvFilter;

/// Inspect operators, check conditions and route workflow branches
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Register an operator alias, e.g. `--alias equals=eq` (repeatable)
    #[arg(long = "alias", value_name = "ALIAS=TARGET", global = true)]
    aliases: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered operators grouped by category
    Operators,
    /// Validate a condition JSON file
    Validate {
        /// Path to the condition JSON file
        condition_path: String,
    },
    /// Evaluate a condition against a node output
    Eval {
        /// Path to the condition JSON file
        condition_path: String,
        /// Path to the node output JSON file
        output_path: String,
    },
    /// Render a template against recorded node outputs
    Template {
        /// Template text, e.g. "Hello {{n1.user.name}}!"
        template: String,
        /// Path to a JSON object of node outputs keyed by node id
        outputs_path: String,
    },
    /// Decide which outgoing edges of a node fire
    Route {
        /// Path to the workflow document JSON file
        workflow_path: String,
        /// Id of the node that produced the output
        node_id: String,
        /// Path to the node output JSON file
        output_path: String,
        /// Outputs of earlier nodes, used to bind the parameters of fired targets
        #[arg(long)]
        outputs: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bunki=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = build_engine(&cli.aliases);

    match cli.command {
        Command::Operators => print_operators(&engine),
        Command::Validate { condition_path } => run_validate(&engine, &condition_path),
        Command::Eval {
            condition_path,
            output_path,
        } => run_eval(&engine, &condition_path, &output_path),
        Command::Template {
            template,
            outputs_path,
        } => run_template(&template, &outputs_path),
        Command::Route {
            workflow_path,
            node_id,
            output_path,
            outputs,
        } => run_route(&engine, &workflow_path, &node_id, &output_path, outputs),
    }
}

fn build_engine(aliases: &[String]) -> Engine {
    aliases
        .iter()
        .fold(Engine::builder(), |builder, alias| match alias.split_once('=') {
            Some((alias, target)) => builder.with_operator_alias(alias.trim(), target.trim()),
            None => exit_with_error(&format!(
                "Invalid alias '{}': expected ALIAS=TARGET",
                alias
            )),
        })
        .build()
}

fn print_operators(engine: &Engine) {
    for (category, ids) in engine.list_by_category() {
        println!("{}:", category);
        for id in ids {
            if let Ok(operator) = engine.lookup(id.as_str()) {
                let metadata = operator.metadata();
                let value = match metadata.value_type {
                    Some(value_type) => format!(" <{}>", value_type),
                    None if metadata.requires_value => " <any>".to_string(),
                    None => String::new(),
                };
                println!(
                    "  {:<12} {:<14} {}{}",
                    metadata.id, metadata.symbol, metadata.label, value
                );
            }
        }
    }
}

fn run_validate(engine: &Engine, condition_path: &str) {
    let condition: Condition = read_json(condition_path);
    match engine.validate(&condition) {
        Ok(()) => println!("Valid: {}", engine.format_label(&condition)),
        Err(e) => exit_with_error(&format!("Invalid condition: {}", e)),
    }
}

fn run_eval(engine: &Engine, condition_path: &str, output_path: &str) {
    let condition: Condition = read_json(condition_path);
    let output: Value = read_json(output_path);

    let decision = engine.decide(&condition, &output);
    println!("{}", if decision.fired { "fired" } else { "not fired" });
    println!("  -> Reason: {}", decision.reason);
}

fn run_template(template: &str, outputs_path: &str) {
    let outputs = RunOutputs::from_file(outputs_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load outputs from '{}': {}",
            outputs_path, e
        ))
    });
    let rendered = outputs.render(template);
    println!("{}", rendered.text);
    for reason in &rendered.unresolved {
        eprintln!("  -> Unresolved: {}", reason);
    }
}

fn run_route(
    engine: &Engine,
    workflow_path: &str,
    node_id: &str,
    output_path: &str,
    outputs_path: Option<String>,
) {
    let document = WorkflowDocument::from_file(workflow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load workflow from '{}': {}",
            workflow_path, e
        ))
    });
    let output: Value = read_json(output_path);

    let mut outputs = match outputs_path {
        Some(path) => RunOutputs::from_file(&path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load outputs from '{}': {}", path, e))
        }),
        None => RunOutputs::new(),
    };
    outputs.record(node_id, output.clone());

    let decisions = engine.select_branches(&document, node_id, &output);
    if decisions.is_empty() {
        println!("Node '{}' has no outgoing edges", node_id);
        return;
    }

    for branch in decisions {
        let marker = if branch.fired { "fire" } else { "skip" };
        let label = branch.label.as_deref().unwrap_or("-");
        println!("[{}] #{} -> {} ({})", marker, branch.edge_index, branch.target, label);
        println!("  -> Reason: {}", branch.reason);
        if branch.fired {
            if let Some(parameters) = document.bind_node(&branch.target, &outputs) {
                if !parameters.is_null() {
                    println!("  -> Parameters: {}", parameters);
                }
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> T {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse '{}': {}", path, e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
