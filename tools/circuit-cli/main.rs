use circuit_preview::prelude::*;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Preview what a circuit does with its sample data
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional path to a preview configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the namespaced sample data of a circuit, or the context of one pin
    Collect {
        /// Path to the circuit JSON file
        circuit_path: String,
        /// Index of the node whose pin context should be printed
        #[arg(short, long, requires = "pin")]
        node: Option<usize>,
        /// The pin whose context should be printed
        #[arg(short, long, value_enum)]
        pin: Option<PinCli>,
    },
    /// Evaluate the filter pin of a node
    Filter {
        circuit_path: String,
        /// Index of the node in circuit order
        #[arg(short, long)]
        node: usize,
        /// Evaluate the lookup filter instead of the filter
        #[arg(short, long)]
        lookup: bool,
    },
    /// Execute the mapper pin of a node
    Map {
        circuit_path: String,
        #[arg(short, long)]
        node: usize,
        /// Execute the post mapper instead of the pre mapper
        #[arg(short, long)]
        post: bool,
    },
    /// Render a template against a JSON data file
    Render {
        template: String,
        data_path: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PinCli {
    Filter,
    LookupFilter,
    PreMapper,
    PostMapper,
}

impl From<PinCli> for PinKind {
    fn from(pin: PinCli) -> Self {
        match pin {
            PinCli::Filter => PinKind::Filter,
            PinCli::LookupFilter => PinKind::LookupFilter,
            PinCli::PreMapper => PinKind::PreMapper,
            PinCli::PostMapper => PinKind::PostMapper,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PreviewConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => PreviewConfig::default(),
    };

    let start = Instant::now();
    match cli.command {
        Command::Collect {
            circuit_path,
            node,
            pin,
        } => run_collect(&config, &circuit_path, node.zip(pin)),
        Command::Filter {
            circuit_path,
            node,
            lookup,
        } => {
            let kind = if lookup {
                PinKind::LookupFilter
            } else {
                PinKind::Filter
            };
            run_filter(&config, &circuit_path, node, kind);
        }
        Command::Map {
            circuit_path,
            node,
            post,
        } => {
            let kind = if post {
                PinKind::PostMapper
            } else {
                PinKind::PreMapper
            };
            run_map(&config, &circuit_path, node, kind);
        }
        Command::Render {
            template,
            data_path,
        } => run_render(&template, &data_path),
    }
    tracing::debug!("preview finished in {:?}", start.elapsed());
}

fn run_collect(config: &PreviewConfig, circuit_path: &str, target: Option<(usize, PinCli)>) {
    let circuit = load_circuit(circuit_path);
    let options = config.collect_options();
    let document = match target {
        Some((index, pin)) => context_for_pin(circuit.nodes(), index, pin.into(), &options)
            .unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => collect_sample_data(circuit.nodes(), &options),
    };
    println!("{}", config.render(&document.into_value()));
}

fn run_filter(config: &PreviewConfig, circuit_path: &str, index: usize, kind: PinKind) {
    let circuit = load_circuit(circuit_path);
    let pin = circuit
        .nodes()
        .get(index)
        .and_then(|node| node.filter_pin(kind))
        .unwrap_or_else(|| exit_with_error(&format!("Node {} has no {} pin", index, kind)));

    let context = context_for_pin(circuit.nodes(), index, kind, &config.collect_options())
        .unwrap_or_else(|e| exit_with_error(&e.to_string()))
        .into_value();

    println!("{}", evaluator::preview_with_context(pin, &context));
    if let Ok(report) = evaluator::evaluate_with_trace(pin, &context) {
        println!("-> Reason: {}", report.reason());
    }
}

fn run_map(config: &PreviewConfig, circuit_path: &str, index: usize, kind: PinKind) {
    let mut circuit = load_circuit(circuit_path);
    refresh_pin_sample_data(&mut circuit, index, kind, &config.collect_options())
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let pin = circuit
        .nodes()
        .get(index)
        .and_then(|node| node.mapper_pin(kind))
        .unwrap_or_else(|| exit_with_error(&format!("Node {} has no {} pin", index, kind)));

    match mapper::execute_sample(pin, &pin.sample_data) {
        Ok(output) => println!("{}", config.render(&output.document)),
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn run_render(template: &str, data_path: &str) {
    let data = fs::read_to_string(data_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read {}: {}", data_path, e)));
    let context = circuit_preview::json::parse_sample_data(&data)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("{}", template::render_or_message(template, &context));
}

fn load_circuit(path: &str) -> Circuit {
    let circuit = Circuit::from_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load circuit: {}", e)));
    if let Err(e) = circuit.validate() {
        tracing::warn!("circuit does not satisfy its invariants: {}", e);
    }
    circuit
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
