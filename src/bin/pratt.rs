//! Command-line interface for pratt
//! This binary parses files or inline expressions with a configured grammar and prints the
//! resulting tree in one of the registered formats.
//!
//! Usage:
//!   pratt parse `<path>` | --expr `<text>` [--format `<format>`] [--config `<file>`]  - Parse and print the tree
//!   pratt tokens `<path>` | --expr `<text>` [--config `<file>`]                       - Print the token stream
//!   pratt list-formats                                                                - List output formats
//!
//! Configuration is the built-in defaults, then `$XDG_CONFIG_HOME/pratt/pratt.toml` (or
//! `~/.config/pratt/pratt.toml`) when it exists, then the `--config` file.
//!
//! `--verbose` enables debug logging on stderr. The exit status is 1 when the document has
//! error messages, or on I/O, configuration or lexer context errors.

use clap::{Arg, ArgAction, ArgMatches, Command};
use pratt::pratt::config::{user_config_path, Loader, PrattConfig};
use pratt::pratt::diagnostics::SourceDocument;
use pratt::pratt::formats::FormatRegistry;

fn source_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("path")
                .help("Path to the source file")
                .required_unless_present("expr")
                .index(1),
        )
        .arg(
            Arg::new("expr")
                .long("expr")
                .short('e')
                .help("Parse this text instead of a file")
                .conflicts_with("path"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the default configuration"),
        )
}

fn main() {
    let matches = Command::new("pratt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse expressions with a configurable Pratt grammar")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parser activity to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            source_args(Command::new("parse").about("Parse a document and print its tree")).arg(
                Arg::new("format")
                    .long("format")
                    .short('f')
                    .help("Output format (e.g., 'print', 'treeviz', 'json')")
                    .default_value("print"),
            ),
        )
        .subcommand(source_args(
            Command::new("tokens").about("Print the tokens of a document"),
        ))
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("parse", parse_matches)) => handle_parse_command(parse_matches),
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn load_config(matches: &ArgMatches) -> PrattConfig {
    let mut loader = Loader::new();
    if let Some(path) = user_config_path() {
        loader = loader.with_optional_file(path);
    }
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(format!("invalid configuration: {}", e)))
}

fn read_document(matches: &ArgMatches) -> SourceDocument {
    if let Some(expr) = matches.get_one::<String>("expr") {
        return SourceDocument::new("<expr>", expr.as_str());
    }
    let Some(path) = matches.get_one::<String>("path") else {
        fail("no input given");
    };
    let source = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading {}: {}", path, e)));
    SourceDocument::new(path.as_str(), source)
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("print");
    let registry = FormatRegistry::with_defaults();
    if !registry.has(format) {
        fail(format!(
            "unknown format '{}' (available: {})",
            format,
            registry.list_formats().join(", ")
        ));
    }

    let grammar = config.build_grammar();
    let outcome = grammar
        .parse(read_document(matches))
        .unwrap_or_else(|e| fail(e));

    let output = registry
        .serialize(&outcome.tree, format)
        .unwrap_or_else(|e| fail(e));
    print!("{}", output);

    let messages = outcome
        .document
        .render_messages(config.diagnostics.context_lines);
    if !messages.is_empty() {
        eprint!("{}", messages);
    }
    if outcome.has_errors() {
        std::process::exit(1);
    }
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) {
    let grammar = load_config(matches).build_grammar();
    let document = read_document(matches);
    for token in grammar.tokenize(document.source()) {
        println!(
            "{:<10} {:<12} {}",
            token.kind.to_string(),
            format!("{:?}", token.text),
            token.range
        );
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {}", name);
        println!("    {}", description);
    }
}
