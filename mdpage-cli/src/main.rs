// Command-line driver for mdpage
//
// This binary runs the mdpage transformation pipeline over Markdown files named on the
// command line and prints the resulting JSON artifacts. Discovering source files and
// wiring the output into a bundler is left to the surrounding build system.
//
// Usage:
//  mdpage transform <file> [--pretty] [--output <file>]  - Payload of one document
//  mdpage index <files...>                               - Page index of the documents
//  mdpage routes <files...>                              - Route tree of the documents
//  mdpage extensions                                     - List Markdown extensions
//
// Configuration:
//
// ./mdpage.toml is layered over the built-in defaults when present. An explicit
// --config file must exist. --content-root and --link-policy override both.
//
// Logging goes to stderr and is filtered through MDPAGE_LOG (default "warn").

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use mdpage::{ExtensionRegistry, PageData, Payload, Pipeline, TransformOptions};
use mdpage_config::{Loader, MdpageConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MDPAGE_LOG";
const LINK_POLICIES: [&str; 2] = ["flatten", "strip-extension"];

fn build_cli() -> Command {
    Command::new("mdpage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn Markdown pages into serialized element trees")
        .long_about(
            "mdpage transforms Markdown documents into element-tree payloads that a\n\
            runtime renders into components.\n\n\
            Commands:\n  \
            - transform:  Payload (tree, assets, page data, template) of one document\n  \
            - index:      Page index of a set of documents\n  \
            - routes:     Route tree of a set of documents\n  \
            - extensions: Markdown extensions that can be enabled\n\n\
            Examples:\n  \
            mdpage transform docs/guide.md --pretty        # Payload to stdout\n  \
            mdpage transform docs/guide.md -o guide.json   # Payload to a file\n  \
            mdpage --content-root docs index docs/*.md     # Page index",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdpage.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("content-root")
                .long("content-root")
                .value_name("DIR")
                .help("Directory all pages live under")
                .value_hint(ValueHint::DirPath)
                .global(true),
        )
        .arg(
            Arg::new("link-policy")
                .long("link-policy")
                .value_name("POLICY")
                .help("How links to other pages are rewritten")
                .value_parser(clap::builder::PossibleValuesParser::new(LINK_POLICIES))
                .global(true),
        )
        .subcommand(
            Command::new("transform")
                .about("Transform one Markdown document into its payload")
                .arg(
                    Arg::new("input")
                        .help("Markdown file to transform")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .help("Pretty-print the payload")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("index")
                .about("Print the page index of a set of documents")
                .arg(documents_arg()),
        )
        .subcommand(
            Command::new("routes")
                .about("Print the route tree of a set of documents")
                .arg(documents_arg()),
        )
        .subcommand(Command::new("extensions").about("List the available Markdown extensions"))
}

fn documents_arg() -> Arg {
    Arg::new("inputs")
        .help("Markdown files making up the site")
        .required(true)
        .num_args(1..)
        .value_hint(ValueHint::FilePath)
}

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();
    let config = load_cli_config(&matches);
    let options = TransformOptions::from(&config);

    match matches.subcommand() {
        Some(("transform", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_transform_command(input, output, sub_matches.get_flag("pretty"), options);
        }
        Some(("index", sub_matches)) => {
            let pipeline = build_pipeline(options);
            let tree = pipeline.page_tree(&transform_all(&pipeline, inputs(sub_matches)));
            let json = tree.to_json().unwrap_or_else(|e| {
                eprintln!("Serialization error: {e}");
                std::process::exit(1);
            });
            println!("{json}");
        }
        Some(("routes", sub_matches)) => {
            let pipeline = build_pipeline(options);
            let tree = pipeline.page_tree(&transform_all(&pipeline, inputs(sub_matches)));
            let routes = tree.routes(&pipeline.options().content_root);
            let json = serde_json::to_string_pretty(&routes).unwrap_or_else(|e| {
                eprintln!("Serialization error: {e}");
                std::process::exit(1);
            });
            println!("{json}");
        }
        Some(("extensions", _)) => {
            for name in ExtensionRegistry::with_defaults().list_extensions() {
                println!("{name}");
            }
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn inputs(matches: &ArgMatches) -> Vec<PathBuf> {
    matches
        .get_many::<String>("inputs")
        .into_iter()
        .flatten()
        .map(PathBuf::from)
        .collect()
}

fn build_pipeline(options: TransformOptions) -> Pipeline {
    Pipeline::new(options).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn read_source(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {e}", path.display());
        std::process::exit(1);
    })
}

/// Handle the transform command
fn handle_transform_command(
    input: &str,
    output: Option<&str>,
    pretty: bool,
    options: TransformOptions,
) {
    let pipeline = build_pipeline(options);
    let path = Path::new(input);
    let source = read_source(path);

    let payload = pipeline.transform(&source, path).unwrap_or_else(|e| {
        eprintln!("Transform error in '{input}': {e}");
        std::process::exit(1);
    });

    let json = if pretty {
        payload.to_json_pretty()
    } else {
        payload.to_json()
    }
    .unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, json).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{json}"),
    }
}

/// Transform every document, reporting all failures before giving up.
fn transform_all(pipeline: &Pipeline, paths: Vec<PathBuf>) -> Vec<PageData> {
    let sources: Vec<(PathBuf, String)> = paths
        .into_iter()
        .map(|path| {
            let source = read_source(&path);
            (path, source)
        })
        .collect();

    let results = pipeline.transform_batch(
        sources
            .iter()
            .map(|(path, source)| (path.as_path(), source.as_str())),
    );

    let mut pages = Vec::with_capacity(results.len());
    let mut failed = false;
    for document in results {
        match document.result {
            Ok(Payload { page, .. }) => pages.push(page),
            Err(e) => {
                eprintln!("Transform error in '{}': {e}", document.path.display());
                failed = true;
            }
        }
    }
    if failed {
        std::process::exit(1);
    }
    pages
}

fn load_cli_config(matches: &ArgMatches) -> MdpageConfig {
    let loader = Loader::new().with_optional_file("mdpage.toml");
    let loader = if let Some(path) = matches.get_one::<String>("config") {
        loader.with_file(path)
    } else {
        loader
    };

    let overrides = [
        ("content.root", matches.get_one::<String>("content-root")),
        ("links.policy", matches.get_one::<String>("link-policy")),
    ];
    let loader = overrides
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .try_fold(loader, |loader, (key, value)| {
            loader.set_override(key, value.as_str())
        })
        .unwrap_or_else(|err| {
            eprintln!("Invalid option: {err}");
            std::process::exit(1);
        });

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
