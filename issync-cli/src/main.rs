// Command-line interface for issync
//
// Offline front end for the issync-blocks library: it turns issue bodies and issue JSON into
// the payloads a Notion sync sends, without sending anything. Useful for checking how an issue
// will look before wiring up the webhook job, and for driving the sync from shell scripts.
//
// Usage:
//  issync <body.md>                                      - Same as `issync blocks <body.md>`
//  issync blocks <body.md>                               - Notion blocks for a Markdown body
//  issync page <issue.json> [--database-id ID] [--update] - Create (or update) page request
//  issync plan <body.md> --existing <children.json>      - Block calls to bring a page up to date
//  issync backfill <issues.json> [--existing <numbers.json>] - Issue numbers still to create
//
// Configuration is layered: built-in defaults, ./issync.toml, --config <file>, ISSYNC_* env
// vars and finally --set key=value. Output is JSON on stdout unless -o is given; logs go to
// stderr.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use issync_blocks::notion::{
    append_batches, pending_issues, plan_block_sync, BlockOp, ExistingChildren, Issue,
    PageRequest, PropertyNames,
};
use issync_blocks::{blocks_or_empty, parse_body_with_options, ParseOptions};
use issync_config::{IssyncConfig, Loader};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["blocks", "page", "plan", "backfill", "help"];

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("issync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert GitHub issues into Notion blocks and page payloads")
        .long_about(
            "issync turns GitHub issue bodies and issue JSON into the request bodies used to\n\
            sync issues into a Notion database. Nothing is sent: output is JSON.\n\n\
            Examples:\n  \
            issync body.md                              # Blocks for a Markdown body\n  \
            issync page issue.json --database-id abc    # Create-page request\n  \
            issync plan body.md --existing children.json\n  \
            issync backfill issues.json --existing synced.json"
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an issync.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .help("Override a configuration value (e.g. markdown.math=true)")
                .action(ArgAction::Append)
                .global(true),
        )
        .subcommand(
            Command::new("blocks")
                .about("Convert a Markdown issue body to Notion blocks (default command)")
                .arg(input_arg("Markdown file"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("page")
                .about("Build the Notion page request for an issue")
                .long_about(
                    "Reads a GitHub issue object (or an `issues` webhook payload) and prints\n\
                    {\"request\": <page request>, \"append\": [<append calls>]}.\n\n\
                    Bodies that cannot be converted produce a page without content blocks.\n\
                    Blocks beyond Notion's per-request limit are listed under \"append\"."
                )
                .arg(input_arg("Issue JSON file"))
                .arg(
                    Arg::new("database-id")
                        .long("database-id")
                        .value_name("ID")
                        .help("Target database (defaults to notion.database_id)"),
                )
                .arg(
                    Arg::new("update")
                        .long("update")
                        .help("Build an update-page request (properties only)")
                        .action(ArgAction::SetTrue),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("plan")
                .about("Plan the block calls that bring an existing page up to date")
                .arg(input_arg("Markdown file"))
                .arg(
                    Arg::new("existing")
                        .long("existing")
                        .value_name("PATH")
                        .help("Current page children (list-children response or array)")
                        .required(true)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("backfill")
                .about("List issues that have no Notion page yet")
                .arg(input_arg("JSON array of GitHub issues"))
                .arg(
                    Arg::new("existing")
                        .long("existing")
                        .value_name("PATH")
                        .help("JSON array of issue numbers already in Notion")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(output_arg()),
        )
}

/// Inserts `blocks` when the first argument is a file rather than a subcommand
fn inject_default_command(args: Vec<String>) -> Vec<String> {
    match args.get(1) {
        Some(first) if !first.starts_with('-') && !SUBCOMMANDS.contains(&first.as_str()) => {
            let mut injected = vec![args[0].clone(), "blocks".to_string()];
            injected.extend_from_slice(&args[1..]);
            injected
        }
        _ => args,
    }
}

fn main() {
    let args = inject_default_command(std::env::args().collect());
    let matches = build_cli().get_matches_from(args);

    let overrides: Vec<&String> = matches
        .get_many::<String>("set")
        .map(|values| values.collect())
        .unwrap_or_default();
    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &overrides,
    );
    init_logging(&config);

    match matches.subcommand() {
        Some(("blocks", sub_matches)) => handle_blocks_command(sub_matches, &config),
        Some(("page", sub_matches)) => handle_page_command(sub_matches, &config),
        Some(("plan", sub_matches)) => handle_plan_command(sub_matches, &config),
        Some(("backfill", sub_matches)) => handle_backfill_command(sub_matches, &config),
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

fn init_logging(config: &IssyncConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Handle the blocks command
fn handle_blocks_command(matches: &ArgMatches, config: &IssyncConfig) {
    let input = required(matches, "input");
    let source = read_file(input);
    let options = ParseOptions::from(&config.markdown);

    let blocks = parse_body_with_options(&source, &options).unwrap_or_else(|e| {
        fail(&format!("Conversion error in '{input}': {e}"));
    });
    write_json(output(matches), &blocks);
}

#[derive(Serialize)]
struct PageOutput {
    request: PageRequest,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    append: Vec<BlockOp>,
}

/// Handle the page command
fn handle_page_command(matches: &ArgMatches, config: &IssyncConfig) {
    let input = required(matches, "input");
    let issue = Issue::from_json(&read_file(input)).unwrap_or_else(|e| {
        fail(&format!("Error reading issue from '{input}': {e}"));
    });
    let names = PropertyNames::from(&config.notion.properties);

    let page = if matches.get_flag("update") {
        PageOutput {
            request: PageRequest::update(&issue, &names),
            append: Vec::new(),
        }
    } else {
        let database_id = matches
            .get_one::<String>("database-id")
            .unwrap_or(&config.notion.database_id);
        if database_id.is_empty() {
            fail("No database id: pass --database-id or set notion.database_id");
        }

        let blocks = blocks_or_empty(issue.body_text(), &ParseOptions::from(&config.markdown));
        let (request, overflow) = PageRequest::create(database_id, &issue, &names, blocks);
        PageOutput {
            request,
            append: append_batches(overflow),
        }
    };

    tracing::info!(
        issue = issue.number,
        append_calls = page.append.len(),
        "built page request"
    );
    write_json(output(matches), &page);
}

/// Handle the plan command
fn handle_plan_command(matches: &ArgMatches, config: &IssyncConfig) {
    let input = required(matches, "input");
    let existing_path = required(matches, "existing");

    let existing: ExistingChildren = serde_json::from_str(&read_file(existing_path))
        .unwrap_or_else(|e| {
            fail(&format!("Error reading page children from '{existing_path}': {e}"));
        });
    let blocks = blocks_or_empty(&read_file(input), &ParseOptions::from(&config.markdown));

    let ops = plan_block_sync(&existing.into_blocks(), blocks);
    write_json(output(matches), &ops);
}

/// Handle the backfill command
fn handle_backfill_command(matches: &ArgMatches, config: &IssyncConfig) {
    let input = required(matches, "input");
    let issues: Vec<Issue> = serde_json::from_str(&read_file(input)).unwrap_or_else(|e| {
        fail(&format!("Error reading issues from '{input}': {e}"));
    });

    let existing: HashSet<u64> = match matches.get_one::<String>("existing") {
        Some(path) => serde_json::from_str(&read_file(path)).unwrap_or_else(|e| {
            fail(&format!("Error reading issue numbers from '{path}': {e}"));
        }),
        None => HashSet::new(),
    };

    let pending: Vec<u64> = pending_issues(&issues, &existing, config.github.repository())
        .into_iter()
        .map(|issue| issue.number)
        .collect();
    tracing::info!(total = issues.len(), pending = pending.len(), "selected issues to backfill");
    write_json(output(matches), &pending);
}

fn load_cli_config(explicit_path: Option<&str>, overrides: &[&String]) -> IssyncConfig {
    let loader = Loader::new().with_optional_file("issync.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let mut loader = loader.with_env();

    for raw in overrides {
        let (key, value) = parse_set_arg(raw).unwrap_or_else(|| {
            fail(&format!("Invalid --set '{raw}', expected KEY=VALUE"));
        });
        loader = loader.set_override(key, value).unwrap_or_else(|err| {
            fail(&format!("Invalid --set '{raw}': {err}"));
        });
    }

    loader.build().unwrap_or_else(|err| {
        fail(&format!("Failed to load configuration: {err}"));
    })
}

fn parse_set_arg(raw: &str) -> Option<(&str, &str)> {
    let (key, value) = raw.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(|s| s.as_str())
        .unwrap_or_else(|| fail(&format!("Missing required argument '{id}'")))
}

fn output(matches: &ArgMatches) -> Option<&str> {
    matches.get_one::<String>("output").map(|s| s.as_str())
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        fail(&format!("Error reading file '{path}': {e}"));
    })
}

fn write_json<T: Serialize>(output: Option<&str>, value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        fail(&format!("Serialization error: {e}"));
    });

    match output {
        Some(path) => fs::write(path, format!("{json}\n")).unwrap_or_else(|e| {
            fail(&format!("Error writing file '{path}': {e}"));
        }),
        None => println!("{json}"),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}
