// Command-line interface for wiki-babel
//
// This binary exposes the library transforms for scripting and for checking conversions
// without a running wiki.
//
// Converting:
//
// The input is rich-text HTML (what the editing surface holds); the output is wiki markup.
// The target dialect comes from --to, else from the output file extension, else from the
// configuration ([editor] format).
// Usage:
//  wiki <input.html> [--to <format>] [--output <file>]    - Convert HTML to markup (default)
//  wiki convert <input.html> [--to <format>] [-o <file>]  - Same as above (explicit)
//  wiki escape <input> [--format <format>]                 - Defuse markup before rendering
//  wiki unescape <input.html> [--format <format>]          - Clean rendered HTML
//  wiki style <declaration>                                - Filter an inline style
//  wiki preview <input.md>                                 - Render Markdown locally
//  wiki inspect <input.html> [<transform>]                 - Show the loaded tree
//  wiki --list-formats                                     - List dialects and transforms
//
// Input paths may be "-" for stdin.
//
// Extra Parameters:
//
// --extra-<key> <value> overrides configuration for one run. Known keys:
//  format       - dialect used when nothing else decides it
//  attachments  - comma separated attachment filenames (Image Reference Resolver)
// Any other key is passed to the dialect as a serialization option.

mod transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use wiki_babel::format::ATTACHMENTS_OPTION;
use wiki_babel::formats::markdown::preview::CommonMarkRenderer;
use wiki_babel::{parse_html, FormatRegistry};
use wiki_config::{Loader, WikiConfig};

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');
            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .help("Markup dialect (detected from the file extension, else configuration)")
        .value_hint(ValueHint::Other)
}

fn build_cli() -> Command {
    Command::new("wiki")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert rich text to Textile and Markdown wiki markup")
        .long_about(
            "wiki converts rich-text HTML into Textile or Markdown and exposes the escape\n\
            and style transforms the editor uses around the wiki renderer.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> <value> to override configuration for one run.\n  \
            Known names: format, attachments (comma separated filenames).\n\n\
            Examples:\n  \
            wiki page.html --to textile                       # Convert to Textile (stdout)\n  \
            wiki page.html -o page.md                         # Dialect from the extension\n  \
            wiki page.html --extra-attachments a.png,b.png    # Resolve attachment images\n  \
            wiki style 'color: rgb(255, 0, 0); font-family: x' # Filter a style",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a wiki.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert rich-text HTML to wiki markup (default command)")
                .arg(input_arg("Input HTML file, or - for stdin"))
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target dialect (textile, markdown)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("escape")
                .about("Defuse wiki markup before it is sent to the renderer")
                .arg(input_arg("Input markup file, or - for stdin"))
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("unescape")
                .about("Clean renderer HTML for loading into the rich-text view")
                .arg(input_arg("Input HTML file, or - for stdin"))
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("style")
                .about("Filter an inline style declaration through the whitelist")
                .arg(
                    Arg::new("declaration")
                        .help("CSS declarations, e.g. 'color: red; width: 10px'")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("Render Markdown to HTML locally")
                .arg(input_arg("Input Markdown file, or - for stdin")),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the rich-text tree loaded from HTML")
                .arg(input_arg("Input HTML file, or - for stdin"))
                .arg(
                    Arg::new("transform")
                        .help("View to print. Defaults to 'tree-text'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
}

const SUBCOMMANDS: &[&str] = &[
    "convert", "escape", "unescape", "style", "preview", "inspect", "help",
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // Without a subcommand, a leading path means "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => handle_convert_command(sub_matches, &extra_params, &config),
        Some(("escape", sub_matches)) => {
            let input = required(sub_matches, "input");
            let format = resolve_format(sub_matches.get_one::<String>("format"), Some(input), &config);
            let source = read_input(input);
            let registry = FormatRegistry::default();
            let escaped = registry
                .get(&format)
                .map(|f| f.escape(&source))
                .unwrap_or_else(|e| fail(&format!("Error: {e}")));
            print!("{escaped}");
        }
        Some(("unescape", sub_matches)) => {
            let input = required(sub_matches, "input");
            // Rendered HTML says nothing about its dialect
            let format = resolve_format(sub_matches.get_one::<String>("format"), None, &config);
            let html = read_input(input);
            let registry = FormatRegistry::default();
            let cleaned = registry
                .get(&format)
                .map(|f| f.unescape(&html))
                .unwrap_or_else(|e| fail(&format!("Error: {e}")));
            print!("{cleaned}");
        }
        Some(("style", sub_matches)) => {
            let declaration = required(sub_matches, "declaration");
            println!("{}", wiki_babel::transforms::filter_style(declaration));
        }
        Some(("preview", sub_matches)) => {
            let source = read_input(required(sub_matches, "input"));
            print!("{}", CommonMarkRenderer::new().render_markup(&source));
        }
        Some(("inspect", sub_matches)) => {
            let html = read_input(required(sub_matches, "input"));
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("tree-text");
            let output = transforms::execute_transform(&html, transform)
                .unwrap_or_else(|e| fail(&format!("Execution error: {e}")));
            print!("{output}");
        }
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

/// Handle the convert command
fn handle_convert_command(
    sub_matches: &ArgMatches,
    extra_params: &HashMap<String, String>,
    config: &WikiConfig,
) {
    let input = required(sub_matches, "input");
    let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
    let to = resolve_format(sub_matches.get_one::<String>("to"), output, config);

    let registry = FormatRegistry::default();
    if let Err(e) = registry.get(&to) {
        fail(&format!("Error: {e}"));
    }

    let html = read_input(input);
    let doc = parse_html(&html);

    let mut options = HashMap::new();
    options.insert(
        ATTACHMENTS_OPTION.to_string(),
        config.attachments.files.join(","),
    );
    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }
    log::debug!("converting '{input}' to {to} with {} option(s)", options.len());

    let markup = registry
        .serialize_with_options(&doc, &to, &options)
        .unwrap_or_else(|e| fail(&format!("Serialization error: {e}")));

    match output {
        Some(path) => fs::write(path, format!("{markup}\n"))
            .unwrap_or_else(|e| fail(&format!("Error writing file '{path}': {e}"))),
        None => println!("{markup}"),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or_default();
        println!("  {name:<10} {description}");
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

/// Explicit flag, then the extension of `path`, then the configured dialect.
fn resolve_format(explicit: Option<&String>, path: Option<&str>, config: &WikiConfig) -> String {
    if let Some(name) = explicit {
        return name.clone();
    }
    let registry = FormatRegistry::default();
    path.and_then(|p| registry.detect_format_from_filename(p))
        .unwrap_or_else(|| config.editor.format.clone())
}

fn load_cli_config(explicit_path: Option<&str>) -> WikiConfig {
    let loader = Loader::new().with_optional_file("wiki.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut WikiConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["format"]) {
        config.editor.format = raw;
    }
    if let Some(raw) = take_override(extra_params, &["attachments", "files"]) {
        config.attachments.files = split_list(&raw);
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .unwrap_or_else(|| fail(&format!("Missing argument '{name}'")))
}

fn read_input(path: &str) -> String {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .unwrap_or_else(|e| fail(&format!("Error reading stdin: {e}")));
        return buffer;
    }
    fs::read_to_string(path).unwrap_or_else(|e| fail(&format!("Error reading file '{path}': {e}")))
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
