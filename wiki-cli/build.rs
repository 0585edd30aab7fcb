use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["tree-json", "tree-text", "text"];

const FORMATS: &[&str] = &["textile", "markdown"];

fn input() -> Arg {
    Arg::new("input")
        .help("Input file, or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn format(long: &'static str) -> Arg {
    Arg::new(long)
        .long(long)
        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
        .value_hint(ValueHint::Other)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("wiki")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert rich text to Textile and Markdown wiki markup")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect transforms")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("convert")
                .arg(input())
                .arg(format("to"))
                .arg(Arg::new("output").long("output").short('o').value_hint(ValueHint::FilePath)),
        )
        .subcommand(Command::new("escape").arg(input()).arg(format("format")))
        .subcommand(Command::new("unescape").arg(input()).arg(format("format")))
        .subcommand(Command::new("style").arg(Arg::new("declaration").required(true).index(1)))
        .subcommand(Command::new("preview").arg(input()))
        .subcommand(
            Command::new("inspect").arg(input()).arg(
                Arg::new("transform")
                    .index(2)
                    .value_parser(clap::builder::PossibleValuesParser::new(
                        AVAILABLE_TRANSFORMS,
                    )),
            ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "wiki", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "wiki", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "wiki", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
