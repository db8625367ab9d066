use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use updoc::builders::{Selector, positional_tag};
use updoc::codec::{read_tree_file, to_json_string};
use updoc::diagnostics::{self, Verbosity};
use updoc::{FlattenOptions, Flattened, Result, flatten};

#[derive(Parser)]
#[command(name = "updoc")]
#[command(about = "Compile nested update trees into update-instruction documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a JSON tree into `{verb: {path: value}}`.
    Flatten {
        /// Input tree, `-` for stdin.
        #[arg(long, default_value = "-")]
        input: String,

        /// Write the document here instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<String>,

        /// Walk arrays with index path segments.
        #[arg(long)]
        expand_arrays: bool,

        /// Drop empty maps and arrays instead of setting them.
        #[arg(long)]
        skip_empty: bool,

        /// JSON file with `expandArrays` / `skipEmptyContainers`.
        #[arg(long)]
        options: Option<String>,

        #[arg(long)]
        pretty: bool,

        /// Silence warnings and debug output.
        #[arg(long)]
        quiet: bool,

        /// Report effective options and writes per verb on stderr.
        #[arg(long)]
        debug: bool,
    },
    /// Print the path segment a positional selector produces.
    Positional {
        selector: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Flatten {
            input,
            out,
            expand_arrays,
            skip_empty,
            options,
            pretty,
            quiet,
            debug,
        } => {
            let verbosity = Verbosity::from_flags(quiet, debug);

            let mut opts = match &options {
                Some(path) => load_options(path)?,
                None => FlattenOptions::default(),
            };
            opts.expand_arrays |= expand_arrays;
            opts.skip_empty_containers |= skip_empty;
            diagnostics::debug(format!("options: {:?}", opts), verbosity);

            let tree = read_tree_file(&input)?;
            let result = flatten(&tree, opts);

            match &result {
                Flattened::Unchanged(_) => diagnostics::warn(
                    format!("{} has no fields to flatten; echoing it unchanged", input),
                    verbosity,
                ),
                Flattened::Document(doc) => {
                    for (verb, group) in doc.iter() {
                        diagnostics::debug(format!("{}: {} write(s)", verb, group.len()), verbosity);
                    }
                }
            }

            let text = to_json_string(&result, pretty)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, format!("{}\n", text))
                        .with_context(|| format!("write document {}", path))?;
                    diagnostics::debug(format!("wrote {}", path), verbosity);
                }
                None => println!("{}", text),
            }
        }
        Commands::Positional { selector } => {
            let selector = selector.map(Selector::Field);
            println!("{}", positional_tag(selector.as_ref()));
        }
    }

    Ok(())
}

fn load_options(path: &str) -> Result<FlattenOptions> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read options file {}", path))?;
    match serde_json::from_str(&text) {
        Ok(options) => Ok(options),
        Err(err) => bail!(
            "{}",
            diagnostics::error_message(format!("options file {} is invalid: {}", path, err))
        ),
    }
}
