use anyhow::Result;
use clap::{CommandFactory, Parser};
use filerenamer_core::preview::should_use_color;
use filerenamer_core::{
    format_error_json, Config, Location, OutputFormatter, RenameError, Session, Transform,
    VersionResult,
};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod list;
mod rename;

use cli::{Cli, Commands, OutputFormat};
use rename::RunContext;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json_errors = wants_json(&cli.command);

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            let rename_error = e.downcast_ref::<RenameError>();
            match rename_error {
                Some(err) if json_errors => println!("{}", format_error_json(err)),
                _ => eprintln!("Error: {e:#}"),
            }
            process::exit(exit_code(rename_error));
        },
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "filerenamer=debug,filerenamer_core=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn wants_json(command: &Commands) -> bool {
    let output = match command {
        Commands::List { output } | Commands::Version { output } => *output,
        Commands::Replace { run, .. }
        | Commands::Prefix { run, .. }
        | Commands::Suffix { run, .. }
        | Commands::Enum { run, .. }
        | Commands::RenameWithEnum { run, .. }
        | Commands::AddFromFile { run, .. } => run.output,
        Commands::Completions { .. } => OutputFormat::Summary,
    };
    output == OutputFormat::Json
}

/// 2 for bad input (including nothing to undo), 3 for I/O and internal errors
fn exit_code(err: Option<&RenameError>) -> i32 {
    match err {
        Some(
            RenameError::InvalidDirectory { .. }
            | RenameError::InvalidArgument(_)
            | RenameError::EmptyHistory
            | RenameError::EmptyRedo,
        ) => 2,
        _ => 3,
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "filerenamer", &mut io::stdout());
            return Ok(());
        },
        Commands::Version { output } => return handle_version(output),
        _ => {},
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("ignoring config: {e:#}");
        Config::default()
    });
    let use_color = !cli.no_color && should_use_color(config.defaults.use_color);

    let target = cli.target.unwrap_or_else(|| PathBuf::from("."));
    let session = Session::open(&target)?;
    tracing::debug!(dir = %target.display(), "opened session");

    let ctx = RunContext {
        session: &session,
        config: &config,
        yes: cli.yes,
        use_color,
    };
    let defaults = &config.defaults;

    match cli.command {
        Commands::List { output } => list::handle_list(&session, output),

        Commands::Replace { pairs, run } => {
            let transforms = pairs
                .iter()
                .map(|pair| rename::parse_replace_pair(pair))
                .collect::<Result<Vec<_>>>()?;
            let mut documents = Vec::new();
            for transform in transforms {
                documents.extend(rename::handle_rename(&ctx, transform, &run)?);
            }
            if run.output == OutputFormat::Json {
                println!("{}", rename::json_array(&documents));
            }
            Ok(())
        },

        Commands::Prefix { prefix, run } => {
            run_single(&ctx, Transform::Prefix { prefix }, &run)
        },

        Commands::Suffix { suffix, run } => {
            run_single(&ctx, Transform::Suffix { suffix }, &run)
        },

        Commands::Enum {
            start,
            loc,
            sep,
            run,
        } => {
            let transform = Transform::Enumerate {
                start: start.unwrap_or(defaults.enum_start),
                location: loc.map_or(defaults.enum_location, Location::from),
                separator: sep.unwrap_or_else(|| defaults.enum_separator.clone()),
            };
            run_single(&ctx, transform, &run)
        },

        Commands::RenameWithEnum { basename, run } => {
            run_single(&ctx, Transform::RenameWithEnum { basename }, &run)
        },

        Commands::AddFromFile { pattern, loc, run } => {
            let transform = Transform::AddFromFile {
                pattern,
                location: loc.map_or(defaults.add_location, Location::from),
            };
            run_single(&ctx, transform, &run)
        },

        Commands::Completions { .. } | Commands::Version { .. } => Ok(()),
    }
}

fn run_single(ctx: &RunContext<'_>, transform: Transform, run: &cli::RunArgs) -> Result<()> {
    if let Some(json) = rename::handle_rename(ctx, transform, run)? {
        println!("{}", json);
    }
    Ok(())
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "filerenamer".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}
