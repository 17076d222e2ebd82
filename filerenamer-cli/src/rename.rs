use anyhow::{anyhow, Result};
use filerenamer_core::{
    apply_operation, plan_operation, Config, OutputFormatter, Preview, RenameError, Session,
    Transform,
};
use std::io::{self, Write};
use std::str::FromStr;

use crate::cli::{OutputFormat, RunArgs};

/// Options that apply to every renaming command of one invocation
pub struct RunContext<'a> {
    pub session: &'a Session,
    pub config: &'a Config,
    pub yes: bool,
    pub use_color: bool,
}

/// Split `OLD=NEW` into a replace transformation.
pub fn parse_replace_pair(pair: &str) -> Result<Transform> {
    let (find, replace) = pair.split_once('=').ok_or_else(|| {
        RenameError::InvalidArgument(format!(
            "invalid replace format '{}': use OLD=NEW",
            pair
        ))
    })?;
    Ok(Transform::Replace {
        find: find.to_string(),
        replace: replace.to_string(),
    })
}

/// Preview `transform`, confirm, and apply it.
///
/// Summary output is printed as it goes. With `--output json` nothing is
/// printed; the JSON document for this run is returned instead so callers
/// running several batches can emit a single document.
pub fn handle_rename(
    ctx: &RunContext<'_>,
    transform: Transform,
    run: &RunArgs,
) -> Result<Option<String>> {
    let json = run.output == OutputFormat::Json;
    let preview_format = if run.quiet || json {
        None
    } else {
        Some(run.preview.map_or_else(
            || Preview::from_str(&ctx.config.defaults.preview_format).unwrap_or(Preview::Table),
            Into::into,
        ))
    };

    let (plan, rendered) =
        plan_operation(ctx.session, transform, preview_format, Some(ctx.use_color))?;

    if json && (run.dry_run || plan.mapping.is_empty()) {
        return Ok(Some(plan.format_json()));
    }

    if !run.quiet && !json {
        print!("{}", plan.format_summary());
        if let Some(rendered) = rendered.filter(|r| !r.is_empty() && !plan.mapping.is_empty()) {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }

    if plan.mapping.is_empty() || run.dry_run {
        return Ok(None);
    }

    if !ctx.yes && !confirm("Apply these changes?")? {
        if json {
            return Ok(Some(plan.format_json()));
        }
        if !run.quiet {
            println!("Changes discarded.");
        }
        return Ok(None);
    }

    let result = apply_operation(ctx.session, plan)?;
    if json {
        return Ok(Some(result.format_json()));
    }
    if !run.quiet {
        print!("{}", result.format_summary());
    }

    Ok(None)
}

/// Combine the JSON documents of several batches into one array.
pub fn json_array(documents: &[String]) -> String {
    format!("[{}]", documents.join(","))
}

fn confirm(question: &str) -> Result<bool> {
    eprint!("{} [y/N]: ", question);
    io::stderr().flush()?;

    let mut response = String::new();
    let read = io::stdin().read_line(&mut response)?;
    if read == 0 {
        return Err(anyhow!(
            "No confirmation received; pass --yes to apply without prompting"
        ));
    }

    Ok(matches!(
        response.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
