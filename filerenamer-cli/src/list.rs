use anyhow::Result;
use filerenamer_core::{list_operation, OutputFormatter, Session};

use crate::cli::OutputFormat;

pub fn handle_list(session: &Session, output: OutputFormat) -> Result<()> {
    let result = list_operation(session)?;
    print!("{}", result.format(output.into()));
    if output == OutputFormat::Json {
        println!();
    }
    Ok(())
}
