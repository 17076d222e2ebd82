use crate::error::Result;
use crate::output::ListResult;
use crate::session::Session;

/// List the files currently in the session directory
pub fn list_operation(session: &Session) -> Result<ListResult> {
    let files = session.list_files()?;
    Ok(ListResult {
        directory: session.directory().display().to_string(),
        files,
    })
}
