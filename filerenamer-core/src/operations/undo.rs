use crate::error::Result;
use crate::output::{RedoResult, UndoResult};
use crate::session::Session;

/// Revert the most recent batch in the session
pub fn undo_operation(session: &Session) -> Result<UndoResult> {
    session.undo().map(UndoResult::from)
}

/// Re-apply the most recently undone batch in the session
pub fn redo_operation(session: &Session) -> Result<RedoResult> {
    session.redo().map(RedoResult::from)
}
