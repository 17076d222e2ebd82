use crate::output::HistoryResult;
use crate::session::Session;

/// Both history stacks of the session, most recent first
pub fn history_operation(session: &Session) -> HistoryResult {
    HistoryResult {
        history: session.history(),
    }
}
