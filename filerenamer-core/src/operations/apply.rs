use crate::error::Result;
use crate::output::{PlanResult, RenameResult};
use crate::session::Session;

/// Commit a previously built plan and record it in the session history
pub fn apply_operation(session: &Session, plan: PlanResult) -> Result<RenameResult> {
    let PlanResult {
        directory,
        transform,
        mapping,
    } = plan;

    let report = session.apply(mapping.clone())?;

    Ok(RenameResult {
        directory,
        transform,
        mapping,
        report,
    })
}
