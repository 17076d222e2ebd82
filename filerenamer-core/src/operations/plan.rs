use crate::builders::Transform;
use crate::error::Result;
use crate::output::PlanResult;
use crate::preview::{render_mapping, Preview};
use crate::session::Session;

/// Plan operation - builds the mapping and optionally renders a preview.
///
/// Nothing on disk changes.
pub fn plan_operation(
    session: &Session,
    transform: Transform,
    preview: Option<Preview>,
    use_color: Option<bool>,
) -> Result<(PlanResult, Option<String>)> {
    let mapping = session.build_mapping(&transform)?;
    let rendered = preview.map(|format| render_mapping(&mapping, format, use_color));

    Ok((
        PlanResult {
            directory: session.directory().display().to_string(),
            transform,
            mapping,
        },
        rendered,
    ))
}
