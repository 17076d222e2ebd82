use crate::mapping::RenameMapping;
use std::fmt::Write;

/// Render mapping as a plain, line-oriented summary
pub fn render_summary(mapping: &RenameMapping) -> String {
    let mut output = String::new();

    writeln!(output, "[RENAME PLAN]").unwrap();
    writeln!(output, "Files: {}", mapping.len()).unwrap();
    writeln!(output).unwrap();

    for pair in mapping {
        writeln!(output, "{} -> {}", pair.old, pair.new).unwrap();
    }

    output
}
