use crate::mapping::{RenameMapping, RenamePair};
use nu_ansi_term::{Color as AnsiColor, Style};
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

/// Render each rename as a two-line diff with the changed characters highlighted
pub fn render_diff(mapping: &RenameMapping, use_color: bool) -> String {
    let mut output = String::new();

    for pair in mapping {
        if use_color {
            let (old_line, new_line) = highlight_pair(pair);
            writeln!(output, "- {}", old_line).unwrap();
            writeln!(output, "+ {}", new_line).unwrap();
        } else {
            writeln!(output, "- {}", pair.old).unwrap();
            writeln!(output, "+ {}", pair.new).unwrap();
        }
    }

    if mapping.is_empty() {
        output.push_str("No files to rename\n");
    }

    output
}

fn highlight_pair(pair: &RenamePair) -> (String, String) {
    let removed = Style::new().on(AnsiColor::Rgb(0xC0, 0x52, 0x6A)).fg(AnsiColor::White);
    let added = Style::new().on(AnsiColor::Rgb(0x00, 0xA9, 0x58)).fg(AnsiColor::White);
    let old_base = Style::new().fg(AnsiColor::Red);
    let new_base = Style::new().fg(AnsiColor::Green);

    // Consecutive characters with the same tag are painted as one run
    let mut old_runs: Vec<(bool, String)> = Vec::new();
    let mut new_runs: Vec<(bool, String)> = Vec::new();

    let diff = TextDiff::from_chars(pair.old.as_str(), pair.new.as_str());
    for change in diff.iter_all_changes() {
        let text = change.value();
        match change.tag() {
            ChangeTag::Equal => {
                push_run(&mut old_runs, false, text);
                push_run(&mut new_runs, false, text);
            },
            ChangeTag::Delete => push_run(&mut old_runs, true, text),
            ChangeTag::Insert => push_run(&mut new_runs, true, text),
        }
    }

    let paint = |runs: Vec<(bool, String)>, base: Style, highlight: Style| {
        runs.into_iter()
            .map(|(changed, text)| {
                if changed {
                    highlight.paint(text).to_string()
                } else {
                    base.paint(text).to_string()
                }
            })
            .collect::<String>()
    };

    (
        paint(old_runs, old_base, removed),
        paint(new_runs, new_base, added),
    )
}

fn push_run(runs: &mut Vec<(bool, String)>, changed: bool, text: &str) {
    match runs.last_mut() {
        Some((last_changed, buf)) if *last_changed == changed => buf.push_str(text),
        _ => runs.push((changed, text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colored_diff_keeps_text() {
        let mut mapping = RenameMapping::new();
        mapping.insert("note.txt", "noteSpring.txt");

        let result = render_diff(&mapping, true);
        assert!(result.contains("Spring"));
        assert!(result.contains('\u{1b}'));
    }

    #[test]
    fn test_empty_mapping() {
        assert_eq!(render_diff(&RenameMapping::new(), false), "No files to rename\n");
    }
}
