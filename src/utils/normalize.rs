//! Line splitting, shebang insertion and line ending normalization.

/// Split file content into lines without terminators. `\r\n` and `\n` both
/// end a line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(String::from).collect()
}

/// Join lines with `\n`, dropping trailing blank lines, so the text ends
/// with exactly one newline.
pub fn join_lines(lines: &[String]) -> String {
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |last| last + 1);
    let mut text = lines[..end].join("\n");
    text.push('\n');
    text
}

/// Put `#!/usr/bin/env <interpreter>` and one blank line at the top,
/// replacing an existing shebang and the blank lines after it.
pub fn apply_shebang(lines: &[String], interpreter: &str) -> Vec<String> {
    let skip = match lines.first() {
        Some(first) if first.starts_with("#!") => {
            1 + lines[1..]
                .iter()
                .take_while(|line| line.trim().is_empty())
                .count()
        }
        _ => 0,
    };

    let mut out = Vec::with_capacity(lines.len() - skip + 2);
    out.push(format!("#!/usr/bin/env {interpreter}"));
    out.push(String::new());
    out.extend_from_slice(&lines[skip..]);
    out
}
