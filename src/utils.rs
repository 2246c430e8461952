pub const LINE_BREAK: &str = "<br>";

pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::new();
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escapes only `<` and `>`. Ampersands are left alone, so running this over
/// already-escaped text leaves it unchanged.
pub fn escape_angle_brackets(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Converts `\r\n`, `\r` and `\n` to the `<br>` line marker the parser splits on.
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", LINE_BREAK)
        .replace('\r', LINE_BREAK)
        .replace('\n', LINE_BREAK)
}
