use once_cell::sync::Lazy;
use regex::Regex;

use crate::field::{Field, PROMPT_FIELD};
use crate::utils::{LINE_BREAK, escape_angle_brackets};

pub use crate::utils::normalize_line_breaks;

static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_ ]+): ([^,]+)$").expect("annotation pattern is valid")
});

/// Recovers the ordered `name: value` fields from a `<br>`-delimited
/// metadata string.
///
/// Never fails. The result always starts with a `Prompt` field that collects
/// every fragment appearing before the first annotation. Fragments that do not
/// look like an annotation are appended to the previous field with `", "`,
/// which is how values containing commas get stitched back together.
pub fn parse(info: &str) -> Vec<Field> {
    let mut fields = vec![Field::new(PROMPT_FIELD, "")];
    let mut lines = 0usize;

    for line in info.split(LINE_BREAK) {
        lines += 1;
        for fragment in line.split(',') {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }

            if let Some(caps) = ANNOTATION.captures(fragment) {
                fields.push(Field::new(caps[1].trim(), caps[2].trim()));
            } else {
                append_continuation(&mut fields, fragment);
            }
        }
    }

    for field in &mut fields {
        field.value = escape_angle_brackets(&field.value);
    }

    tracing::debug!(lines, fields = fields.len(), "parsed generation info");
    fields
}

fn append_continuation(fields: &mut [Field], fragment: &str) {
    // the Prompt field is always present, so there is a last field
    let Some(last) = fields.last_mut() else {
        return;
    };
    if !last.value.is_empty() {
        last.value.push_str(", ");
    }
    last.value.push_str(fragment);
}
