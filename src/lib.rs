//! Turns the free-form generation metadata written by image generators
//! (`"a cat, Steps: 20, Sampler: Euler<br>Negative prompt: dog"`) into an
//! ordered list of named fields, and lays those fields out as an HTML block.
//!
//! ```
//! let fields = geninfo::parse("a cat, Steps: 20, Sampler: Euler");
//! assert_eq!(fields[0].value, "a cat");
//!
//! let html = geninfo::render(&fields);
//! assert!(html.contains("sd-mm-info-row"));
//! ```

pub mod field;
pub mod layout;
pub mod parser;
pub mod png;
pub mod utils;

pub use field::{Field, GenerationInfo, NEGATIVE_PROMPT_FIELD, PROMPT_FIELD};
pub use layout::{DEFAULT_CLASS_PREFIX, LayoutOptions, render, render_document, render_with};
pub use parser::{normalize_line_breaks, parse};
pub use crate::png::PngError;
pub use utils::{escape_angle_brackets, escape_xml};

/// `render(parse(raw))`.
pub fn render_info(raw: &str) -> String {
    render(&parse(raw))
}
