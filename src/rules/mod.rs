//! Rule catalog.
//!
//! Every supported markdown construct is one [`Rule`]. The catalog order is
//! the match precedence:
//!
//! 1. block rules anchored at the line start (`header`, `blockquote`,
//!    `code-block`);
//! 2. inline emphasis, longest marker first (`bolditalic`, `bold`, `italic`),
//!    then `strikethrough` and inline `code`;
//! 3. whole-line rules (`hr`, `plus-ul`);
//! 4. `image` before `link`, since every image also looks like a link.

use crate::Rule;

pub(crate) mod markdown;

/// Names of every rule, in catalog order.
pub const ALL_FORMATS: [&str; 12] = [
    "header",
    "blockquote",
    "code-block",
    "bolditalic",
    "bold",
    "italic",
    "strikethrough",
    "code",
    "hr",
    "plus-ul",
    "image",
    "link",
];

/// Build the full catalog.
pub(crate) fn catalog() -> Vec<Rule> {
    markdown::rules::get()
}
