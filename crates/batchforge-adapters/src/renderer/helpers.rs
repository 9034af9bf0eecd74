//! Pure string helpers available to every template.
//!
//! Helpers are plain functions bound to each renderer instance at
//! construction time; there is no process-wide registry.

use handlebars::{Handlebars, handlebars_helper};

handlebars_helper!(capitalize: |s: str| capitalize_str(s));
handlebars_helper!(uncapitalize: |s: str| uncapitalize_str(s));

/// Names registered by [`register`].
pub const HELPER_NAMES: [&str; 2] = ["capitalize", "uncapitalize"];

pub fn register(registry: &mut Handlebars<'_>) {
    registry.register_helper("capitalize", Box::new(capitalize));
    registry.register_helper("uncapitalize", Box::new(uncapitalize));
}

/// `customerId` -> `CustomerId`.
pub fn capitalize_str(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `ImportCustomers` -> `importCustomers`.
pub fn uncapitalize_str(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
