//! Template renderer adapters.

mod handlebars;
pub mod helpers;

pub use self::handlebars::HandlebarsRenderer;
