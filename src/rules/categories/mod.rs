//! Rule categories
//!
//! One module per heuristic. Each rule reads its settings once, when the
//! engine is built, and keeps no state between nodes.

pub mod controllers;
pub mod email;
pub mod exceptions;
pub mod guid;
pub mod url;
pub mod vat;

use crate::config::Config;
use crate::rules::engine::Rule;

pub use controllers::SyncControllerRule;
pub use email::EmailRule;
pub use exceptions::ExceptionMessageRule;
pub use guid::GuidRule;
pub use url::UrlRule;
pub use vat::VatRule;

/// The built-in rule set, in rule id order.
pub fn builtin_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ExceptionMessageRule::new(&config.exceptions)),
        Box::new(EmailRule::new(&config.email)),
        Box::new(GuidRule),
        Box::new(UrlRule::new(&config.urls)),
        Box::new(VatRule::new(&config.vat)),
        Box::new(SyncControllerRule::new(&config.controllers)),
    ]
}
