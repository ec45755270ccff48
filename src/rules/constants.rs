//! Rule id constants and validation

use colored::Colorize;

/// Rule ids accepted by --only and --skip
pub const VALID_RULE_IDS: &[&str] = &[
    "EXC001", "HCD001", "HCD002", "HCD003", "HCD004", "WEB001",
];

/// Check if a rule id is valid
pub fn is_valid_rule(id: &str) -> bool {
    VALID_RULE_IDS.contains(&id)
}

/// Filter a list of rule ids, returning only valid ones and printing warnings for invalid ones
pub fn filter_valid_rules(ids: Vec<String>) -> Vec<String> {
    let mut valid = Vec::new();
    for id in ids {
        let normalized = id.trim().to_ascii_uppercase();
        if is_valid_rule(&normalized) {
            valid.push(normalized);
        } else {
            eprintln!(
                "{} Unknown rule '{}' ignored. Valid rules: {}",
                "Warning:".yellow(),
                id.cyan(),
                VALID_RULE_IDS.join(", ").dimmed()
            );
        }
    }
    valid
}
