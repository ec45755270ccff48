//! Rule descriptors and their registry

use serde::Serialize;

use super::results::Severity;
use crate::error::EngineError;

/// Static metadata of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub default_severity: Severity,
    pub description: &'static str,
}

/// Reported in place of the findings of a rule that failed on a node.
pub static RULE_FAILED: Descriptor = Descriptor {
    id: "ENG001",
    title: "Rule failed",
    category: "correctness",
    default_severity: Severity::Error,
    description: "A rule failed unexpectedly while analyzing a node. Its findings for that \
                  node are missing; the failure detail is in the message.",
};

/// Descriptors by rule id, in registration order.
///
/// The rule-failed descriptor is always present. Built once per engine and
/// never mutated after that.
#[derive(Debug, Clone)]
pub struct DescriptorRegistry {
    entries: Vec<&'static Descriptor>,
}

impl Default for DescriptorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self {
            entries: vec![&RULE_FAILED],
        }
    }

    pub fn register(&mut self, descriptor: &'static Descriptor) -> Result<(), EngineError> {
        if descriptor.id == RULE_FAILED.id {
            return Err(EngineError::ReservedRuleId(descriptor.id.to_string()));
        }
        if self.get(descriptor.id).is_some() {
            return Err(EngineError::DuplicateRule(descriptor.id.to_string()));
        }
        self.entries.push(descriptor);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&'static Descriptor> {
        self.entries.iter().copied().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Descriptor> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: Descriptor = Descriptor {
        id: "TST001",
        title: "Sample",
        category: "test",
        default_severity: Severity::Warning,
        description: "Sample rule",
    };

    static IMPOSTOR: Descriptor = Descriptor {
        id: "ENG001",
        title: "Impostor",
        category: "test",
        default_severity: Severity::Warning,
        description: "Claims the reserved id",
    };

    #[test]
    fn test_registry_always_has_rule_failed() {
        let registry = DescriptorRegistry::new();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("ENG001").map(|d| d.default_severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = DescriptorRegistry::new();
        registry.register(&SAMPLE).unwrap();
        assert_eq!(
            registry.register(&SAMPLE),
            Err(EngineError::DuplicateRule("TST001".to_string()))
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_rejects_reserved_id() {
        let mut registry = DescriptorRegistry::new();
        assert_eq!(
            registry.register(&IMPOSTOR),
            Err(EngineError::ReservedRuleId("ENG001".to_string()))
        );
    }

    #[test]
    fn test_iteration_keeps_registration_order() {
        let mut registry = DescriptorRegistry::new();
        registry.register(&SAMPLE).unwrap();
        let ids: Vec<_> = registry.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["ENG001", "TST001"]);
    }
}
