//! SARIF 2.1.0 output for code scanning integrations

use crate::error::HardlintError;
use serde::Serialize;

use super::OutputRenderer;
use crate::rules::{AnalysisResults, Descriptor, DescriptorRegistry, Finding, Severity};

const SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";

pub struct SarifOutput;

impl SarifOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SarifOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
struct SarifDriver {
    name: &'static str,
    version: &'static str,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: &'static str,
    name: &'static str,
    short_description: SarifMessage,
    full_description: SarifMessage,
    default_configuration: SarifDefaultConfig,
    properties: SarifRuleProperties,
}

#[derive(Serialize)]
struct SarifRuleProperties {
    category: &'static str,
}

#[derive(Serialize)]
struct SarifDefaultConfig {
    level: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule_index: Option<usize>,
    level: &'static str,
    message: SarifMessage,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    locations: Vec<SarifLocation>,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
    region: SarifRegion,
}

#[derive(Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRegion {
    start_line: u32,
    start_column: u32,
}

impl SarifOutput {
    fn severity_to_level(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    fn descriptor_to_rule(descriptor: &'static Descriptor) -> SarifRule {
        SarifRule {
            id: descriptor.id,
            name: descriptor.title,
            short_description: SarifMessage {
                text: descriptor.title.to_string(),
            },
            full_description: SarifMessage {
                text: descriptor.description.to_string(),
            },
            default_configuration: SarifDefaultConfig {
                level: Self::severity_to_level(descriptor.default_severity),
            },
            properties: SarifRuleProperties {
                category: descriptor.category,
            },
        }
    }

    fn finding_to_result(finding: &Finding, registry: &DescriptorRegistry) -> SarifResult {
        let locations = finding
            .location
            .iter()
            .map(|location| SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation {
                        uri: location.file.replace('\\', "/"),
                    },
                    region: SarifRegion {
                        start_line: location.line,
                        start_column: location.column,
                    },
                },
            })
            .collect();

        SarifResult {
            rule_id: finding.rule_id.clone(),
            rule_index: registry.iter().position(|d| d.id == finding.rule_id),
            level: Self::severity_to_level(finding.severity),
            message: SarifMessage {
                text: finding.message.clone(),
            },
            locations,
        }
    }
}

impl OutputRenderer for SarifOutput {
    fn render(
        &self,
        results: &AnalysisResults,
        registry: &DescriptorRegistry,
    ) -> Result<String, HardlintError> {
        let rules = registry.iter().map(Self::descriptor_to_rule).collect();
        let results_sarif = results
            .findings()
            .iter()
            .map(|finding| Self::finding_to_result(finding, registry))
            .collect();

        let report = SarifReport {
            schema: SCHEMA,
            version: "2.1.0",
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: "hardlint",
                        version: env!("CARGO_PKG_VERSION"),
                        rules,
                    },
                },
                results: results_sarif,
            }],
        };

        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::rules::{Location, RuleEngine};

    fn render(results: &AnalysisResults) -> serde_json::Value {
        let engine = RuleEngine::new(&Config::default()).unwrap();
        let rendered = SarifOutput::new()
            .render(results, engine.registry())
            .unwrap();
        serde_json::from_str(&rendered).unwrap()
    }

    #[test]
    fn test_rules_come_from_registry() {
        let sarif = render(&AnalysisResults::new());

        assert_eq!(sarif["version"], "2.1.0");
        let rules = sarif["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap();
        assert_eq!(rules.len(), 7);
        assert_eq!(rules[0]["id"], "ENG001");
        assert_eq!(rules[0]["defaultConfiguration"]["level"], "error");
        assert_eq!(rules[1]["id"], "EXC001");
        assert_eq!(rules[2]["properties"]["category"], "hardcode");
    }

    #[test]
    fn test_result_location_and_index() {
        let mut results = AnalysisResults::new();
        results.add_unit(vec![Finding::new(
            "HCD003",
            "hardcode",
            Severity::Warning,
            "String 'ftp://x' contains hardcoded URL",
        )
        .with_location(Location::new("src\\Client.cs", 12, 30))]);

        let sarif = render(&results);
        let result = &sarif["runs"][0]["results"][0];
        assert_eq!(result["ruleId"], "HCD003");
        assert_eq!(result["ruleIndex"], 4);
        assert_eq!(result["level"], "warning");
        let location = &result["locations"][0]["physicalLocation"];
        assert_eq!(location["artifactLocation"]["uri"], "src/Client.cs");
        assert_eq!(location["region"]["startLine"], 12);
        assert_eq!(location["region"]["startColumn"], 30);
    }

    #[test]
    fn test_result_without_location() {
        let mut results = AnalysisResults::new();
        results.add_unit(vec![Finding::new(
            "ENG001",
            "correctness",
            Severity::Error,
            "Rule HCD001 failed",
        )]);

        let sarif = render(&results);
        let result = &sarif["runs"][0]["results"][0];
        assert_eq!(result["level"], "error");
        assert!(result.get("locations").is_none());
    }
}
