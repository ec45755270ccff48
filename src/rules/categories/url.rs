//! Hardcoded URL rule

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::UrlConfig;
use crate::rules::descriptors::Descriptor;
use crate::rules::engine::{Report, Rule, RuleContext, RuleError};
use crate::rules::helpers::{attribute_name, walk_to_attribute};
use crate::rules::results::Severity;
use crate::syntax::{LiteralKind, NodeId, NodeKind, SyntaxKind, SyntaxTree};

pub static DESCRIPTOR: Descriptor = Descriptor {
    id: "HCD003",
    title: "Hardcoded URL",
    category: "hardcode",
    default_severity: Severity::Warning,
    description: "Service addresses differ between environments and belong in configuration.",
};

lazy_static! {
    /// Any of `http:`, `https:`, `ftp:` or `tcp:`, anywhere in the text.
    static ref URL_SCHEME: Regex =
        Regex::new(r"(?i)(?:https?|ftp|tcp):").expect("URL scheme pattern is valid");
}

/// Well-known identifiers that only look like addresses.
const ALLOWED_PREFIXES: &[&str] = &[
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/",
    "http://schemas.xmlsoap.org/",
    "http://schemas.microsoft.com/",
    "http://www.w3.org/",
    "http://localhost",
    "https://localhost",
    "http://127.0.0.1",
    "https://127.0.0.1",
];

/// Attributes whose arguments are required to be URLs.
const ALLOWED_ATTRIBUTES: &[&str] = &[
    "WebServiceBindingAttribute",
    "DefaultSettingValueAttribute",
    "XmlTypeAttribute",
    "SoapDocumentMethodAttribute",
    "SoapRpcMethodAttribute",
    "SoapTypeAttribute",
    "XmlArrayItemAttribute",
    "WebServiceAttribute",
];

/// Flags string literals containing a URL scheme.
pub struct UrlRule {
    allowed_prefixes: Vec<String>,
    allowed_attributes: Vec<String>,
}

impl UrlRule {
    pub fn new(config: &UrlConfig) -> Self {
        let allowed_prefixes = ALLOWED_PREFIXES
            .iter()
            .map(|p| p.to_string())
            .chain(config.allowed_prefixes.iter().cloned())
            .collect();
        let allowed_attributes = ALLOWED_ATTRIBUTES
            .iter()
            .map(|a| a.to_string())
            .chain(config.allowed_attributes.iter().map(|a| attribute_name(a)))
            .collect();
        Self {
            allowed_prefixes,
            allowed_attributes,
        }
    }

    fn is_allowed_prefix(&self, text: &str) -> bool {
        self.allowed_prefixes
            .iter()
            .any(|prefix| starts_with_ignore_case(text, prefix))
    }

    fn is_allowed_attribute_argument(&self, tree: &SyntaxTree, node: NodeId) -> bool {
        let Some(argument) = tree.parent(node) else {
            return false;
        };
        let Some(NodeKind::Attribute { name, .. }) =
            walk_to_attribute(tree, argument).and_then(|attribute| tree.kind(attribute))
        else {
            return false;
        };
        let name = attribute_name(name);
        self.allowed_attributes.iter().any(|allowed| *allowed == name)
    }
}

impl Rule for UrlRule {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn subscriptions(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Literal, SyntaxKind::InterpolatedText]
    }

    fn evaluate(&self, node: NodeId, ctx: &RuleContext<'_>) -> Result<Vec<Report>, RuleError> {
        let text = match ctx.kind(node)? {
            NodeKind::Literal {
                literal: LiteralKind::String,
                text,
            }
            | NodeKind::InterpolatedText { text } => text,
            NodeKind::Literal { .. } => return Ok(Vec::new()),
            _ => {
                return Err(RuleError::UnexpectedNode {
                    node,
                    expected: "string literal",
                })
            }
        };

        if self.is_allowed_attribute_argument(ctx.tree, node)
            || self.is_allowed_prefix(text)
            || !URL_SCHEME.is_match(text)
        {
            return Ok(Vec::new());
        }

        Ok(vec![Report::at(
            node,
            format!("String '{text}' contains hardcoded URL"),
        )])
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{analyze, Ast};
    use crate::semantic::FactsModel;

    fn rule() -> UrlRule {
        UrlRule::new(&UrlConfig::default())
    }

    fn literal_tree(text: &str) -> SyntaxTree {
        let mut ast = Ast::new();
        let value = ast.string(text);
        let local = ast.local("url", value);
        ast.finish(local)
    }

    fn count(rule: UrlRule, tree: &SyntaxTree) -> usize {
        analyze(rule, tree, &FactsModel::default()).len()
    }

    #[test]
    fn test_scheme_blacklist() {
        for text in [
            "http://example.com",
            "HTTPS://api.example.com/v2",
            "ftp://files.example.com",
            "net.tcp://broker:808/queue",
            "see http:// for details",
        ] {
            assert_eq!(count(rule(), &literal_tree(text)), 1, "{text}");
        }
    }

    #[test]
    fn test_plain_strings_ignored() {
        for text in ["example.com", "mailto:someone", "httpd", ""] {
            assert_eq!(count(rule(), &literal_tree(text)), 0, "{text}");
        }
    }

    #[test]
    fn test_message_carries_value() {
        let findings = analyze(
            rule(),
            &literal_tree("http://example.com"),
            &FactsModel::default(),
        );
        assert_eq!(
            findings[0].message,
            "String 'http://example.com' contains hardcoded URL"
        );
    }

    #[test]
    fn test_allowed_prefixes() {
        for text in [
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name",
            "HTTP://LOCALHOST:5000/api",
            "http://www.w3.org/2001/XMLSchema",
        ] {
            assert_eq!(count(rule(), &literal_tree(text)), 0, "{text}");
        }
    }

    #[test]
    fn test_configured_prefix() {
        let config = UrlConfig {
            allowed_prefixes: vec!["https://internal.corp/".to_string()],
            ..Default::default()
        };
        let tree = literal_tree("https://internal.corp/health");
        assert_eq!(count(UrlRule::new(&config), &tree), 0);
        assert_eq!(count(rule(), &tree), 1);
    }

    #[test]
    fn test_prefix_must_lead() {
        let tree = literal_tree("proxy=http://localhost");
        assert_eq!(count(rule(), &tree), 1);
    }

    fn attribute_tree(name: &str) -> SyntaxTree {
        let mut ast = Ast::new();
        let value = ast.string("http://tempuri.org/");
        let attribute = ast.attribute(name, &[value]);
        ast.finish(attribute)
    }

    #[test]
    fn test_whitelisted_attributes() {
        for name in [
            "WebService",
            "WebServiceAttribute",
            "System.Web.Services.WebServiceBinding",
            "SoapDocumentMethod",
            "global::System.Xml.Serialization.XmlType",
        ] {
            assert_eq!(count(rule(), &attribute_tree(name)), 0, "{name}");
        }
    }

    #[test]
    fn test_other_attribute_reported() {
        assert_eq!(count(rule(), &attribute_tree("Route")), 1);
    }

    #[test]
    fn test_configured_attribute() {
        let config = UrlConfig {
            allowed_attributes: vec!["Route".to_string()],
            ..Default::default()
        };
        assert_eq!(count(UrlRule::new(&config), &attribute_tree("RouteAttribute")), 0);
    }

    #[test]
    fn test_interpolated_text() {
        let mut ast = Ast::new();
        let head = ast.text("https://api.example.com/users/");
        let id = ast.ident("id");
        let hole = ast.hole(id);
        let value = ast.interpolated(&[head, hole]);
        let tree = ast.finish(value);

        assert_eq!(count(rule(), &tree), 1);
    }
}
