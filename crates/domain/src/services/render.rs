//! Template rendering.
//!
//! Produces a concrete title and message from a template and a data map by
//! substituting `{{key}}` placeholders. Pure; no side effects.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::NotificationTemplate;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap();
}

/// A rendered title/message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub title: String,
    pub message: String,
}

/// Render a template against a data map.
///
/// For each *declared* variable, every `{{key}}` occurrence is replaced by
/// `data[key]`, falling back to the variable's declared default, falling
/// back to the literal single-braced `{key}` text. Placeholders that match
/// no declared variable are left verbatim as `{{key}}`.
pub fn render(template: &NotificationTemplate, data: &HashMap<String, String>) -> RenderedMessage {
    let mut title = template.title_template.clone();
    let mut message = template.message_template.clone();

    for variable in &template.variables {
        let placeholder = format!("{{{{{}}}}}", variable.key);
        let value = data
            .get(&variable.key)
            .cloned()
            .or_else(|| variable.default.clone())
            .unwrap_or_else(|| format!("{{{}}}", variable.key));

        title = title.replace(&placeholder, &value);
        message = message.replace(&placeholder, &value);
    }

    RenderedMessage { title, message }
}

/// The distinct placeholder keys referenced by a template text, in order of
/// first appearance. Used by tooling and tests to check placeholder /
/// variable agreement; the renderer itself does not enforce it.
pub fn placeholders(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for capture in PLACEHOLDER_RE.captures_iter(text) {
        let key = capture[1].to_string();
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Channel, Priority, TemplateVariable};

    fn variable(key: &str, required: bool, default: Option<&str>) -> TemplateVariable {
        TemplateVariable {
            key: key.to_string(),
            label: key.to_string(),
            required,
            default: default.map(str::to_string),
        }
    }

    fn template(title: &str, message: &str, variables: Vec<TemplateVariable>) -> NotificationTemplate {
        NotificationTemplate {
            id: 1,
            name: "project_assigned".to_string(),
            category: Category::Project,
            channel: Channel::InApp,
            title_template: title.to_string(),
            message_template: message.to_string(),
            variables,
            allowed_channels: vec![Channel::InApp, Channel::Email],
            priority: Priority::Normal,
            is_active: true,
            metadata: None,
        }
    }

    #[test]
    fn test_render_with_all_variables_leaves_no_placeholders() {
        let t = template(
            "{{assignee}} assigned to {{project}}",
            "{{assignee}} is now a member of {{project}}.",
            vec![variable("assignee", true, None), variable("project", true, None)],
        );
        let mut data = HashMap::new();
        data.insert("assignee".to_string(), "Mina".to_string());
        data.insert("project".to_string(), "Atlas".to_string());

        let rendered = render(&t, &data);
        assert_eq!(rendered.title, "Mina assigned to Atlas");
        assert_eq!(rendered.message, "Mina is now a member of Atlas.");
        assert!(placeholders(&rendered.title).is_empty());
        assert!(placeholders(&rendered.message).is_empty());
    }

    #[test]
    fn test_render_missing_optional_uses_default() {
        let t = template(
            "Deploy {{env}}",
            "Deployed by {{actor}}",
            vec![
                variable("env", false, Some("production")),
                variable("actor", true, None),
            ],
        );
        let mut data = HashMap::new();
        data.insert("actor".to_string(), "ci-bot".to_string());

        let rendered = render(&t, &data);
        assert_eq!(rendered.title, "Deploy production");
        assert_eq!(rendered.message, "Deployed by ci-bot");
    }

    #[test]
    fn test_render_missing_without_default_leaves_single_braces() {
        let t = template(
            "Hello {{name}}",
            "Welcome, {{name}}",
            vec![variable("name", true, None)],
        );
        let rendered = render(&t, &HashMap::new());
        assert_eq!(rendered.title, "Hello {name}");
        assert_eq!(rendered.message, "Welcome, {name}");
    }

    #[test]
    fn test_render_substitutes_every_occurrence() {
        let t = template(
            "{{project}}: update",
            "{{project}} milestone reached. See {{project}} board.",
            vec![variable("project", true, None)],
        );
        let mut data = HashMap::new();
        data.insert("project".to_string(), "Atlas".to_string());

        let rendered = render(&t, &data);
        assert_eq!(rendered.message, "Atlas milestone reached. See Atlas board.");
    }

    #[test]
    fn test_render_leaves_undeclared_placeholders_verbatim() {
        let t = template(
            "Hi {{name}}",
            "Balance: {{amount}}",
            vec![variable("name", true, None)],
        );
        let mut data = HashMap::new();
        data.insert("name".to_string(), "Omar".to_string());
        // Supplied but undeclared: still not substituted.
        data.insert("amount".to_string(), "12.50".to_string());

        let rendered = render(&t, &data);
        assert_eq!(rendered.title, "Hi Omar");
        assert_eq!(rendered.message, "Balance: {{amount}}");
    }

    #[test]
    fn test_placeholders_dedupes_in_order() {
        let keys = placeholders("{{b}} and {{a}} then {{b}} again");
        assert_eq!(keys, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_placeholders_ignores_malformed_braces() {
        let keys = placeholders("{a} {{ spaced }} {{ok}}");
        assert_eq!(keys, vec!["ok".to_string()]);
    }
}
