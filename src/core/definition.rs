use super::step::{parse_conditions, Step};
use crate::constants::MAX_DUE_DAYS;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// In-memory workflow definition edited during a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowDefinition {
    /// Trigger names that start the workflow, without duplicates
    pub triggers: Vec<String>,
    /// Steps in execution order
    pub steps: Vec<Step>,
}

/// Sparse, persistable form of a definition.
///
/// This is both the wire format sent to the backend and the value validation runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedDefinition {
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub steps: Vec<DerivedStep>,
}

/// A step as emitted in the derived definition; empty optional fields are omitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStep {
    #[serde(default)]
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
}

impl DerivedStep {
    fn from_step(step: &Step) -> Self {
        Self {
            action: step.action.clone(),
            target: non_empty(&step.target),
            template: non_empty(&step.template),
            assignee: non_empty(&step.assignee),
            due_days: step.due_days,
            new_status: non_empty(&step.new_status),
            conditions: step.conditions.clone(),
        }
    }

    /// A step is complete when both its action and its target are set
    pub fn is_complete(&self) -> bool {
        !self.action.is_empty() && self.target.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl DerivedDefinition {
    /// Indented JSON for the preview surface
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Compact JSON for the hidden persisted-value field
    pub fn to_compact_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl WorkflowDefinition {
    /// Builds a definition from a stored JSON value.
    ///
    /// Anything missing or of the wrong shape falls back to empty, so a
    /// malformed seed still opens as an editable (possibly empty) workflow.
    pub fn from_seed(seed: &Value) -> Self {
        let triggers = seed
            .get("triggers")
            .and_then(Value::as_array)
            .map(|items| dedup(items.iter().filter_map(Value::as_str).map(str::to_string)))
            .unwrap_or_default();

        let steps = seed
            .get("steps")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(step_from_seed).collect())
            .unwrap_or_default();

        Self { triggers, steps }
    }

    /// Replaces the trigger set, collapsing duplicates
    pub fn set_triggers<I, S>(&mut self, triggers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers = dedup(
            triggers
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.is_empty()),
        );
    }

    /// Sparse serialization of the current state; steps without an action are not emitted
    pub fn derive(&self) -> DerivedDefinition {
        DerivedDefinition {
            triggers: self.triggers.clone(),
            steps: self
                .steps
                .iter()
                .filter(|step| !step.action.is_empty())
                .map(DerivedStep::from_step)
                .collect(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// A stored `due_days`; zero and negative values count as unset
fn stored_due_days(days: i64) -> Option<u32> {
    if days <= 0 {
        return None;
    }
    Some(days.min(MAX_DUE_DAYS as i64) as u32)
}

fn step_from_seed(value: &Value) -> Step {
    let conditions = match value.get("conditions") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(raw)) => parse_conditions(raw),
        _ => Vec::new(),
    };

    let due_days = match value.get("due_days") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(stored_due_days),
        Some(Value::String(raw)) => raw.trim().parse::<i64>().ok().and_then(stored_due_days),
        _ => None,
    };

    Step {
        action: string_field(value, "action"),
        target: string_field(value, "target"),
        template: string_field(value, "template"),
        conditions,
        assignee: string_field(value, "assignee"),
        due_days,
        new_status: string_field(value, "new_status"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seed_round_trips_through_derive() {
        let seed = json!({
            "triggers": ["case_created"],
            "steps": [{
                "action": "create_task",
                "target": "business_analyst",
                "assignee": "business_analyst",
                "due_days": 5
            }]
        });

        let definition = WorkflowDefinition::from_seed(&seed);
        let derived = serde_json::to_value(definition.derive()).unwrap();
        assert_eq!(derived, seed);
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let definition = WorkflowDefinition {
            triggers: vec![],
            steps: vec![Step {
                action: "send_notification".into(),
                ..Step::default()
            }],
        };

        let derived = serde_json::to_value(&definition.derive().steps[0]).unwrap();
        assert_eq!(derived, json!({ "action": "send_notification" }));
    }

    #[test]
    fn steps_without_action_are_not_emitted() {
        let definition = WorkflowDefinition {
            triggers: vec!["problem_created".into()],
            steps: vec![
                Step::default(),
                Step {
                    action: "assign_user".into(),
                    target: "project_manager".into(),
                    ..Step::default()
                },
            ],
        };

        let derived = definition.derive();
        assert_eq!(derived.steps.len(), 1);
        assert_eq!(derived.steps[0].action, "assign_user");
    }

    #[test]
    fn malformed_seed_defaults_to_empty() {
        assert_eq!(
            WorkflowDefinition::from_seed(&json!(null)),
            WorkflowDefinition::default()
        );

        let definition = WorkflowDefinition::from_seed(&json!({
            "triggers": "case_created",
            "steps": [{ "action": 7, "target": "case_creator", "conditions": "a, ,b" }]
        }));
        assert!(definition.triggers.is_empty());
        assert_eq!(definition.steps[0].action, "");
        assert_eq!(definition.steps[0].target, "case_creator");
        assert_eq!(definition.steps[0].conditions, vec!["a", "b"]);
    }

    #[test]
    fn triggers_are_deduplicated_in_first_seen_order() {
        let mut definition = WorkflowDefinition::default();
        definition.set_triggers(["b", "a", "b", ""]);
        assert_eq!(definition.triggers, vec!["b", "a"]);
    }

    #[test]
    fn seeded_due_days_accepts_floats_and_drops_zero() {
        let definition = WorkflowDefinition::from_seed(&json!({
            "triggers": ["t"],
            "steps": [
                { "action": "create_task", "due_days": 5.0 },
                { "action": "create_task", "due_days": 0 },
                { "action": "create_task", "due_days": -2 },
                { "action": "create_task", "due_days": 45 },
                { "action": "create_task", "due_days": "7" }
            ]
        }));
        let due: Vec<_> = definition.steps.iter().map(|s| s.due_days).collect();
        assert_eq!(due, vec![Some(5), None, None, Some(30), Some(7)]);

        let derived = serde_json::to_value(definition.derive()).unwrap();
        assert_eq!(derived["steps"][0]["due_days"], json!(5));
        assert!(derived["steps"][1].get("due_days").is_none());
    }

    #[test]
    fn derive_is_idempotent() {
        let definition = WorkflowDefinition::from_seed(&json!({
            "triggers": ["t"],
            "steps": [{ "action": "update_status", "new_status": "Resolved", "conditions": ["x"] }]
        }));
        assert_eq!(definition.derive(), definition.derive());
        assert_eq!(
            definition.derive().to_pretty_json(),
            definition.derive().to_pretty_json()
        );
    }
}
