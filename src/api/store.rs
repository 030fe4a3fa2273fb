use crate::constants::DEFINITION_SCHEMA;
use crate::core::{WorkflowId, WorkflowTemplate};
use crate::errors::Error;
use chrono::Utc;
use jsonschema::Validator;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Workflow not found")]
    NotFound,
    #[error("Workflow name is required")]
    EmptyName,
    #[error("A workflow named '{0}' already exists")]
    DuplicateName(String),
    #[error("Invalid workflow definition: {0}")]
    InvalidDefinition(String),
}

/// Fields an edit replaces
#[derive(Debug, Clone)]
pub struct WorkflowUpdate {
    pub name: String,
    pub description: String,
    pub definition: Value,
    pub is_active: bool,
}

/// In-memory template store shared by the handlers
#[derive(Clone)]
pub struct WorkflowStore {
    templates: Arc<RwLock<BTreeMap<WorkflowId, WorkflowTemplate>>>,
    schema: Arc<Validator>,
}

impl std::fmt::Debug for WorkflowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowStore")
            .field("templates", &self.read().len())
            .finish()
    }
}

impl WorkflowStore {
    /// Creates a store holding `templates`
    ///
    /// # Errors
    ///
    /// Returns an error if the definition schema cannot be compiled
    pub fn new(templates: Vec<WorkflowTemplate>) -> Result<Self, Error> {
        let schema: Value = serde_json::from_str(DEFINITION_SCHEMA)?;
        let validator = jsonschema::validator_for(&schema)?;
        let templates = templates.into_iter().map(|t| (t.id.clone(), t)).collect();
        Ok(Self {
            templates: Arc::new(RwLock::new(templates)),
            schema: Arc::new(validator),
        })
    }

    pub fn list(&self) -> Vec<WorkflowTemplate> {
        self.read().values().cloned().collect()
    }

    pub fn get(&self, id: &WorkflowId) -> Option<WorkflowTemplate> {
        self.read().get(id).cloned()
    }

    /// Schema violations of a submitted definition, empty when it conforms
    pub fn check_definition(&self, definition: &Value) -> Vec<String> {
        self.schema
            .iter_errors(definition)
            .map(|e| e.to_string())
            .collect()
    }

    /// Replaces a template's editable fields
    pub fn update(
        &self,
        id: &WorkflowId,
        update: WorkflowUpdate,
    ) -> Result<WorkflowTemplate, StoreError> {
        let name = update.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let violations = self.check_definition(&update.definition);
        if !violations.is_empty() {
            return Err(StoreError::InvalidDefinition(violations.join("; ")));
        }

        let mut templates = self.write();
        if templates
            .values()
            .any(|t| &t.id != id && t.name == name)
        {
            return Err(StoreError::DuplicateName(name));
        }
        let template = templates.get_mut(id).ok_or(StoreError::NotFound)?;
        template.name = name;
        template.description = update.description;
        template.definition = update.definition;
        template.is_active = update.is_active;
        template.updated_at = Utc::now();
        Ok(template.clone())
    }

    /// Flips the active flag; returns the new value
    pub fn toggle(&self, id: &WorkflowId) -> Result<WorkflowTemplate, StoreError> {
        let mut templates = self.write();
        let template = templates.get_mut(id).ok_or(StoreError::NotFound)?;
        template.is_active = !template.is_active;
        template.updated_at = Utc::now();
        Ok(template.clone())
    }

    pub fn delete(&self, id: &WorkflowId) -> Result<WorkflowTemplate, StoreError> {
        self.write().remove(id).ok_or(StoreError::NotFound)
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<WorkflowId, WorkflowTemplate>> {
        match self.templates.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<WorkflowId, WorkflowTemplate>> {
        match self.templates.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template(id: &str, name: &str) -> WorkflowTemplate {
        WorkflowTemplate {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            definition: json!({ "triggers": [], "steps": [] }),
            is_active: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn update(name: &str, definition: Value) -> WorkflowUpdate {
        WorkflowUpdate {
            name: name.into(),
            description: "desc".into(),
            definition,
            is_active: true,
        }
    }

    #[test]
    fn update_replaces_fields() {
        let store = WorkflowStore::new(vec![template("1", "Intake")]).unwrap();
        let definition = json!({
            "triggers": ["case_submitted"],
            "steps": [{ "action": "assign_user", "target": "business_analyst" }]
        });

        let updated = store
            .update(&"1".into(), update("Case intake", definition.clone()))
            .unwrap();
        assert_eq!(updated.name, "Case intake");
        assert!(updated.is_active);
        assert_eq!(store.get(&"1".into()).unwrap().definition, definition);
    }

    #[test]
    fn update_rejects_bad_input() {
        let store =
            WorkflowStore::new(vec![template("1", "Intake"), template("2", "Review")]).unwrap();
        let empty = json!({ "triggers": [], "steps": [] });

        assert_eq!(
            store.update(&"9".into(), update("Other", empty.clone())),
            Err(StoreError::NotFound)
        );
        assert_eq!(
            store.update(&"1".into(), update("  ", empty.clone())),
            Err(StoreError::EmptyName)
        );
        assert_eq!(
            store.update(&"1".into(), update("Review", empty)),
            Err(StoreError::DuplicateName("Review".into()))
        );
        assert!(matches!(
            store.update(
                &"1".into(),
                update("Intake", json!({ "triggers": [], "steps": [{ "due_days": 40 }] }))
            ),
            Err(StoreError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn toggle_and_delete() {
        let store = WorkflowStore::new(vec![template("1", "Intake")]).unwrap();
        assert!(store.toggle(&"1".into()).unwrap().is_active);
        assert!(!store.toggle(&"1".into()).unwrap().is_active);
        assert_eq!(store.delete(&"1".into()).unwrap().name, "Intake");
        assert_eq!(store.delete(&"1".into()), Err(StoreError::NotFound));
        assert!(store.list().is_empty());
    }
}
