use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use workflow_editor::api::{routes, WorkflowStore};
use workflow_editor::client::{HttpPersistenceClient, PersistenceClient};
use workflow_editor::core::{
    EditorSettings, InMemorySessionStore, SaveOutcome, StepField, WorkflowEditor, WorkflowId,
    WorkflowTemplate,
};
use workflow_editor::errors::Error;
use workflow_editor::host::{ConsoleHost, NotificationKind};
use workflow_editor::render::TextSurface;

fn template(id: &str, name: &str) -> WorkflowTemplate {
    WorkflowTemplate {
        id: WorkflowId::new(id),
        name: name.to_string(),
        description: String::new(),
        definition: json!({ "triggers": ["case_created"], "steps": [] }),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

struct Editor {
    editor: WorkflowEditor,
    surface: Arc<TextSurface>,
    host: Arc<ConsoleHost>,
}

fn editor_for(addr: SocketAddr) -> Editor {
    let surface = Arc::new(TextSurface::new());
    let host = Arc::new(ConsoleHost::new(
        Duration::from_secs(3),
        Duration::from_secs(5),
    ));
    let client = Arc::new(HttpPersistenceClient::new(&format!("http://{}", addr)).unwrap());
    let editor = WorkflowEditor::new(
        Arc::new(InMemorySessionStore::new()),
        surface.clone(),
        host.clone(),
        client,
        EditorSettings {
            refresh_debounce: Duration::from_millis(10),
            reload_delay: Duration::ZERO,
        },
    );
    Editor {
        editor,
        surface,
        host,
    }
}

#[tokio::test]
async fn edited_workflow_is_stored_by_backend() {
    let store = WorkflowStore::new(vec![template("1", "Case intake")]).unwrap();
    let addr = spawn(routes::app(store.clone())).await;
    let Editor {
        editor,
        surface,
        host,
    } = editor_for(addr);

    let client = HttpPersistenceClient::new(&format!("http://{}", addr)).unwrap();
    let id = WorkflowId::new("1");
    let stored = client.fetch_workflow(&id).await.unwrap();

    surface.mount(&id);
    editor.open_session_with_details(&id, &stored.definition, stored.details());
    editor.add_step(&id);
    editor.update_step_field(&id, 0, StepField::Action, "create_task");
    editor.update_step_field(&id, 0, StepField::Target, "case");
    editor.update_step_field(&id, 0, StepField::Template, "Review {{case.title}}");
    editor.update_step_field(&id, 0, StepField::DueDays, "7");

    let outcome = editor.save(&id).await;
    assert!(matches!(outcome, SaveOutcome::Saved { .. }), "{:?}", outcome);
    assert_eq!(host.reload_count(), 1);
    assert!(editor.session(&id).is_none());

    let saved = store.get(&id).unwrap();
    assert_eq!(
        saved.definition,
        json!({
            "triggers": ["case_created"],
            "steps": [{
                "action": "create_task",
                "target": "case",
                "template": "Review {{case.title}}",
                "due_days": 7
            }]
        })
    );
    assert!(host
        .active_notifications()
        .iter()
        .any(|n| n.kind == NotificationKind::Success && n.message.contains("Case intake")));
}

#[tokio::test]
async fn rejected_save_shows_server_error_and_restores_button() {
    let app = Router::new().route(
        "/admin/workflows/:id/edit",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "db locked" })),
            )
        }),
    );
    let addr = spawn(app).await;
    let Editor {
        editor,
        surface,
        host,
    } = editor_for(addr);

    let id = WorkflowId::new("9");
    surface.mount(&id);
    editor.open_session(
        &id,
        &json!({
            "triggers": ["problem_created"],
            "steps": [{ "action": "send_notification", "target": "owner" }]
        }),
    );

    let outcome = editor.save(&id).await;
    assert_eq!(
        outcome,
        SaveOutcome::Failed {
            reason: "db locked".into()
        }
    );

    let notifications = host.active_notifications();
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Error && n.message.contains("db locked")));
    assert_eq!(surface.save_button(&id), Some(("Save Workflow".into(), false)));
    assert!(editor.session(&id).is_some());
    assert_eq!(host.reload_count(), 0);
}

#[tokio::test]
async fn missing_workflow_is_reported() {
    let store = WorkflowStore::new(Vec::new()).unwrap();
    let addr = spawn(routes::app(store)).await;
    let client = HttpPersistenceClient::new(&format!("http://{}", addr)).unwrap();

    let result = client.fetch_workflow(&WorkflowId::new("404")).await;
    assert!(matches!(result, Err(Error::WorkflowNotFound(id)) if id == "404"));
}

#[tokio::test]
async fn duplicate_name_is_rejected() {
    let store = WorkflowStore::new(vec![
        template("1", "Case intake"),
        template("2", "Problem triage"),
    ])
    .unwrap();
    let addr = spawn(routes::app(store.clone())).await;
    let Editor {
        editor,
        surface,
        host,
    } = editor_for(addr);

    let id = WorkflowId::new("2");
    let mut details = store.get(&id).unwrap().details();
    details.name = "Case intake".into();

    surface.mount(&id);
    editor.open_session_with_details(
        &id,
        &json!({
            "triggers": ["problem_created"],
            "steps": [{ "action": "update_status", "target": "problem", "new_status": "Resolved" }]
        }),
        details,
    );

    let outcome = editor.save(&id).await;
    match outcome {
        SaveOutcome::Failed { reason } => assert!(reason.contains("already exists"), "{}", reason),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(store.get(&id).unwrap().name, "Problem triage");
    assert!(host
        .active_notifications()
        .iter()
        .any(|n| n.kind == NotificationKind::Error));
}
