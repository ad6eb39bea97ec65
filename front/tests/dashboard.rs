mod common;

use std::time::Duration;

use common::{signed_in, signed_out, todo, Call, Failure, RecordingClient};
use evo_api::v1::{Todo, TodoCreate, TodoUpdate};
use evo_front::{
    state::{ADDED, MARKED_COMPLETE, MARKED_INCOMPLETE},
    ui::{DashboardView, Sidebar, SIGN_IN_FIRST},
    ActionOutcome, Dashboard, FormError, Route, SessionProvider,
};

async fn mounted(client: &RecordingClient) -> Dashboard<RecordingClient> {
    let (gate, _) = signed_in();
    let mut dashboard = Dashboard::new(client.clone(), gate);

    assert!(dashboard.mount().await.is_applied());
    dashboard
}

// --- mount ---

#[tokio::test]
async fn signed_out_mount_fetches_nothing() {
    let client = RecordingClient::new();
    let mut dashboard = Dashboard::new(client.clone(), signed_out());

    let outcome = dashboard.mount().await;

    assert!(matches!(outcome, ActionOutcome::Redirected));
    assert!(client.calls().is_empty());
    assert_eq!(dashboard.route(), Route::SignIn);
    assert_eq!(dashboard.take_alert(), Some(SIGN_IN_FIRST));
    assert_eq!(dashboard.take_alert(), None);
}

#[tokio::test]
async fn mount_loads_the_collection() {
    let client = RecordingClient::with_todos(vec![todo(1, "A"), todo(2, "B")]);
    let dashboard = mounted(&client).await;

    assert_eq!(client.calls(), [Call::GetAll]);
    assert!(!dashboard.state().view().loading);
    assert_eq!(dashboard.state().todos().len(), 2);
    assert!(matches!(dashboard.view(), DashboardView::Ready { .. }));
}

#[tokio::test]
async fn rejected_fetch_redirects() {
    let client = RecordingClient::new();
    client.fail_with(Some(Failure::Unauthorized));
    let (gate, _) = signed_in();
    let mut dashboard = Dashboard::new(client.clone(), gate);

    assert!(matches!(dashboard.mount().await, ActionOutcome::Redirected));
    assert_eq!(dashboard.route(), Route::SignIn);
    assert!(!dashboard.state().view().loading);
}

#[tokio::test]
async fn session_lost_during_fetch_redirects() {
    let client = RecordingClient::with_todos(vec![todo(1, "A")]);
    let (gate, session) = signed_in();
    client.expire_during_fetch(session);
    let mut dashboard = Dashboard::new(client.clone(), gate);

    assert!(matches!(dashboard.mount().await, ActionOutcome::Redirected));
    assert_eq!(dashboard.take_alert(), Some(SIGN_IN_FIRST));
    assert_eq!(dashboard.view(), DashboardView::Redirecting);
}

#[tokio::test]
async fn failed_fetch_still_stops_loading() {
    let client = RecordingClient::new();
    client.fail_with(Some(Failure::Server));
    let (gate, _) = signed_in();
    let mut dashboard = Dashboard::new(client.clone(), gate);

    assert!(matches!(dashboard.mount().await, ActionOutcome::Failed(_)));
    assert_eq!(dashboard.route(), Route::Dashboard);
    assert!(!dashboard.state().view().loading);
    assert!(dashboard.state().todos().is_empty());
}

// --- form ---

#[tokio::test]
async fn submitting_the_form_creates_one_item() {
    let client = RecordingClient::new();
    let mut dashboard = mounted(&client).await;
    dashboard.show_add_form(true);

    let form = dashboard.form_mut();
    form.title = String::from("  Buy milk ");
    form.description = String::from("   ");

    let outcome = dashboard.submit_form().await.unwrap();
    assert!(outcome.is_applied());

    let create: Vec<_> = (client.calls().into_iter())
        .filter(|call| matches!(call, Call::Create(_)))
        .collect();
    assert_eq!(
        create,
        [Call::Create(TodoCreate {
            title: String::from("Buy milk"),
            description: None,
            due_date: None,
        })]
    );

    assert_eq!(dashboard.state().todos(), [todo(1, "Buy milk")]);
    assert!(!dashboard.state().view().show_add_form);
    assert_eq!(dashboard.state().notice().as_deref(), Some(ADDED));
    assert_eq!(dashboard.form().title, "");
}

#[tokio::test]
async fn blank_title_makes_no_request() {
    let client = RecordingClient::new();
    let mut dashboard = mounted(&client).await;

    for title in ["", "   ", "\t"] {
        dashboard.form_mut().title = title.to_string();
        assert!(matches!(
            dashboard.submit_form().await,
            Err(FormError::EmptyTitle)
        ));
    }

    assert_eq!(client.calls(), [Call::GetAll]);
    assert_eq!(dashboard.state().notice(), None);
}

// --- mutations ---

#[tokio::test]
async fn toggle_marks_complete_then_incomplete() {
    let client = RecordingClient::with_todos(vec![todo(1, "A")]);
    let mut dashboard = mounted(&client).await;

    assert!(dashboard.toggle_todo(1, true).await.is_applied());
    assert_eq!(
        dashboard.state().todos(),
        [Todo {
            completed: true,
            ..todo(1, "A")
        }]
    );
    assert_eq!(dashboard.state().notice().as_deref(), Some(MARKED_COMPLETE));

    assert!(dashboard.toggle_todo(1, false).await.is_applied());
    assert!(!dashboard.state().todos()[0].completed);
    assert_eq!(dashboard.state().notice().as_deref(), Some(MARKED_INCOMPLETE));
}

#[tokio::test]
async fn update_replaces_the_item() {
    let client = RecordingClient::with_todos(vec![todo(1, "A"), todo(2, "B")]);
    let mut dashboard = mounted(&client).await;
    dashboard.set_view_mode(true);

    let patch = TodoUpdate {
        title: Some(String::from("B2")),
        ..TodoUpdate::default()
    };
    assert!(dashboard.update_todo(2, patch).await.is_applied());

    let titles: Vec<_> = (dashboard.state().todos().iter())
        .map(|todo| todo.title.as_str())
        .collect();
    assert_eq!(titles, ["A", "B2"]);
    assert!(!dashboard.state().view().view_mode);
}

#[tokio::test]
async fn delete_removes_exactly_one() {
    let client = RecordingClient::with_todos(vec![todo(1, "A"), todo(2, "B"), todo(3, "C")]);
    let mut dashboard = mounted(&client).await;

    assert!(dashboard.delete_todo(2).await.is_applied());

    let ids: Vec<_> = dashboard.state().todos().iter().map(|todo| todo.id).collect();
    assert_eq!(ids, [1, 3]);
}

#[tokio::test]
async fn failed_request_changes_nothing() {
    let client = RecordingClient::with_todos(vec![todo(1, "A")]);
    let mut dashboard = mounted(&client).await;
    dashboard.show_add_form(true);
    client.fail_with(Some(Failure::Server));

    assert!(matches!(
        dashboard.delete_todo(1).await,
        ActionOutcome::Failed(_)
    ));
    assert!(matches!(
        dashboard.toggle_todo(1, true).await,
        ActionOutcome::Failed(_)
    ));

    assert_eq!(dashboard.state().todos(), [todo(1, "A")]);
    assert_eq!(dashboard.state().notice(), None);
    assert!(dashboard.state().view().show_add_form);
    assert_eq!(dashboard.route(), Route::Dashboard);
}

#[tokio::test]
async fn rejected_mutation_redirects() {
    let client = RecordingClient::with_todos(vec![todo(1, "A")]);
    let mut dashboard = mounted(&client).await;
    client.fail_with(Some(Failure::Unauthorized));

    assert!(matches!(
        dashboard.delete_todo(1).await,
        ActionOutcome::Redirected
    ));
    assert_eq!(dashboard.route(), Route::SignIn);
    assert_eq!(dashboard.take_alert(), Some(SIGN_IN_FIRST));
    assert_eq!(dashboard.state().todos(), [todo(1, "A")]);
}

// --- notice & session ---

#[tokio::test(start_paused = true)]
async fn notice_is_gone_after_three_seconds() {
    let client = RecordingClient::with_todos(vec![todo(1, "A")]);
    let mut dashboard = mounted(&client).await;

    dashboard.toggle_todo(1, true).await;
    assert!(dashboard.state().notice().is_some());

    tokio::time::sleep(Duration::from_millis(3100)).await;
    assert_eq!(dashboard.state().notice(), None);
}

#[tokio::test]
async fn logout_signs_out_and_leaves() {
    let client = RecordingClient::new();
    let mut dashboard = mounted(&client).await;
    assert!(matches!(dashboard.sidebar(), Sidebar::SignedIn { .. }));

    dashboard.logout();

    assert_eq!(dashboard.route(), Route::SignIn);
    assert!(!dashboard.gate().is_authenticated());
    assert_eq!(dashboard.sidebar(), Sidebar::SignedOut);
    assert_eq!(dashboard.view(), DashboardView::Redirecting);
}

#[tokio::test]
async fn clearing_the_session_elsewhere_hides_the_dashboard() {
    let client = RecordingClient::new();
    let (gate, session) = signed_in();
    let mut dashboard = Dashboard::new(client.clone(), gate);
    dashboard.mount().await;

    session.clear().unwrap();

    assert_eq!(dashboard.view(), DashboardView::Redirecting);
}
