use evo_api::v1::{TodoCreate, TodoId, TodoUpdate};
use tracing::{error, info, warn};

use crate::{
    ui::{self, DashboardView, Sidebar, SIGN_IN_FIRST},
    AuthGate, ClientError, FormError, Route, TodoClient, TodoForm, TodoListState,
};

/// Result of a user action on the dashboard.
#[derive(Debug)]
pub enum ActionOutcome {
    /// The server confirmed the change and it is now in the state.
    Applied,
    /// The session is missing or expired; navigation moved to sign-in.
    Redirected,
    /// The request failed. Nothing changed.
    Failed(ClientError),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }
}

pub struct Dashboard<C> {
    client: C,
    gate: AuthGate,
    state: TodoListState,
    form: TodoForm,
    route: Route,
    alert: Option<&'static str>,
}

impl<C: TodoClient> Dashboard<C> {
    pub fn new(client: C, gate: AuthGate) -> Self {
        Self {
            client,
            gate,
            state: TodoListState::new(),
            form: TodoForm::default(),
            route: Route::Dashboard,
            alert: None,
        }
    }

    pub fn state(&self) -> &TodoListState {
        &self.state
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn form(&self) -> &TodoForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TodoForm {
        &mut self.form
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Blocking message raised by the last redirect, if not yet shown.
    pub fn take_alert(&mut self) -> Option<&'static str> {
        self.alert.take()
    }

    /// Initial load. Without a session nothing is fetched.
    pub async fn mount(&mut self) -> ActionOutcome {
        if !self.gate.is_authenticated() {
            self.redirect_to_sign_in();
            return ActionOutcome::Redirected;
        }

        let outcome = match self.client.get_all().await {
            Ok(todos) => {
                info!(count = todos.len(), "fetched todos");
                self.state.load(todos);
                ActionOutcome::Applied
            }
            Err(err) => self.fail("fetching todos", err),
        };

        self.state.finish_loading();

        // the session may have gone away while the fetch was in flight
        if !matches!(outcome, ActionOutcome::Redirected) && !self.gate.is_authenticated() {
            self.redirect_to_sign_in();
            return ActionOutcome::Redirected;
        }

        outcome
    }

    pub fn show_add_form(&mut self, visible: bool) {
        self.state.set_show_add_form(visible);
    }

    pub fn set_view_mode(&mut self, view_mode: bool) {
        self.state.set_view_mode(view_mode);
    }

    /// Submits the add form. An invalid form makes no request.
    pub async fn submit_form(&mut self) -> Result<ActionOutcome, FormError> {
        let draft = self.form.submit()?;
        Ok(self.add_todo(draft).await)
    }

    pub async fn add_todo(&mut self, draft: TodoCreate) -> ActionOutcome {
        match self.client.create(&draft).await {
            Ok(todo) => {
                info!(id = todo.id, title = %todo.title, "added todo");
                self.state.add(todo);
                ActionOutcome::Applied
            }
            Err(err) => self.fail("creating todo", err),
        }
    }

    pub async fn update_todo(&mut self, id: TodoId, patch: TodoUpdate) -> ActionOutcome {
        match self.client.update(id, &patch).await {
            Ok(todo) => {
                info!(id, "updated todo");
                self.state.replace(id, todo);
                ActionOutcome::Applied
            }
            Err(err) => self.fail("updating todo", err),
        }
    }

    pub async fn toggle_todo(&mut self, id: TodoId, completed: bool) -> ActionOutcome {
        match self.client.toggle_complete(id, completed).await {
            Ok(todo) => {
                info!(id, completed = todo.completed, "toggled todo");
                self.state.toggle(id, todo.completed);
                ActionOutcome::Applied
            }
            Err(err) => self.fail("toggling todo", err),
        }
    }

    pub async fn delete_todo(&mut self, id: TodoId) -> ActionOutcome {
        match self.client.delete(id).await {
            Ok(()) => {
                info!(id, "deleted todo");
                self.state.remove(id);
                ActionOutcome::Applied
            }
            Err(err) => self.fail("deleting todo", err),
        }
    }

    pub fn logout(&mut self) {
        self.gate.logout();
        self.route = Route::SignIn;
    }

    pub fn view(&self) -> DashboardView<'_> {
        ui::view(&self.state, self.gate.is_authenticated())
    }

    pub fn sidebar(&self) -> Sidebar {
        Sidebar::from_gate(&self.gate)
    }

    fn fail(&mut self, action: &str, err: ClientError) -> ActionOutcome {
        if err.is_unauthorized() {
            warn!("Session rejected while {}", action);
            self.redirect_to_sign_in();
            return ActionOutcome::Redirected;
        }

        error!("Error {}: {}", action, err);
        ActionOutcome::Failed(err)
    }

    fn redirect_to_sign_in(&mut self) {
        self.alert = Some(SIGN_IN_FIRST);
        self.route = Route::SignIn;
    }
}
