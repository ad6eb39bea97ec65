use std::fmt;

use crate::{AuthGate, Route};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarItem {
    Link(Route),
    Welcome(String),
    Logout,
}

/// Navigation panel. It has no state of its own and only mirrors the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sidebar {
    SignedIn { email: String },
    SignedOut,
}

impl Sidebar {
    pub fn from_gate(gate: &AuthGate) -> Self {
        match gate.user() {
            Some(user) => Sidebar::SignedIn { email: user.email },
            None => Sidebar::SignedOut,
        }
    }

    pub fn items(&self) -> Vec<SidebarItem> {
        match self {
            Sidebar::SignedIn { email } => vec![
                SidebarItem::Link(Route::Dashboard),
                SidebarItem::Welcome(email.clone()),
                SidebarItem::Logout,
            ],
            Sidebar::SignedOut => vec![
                SidebarItem::Link(Route::SignIn),
                SidebarItem::Link(Route::SignUp),
            ],
        }
    }
}

impl fmt::Display for Sidebar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Route::Home.label())?;

        for item in self.items() {
            match item {
                SidebarItem::Link(route) => writeln!(f, "  {} ({})", route.label(), route.path())?,
                SidebarItem::Welcome(email) => writeln!(f, "  Welcome, {}", email)?,
                SidebarItem::Logout => writeln!(f, "  Logout")?,
            }
        }

        Ok(())
    }
}
