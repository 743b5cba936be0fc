//! View state for the sign-in/sign-up/forgot-password form, modeled as a
//! tagged variant plus a pure reducer instead of scattered boolean flags.
//! The frontend drives this over the wire; keeping the reducer here makes the
//! allowed view changes explicit and testable without a browser.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AuthView {
    SignIn { email: String },
    SignUp { email: String },
    ForgotPassword { email: String },
}

impl AuthView {
    pub fn initial() -> Self {
        AuthView::SignIn {
            email: String::new(),
        }
    }

    fn email(&self) -> &str {
        match self {
            AuthView::SignIn { email }
            | AuthView::SignUp { email }
            | AuthView::ForgotPassword { email } => email,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuthEvent {
    SwitchToSignIn,
    SwitchToSignUp,
    SwitchToForgotPassword,
    EmailChanged { email: String },
}

/// Pure reducer. Switching views carries the entered email along so the user
/// never retypes it.
pub fn reduce(view: AuthView, event: AuthEvent) -> AuthView {
    match event {
        AuthEvent::SwitchToSignIn => AuthView::SignIn {
            email: view.email().to_string(),
        },
        AuthEvent::SwitchToSignUp => AuthView::SignUp {
            email: view.email().to_string(),
        },
        AuthEvent::SwitchToForgotPassword => AuthView::ForgotPassword {
            email: view.email().to_string(),
        },
        AuthEvent::EmailChanged { email } => match view {
            AuthView::SignIn { .. } => AuthView::SignIn { email },
            AuthView::SignUp { .. } => AuthView::SignUp { email },
            AuthView::ForgotPassword { .. } => AuthView::ForgotPassword { email },
        },
    }
}
