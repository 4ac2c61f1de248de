//! Login screen: role presentation cards, credentials and password reset.
//!
//! The role choice only changes the copy shown to the user; what the
//! session can do is decided by the resolved profile afterwards.

use std::sync::Arc;

use super::scope::ViewScope;
use super::state::DashboardPorts;
use crate::domain::ports::SessionCommand;

/// Shown once a reset email has been requested.
pub const RESET_SENT: &str = "Check your email for the reset link.";

/// Presentation card on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleChoice {
    /// Business owner.
    #[default]
    Owner,
    /// Shop attendant.
    Employee,
}

impl RoleChoice {
    /// Both cards in display order.
    pub const ALL: [Self; 2] = [Self::Owner, Self::Employee];

    /// Card heading.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Employee => "Employee",
        }
    }

    /// Card body.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Owner => "Daily and monthly results and every recorded entry.",
            Self::Employee => "Record entries and send invoices or POS reports.",
        }
    }
}

/// Login form view model.
pub struct LoginForm {
    session: Arc<dyn SessionCommand>,
    scope: ViewScope,
    role: RoleChoice,
    email: String,
    password: String,
    busy: bool,
    message: Option<String>,
    error: Option<String>,
}

impl LoginForm {
    /// Empty form with the owner card selected.
    pub fn new(ports: &DashboardPorts) -> Self {
        Self {
            session: Arc::clone(&ports.session),
            scope: ViewScope::new(),
            role: RoleChoice::default(),
            email: String::new(),
            password: String::new(),
            busy: false,
            message: None,
            error: None,
        }
    }

    /// Scope the renderer closes on unmount.
    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    /// Selected presentation card.
    pub const fn role(&self) -> RoleChoice {
        self.role
    }

    /// Select a presentation card.
    pub fn choose_role(&mut self, role: RoleChoice) {
        self.role = role;
    }

    /// Typed email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Replace the email text.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Replace the password text.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Whether a request is in flight.
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Informational message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sign in with the typed credentials.
    ///
    /// The profile gate reacts to the published session change, so nothing
    /// else needs updating here. The password is cleared either way.
    pub async fn sign_in(&mut self) {
        self.start();
        let outcome = self.session.sign_in(&self.email, &self.password).await;
        if !self.scope.is_active() {
            return;
        }
        self.busy = false;
        self.password.clear();
        if let Err(err) = outcome {
            self.error = Some(err.message().to_owned());
        }
    }

    /// Ask for a password reset email for the typed address.
    pub async fn send_password_reset(&mut self) {
        self.start();
        let outcome = self.session.send_password_reset(&self.email).await;
        if !self.scope.is_active() {
            return;
        }
        self.busy = false;
        match outcome {
            Ok(()) => self.message = Some(RESET_SENT.to_owned()),
            Err(err) => self.error = Some(err.message().to_owned()),
        }
    }

    /// End the session. Local state is cleared even when the platform
    /// cannot be reached, so only the error is reported.
    pub async fn sign_out(&mut self) {
        self.start();
        let outcome = self.session.sign_out().await;
        if !self.scope.is_active() {
            return;
        }
        self.busy = false;
        self.password.clear();
        if let Err(err) = outcome {
            self.error = Some(err.message().to_owned());
        }
    }

    fn start(&mut self) {
        self.busy = true;
        self.message = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockSessionCommand;
    use crate::domain::{Error, Principal, UserId};
    use crate::inbound::dashboard::test_support::ports_with;
    use rstest::rstest;

    fn form(session: MockSessionCommand) -> LoginForm {
        LoginForm::new(&ports_with(|ports| ports.session = Arc::new(session)))
    }

    #[rstest]
    fn role_cards_have_distinct_copy() {
        let [owner, employee] = RoleChoice::ALL;
        assert_ne!(owner.title(), employee.title());
        assert_ne!(owner.description(), employee.description());
        assert_eq!(RoleChoice::default(), RoleChoice::Owner);
    }

    #[tokio::test]
    async fn sign_in_forwards_the_credentials() {
        let mut session = MockSessionCommand::new();
        session
            .expect_sign_in()
            .withf(|email, password| email == "dona@padaria.com.br" && password == "s3gredo")
            .times(1)
            .returning(|email, _| {
                Ok(Principal::new(UserId::random(), Some(email.to_owned())))
            });
        let mut login = form(session);
        login.choose_role(RoleChoice::Employee);
        login.set_email("dona@padaria.com.br");
        login.set_password("s3gredo");

        login.sign_in().await;

        assert_eq!(login.error(), None);
        assert!(!login.is_busy());
        assert_eq!(login.role(), RoleChoice::Employee);
    }

    #[tokio::test]
    async fn rejected_sign_in_shows_the_platform_message() {
        let mut session = MockSessionCommand::new();
        session
            .expect_sign_in()
            .returning(|_, _| Err(Error::external_service("Invalid login credentials")));
        let mut login = form(session);
        login.set_email("dona@padaria.com.br");
        login.set_password("errada");

        login.sign_in().await;

        assert_eq!(login.error(), Some("Invalid login credentials"));
        assert_eq!(login.email(), "dona@padaria.com.br");
    }

    #[tokio::test]
    async fn reset_requests_confirm_by_message() {
        let mut session = MockSessionCommand::new();
        session
            .expect_send_password_reset()
            .withf(|email| email == "dona@padaria.com.br")
            .times(1)
            .returning(|_| Ok(()));
        let mut login = form(session);
        login.set_email("dona@padaria.com.br");

        login.send_password_reset().await;

        assert_eq!(login.message(), Some(RESET_SENT));
    }

    #[tokio::test]
    async fn sign_out_is_forwarded() {
        let mut session = MockSessionCommand::new();
        session.expect_sign_out().times(1).returning(|| Ok(()));
        let mut login = form(session);

        login.sign_out().await;

        assert_eq!(login.error(), None);
        assert!(!login.is_busy());
    }

    #[tokio::test]
    async fn blank_reset_emails_surface_the_validation_error() {
        let mut session = MockSessionCommand::new();
        session
            .expect_send_password_reset()
            .returning(|_| Err(Error::validation("email is required")));
        let mut login = form(session);

        login.send_password_reset().await;

        assert_eq!(login.error(), Some("email is required"));
        assert_eq!(login.message(), None);
    }
}
