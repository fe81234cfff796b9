//! Application state for the demo screen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use authway_core::{AuthClient, Session, Subscription};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::info;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Session,
}

/// Which login field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Email,
    Password,
}

pub struct App {
    client: AuthClient,
    pub screen: Screen,
    pub focus: Focus,
    pub email: String,
    pub password: String,
    pub status: String,
    pub session: Option<Session>,
    pub should_quit: bool,
    /// Set by the holder subscriber when a sign-out lands (locally or via
    /// a 401 on any call); drained by `poll_session_cleared`
    session_cleared: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl App {
    pub fn new(client: AuthClient) -> Self {
        let session_cleared = Arc::new(AtomicBool::new(false));
        let flag = session_cleared.clone();
        let subscription = client.subscribe(move |session| {
            if session.is_none() {
                flag.store(true, Ordering::SeqCst);
            }
        });

        Self {
            client,
            screen: Screen::Login,
            focus: Focus::Email,
            email: String::new(),
            password: String::new(),
            status: String::new(),
            session: None,
            should_quit: false,
            session_cleared,
            _subscription: subscription,
        }
    }

    /// Best-effort session restore; failures leave us on the login screen
    pub async fn bootstrap(&mut self) {
        if let Some(session) = self.client.restore_session().await {
            info!(user = %session.user.email, "restored session");
            self.session = Some(session);
            self.screen = Screen::Session;
        }
    }

    /// React to a "logged out" broadcast from the session holder
    pub fn poll_session_cleared(&mut self) {
        if self.session_cleared.swap(false, Ordering::SeqCst) && self.screen == Screen::Session {
            self.session = None;
            self.screen = Screen::Login;
            self.password.clear();
            self.status = "You have been signed out".to_string();
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Login => self.handle_login_key(key).await,
            Screen::Session => self.handle_session_key(key).await,
        }
    }

    async fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = match self.focus {
                    Focus::Email => Focus::Password,
                    Focus::Password => Focus::Email,
                };
            }
            KeyCode::Up => {
                self.focus = Focus::Email;
            }
            KeyCode::Enter => self.submit().await,
            KeyCode::Backspace => {
                match self.focus {
                    Focus::Email => self.email.pop(),
                    Focus::Password => self.password.pop(),
                };
            }
            KeyCode::Char(c) => match self.focus {
                Focus::Email => self.email.push(c),
                Focus::Password => self.password.push(c),
            },
            _ => {}
        }
    }

    async fn handle_session_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('o') => self.sign_out().await,
            _ => {}
        }
    }

    async fn submit(&mut self) {
        self.status = "Signing in...".to_string();
        match self.client.sign_in().email(&self.email, &self.password).await {
            Ok(session) => {
                info!(user = %session.user.email, "signed in");
                self.session = Some(session);
                self.screen = Screen::Session;
                self.password.clear();
                self.status.clear();
            }
            Err(e) => {
                // Validation errors carry field detail worth surfacing
                self.status = match &e.details {
                    Some(details) => {
                        let mut fields: Vec<&str> = details.values().map(String::as_str).collect();
                        fields.sort_unstable();
                        fields.join("; ")
                    }
                    None => e.message.clone(),
                };
            }
        }
    }

    async fn sign_out(&mut self) {
        if let Err(e) = self.client.session().sign_out().await {
            // Local state is cleared regardless; just surface the failure
            self.status = e.message;
        }
        self.poll_session_cleared();
    }
}
