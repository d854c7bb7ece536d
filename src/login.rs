use crate::error::LoginError;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Username,
    Email,
    Password,
    Submit,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Username, Focus::Email, Focus::Password, Focus::Submit];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// What the user typed into the form. Lives only as long as the session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// The login form. A gate is never reused after logout; `generation` tells
/// instances apart.
#[derive(Debug)]
pub struct LoginGate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub focus: Focus,
    generation: u64,
}

impl LoginGate {
    pub fn new(defaults: [&str; 3], generation: u64) -> Self {
        let [username, email, password] = defaults;
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            focus: Focus::Username,
            generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    fn focused_field(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Username => Some(&mut self.username),
            Focus::Email => Some(&mut self.email),
            Focus::Password => Some(&mut self.password),
            Focus::Submit => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.focused_field() {
            field.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.focused_field() {
            field.pop();
        }
    }

    /// Password as drawn on screen.
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    /// Accepts any three non-empty values; there is no real authentication.
    pub fn submit(&self) -> Result<Credentials, LoginError> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            debug!(generation = self.generation, "login rejected: empty field");
            return Err(LoginError::EmptyField);
        }
        info!(user = %self.username, "login accepted");
        Ok(Credentials {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}
