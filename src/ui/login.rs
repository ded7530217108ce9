//! Simulated login screen. Any non-empty credentials succeed; the busy state
//! only covers a fixed-delay timer standing in for a real request.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::domain::{error::ValidationError, user::Credentials};
use crate::ui::{input::InputField, splash, utils};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoginMethod { Email, Google }

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum LoginField { Email, Password }

/// A simulated call in flight: the method that started it and when it lands.
pub struct PendingLogin {
    pub method: LoginMethod,
    pub deadline: Instant,
}

pub struct LoginForm {
    pub email: InputField,
    pub password: InputField,
    pub focus: LoginField,
    pub pending: Option<PendingLogin>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: InputField::new(),
            password: InputField::new(),
            focus: LoginField::Email,
            pending: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn focused_input(&mut self) -> &mut InputField {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    /// Both fields must be non-empty before the email-path attempt; no other
    /// verification exists.
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        let email = self.email.value().trim();
        if email.is_empty() || self.password.value().trim().is_empty() {
            return Err(ValidationError::CredentialsRequired);
        }
        Ok(Credentials {
            email: email.to_string(),
            password: self.password.value().to_string(),
        })
    }

    pub fn begin(&mut self, method: LoginMethod, deadline: Instant) {
        self.pending = Some(PendingLogin { method, deadline });
    }

    /// Clears and returns the pending login once its deadline has passed.
    pub fn take_completed(&mut self, now: Instant) -> Option<LoginMethod> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            self.pending.take().map(|p| p.method)
        } else {
            None
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self { Self::new() }
}

pub fn draw(f: &mut Frame, form: &LoginForm, tick: usize) {
    let card = utils::centered_rect(56, 70, f.size());
    f.render_widget(Clear, card);

    let block = Block::default().borders(Borders::ALL).title("Login Page");
    let inner = block.inner(card);
    f.render_widget(block, card);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tagline
            Constraint::Length(1),
            Constraint::Length(1), // email label
            Constraint::Length(1), // email value
            Constraint::Length(1),
            Constraint::Length(1), // password label
            Constraint::Length(1), // password value
            Constraint::Length(1),
            Constraint::Length(1), // status / hints
            Constraint::Min(0),
        ])
        .split(inner);

    let tagline = Paragraph::new("Track the things to make life easy")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(tagline, rows[0]);

    let label_style = |field: LoginField| {
        if form.focus == field && !form.is_busy() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    f.render_widget(
        Paragraph::new("Email or Phone No.").style(label_style(LoginField::Email)),
        rows[2],
    );
    let email_active = form.focus == LoginField::Email && !form.is_busy();
    f.render_widget(
        Paragraph::new(utils::input_line(&form.email, email_active, None)),
        rows[3],
    );

    f.render_widget(
        Paragraph::new("Password").style(label_style(LoginField::Password)),
        rows[5],
    );
    let password_active = form.focus == LoginField::Password && !form.is_busy();
    f.render_widget(
        Paragraph::new(utils::input_line(&form.password, password_active, Some('*'))),
        rows[6],
    );

    let (status, status_style) = if form.is_busy() {
        (
            format!("{} Signing in...", splash::spinner(tick)),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (
            "Enter: sign in | Ctrl+g: sign in with Google | Tab: switch field | Esc: quit".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };
    f.render_widget(
        Paragraph::new(status).style(status_style).alignment(Alignment::Center),
        rows[8],
    );
}
