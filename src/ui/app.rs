//! Application event loop and screen sequencing.
//!
//! One loop drives the whole program: draw, poll for input with a tick
//! timeout, dispatch keys by screen, then run whatever timers have come due.
//! The splash and login delays are plain `Instant` deadlines checked in
//! `on_tick`, so the Splash -> Login -> Tasks progression is testable with
//! fabricated instants.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::application::task_service::{TaskService, TaskServiceImpl};
use crate::domain::{repository::TaskRepository, user::User};
use crate::ui::{
    form::TaskFormState,
    login::{self, LoginForm, LoginMethod},
    notify::{Notice, NoticeKind},
    splash,
    tasks::{self, TasksScreen},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen { Splash, Login, Tasks }

/// The two fixed delays of the simulated flows.
pub struct Timings {
    pub splash: Duration,
    pub login: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            splash: Duration::from_millis(2000),
            login: Duration::from_millis(1500),
        }
    }
}

pub struct App<R: TaskRepository> {
    service: TaskServiceImpl<R>,
    timings: Timings,
    screen: Screen,
    splash_deadline: Option<Instant>,
    login: LoginForm,
    tasks: TasksScreen,
    user: Option<User>,
    notice: Option<Notice>,
    tick: usize,
    should_quit: bool,
}

impl<R: TaskRepository> App<R> {
    pub fn new(service: TaskServiceImpl<R>, timings: Timings) -> Self {
        let splash_deadline = Some(Instant::now() + timings.splash);
        Self {
            service,
            timings,
            screen: Screen::Splash,
            splash_deadline,
            login: LoginForm::new(),
            tasks: TasksScreen::new(),
            user: None,
            notice: None,
            tick: 0,
            should_quit: false,
        }
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(100);
        let mut last_tick = Instant::now();
        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    // act on presses only; repeats and releases double up input
                    if key.kind == KeyEventKind::Press {
                        self.on_key(key).await?;
                    }
                }
            }
            if last_tick.elapsed() >= tick_rate {
                self.tick = self.tick.wrapping_add(1);
                last_tick = Instant::now();
            }
            self.on_tick(Instant::now()).await?;
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame) {
        match self.screen {
            Screen::Splash => splash::draw(f, self.tick),
            Screen::Login => login::draw(f, &self.login, self.tick),
            Screen::Tasks => tasks::draw(f, &mut self.tasks, self.user.as_ref()),
        }
        if let Some(notice) = &self.notice {
            draw_notice(f, notice);
        }
    }

    /// Run due timers. Pulled out of `run` so the sequencing can be driven
    /// with arbitrary `now` values.
    async fn on_tick(&mut self, now: Instant) -> Result<()> {
        if self.screen == Screen::Splash && self.splash_deadline.is_some_and(|d| now >= d) {
            self.splash_deadline = None;
            self.screen = Screen::Login;
            tracing::info!("splash complete, showing login");
        }
        if self.screen == Screen::Login {
            if let Some(method) = self.login.take_completed(now) {
                self.complete_login(method).await?;
            }
        }
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
        Ok(())
    }

    async fn on_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }
        match self.screen {
            Screen::Splash => self.on_splash_key(key),
            Screen::Login => self.on_login_key(key),
            Screen::Tasks => self.on_tasks_key(key).await?,
        }
        Ok(())
    }

    fn on_splash_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            // leaving before the deadline tears the pending transition down
            self.splash_deadline = None;
            self.should_quit = true;
        }
    }

    fn on_login_key(&mut self, key: KeyEvent) {
        if self.login.is_busy() {
            // inputs stay disabled while the simulated call runs
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.login.switch_focus();
            }
            KeyCode::Enter => self.submit_login(LoginMethod::Email),
            KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit_login(LoginMethod::Google);
            }
            KeyCode::Backspace => self.login.focused_input().backspace(),
            KeyCode::Left => self.login.focused_input().move_left(),
            KeyCode::Right => self.login.focused_input().move_right(),
            KeyCode::Char(c) => self.login.focused_input().insert(c),
            _ => {}
        }
    }

    fn submit_login(&mut self, method: LoginMethod) {
        if method == LoginMethod::Email {
            if let Err(err) = self.login.validate() {
                self.notice = Some(Notice::error(err.to_string()));
                return;
            }
        }
        tracing::info!(?method, "simulated login started");
        self.login.begin(method, Instant::now() + self.timings.login);
    }

    async fn complete_login(&mut self, method: LoginMethod) -> Result<()> {
        let (user, message) = match method {
            LoginMethod::Google => (User::demo_google(), "Welcome back! Successfully logged in with Google"),
            LoginMethod::Email => (
                User::from_email(self.login.email.value().trim()),
                "Welcome back! Successfully logged in",
            ),
        };
        tracing::info!(email = %user.email, "simulated login complete");
        self.user = Some(user);
        self.notice = Some(Notice::info(message));
        self.screen = Screen::Tasks;
        self.reload().await
    }

    async fn on_tasks_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.tasks.form.is_some() {
            self.on_form_key(key).await
        } else {
            self.on_list_key(key).await
        }
    }

    async fn on_list_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.tasks.switch_tab(),
            KeyCode::Up => self.tasks.select_prev(),
            KeyCode::Down => self.tasks.select_next(),
            KeyCode::Char('n') => self.tasks.form = Some(TaskFormState::create()),
            KeyCode::Char('e') => {
                if let Some(task) = self.tasks.selected_task().cloned() {
                    self.tasks.form = Some(TaskFormState::edit(&task));
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.tasks.selected_task().map(|t| t.id) {
                    self.service.toggle(id).await?;
                    self.reload().await?;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.tasks.selected_task().map(|t| t.id) {
                    if self.service.delete(id).await? {
                        self.notice = Some(Notice::info("Task deleted successfully"));
                    }
                    self.reload().await?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn on_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(form) = self.tasks.form.as_mut() else { return Ok(()) };
        match key.code {
            KeyCode::Esc => self.tasks.form = None,
            KeyCode::Enter => self.save_form().await?,
            KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
            KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
            KeyCode::Left => match form.active_input() {
                Some(input) => input.move_left(),
                None => form.cycle_priority(false),
            },
            KeyCode::Right => match form.active_input() {
                Some(input) => input.move_right(),
                None => form.cycle_priority(true),
            },
            KeyCode::Backspace => {
                if let Some(input) = form.active_input() {
                    input.backspace();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = form.active_input() {
                    input.insert(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn save_form(&mut self) -> Result<()> {
        let Some(state) = self.tasks.form.as_ref() else { return Ok(()) };
        let form = match state.to_form() {
            Ok(form) => form,
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                return Ok(());
            }
        };
        let result = match state.editing {
            Some(id) => self.service.edit(id, form).await.map(|_| "Task updated successfully"),
            None => self.service.add(form).await.map(|_| "Task added successfully"),
        };
        match result {
            Ok(message) => {
                self.notice = Some(Notice::info(message));
                self.tasks.form = None;
                self.reload().await?;
            }
            Err(err) if err.is_validation() => {
                // keep the form open so the input can be fixed
                self.notice = Some(Notice::error(err.to_string()));
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    async fn reload(&mut self) -> Result<()> {
        let items = self.service.list().await?;
        self.tasks.set_items(items);
        Ok(())
    }
}

fn draw_notice(f: &mut Frame, notice: &Notice) {
    let style = match notice.kind {
        NoticeKind::Info => Style::default().fg(Color::Green),
        NoticeKind::Error => Style::default().fg(Color::Red),
    };
    let area = f.size();
    if area.height == 0 {
        return;
    }
    let line = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    f.render_widget(
        Paragraph::new(notice.message.clone()).style(style).alignment(Alignment::Center),
        line,
    );
}
