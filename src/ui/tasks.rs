//! Task list screen: tabs, list, detail pane, and the modal form.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::domain::{
    task::{Task, TaskPriority, TaskStatus},
    user::User,
};
use crate::ui::{
    form::{FormField, TaskFormState},
    utils,
};

pub struct TasksScreen {
    pub items: Vec<Task>,
    pub tab: TaskStatus,
    pub selected: usize,
    pub list_state: ListState,
    pub form: Option<TaskFormState>,
}

impl TasksScreen {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            tab: TaskStatus::Open,
            selected: 0,
            list_state: ListState::default(),
            form: None,
        }
    }

    pub fn set_items(&mut self, items: Vec<Task>) {
        self.items = items;
        self.clamp_selection();
    }

    /// Tasks on the current tab, in collection order.
    pub fn visible(&self) -> Vec<&Task> {
        self.items.iter().filter(|t| t.status == self.tab).collect()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible().get(self.selected).copied()
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.items.iter().filter(|t| t.status == status).count()
    }

    pub fn switch_tab(&mut self) {
        self.tab = self.tab.toggled();
        self.selected = 0;
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible().len() {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

impl Default for TasksScreen {
    fn default() -> Self { Self::new() }
}

pub fn draw(f: &mut Frame, screen: &mut TasksScreen, user: Option<&User>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.size());

    draw_header(f, chunks[0], user);
    draw_tabs(f, chunks[1], screen);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);
    draw_list(f, middle[0], screen);
    draw_details(f, middle[1], screen);
    draw_footer(f, chunks[3], screen);

    if let Some(form) = &screen.form {
        draw_form(f, form);
    }
}

fn draw_header(f: &mut Frame, area: Rect, user: Option<&User>) {
    let identity = user
        .map(|u| format!("[{}] {}", u.initials(), u.name))
        .unwrap_or_default();
    let header = Paragraph::new(Line::from(vec![
        Span::styled("My Tasks", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(identity, Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("taskman"));
    f.render_widget(header, area);
}

fn draw_tabs(f: &mut Frame, area: Rect, screen: &TasksScreen) {
    let titles = vec![
        format!("Open Tasks ({})", screen.count(TaskStatus::Open)),
        format!("Completed ({})", screen.count(TaskStatus::Completed)),
    ];
    let selected = match screen.tab {
        TaskStatus::Open => 0,
        TaskStatus::Completed => 1,
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, area);
}

fn draw_list(f: &mut Frame, area: Rect, screen: &mut TasksScreen) {
    let rows: Vec<ListItem> = screen.visible().iter().map(|t| list_row(t)).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("items [{}]", screen.tab.label()));

    if rows.is_empty() {
        screen.list_state.select(None);
        f.render_widget(empty_state(screen.tab).block(block), area);
        return;
    }

    screen.list_state.select(Some(screen.selected));
    let list = List::new(rows)
        .block(block)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, area, &mut screen.list_state);
}

fn list_row(task: &Task) -> ListItem<'static> {
    let mark = match task.status {
        TaskStatus::Open => "[ ] ",
        TaskStatus::Completed => "[x] ",
    };
    let title_style = match task.status {
        TaskStatus::Open => Style::default(),
        TaskStatus::Completed => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
    };
    ListItem::new(Line::from(vec![
        Span::raw(mark),
        Span::styled(task.title.clone(), title_style),
        Span::raw(" "),
        Span::styled(task.priority.label().to_string(), priority_style(task.priority)),
    ]))
}

fn empty_state(tab: TaskStatus) -> Paragraph<'static> {
    let (headline, hint) = match tab {
        TaskStatus::Open => ("No tasks yet", "Add your first task to get started! (press n)"),
        TaskStatus::Completed => ("No completed tasks", "Complete some tasks to see them here"),
    };
    Paragraph::new(vec![
        Line::default(),
        Line::styled(headline, Style::default().add_modifier(Modifier::BOLD)),
        Line::styled(hint, Style::default().fg(Color::Gray)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
}

fn draw_details(f: &mut Frame, area: Rect, screen: &TasksScreen) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(task) = screen.selected_task() {
        lines.push(Line::styled(task.title.clone(), Style::default().add_modifier(Modifier::BOLD)));
        lines.push(Line::from(vec![
            Span::raw("Status: "),
            Span::raw(task.status.label()),
            Span::raw("   Priority: "),
            Span::styled(task.priority.label().to_string(), priority_style(task.priority)),
        ]));
        match task.status {
            TaskStatus::Open => {
                if let Some(due) = task.due_date {
                    lines.push(Line::from(format!("Due: {}", due.format("%b %-d, %Y"))));
                }
            }
            TaskStatus::Completed => {
                lines.push(Line::from(format!(
                    "Completed: {}",
                    task.updated_at.format("%b %-d, %Y")
                )));
            }
        }
        lines.push(Line::default());
        lines.push(Line::from(
            task.description.clone().unwrap_or_else(|| "(no description)".to_string()),
        ));
    }
    let details = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("details"))
        .wrap(Wrap { trim: false });
    f.render_widget(details, area);
}

fn draw_footer(f: &mut Frame, area: Rect, screen: &TasksScreen) {
    let hints = if screen.form.is_some() {
        "Tab: next field, Left/Right: move or adjust, Enter: save, Esc: cancel"
    } else {
        "Enter: toggle, n: new, e: edit, d: delete, Tab: switch tab, q: quit"
    };
    let footer = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("info"));
    f.render_widget(footer, area);
}

fn draw_form(f: &mut Frame, form: &TaskFormState) {
    let area = utils::centered_rect(60, 60, f.size());
    f.render_widget(Clear, area);

    let title = if form.editing.is_some() { "Edit Task" } else { "Add New Task" };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let label = |field: FormField, text: &str| {
        let style = if form.field == field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::styled(text.to_string(), style)
    };

    let priority_value = if form.field == FormField::Priority {
        Line::styled(
            format!("< {} >", form.priority.label()),
            priority_style(form.priority).add_modifier(Modifier::BOLD),
        )
    } else {
        Line::styled(form.priority.label().to_string(), priority_style(form.priority))
    };

    let lines = vec![
        label(FormField::Title, "Title *"),
        utils::input_line(&form.title, form.field == FormField::Title, None),
        Line::default(),
        label(FormField::Description, "Description"),
        utils::input_line(&form.description, form.field == FormField::Description, None),
        Line::default(),
        label(FormField::Due, "Due Date (YYYY-MM-DD)"),
        utils::input_line(&form.due, form.field == FormField::Due, None),
        Line::default(),
        label(FormField::Priority, "Priority"),
        priority_value,
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn priority_style(priority: TaskPriority) -> Style {
    let color = match priority {
        TaskPriority::High => Color::Red,
        TaskPriority::Medium => Color::Yellow,
        TaskPriority::Low => Color::Green,
    };
    Style::default().fg(color)
}
