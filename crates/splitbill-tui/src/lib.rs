// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use log::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use splitbill_app::{
    AppCommand, AppEvent, AppState, Friend, Payer, Selection, SplitBillForm, Standing,
};
use std::io;
use std::time::{Duration, Instant};

const STATUS_TTL: Duration = Duration::from_secs(4);
const CURSOR_MARK: &str = "›";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddField {
    Name,
    ImageRef,
}

impl AddField {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::ImageRef,
            Self::ImageRef => Self::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitField {
    Bill,
    MyExpense,
    Payer,
}

impl SplitField {
    const ALL: [Self; 3] = [Self::Bill, Self::MyExpense, Self::Payer];

    fn rotate(self, delta: isize) -> Self {
        let current = Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0) as isize;
        let len = Self::ALL.len() as isize;
        Self::ALL[(current + delta).rem_euclid(len) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    List,
    AddForm(AddField),
    SplitForm(SplitField),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    cursor: usize,
    focus: Focus,
    help_visible: bool,
    status_deadline: Option<Instant>,
}

pub fn run_app(state: &mut AppState) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let mut result = Ok(());
    loop {
        expire_status(state, &mut view_data, Instant::now());

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) => {
                if handle_key_event(state, &mut view_data, key, Instant::now()) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn expire_status(state: &mut AppState, view_data: &mut ViewData, now: Instant) {
    if let Some(deadline) = view_data.status_deadline
        && now >= deadline
    {
        view_data.status_deadline = None;
        dispatch(state, view_data, AppCommand::ClearStatus, now);
    }
}

fn dispatch(
    state: &mut AppState,
    view_data: &mut ViewData,
    command: AppCommand,
    now: Instant,
) -> Vec<AppEvent> {
    let events = match state.dispatch(command) {
        Ok(events) => events,
        Err(error) => {
            warn!("command failed: {error}");
            state.status_line = Some(error.to_string());
            view_data.status_deadline = Some(now + STATUS_TTL);
            return Vec::new();
        }
    };
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_deadline = Some(now + STATUS_TTL);
    }
    normalize_focus(state, view_data);
    events
}

fn normalize_focus(state: &AppState, view_data: &mut ViewData) {
    let valid = match view_data.focus {
        Focus::List => true,
        Focus::AddForm(_) => state.add_panel_open(),
        Focus::SplitForm(_) => state.selection() != Selection::None,
    };
    if !valid {
        view_data.focus = Focus::List;
    }
    let len = state.list_friends().len();
    if view_data.cursor >= len {
        view_data.cursor = len.saturating_sub(1);
    }
}

fn handle_key_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    key: KeyEvent,
    now: Instant,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    match view_data.focus {
        Focus::List => handle_list_key(state, view_data, key, now),
        Focus::AddForm(field) => {
            handle_add_form_key(state, view_data, field, key, now);
            false
        }
        Focus::SplitForm(field) => {
            handle_split_form_key(state, view_data, field, key, now);
            false
        }
    }
}

fn handle_list_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    key: KeyEvent,
    now: Instant,
) -> bool {
    let len = state.list_friends().len();
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Char('j') | KeyCode::Down => {
            if view_data.cursor + 1 < len {
                view_data.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.cursor = view_data.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => view_data.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => view_data.cursor = len.saturating_sub(1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let Some(friend_id) = state.list_friends().get(view_data.cursor).map(|f| f.id) else {
                return false;
            };
            dispatch(state, view_data, AppCommand::SelectFriend(friend_id), now);
            if state.selection().is_selected(friend_id) {
                view_data.focus = Focus::SplitForm(SplitField::Bill);
            }
        }
        KeyCode::Char('a') => {
            dispatch(state, view_data, AppCommand::ToggleAddPanel, now);
            if state.add_panel_open() {
                view_data.focus = Focus::AddForm(AddField::Name);
            }
        }
        KeyCode::Tab => {
            if state.selection() != Selection::None {
                view_data.focus = Focus::SplitForm(SplitField::Bill);
            } else if state.add_panel_open() {
                view_data.focus = Focus::AddForm(AddField::Name);
            }
        }
        _ => {}
    }
    false
}

fn handle_add_form_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    field: AddField,
    key: KeyEvent,
    now: Instant,
) {
    match key.code {
        KeyCode::Esc => {
            dispatch(state, view_data, AppCommand::ToggleAddPanel, now);
            view_data.focus = Focus::List;
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            view_data.focus = Focus::AddForm(field.next());
        }
        KeyCode::Enter => {
            let events = dispatch(state, view_data, AppCommand::SubmitAddForm, now);
            if events
                .iter()
                .any(|event| matches!(event, AppEvent::FriendAdded(_)))
            {
                view_data.cursor = state.list_friends().len().saturating_sub(1);
                view_data.focus = Focus::List;
            }
        }
        KeyCode::Backspace => {
            add_field_text(state, field).pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            add_field_text(state, field).push(c);
        }
        _ => {}
    }
}

fn add_field_text(state: &mut AppState, field: AddField) -> &mut String {
    match field {
        AddField::Name => &mut state.add_form.name,
        AddField::ImageRef => &mut state.add_form.image_ref,
    }
}

fn handle_split_form_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    field: SplitField,
    key: KeyEvent,
    now: Instant,
) {
    match key.code {
        KeyCode::Esc => {
            dispatch(state, view_data, AppCommand::ClearSelection, now);
            view_data.focus = Focus::List;
        }
        KeyCode::Tab | KeyCode::Down => view_data.focus = Focus::SplitForm(field.rotate(1)),
        KeyCode::BackTab | KeyCode::Up => view_data.focus = Focus::SplitForm(field.rotate(-1)),
        KeyCode::Enter => {
            let events = dispatch(state, view_data, AppCommand::SubmitSplitForm, now);
            if let Some(AppEvent::Rejected(reason)) = events.first() {
                debug!("split not submitted: {reason}");
            }
        }
        KeyCode::Backspace => edit_amount(&mut state.split_form, field, pop_digit),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let digit = i64::from(c.to_digit(10).unwrap_or(0));
            edit_amount(&mut state.split_form, field, |value| push_digit(value, digit));
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('p')
            if field == SplitField::Payer =>
        {
            let payer = state.split_form.payer().other();
            state.split_form.set_payer(payer);
        }
        KeyCode::Char('u') if field == SplitField::Payer => {
            state.split_form.set_payer(Payer::User);
        }
        KeyCode::Char('f') if field == SplitField::Payer => {
            state.split_form.set_payer(Payer::Friend);
        }
        _ => {}
    }
}

fn edit_amount(
    form: &mut SplitBillForm,
    field: SplitField,
    edit: impl FnOnce(Option<i64>) -> Option<i64>,
) {
    match field {
        SplitField::Bill => form.set_bill(edit(form.bill())),
        SplitField::MyExpense => {
            form.set_my_expense(edit(form.my_expense()));
        }
        SplitField::Payer => {}
    }
}

fn push_digit(value: Option<i64>, digit: i64) -> Option<i64> {
    value
        .unwrap_or(0)
        .checked_mul(10)
        .and_then(|shifted| shifted.checked_add(digit))
        .or(value)
}

fn pop_digit(value: Option<i64>) -> Option<i64> {
    match value {
        Some(amount) if amount.abs() >= 10 => Some(amount / 10),
        _ => None,
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let add_height = if state.add_panel_open() { 6 } else { 0 };
    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(add_height),
            Constraint::Length(1),
        ])
        .split(columns[0]);

    let friends = Paragraph::new(friend_list_lines(state, view_data))
        .block(Block::default().title("splitbill").borders(Borders::ALL));
    frame.render_widget(friends, sidebar[0]);

    if state.add_panel_open() {
        let add_panel = Paragraph::new(render_add_panel_text(state, view_data)).block(
            Block::default()
                .title("add friend")
                .borders(Borders::ALL)
                .border_style(focus_style(matches!(view_data.focus, Focus::AddForm(_)))),
        );
        frame.render_widget(add_panel, sidebar[1]);
    }

    let add_hint = Paragraph::new(format!("[a] {}", add_button_label(state)))
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(add_hint, sidebar[2]);

    if let Some(friend) = state.selected_friend() {
        let split = Paragraph::new(render_split_panel_text(
            friend,
            &state.split_form,
            view_data.focus,
        ))
        .block(
            Block::default()
                .title(format!("split a bill with {}", friend.name))
                .borders(Borders::ALL)
                .border_style(focus_style(matches!(view_data.focus, Focus::SplitForm(_)))),
        );
        frame.render_widget(split, columns[1]);
    }

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, rows[1]);

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn friend_list_lines(state: &AppState, view_data: &ViewData) -> Vec<Line<'static>> {
    if state.list_friends().is_empty() {
        return vec![Line::from("no friends yet -- press a to add one")];
    }
    state
        .list_friends()
        .iter()
        .enumerate()
        .map(|(index, friend)| {
            let selected = state.selection().is_selected(friend.id);
            let at_cursor = index == view_data.cursor && view_data.focus == Focus::List;
            let mut name_style = Style::default().add_modifier(Modifier::BOLD);
            if selected {
                name_style = name_style.fg(Color::Cyan);
            }
            Line::from(vec![
                Span::raw(if at_cursor {
                    format!("{CURSOR_MARK} ")
                } else {
                    "  ".to_owned()
                }),
                Span::styled(friend.name.clone(), name_style),
                Span::raw("  "),
                Span::styled(friend.standing_label(), standing_style(friend.standing())),
                Span::raw(format!("  [{}]", select_button_label(selected))),
            ])
        })
        .collect()
}

fn standing_style(standing: Standing) -> Style {
    match standing {
        Standing::YouOwe(_) => Style::default().fg(Color::Red),
        Standing::OwesYou(_) => Style::default().fg(Color::Green),
        Standing::Even => Style::default(),
    }
}

fn select_button_label(selected: bool) -> &'static str {
    if selected { "Close" } else { "Select" }
}

fn add_button_label(state: &AppState) -> &'static str {
    if state.add_panel_open() {
        "Close"
    } else {
        "Add friend"
    }
}

fn field_marker(active: bool) -> &'static str {
    if active { CURSOR_MARK } else { " " }
}

fn render_add_panel_text(state: &AppState, view_data: &ViewData) -> String {
    let active = match view_data.focus {
        Focus::AddForm(field) => Some(field),
        _ => None,
    };
    [
        format!(
            "{} Friend name: {}",
            field_marker(active == Some(AddField::Name)),
            state.add_form.name
        ),
        format!(
            "{} Image URL:   {}",
            field_marker(active == Some(AddField::ImageRef)),
            state.add_form.image_ref
        ),
        String::new(),
        "enter add | esc close".to_owned(),
    ]
    .join("\n")
}

fn format_amount(value: Option<i64>) -> String {
    value.map(|amount| amount.to_string()).unwrap_or_default()
}

fn payer_label(payer: Payer, friend: &Friend) -> String {
    match payer {
        Payer::User => "You".to_owned(),
        Payer::Friend => friend.name.clone(),
    }
}

fn render_split_panel_text(friend: &Friend, form: &SplitBillForm, focus: Focus) -> String {
    let active = match focus {
        Focus::SplitForm(field) => Some(field),
        _ => None,
    };
    [
        format!(
            "{} Bill value:     {}",
            field_marker(active == Some(SplitField::Bill)),
            format_amount(form.bill())
        ),
        format!(
            "{} Your expense:   {}",
            field_marker(active == Some(SplitField::MyExpense)),
            format_amount(form.my_expense())
        ),
        format!(
            "  {}'s expense: {}",
            friend.name,
            format_amount(form.friend_expense())
        ),
        format!(
            "{} Who is paying:  {}",
            field_marker(active == Some(SplitField::Payer)),
            payer_label(form.payer(), friend)
        ),
        String::new(),
        "enter split bill | esc close".to_owned(),
    ]
    .join("\n")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let hints = match view_data.focus {
        Focus::List => "j/k move | enter select | a add friend | tab panel | ? help | q quit",
        Focus::AddForm(_) => "type to edit | tab field | enter add | esc close",
        Focus::SplitForm(SplitField::Payer) => {
            "space/p switch payer | u you | f friend | enter split | esc close"
        }
        Focus::SplitForm(_) => "digits to edit | tab field | enter split | esc close",
    };
    match &state.status_line {
        Some(status) => format!("{status} | {hints}"),
        None => hints.to_owned(),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
list: j/k up/down | g/G first/last | enter/space select or close | a add friend | tab focus panel\n\
add friend: type to edit | tab switch field | enter add | esc close panel\n\
split bill: digits edit amount | backspace delete | tab/shift+tab field | space/p switch payer | enter split | esc close"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
