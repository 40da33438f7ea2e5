// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use roster_app::{
    Activation, AppCommand, AppState, Column, DetailLoader, GridState, Post, Record, Screen,
    SortDirection, Step, UserId, ViewStatus,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const SORT_ASC_MARK: &str = "▲";
const SORT_DESC_MARK: &str = "▼";
const FILTER_TITLE: &str = "filter by name, username, email or company";
const FILTER_CURSOR: &str = "▏";
const BACK_LINK: &str = "← User list";
const COLUMN_SPACING: u16 = 1;
const HEADER_ROWS: u16 = 1;

/// Results delivered back to the UI loop from background work.
#[derive(Debug)]
pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    UsersFetched(Result<Vec<Record>>),
    UserFetched {
        activation: Activation,
        outcome: Result<Option<Record>>,
    },
    PostsFetched {
        activation: Activation,
        outcome: Result<Vec<Post>>,
    },
}

/// Data access for the UI. The `spawn_*` defaults run the fetch on the
/// calling thread; runtimes backed by a network client override them to
/// fetch in the background and report through `tx`.
pub trait AppRuntime {
    fn load_users(&mut self) -> Result<Vec<Record>>;
    fn load_user(&mut self, id: UserId) -> Result<Option<Record>>;
    fn load_posts(&mut self, id: UserId) -> Result<Vec<Post>>;

    fn spawn_users_fetch(&mut self, tx: Sender<InternalEvent>) -> Result<()> {
        let outcome = self.load_users();
        deliver(&tx, InternalEvent::UsersFetched(outcome))
    }

    fn spawn_user_fetch(&mut self, activation: Activation, tx: Sender<InternalEvent>) -> Result<()> {
        let outcome = self.load_user(activation.id());
        deliver(&tx, InternalEvent::UserFetched { activation, outcome })
    }

    fn spawn_posts_fetch(
        &mut self,
        activation: Activation,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let outcome = self.load_posts(activation.id());
        deliver(&tx, InternalEvent::PostsFetched { activation, outcome })
    }
}

fn deliver(tx: &Sender<InternalEvent>, event: InternalEvent) -> Result<()> {
    tx.send(event)
        .map_err(|_| anyhow!("internal event channel closed"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum UsersLoad {
    #[default]
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ListUiState {
    selected_row: usize,
    selected_col: usize,
    filter_focus: bool,
}

#[derive(Debug, Default)]
struct ViewData {
    grid: GridState,
    users: UsersLoad,
    list: ListUiState,
    detail: DetailLoader,
    detail_scroll: u16,
    status_token: u64,
    // Last drawn terminal area; mouse hits are resolved against it.
    viewport: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListHit {
    Filter,
    Header(Column),
    Row(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListLayout {
    filter: Rect,
    table: Rect,
    status: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DetailLayout {
    back: Rect,
    body: Rect,
    status: Rect,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    request_users(state, runtime, &mut view_data, &internal_tx);

    let mut result = Ok(());
    loop {
        process_internal_events(state, runtime, &mut view_data, &internal_tx, &internal_rx);

        match terminal.size() {
            Ok(size) => view_data.viewport = Rect::new(0, 0, size.width, size.height),
            Err(error) => {
                result = Err(error).context("read terminal size");
                break;
            }
        }
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
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(Event::Mouse(mouse)) => {
                    handle_mouse_event(state, runtime, &mut view_data, &internal_tx, mouse);
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    result
}

fn request_users<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
) {
    view_data.users = UsersLoad::Pending;
    if let Err(error) = runtime.spawn_users_fetch(tx.clone()) {
        users_failed(state, view_data, &error);
    }
}

fn users_failed(state: &mut AppState, view_data: &mut ViewData, error: &anyhow::Error) {
    warn!(error = %format!("{error:#}"), "fetch users failed");
    view_data.users = UsersLoad::Failed;
    state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
}

fn process_internal_events<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        handle_internal_event(state, runtime, view_data, tx, event);
    }
}

fn handle_internal_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    event: InternalEvent,
) {
    match event {
        InternalEvent::ClearStatus { token } if token == view_data.status_token => {
            state.dispatch(AppCommand::ClearStatus);
        }
        InternalEvent::ClearStatus { .. } => {}
        InternalEvent::UsersFetched(Ok(records)) => {
            let count = records.len();
            view_data.grid.load(records);
            view_data.users = UsersLoad::Loaded;
            clamp_list_cursor(view_data);
            emit_status(state, view_data, tx, format!("loaded {count} users"));
        }
        InternalEvent::UsersFetched(Err(error)) => users_failed(state, view_data, &error),
        InternalEvent::UserFetched {
            activation,
            outcome,
        } => {
            if view_data.detail.commit_user(&activation, outcome) == Step::FetchPosts
                && let Err(error) = runtime.spawn_posts_fetch(activation, tx.clone())
            {
                view_data.detail.commit_posts(&activation, Err(error));
            }
        }
        InternalEvent::PostsFetched {
            activation,
            outcome,
        } => {
            view_data.detail.commit_posts(&activation, outcome);
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match state.screen {
        Screen::List => handle_list_key(state, runtime, view_data, internal_tx, key),
        Screen::Detail(_) => handle_detail_key(state, view_data, key),
    }
}

fn handle_list_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if view_data.list.filter_focus {
        handle_filter_key(view_data, key);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => view_data.list.filter_focus = true,
        KeyCode::Char('j') | KeyCode::Down => move_row(view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_row(view_data, -1),
        KeyCode::Char('h') | KeyCode::Left => move_col(view_data, -1),
        KeyCode::Char('l') | KeyCode::Right => move_col(view_data, 1),
        KeyCode::Char('g') | KeyCode::Home => view_data.list.selected_row = 0,
        KeyCode::Char('G') | KeyCode::End => {
            view_data.list.selected_row = view_data.grid.visible_count().saturating_sub(1);
        }
        KeyCode::Char('s') => {
            let column = selected_column(view_data);
            sort_by_column(state, view_data, internal_tx, column);
        }
        KeyCode::Char('r') => {
            let column = selected_column(view_data);
            reset_grid(state, view_data, internal_tx, column);
        }
        KeyCode::Enter => open_selected(state, runtime, view_data, internal_tx),
        _ => {}
    }
    false
}

fn handle_filter_key(view_data: &mut ViewData, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => view_data.list.filter_focus = false,
        KeyCode::Backspace => {
            let mut text = view_data.grid.filter_text().to_owned();
            text.pop();
            view_data.grid.set_filter(text);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.grid.set_filter(String::new());
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut text = view_data.grid.filter_text().to_owned();
            text.push(ch);
            view_data.grid.set_filter(text);
        }
        _ => {}
    }
    clamp_list_cursor(view_data);
}

fn handle_detail_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') | KeyCode::Left => {
            back_to_list(state, view_data);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.detail_scroll = view_data.detail_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.detail_scroll = view_data.detail_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => view_data.detail_scroll = 0,
        _ => {}
    }
    false
}

fn handle_mouse_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mouse: MouseEvent,
) {
    if let Screen::Detail(_) = state.screen {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left)
                if back_link_hit(view_data, mouse.column, mouse.row) =>
            {
                back_to_list(state, view_data);
            }
            MouseEventKind::ScrollDown => {
                view_data.detail_scroll = view_data.detail_scroll.saturating_add(1);
            }
            MouseEventKind::ScrollUp => {
                view_data.detail_scroll = view_data.detail_scroll.saturating_sub(1);
            }
            _ => {}
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(button) => {
            let Some(hit) = list_hit(view_data, mouse.column, mouse.row) else {
                return;
            };
            match (hit, button) {
                (ListHit::Header(column), MouseButton::Left) => {
                    select_column(view_data, column);
                    sort_by_column(state, view_data, internal_tx, column);
                }
                (ListHit::Header(column), MouseButton::Right) => {
                    select_column(view_data, column);
                    reset_grid(state, view_data, internal_tx, column);
                }
                (ListHit::Row(index), MouseButton::Left) => {
                    view_data.list.selected_row = index;
                    open_selected(state, runtime, view_data, internal_tx);
                }
                (ListHit::Filter, MouseButton::Left) => view_data.list.filter_focus = true,
                _ => {}
            }
        }
        MouseEventKind::ScrollDown => move_row(view_data, 1),
        MouseEventKind::ScrollUp => move_row(view_data, -1),
        _ => {}
    }
}

fn sort_by_column(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    column: Column,
) {
    view_data.grid.sort_column(column);
    let direction = view_data
        .grid
        .sort_direction_for(column)
        .unwrap_or_default();
    emit_status(
        state,
        view_data,
        internal_tx,
        format!("sort {} {}", column.label(), direction.as_str()),
    );
}

fn reset_grid(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    column: Column,
) {
    view_data.grid.reset_column(column);
    view_data.list.filter_focus = false;
    clamp_list_cursor(view_data);
    emit_status(state, view_data, internal_tx, "sort and filter cleared");
}

fn open_selected<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(record) = selected_record(view_data) else {
        return;
    };
    let Some(id) = record.id() else {
        emit_status(state, view_data, internal_tx, "selected row has no user id");
        return;
    };
    open_detail(state, runtime, view_data, internal_tx, id);
}

fn open_detail<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    id: UserId,
) {
    if state.dispatch(AppCommand::OpenDetail(id)).is_empty() {
        return;
    }
    view_data.detail_scroll = 0;
    let activation = view_data.detail.activate(id);
    if let Err(error) = runtime.spawn_user_fetch(activation, internal_tx.clone()) {
        view_data.detail.commit_user(&activation, Err(error));
    }
}

fn back_to_list(state: &mut AppState, view_data: &mut ViewData) {
    state.dispatch(AppCommand::BackToList);
    clamp_list_cursor(view_data);
    debug!("back to user list");
}

fn move_row(view_data: &mut ViewData, delta: isize) {
    let row_count = view_data.grid.visible_count();
    if row_count == 0 {
        view_data.list.selected_row = 0;
        return;
    }

    let current = view_data.list.selected_row;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    view_data.list.selected_row = next.min(row_count.saturating_sub(1));
}

fn move_col(view_data: &mut ViewData, delta: isize) {
    let current = view_data.list.selected_col;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    view_data.list.selected_col = next.min(Column::ALL.len() - 1);
}

fn select_column(view_data: &mut ViewData, column: Column) {
    if let Some(index) = Column::ALL.iter().position(|candidate| *candidate == column) {
        view_data.list.selected_col = index;
    }
}

fn selected_column(view_data: &ViewData) -> Column {
    Column::ALL[view_data.list.selected_col.min(Column::ALL.len() - 1)]
}

fn selected_record(view_data: &ViewData) -> Option<&Record> {
    view_data
        .grid
        .visible_records()
        .get(view_data.list.selected_row)
        .copied()
}

fn clamp_list_cursor(view_data: &mut ViewData) {
    let row_count = view_data.grid.visible_count();
    view_data.list.selected_row = view_data
        .list
        .selected_row
        .min(row_count.saturating_sub(1));
    view_data.list.selected_col = view_data.list.selected_col.min(Column::ALL.len() - 1);
}

fn list_layout(area: Rect) -> ListLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    ListLayout {
        filter: chunks[0],
        table: chunks[1],
        status: chunks[2],
    }
}

fn table_block(title: String) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(title)
}

fn table_inner(table: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(table)
}

fn column_widths() -> [Constraint; 6] {
    [Constraint::Ratio(1, 6); 6]
}

// Mirrors the column placement the table widget computes for the same
// widths, spacing and flex.
fn column_rects(inner: Rect) -> Vec<Rect> {
    Layout::horizontal(column_widths())
        .flex(Flex::Start)
        .spacing(COLUMN_SPACING)
        .split(inner)
        .to_vec()
}

fn body_rows(inner: Rect) -> usize {
    usize::from(inner.height.saturating_sub(HEADER_ROWS))
}

/// First visible row so the selection stays on screen.
fn row_offset(selected: usize, body_rows: usize) -> usize {
    if body_rows == 0 {
        return selected;
    }
    selected.saturating_sub(body_rows - 1)
}

fn list_hit(view_data: &ViewData, x: u16, y: u16) -> Option<ListHit> {
    let position = Position { x, y };
    let layout = list_layout(view_data.viewport);
    if layout.filter.contains(position) {
        return Some(ListHit::Filter);
    }

    let inner = table_inner(layout.table);
    if !inner.contains(position) {
        return None;
    }
    if y < inner.y + HEADER_ROWS {
        return column_rects(inner)
            .iter()
            .position(|rect| rect.contains(position))
            .map(|index| ListHit::Header(Column::ALL[index]));
    }

    let body_row = usize::from(y - inner.y - HEADER_ROWS);
    let index = row_offset(view_data.list.selected_row, body_rows(inner)) + body_row;
    (index < view_data.grid.visible_count()).then_some(ListHit::Row(index))
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    match state.screen {
        Screen::List => render_list(frame, state, view_data),
        Screen::Detail(_) => render_detail(frame, state, view_data),
    }
}

fn render_list(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = list_layout(frame.area());

    let filter_style = if view_data.list.filter_focus {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let filter = Paragraph::new(filter_line(view_data)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(filter_style)
            .title(FILTER_TITLE),
    );
    frame.render_widget(filter, layout.filter);

    render_table(frame, layout.table, view_data);
    frame.render_widget(Paragraph::new(status_text(state, view_data)), layout.status);
}

fn filter_line(view_data: &ViewData) -> String {
    let text = view_data.grid.filter_text();
    if view_data.list.filter_focus {
        format!("{text}{FILTER_CURSOR}")
    } else {
        text.to_owned()
    }
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let visible = view_data.grid.visible_records();
    let inner = table_inner(area);
    let capacity = body_rows(inner);
    let offset = row_offset(view_data.list.selected_row, capacity);
    let selected_col = view_data.list.selected_col;

    let header_cells = Column::ALL.iter().enumerate().map(|(index, column)| {
        let mut style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        if index == selected_col {
            style = style.fg(Color::Cyan);
        }
        Cell::from(header_label(&view_data.grid, *column)).style(style)
    });
    let header = Row::new(header_cells);

    let rows = visible
        .iter()
        .enumerate()
        .skip(offset)
        .take(capacity)
        .map(|(row_index, record)| {
            let selected_row = row_index == view_data.list.selected_row;
            let cells = Column::ALL
                .iter()
                .enumerate()
                .map(|(col_index, column)| {
                    let mut style = Style::default();
                    if selected_row {
                        style = style.bg(Color::DarkGray);
                        if col_index == selected_col {
                            style = style
                                .fg(Color::Black)
                                .bg(Color::Cyan)
                                .add_modifier(Modifier::BOLD);
                        }
                    }
                    Cell::from(record.text(column.path_str())).style(style)
                })
                .collect::<Vec<_>>();
            Row::new(cells)
        })
        .collect::<Vec<_>>();

    let table = Table::new(rows, column_widths())
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(table_block(list_title(view_data)));
    frame.render_widget(table, area);
}

fn header_label(grid: &GridState, column: Column) -> String {
    let mut label = column.label().to_owned();
    if let Some(direction) = grid.sort_direction_for(column) {
        label.push(' ');
        label.push_str(match direction {
            SortDirection::Asc => SORT_ASC_MARK,
            SortDirection::Desc => SORT_DESC_MARK,
        });
    }
    label
}

fn list_title(view_data: &ViewData) -> String {
    match view_data.users {
        UsersLoad::Pending => "User list (loading...)".to_owned(),
        UsersLoad::Failed => "User list (unavailable)".to_owned(),
        UsersLoad::Loaded => format!(
            "User list ({}/{})",
            view_data.grid.visible_count(),
            view_data.grid.len()
        ),
    }
}

fn detail_layout(area: Rect) -> DetailLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    DetailLayout {
        back: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

/// True when the click lands on the breadcrumb text itself.
fn back_link_hit(view_data: &ViewData, column: u16, row: u16) -> bool {
    let back = detail_layout(view_data.viewport).back;
    let width = u16::try_from(BACK_LINK.chars().count()).unwrap_or(u16::MAX);
    let link = Rect {
        width: back.width.min(width),
        ..back
    };
    link.contains(Position::new(column, row))
}

fn render_detail(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = detail_layout(frame.area());

    frame.render_widget(
        Paragraph::new(BACK_LINK).style(Style::default().fg(Color::Cyan)),
        layout.back,
    );

    let body = Paragraph::new(render_detail_text(&view_data.detail))
        .wrap(Wrap { trim: false })
        .scroll((view_data.detail_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(detail_title(&view_data.detail)),
        );
    frame.render_widget(body, layout.body);
    frame.render_widget(Paragraph::new(status_text(state, view_data)), layout.status);
}

fn detail_title(loader: &DetailLoader) -> String {
    match loader.ready() {
        Some((user, _)) => user.text("name"),
        None => "User".to_owned(),
    }
}

fn render_detail_text(loader: &DetailLoader) -> String {
    match loader.status() {
        ViewStatus::Loading => "Loading...".to_owned(),
        ViewStatus::NotFound => "User not found.".to_owned(),
        ViewStatus::Ready => match loader.ready() {
            Some((user, posts)) => render_profile_text(user, posts),
            None => "User not found.".to_owned(),
        },
    }
}

fn render_profile_text(user: &Record, posts: &[Post]) -> String {
    let mut out = String::new();
    for (label, value) in profile_rows(user) {
        out.push_str(&format!("{label:<14} {value}\n"));
    }

    out.push_str("\nPosts\n");
    if posts.is_empty() {
        out.push_str("No posts available.\n");
        return out;
    }
    for post in posts {
        out.push_str(&format!("\n✉ {}\n{}\n", post.title, post.body));
    }
    out
}

fn profile_rows(user: &Record) -> Vec<(&'static str, String)> {
    vec![
        ("Username", user.text("username")),
        ("Email", user.text("email")),
        ("Phone", user.text("phone")),
        ("Website", user.text("website")),
        (
            "Address",
            joined(
                user,
                &[
                    "address.suite",
                    "address.street",
                    "address.city",
                    "address.zipcode",
                ],
            ),
        ),
        (
            "Geo",
            joined(user, &["address.geo.lat", "address.geo.lng"]),
        ),
        ("Company", user.text("company.name")),
        ("Catch phrase", user.text("company.catchPhrase")),
        ("Sector", user.text("company.bs")),
    ]
}

fn joined(user: &Record, paths: &[&str]) -> String {
    paths
        .iter()
        .map(|path| user.text(path))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let hints = match state.screen {
        Screen::List if view_data.list.filter_focus => {
            "FILTER | type to filter | enter/esc done | ctrl+u clear"
        }
        Screen::List => {
            "j/k/h/l g/G | s sort | r reset | / filter | enter open | click header sort, right-click reset | q"
        }
        Screen::Detail(_) => "esc back | j/k scroll | q",
    };
    match &state.status_line {
        Some(status) => format!("{status} | {hints}"),
        None => hints.to_owned(),
    }
}
