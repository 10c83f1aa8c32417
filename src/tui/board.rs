//! Kanban board interface.
//!
//! Tasks are laid out in one column per status lane. Each lane shows its
//! reveal window; cards are picked up with the keyboard, carried to another
//! slot and dropped, and the resulting move goes to the task API.

use std::io;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::api::{fetch_tasks, screen_statuses, TaskApi};
use crate::board::{Anchor, BoardEvent, BoardState, BoardView, DragEnd, LanePosition};
use crate::config::BoardConfig;
use crate::fields::*;
use crate::task::{format_due_relative, truncate, Task, TaskId};
use crate::tui::colors::{lane_color, priority_color, AMBER};
use crate::tui::enums::{BoardMode, DragCursor, MenuItem, TaskMenu};

const CARD_HEIGHT: usize = 5;
const ARCHIVE_COLUMNS: usize = 3;
const ARCHIVE_CARD_HEIGHT: usize = 4;

/// Main board application state
pub struct BoardApp<A: TaskApi> {
    api: A,
    config: BoardConfig,
    state: BoardState,
    mode: BoardMode,
    selected_lane: usize,
    selected_card: usize,
    archive_selected: usize,
    drag: Option<DragCursor>,
    menu: Option<TaskMenu>,
    detail: Option<TaskId>,
    // Mode to go back to when the detail popup closes.
    detail_return: BoardMode,
    status_message: String,
    // Area the lanes were last drawn into, used to anchor card menus.
    board_area: Rect,
    quit: bool,
}

impl<A: TaskApi> BoardApp<A> {
    /// Create the board and do the initial fetch. A failed fetch leaves the
    /// board empty with the error in the status bar.
    pub fn new(api: A, config: BoardConfig) -> Self {
        let state = BoardState::new(&config);
        let mut app = BoardApp {
            api,
            config,
            state,
            mode: BoardMode::Browse,
            selected_lane: 0,
            selected_card: 0,
            archive_selected: 0,
            drag: None,
            menu: None,
            detail: None,
            detail_return: BoardMode::Browse,
            status_message: String::new(),
            board_area: Rect::default(),
            quit: false,
        };
        app.refresh();
        app
    }

    fn selected_status(&self) -> Status {
        Status::from_index(self.selected_lane).unwrap_or(Status::Todo)
    }

    /// Refetch the collection; on failure the previous one stays on screen.
    fn refresh(&mut self) {
        match fetch_tasks(&self.api, self.config.unknown_status) {
            Ok(tasks) => {
                self.state.replace_tasks(tasks);
                self.clamp_selection();
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetch failed");
                self.set_status_message(format!("Error loading tasks: {e}"));
            }
        }
    }

    /// Task under the cursor and its board position.
    fn selected_task(&self) -> Option<(TaskId, LanePosition)> {
        let view = self.state.view();
        let status = self.selected_status();
        let window = self.state.window(&view, status);
        window
            .visible
            .get(self.selected_card)
            .map(|t| (t.id.clone(), LanePosition::new(status, self.selected_card)))
    }

    fn visible_len(&self, status: Status) -> usize {
        let view = self.state.view();
        self.state.window(&view, status).visible.len()
    }

    /// Ensure selected lane and card indices are valid
    fn clamp_selection(&mut self) {
        if self.selected_lane >= Status::LANES.len() {
            self.selected_lane = 0;
        }
        let len = self.visible_len(self.selected_status());
        if len == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }

        let archived = self.state.view().archived.len();
        if self.archive_selected >= archived {
            self.archive_selected = archived.saturating_sub(1);
        }
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Screen cell of the selected card, from the last drawn layout.
    fn card_anchor(&self) -> Anchor {
        let lane_width = self.board_area.width / Status::LANES.len() as u16;
        let visible_cards = (self.board_area.height.saturating_sub(2) as usize / CARD_HEIGHT).max(1);
        let row = self.selected_card - scroll_offset(self.selected_card, visible_cards);
        Anchor {
            x: self.board_area.x + lane_width * self.selected_lane as u16 + 2,
            y: self.board_area.y + 1 + (row * CARD_HEIGHT) as u16 + 1,
        }
    }

    /// Handle the board's own intents.
    fn dispatch(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::DragEnd(drag) => self.finish_drag(drag),
            BoardEvent::OpenTask(task_id) => {
                self.detail_return = if self.state.archive().is_shown() {
                    BoardMode::Archive
                } else {
                    BoardMode::Browse
                };
                self.detail = Some(task_id);
                self.mode = BoardMode::Detail;
            }
            BoardEvent::TaskMenu { task_id, anchor } => {
                if let Some((_, source)) = self.selected_task() {
                    self.menu = Some(TaskMenu::new(task_id, source, anchor));
                    self.mode = BoardMode::Menu;
                }
            }
        }
    }

    /// Reconcile a finished drag, apply it optimistically and persist it.
    /// A failed persist puts the card back where it was.
    fn finish_drag(&mut self, drag: DragEnd) {
        self.mode = BoardMode::Browse;
        let pending = match self.state.drag_end(&drag) {
            Ok(Some(pending)) => pending,
            Ok(None) => {
                self.set_status_message("Drag cancelled".to_string());
                return;
            }
            Err(e) => {
                self.set_status_message(format!("Error moving task: {e}"));
                return;
            }
        };

        let intent = pending.intent.clone();
        let policy = self.config.unknown_status;
        let result = self
            .api
            .update_task_status(&intent)
            .and_then(|tasks| screen_statuses(tasks, policy));

        match self.state.settle(pending, result) {
            Ok(()) => {
                self.selected_lane = intent.new_status.index();
                let found = {
                    let view = self.state.view();
                    let window = self.state.window(&view, intent.new_status);
                    window.visible.iter().position(|t| t.id == intent.task_id)
                };
                match found {
                    Some(i) => self.selected_card = i,
                    None => self.clamp_selection(),
                }
                self.set_status_message(format!("Moved task to {}", intent.new_status.title()));
            }
            Err(e) => {
                self.clamp_selection();
                self.set_status_message(format!("Move failed, card restored: {e}"));
            }
        }
    }

    /// Process one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.clear_status_message();
        match self.mode {
            BoardMode::Browse => self.handle_browse_key(key),
            BoardMode::Drag => self.handle_drag_key(key),
            BoardMode::Detail => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.detail = None;
                    self.mode = self.detail_return;
                }
            }
            BoardMode::Menu => self.handle_menu_key(key),
            BoardMode::Archive => self.handle_archive_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,

            KeyCode::Left => {
                if self.selected_lane > 0 {
                    self.selected_lane -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                if self.selected_lane < Status::LANES.len() - 1 {
                    self.selected_lane += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = self.visible_len(self.selected_status());
                if len > 0 && self.selected_card < len - 1 {
                    self.selected_card += 1;
                }
            }

            KeyCode::Enter => {
                if let Some((task_id, _)) = self.selected_task() {
                    self.dispatch(BoardEvent::OpenTask(task_id));
                }
            }
            KeyCode::Char('m') => {
                if let Some((task_id, _)) = self.selected_task() {
                    let anchor = self.card_anchor();
                    self.dispatch(BoardEvent::TaskMenu { task_id, anchor });
                }
            }
            KeyCode::Char(' ') => {
                if let Some((task_id, source)) = self.selected_task() {
                    self.drag = Some(DragCursor { task_id, source, target: source });
                    self.mode = BoardMode::Drag;
                    self.set_status_message("Dragging: arrows to move, Space to drop, Esc to cancel".to_string());
                }
            }

            KeyCode::Char('n') => {
                let status = self.selected_status();
                let has_more = {
                    let view = self.state.view();
                    self.state.window(&view, status).has_more
                };
                if !has_more {
                    self.set_status_message(format!("All {} cards are shown", status.title()));
                } else if !self.state.reveal_mut().request_more(status, Instant::now()) {
                    self.set_status_message("Still loading".to_string());
                }
            }
            KeyCode::Char('a') => {
                if self.state.archive_mut().toggle() {
                    self.archive_selected = 0;
                    self.mode = BoardMode::Archive;
                }
            }
            KeyCode::Char('r') => {
                self.refresh();
                if self.status_message.is_empty() {
                    self.set_status_message(format!("Loaded {} tasks", self.state.tasks().len()));
                }
            }
            KeyCode::Char('h') => {
                self.set_status_message(
                    "Help: Enter: Open | m: Menu | Space: Drag | n: Show more | a: Archive | r: Refresh | q: Quit"
                        .to_string(),
                );
            }
            _ => {}
        }
    }

    fn handle_drag_key(&mut self, key: KeyEvent) {
        let Some(mut cursor) = self.drag.take() else {
            self.mode = BoardMode::Browse;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.dispatch(BoardEvent::DragEnd(DragEnd {
                    task_id: cursor.task_id,
                    source: cursor.source,
                    destination: None,
                }));
                return;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.dispatch(BoardEvent::DragEnd(DragEnd {
                    task_id: cursor.task_id,
                    source: cursor.source,
                    destination: Some(cursor.target),
                }));
                return;
            }
            KeyCode::Left => {
                if let Some(s) = cursor.target.lane.index().checked_sub(1).and_then(Status::from_index) {
                    cursor.target.lane = s;
                }
            }
            KeyCode::Right => {
                if let Some(s) = Status::from_index(cursor.target.lane.index() + 1) {
                    cursor.target.lane = s;
                }
            }
            KeyCode::Up => {
                cursor.target.index = cursor.target.index.saturating_sub(1);
            }
            KeyCode::Down => {
                cursor.target.index += 1;
            }
            _ => {}
        }
        // Same lane: the card's own slot is taken. Other lanes: one past the end.
        let len = self.visible_len(cursor.target.lane);
        let max = if cursor.target.lane == cursor.source.lane { len.saturating_sub(1) } else { len };
        cursor.target.index = cursor.target.index.min(max);
        self.selected_lane = cursor.target.lane.index();
        self.drag = Some(cursor);
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let Some(menu) = self.menu.as_mut() else {
            self.mode = BoardMode::Browse;
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('m') => {
                self.menu = None;
                self.mode = BoardMode::Browse;
            }
            KeyCode::Up => menu.selected = menu.selected.saturating_sub(1),
            KeyCode::Down => {
                if menu.selected + 1 < menu.items.len() {
                    menu.selected += 1;
                }
            }
            KeyCode::Enter => {
                let item = menu.items[menu.selected];
                let task_id = menu.task_id.clone();
                let source = menu.source;
                self.menu = None;
                self.mode = BoardMode::Browse;
                match item {
                    MenuItem::Open => self.dispatch(BoardEvent::OpenTask(task_id)),
                    MenuItem::MoveTo(lane) => self.dispatch(BoardEvent::DragEnd(DragEnd {
                        task_id,
                        source,
                        destination: Some(LanePosition::new(lane, 0)),
                    })),
                }
            }
            _ => {}
        }
    }

    fn handle_archive_key(&mut self, key: KeyEvent) {
        let count = self.state.view().archived.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('a') | KeyCode::Char('q') => {
                self.state.archive_mut().hide();
                self.mode = BoardMode::Browse;
            }
            KeyCode::Left => self.archive_selected = self.archive_selected.saturating_sub(1),
            KeyCode::Right => {
                if self.archive_selected + 1 < count {
                    self.archive_selected += 1;
                }
            }
            KeyCode::Up => self.archive_selected = self.archive_selected.saturating_sub(ARCHIVE_COLUMNS),
            KeyCode::Down => {
                if self.archive_selected + ARCHIVE_COLUMNS < count {
                    self.archive_selected += ARCHIVE_COLUMNS;
                }
            }
            KeyCode::Enter => {
                let task_id = self
                    .state
                    .view()
                    .archived
                    .get(self.archive_selected)
                    .map(|t| t.id.clone());
                if let Some(task_id) = task_id {
                    self.dispatch(BoardEvent::OpenTask(task_id));
                }
            }
            _ => {}
        }
    }

    /// Land any "show more" whose loading delay has passed.
    fn tick(&mut self) {
        if let Some(lane) = self.state.reveal_mut().poll(Instant::now()) {
            tracing::debug!(lane = %lane, "show more landed");
        }
    }

    /// Handle keyboard input
    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        self.tick();
        Ok(())
    }

    /// Render the board
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());
        self.board_area = chunks[1];

        let view = self.state.view();
        self.render_header(f, chunks[0], &view);
        self.render_board(f, chunks[1], &view);
        self.render_status_bar(f, chunks[2], &view);

        if self.state.archive().is_shown() {
            self.render_archive(f, &view);
        }
        match self.mode {
            BoardMode::Detail => self.render_task_detail_popup(f),
            BoardMode::Menu => self.render_menu(f),
            _ => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect, view: &BoardView) {
        let summary = format!(
            "{} tasks on board  {} archived",
            view.lanes.total(),
            view.archived.len()
        );
        let header_text = vec![Line::from(vec![
            Span::styled("TASK BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(summary, Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC)),
        ])];
        let header = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_board(&self, f: &mut Frame, area: Rect, view: &BoardView) {
        let constraints: Vec<Constraint> = Status::LANES
            .iter()
            .map(|_| Constraint::Ratio(1, Status::LANES.len() as u32))
            .collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (status, &column_area) in Status::LANES.into_iter().zip(columns.iter()) {
            self.render_lane(f, column_area, status, view);
        }
    }

    /// Render a single lane with its visible window
    fn render_lane(&self, f: &mut Frame, area: Rect, status: Status, view: &BoardView) {
        let is_selected = status.index() == self.selected_lane;
        let color = lane_color(status);
        let window = self.state.window(view, status);

        let border_style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = Line::from(vec![
            Span::styled(format!(" {} ", status.title()), Style::default().fg(color)),
            Span::styled(format!("({}) ", window.total), Style::default().fg(Color::DarkGray)),
        ]);
        let block = Block::default().borders(Borders::ALL).title(title).border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let drop_slot = self
            .drag
            .as_ref()
            .filter(|d| d.target.lane == status)
            .map(|d| d.target.index);

        let footer = usize::from(window.has_more);
        let available_height = (inner.height as usize).saturating_sub(footer);
        let visible_cards = (available_height / CARD_HEIGHT).max(1);
        let focus = if is_selected { drop_slot.unwrap_or(self.selected_card) } else { 0 };
        let offset = scroll_offset(focus, visible_cards);

        let mut current_y = 0;
        for (card_index, task) in window.visible.iter().enumerate().skip(offset) {
            if current_y + CARD_HEIGHT > available_height {
                break;
            }
            let card_area = Rect {
                x: inner.x,
                y: inner.y + current_y as u16,
                width: inner.width,
                height: CARD_HEIGHT as u16,
            };
            let highlighted = is_selected && self.drag.is_none() && card_index == self.selected_card;
            let carried = self.drag.as_ref().is_some_and(|d| d.task_id == task.id);
            let drop_here = drop_slot == Some(card_index);
            render_card(f, card_area, task, highlighted, carried, drop_here);
            current_y += CARD_HEIGHT;
        }

        if drop_slot.is_some_and(|i| i >= window.visible.len()) && current_y < available_height {
            let marker = Paragraph::new("▶ drop here").style(Style::default().fg(AMBER).add_modifier(Modifier::BOLD));
            f.render_widget(marker, Rect { x: inner.x, y: inner.y + current_y as u16, width: inner.width, height: 1 });
        }

        if window.has_more && inner.height > 0 {
            let text = if self.state.reveal().is_loading(status) {
                "loading…".to_string()
            } else {
                format!("▼ +{} more (n)", window.hidden())
            };
            let indicator = Paragraph::new(text).style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect { x: inner.x, y: inner.y + inner.height - 1, width: inner.width, height: 1 },
            );
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect, view: &BoardView) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let hidden = if view.lanes.dropped() > 0 {
                format!(" [{} with unknown status hidden]", view.lanes.dropped())
            } else {
                String::new()
            };
            format!(
                "Tasks: {}{} | Space: Drag | m: Menu | n: More | a: Archive | r: Refresh | h: Help",
                self.state.tasks().len(),
                hidden
            )
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(lane_color(self.selected_status())).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Render the archive grid over the board
    fn render_archive(&self, f: &mut Frame, view: &BoardView) {
        let area = centered(f.area(), 80, 80);
        f.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Archive: {} completed (a/Esc to close)", view.archived.len()))
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(lane_color(Status::Completed)).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let archived = self.state.archive().visible(&view.archived);
        if archived.is_empty() {
            f.render_widget(Paragraph::new("Nothing archived yet"), inner);
            return;
        }

        let card_width = inner.width / ARCHIVE_COLUMNS as u16;
        let visible_rows = (inner.height as usize / ARCHIVE_CARD_HEIGHT).max(1);
        let first_row = scroll_offset(self.archive_selected / ARCHIVE_COLUMNS, visible_rows);

        for (i, task) in archived.iter().enumerate().skip(first_row * ARCHIVE_COLUMNS) {
            let row = i / ARCHIVE_COLUMNS - first_row;
            if row >= visible_rows {
                break;
            }
            let col = i % ARCHIVE_COLUMNS;
            let card_area = Rect {
                x: inner.x + card_width * col as u16,
                y: inner.y + (row * ARCHIVE_CARD_HEIGHT) as u16,
                width: card_width,
                height: ARCHIVE_CARD_HEIGHT as u16,
            };
            let selected = self.mode == BoardMode::Archive && i == self.archive_selected;
            render_card(f, card_area, task, selected, false, false);
        }
    }

    fn render_menu(&self, f: &mut Frame) {
        let Some(menu) = self.menu.as_ref() else {
            return;
        };
        let frame = f.area();
        let width = 26.min(frame.width);
        let height = (menu.items.len() as u16 + 2).min(frame.height);
        let x = menu.anchor.x.min(frame.width.saturating_sub(width));
        let y = menu.anchor.y.min(frame.height.saturating_sub(height));
        let area = Rect::new(x, y, width, height);

        let lines: Vec<Line> = menu
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == menu.selected {
                    Style::default().bg(Color::Cyan).fg(Color::Black)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(item.label(), style))
            })
            .collect();

        f.render_widget(Clear, area);
        let popup = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(format!("#{}", menu.task_id)))
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, area);
    }

    /// Render the task detail popup
    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task) = self.detail.as_ref().and_then(|id| self.state.task(id)) else {
            return;
        };
        let popup_area = centered(f.area(), 70, 70);
        f.render_widget(Clear, popup_area);

        let today = Local::now().date_naive();
        let date_str = |d: Option<chrono::DateTime<chrono::Utc>>| {
            d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
        };
        let category = match (&task.category, &task.subcategory) {
            (Some(c), Some(s)) => format!("{c} / {s}"),
            (Some(c), None) => c.clone(),
            _ => "-".to_string(),
        };

        let detail_lines = vec![
            Line::from(vec![Span::styled(
                format!("Task #{}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!("Status:      {}", task.status)),
            Line::from(vec![
                Span::raw("Priority:    "),
                Span::styled(format_priority(task.priority), Style::default().fg(priority_color(task.priority))),
            ]),
            Line::from(format!("Due:         {}", format_due_relative(task.due_date, today))),
            Line::from(format!("Completed:   {}", date_str(task.completed_at))),
            Line::from(format!(
                "Assignee:    {}",
                task.assignee.as_ref().map(|a| a.name.as_str()).unwrap_or("-")
            )),
            Line::from(format!("Category:    {category}")),
            Line::from(format!(
                "Subtasks: {}  Comments: {}  Attachments: {}",
                task.subtasks.len(),
                task.comments.len(),
                task.attachments.len()
            )),
            Line::from(""),
            Line::from("Description:"),
            Line::from(task.description.as_deref().unwrap_or("-")),
        ];

        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Enter/Esc to close)")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        let popup = Paragraph::new(detail_lines)
            .block(popup_block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quit {
            terminal.draw(|f| self.render(f))?;
            self.handle_input()?;
        }
        Ok(())
    }
}

/// First row to draw so that `focus` stays on screen.
fn scroll_offset(focus: usize, visible: usize) -> usize {
    if visible == 0 || focus < visible {
        0
    } else {
        focus + 1 - visible
    }
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Render a single task card
fn render_card(f: &mut Frame, area: Rect, task: &Task, highlighted: bool, carried: bool, drop_here: bool) {
    let style = if highlighted {
        Style::default().bg(Color::Cyan).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else if carried {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else {
        Style::default().bg(Color::Black)
    };

    let available_width = area.width.saturating_sub(2) as usize;
    let mut card_text = vec![Line::from(vec![
        Span::styled("● ", Style::default().fg(priority_color(task.priority))),
        Span::raw(truncate(&task.title, available_width.saturating_sub(2))),
    ])];

    let due = format_due_relative(task.due_date, Local::now().date_naive());
    let assignee = task.assignee.as_ref().map(|a| a.name.as_str()).unwrap_or("-");
    card_text.push(Line::from(truncate(&format!("{due} | {assignee}"), available_width)));
    card_text.push(Line::from(format!(
        "☐{} ✉{} ⎘{}",
        task.subtasks.len(),
        task.comments.len(),
        task.attachments.len()
    )));

    let mut block = Block::default().borders(Borders::ALL);
    if drop_here {
        block = block
            .title("▼ drop here")
            .border_style(Style::default().fg(AMBER).add_modifier(Modifier::BOLD));
    }
    let card = Paragraph::new(card_text).block(block).style(style);
    f.render_widget(card, area);
}
