use std::fmt::Display;
use std::io::{self, stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Color::{DarkBlue, DarkGreen, Green, Reset, Yellow};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{event, execute, queue, terminal, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, MenuAction, UiState, ViewportState};

/// Rows above the list: the question and the instructions bar.
const HEADER_ROWS: u16 = 2;
/// Header plus the filter line below the list.
const CHROME_ROWS: u16 = HEADER_ROWS + 1;

/// Runs `restore` when dropped.
struct TerminalGuard<R: FnMut()> {
    restore: R,
}

impl<R: FnMut()> Drop for TerminalGuard<R> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Raw mode off, mouse capture off, back to the main screen.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = stdout();
    let _ = stdout.execute(DisableMouseCapture);
    let _ = stdout.execute(LeaveAlternateScreen);
}

/// Switches to the alternate screen in raw mode with mouse capture.
///
/// The guard exists as soon as the alternate screen does, so a failure in
/// any later step still restores the terminal.
fn enter_menu_screen<R: FnMut()>(
    out: &mut impl Write,
    enable_raw: impl FnOnce() -> io::Result<()>,
    restore: R,
) -> io::Result<TerminalGuard<R>> {
    out.execute(EnterAlternateScreen)?;
    let guard = TerminalGuard { restore };
    enable_raw()?;
    out.execute(EnableMouseCapture)?;
    Ok(guard)
}

/// Shows `choices` in a full-screen menu and waits for one to be picked.
///
/// Returns the index into `choices`, or `None` if the user quit the menu.
/// `choices` must not be empty.
pub fn select_from_list(
    message: &str,
    choices: &[String],
    default: Option<usize>,
) -> io::Result<Option<usize>> {
    let mut stdout = stdout();

    let _terminal_guard = enter_menu_screen(&mut stdout, enable_raw_mode, restore_terminal)?;

    let (width, height) = terminal::size()?;
    let initial = default.filter(|i| *i < choices.len()).unwrap_or(0);
    let mut ui_state = UiState::new(initial, width, height.saturating_sub(CHROME_ROWS));
    let mut displayed = filter_displayed_indexes(choices, &ui_state.filter_text);
    let mut down_row: Option<u16> = None;

    redraw_ui(&mut stdout, message, &ui_state, &displayed, choices)?;

    loop {
        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        let new_ui_state = match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                match handle_key_event(key_event, &ui_state) {
                    MenuAction::Select => {
                        if let Some(index) = displayed.get(ui_state.selected_index) {
                            return Ok(Some(*index));
                        }
                        execute!(stdout, Print("\x07"))?;
                        None
                    }
                    MenuAction::Cancel => return Ok(None),
                    MenuAction::Move(direction) => Some(move_selected_index(
                        &ui_state,
                        displayed.len(),
                        direction,
                    )),
                    MenuAction::Update(state) => Some(state),
                    MenuAction::Nothing => None,
                }
            }
            Event::Mouse(MouseEvent {
                kind,
                row,
                modifiers,
                ..
            }) if modifiers == KeyModifiers::NONE => match kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    down_row = Some(row);
                    None
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    if let Some(index) = down_row
                        .take()
                        .and_then(|row| clicked_entry(row, &ui_state, &displayed))
                    {
                        return Ok(Some(index));
                    }
                    None
                }
                MouseEventKind::ScrollDown => {
                    Some(move_selected_index(&ui_state, displayed.len(), Down))
                }
                MouseEventKind::ScrollUp => {
                    Some(move_selected_index(&ui_state, displayed.len(), Up))
                }
                _ => None,
            },
            Event::Resize(width, height) => {
                Some(handle_resize(width, height, &ui_state, displayed.len()))
            }
            _ => None,
        };

        if let Some(new_ui_state) = new_ui_state {
            if new_ui_state != ui_state {
                if new_ui_state.filter_text != ui_state.filter_text {
                    displayed = filter_displayed_indexes(choices, &new_ui_state.filter_text);
                }
                ui_state = new_ui_state;
                redraw_ui(&mut stdout, message, &ui_state, &displayed, choices)?;
            }
        }
    }
}

fn reset_selection(ui_state: &mut UiState) {
    ui_state.selected_index = 0;
    ui_state.viewport.offset = 0;
}

/// Maps a key press onto a menu action.
fn handle_key_event(key_event: KeyEvent, ui_state: &UiState) -> MenuAction {
    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            MenuAction::Cancel
        }
        KeyCode::Up => MenuAction::Move(Up),
        KeyCode::Down => MenuAction::Move(Down),
        KeyCode::Enter => MenuAction::Select,
        KeyCode::Backspace if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            if updated_state.filter_text.pop().is_none() {
                return MenuAction::Nothing;
            }
            reset_selection(&mut updated_state);
            MenuAction::Update(updated_state)
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            updated_state.filter_text.clear();
            reset_selection(&mut updated_state);
            MenuAction::Update(updated_state)
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.push(c);
            reset_selection(&mut updated_state);
            MenuAction::Update(updated_state)
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            MenuAction::Update(updated_state)
        }
        KeyCode::Char('k') => MenuAction::Move(Up),
        KeyCode::Char('j') => MenuAction::Move(Down),
        KeyCode::Char('q') | KeyCode::Esc => MenuAction::Cancel,
        _ => MenuAction::Nothing,
    }
}

/// Index into the choices of the entry drawn on `row`, if any.
fn clicked_entry(row: u16, ui_state: &UiState, displayed: &[usize]) -> Option<usize> {
    let line = row.checked_sub(HEADER_ROWS)?;
    if line >= ui_state.viewport.height {
        return None;
    }
    displayed
        .get(line as usize + ui_state.viewport.offset)
        .copied()
}

fn handle_resize(width: u16, height: u16, ui_state: &UiState, displayed_count: usize) -> UiState {
    let new_height = height.saturating_sub(CHROME_ROWS).max(1);
    let mut ui_state = ui_state.clone();
    let mut new_viewport = ViewportState {
        width,
        height: new_height,
        offset: ui_state.viewport.offset,
    };

    // Growing taller shows more entries above the selection
    match new_height.cmp(&ui_state.viewport.height) {
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - ui_state.viewport.height;
            new_viewport.offset = new_viewport.offset.saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less
            if ui_state.selected_index >= new_viewport.offset + new_height as usize =>
        {
            new_viewport.offset = ui_state.selected_index + 1 - new_height as usize;

            if new_viewport.offset + new_height as usize > displayed_count {
                new_viewport.offset = displayed_count.saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    ui_state.viewport = new_viewport;
    ui_state
}

/// Moves the highlight one entry, wrapping at either end and scrolling the
/// viewport so the highlight stays visible.
fn move_selected_index(
    ui_state: &UiState,
    displayed_count: usize,
    direction: CycleDirection,
) -> UiState {
    if displayed_count == 0 {
        return ui_state.clone();
    }

    let mut new_index = ui_state.selected_index;
    let mut ui_state = ui_state.clone();
    let height = ui_state.viewport.height.max(1) as usize;

    match direction {
        Up => {
            if new_index == 0 {
                new_index = displayed_count - 1;
                ui_state.viewport.offset = new_index.saturating_sub(height - 1);
            } else {
                new_index -= 1;
                if new_index < ui_state.viewport.offset {
                    ui_state.viewport.offset = new_index;
                }
            }
        }
        Down => {
            new_index = (new_index + 1) % displayed_count;
            if new_index < ui_state.selected_index {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + height {
                ui_state.viewport.offset = new_index + 1 - height;
            }
        }
    }

    ui_state.selected_index = new_index;
    ui_state
}

/// Indexes of the choices matching `predicate`, in their original order.
fn filter_displayed_indexes(choices: &[String], predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..choices.len()).collect();
    }

    let matcher = SkimMatcherV2::default();

    choices
        .iter()
        .enumerate()
        .filter(|(_, choice)| matcher.fuzzy_match(choice, predicate).is_some())
        .map(|(i, _)| i)
        .collect()
}

fn redraw_ui(
    out: &mut impl Write,
    message: &str,
    ui_state: &UiState,
    displayed: &[usize],
    choices: &[String],
) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(out, message, ui_state, displayed.len())?;

    if displayed.is_empty() {
        queue!(
            out,
            MoveTo(0, HEADER_ROWS),
            SetForegroundColor(Color::Red),
            Print("No matching choices!"),
            SetAttribute(Attribute::Reset),
        )?;
    } else {
        print_choices_with_selection(out, ui_state, displayed, choices)?;
    }

    if ui_state.is_filtering {
        queue!(
            out,
            MoveTo(0, HEADER_ROWS + ui_state.viewport.height),
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    }

    out.flush()
}

fn print_header(
    out: &mut impl Write,
    message: &str,
    ui_state: &UiState,
    displayed_count: usize,
) -> io::Result<()> {
    let left_padding_size = 2usize;
    let left_padding = " ".repeat(left_padding_size);

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        format!(
            "/: Begin Filtering   |   {}/{}   |   q: Quit",
            pad_to_width_of(ui_state.selected_index + 1, displayed_count),
            displayed_count
        )
    };

    let right_padding = " ".repeat(
        (ui_state.viewport.width as usize).saturating_sub(left_padding_size + instructions.len()),
    );

    queue!(
        out,
        MoveTo(0, 0),
        SetForegroundColor(Green),
        Print("? "),
        SetForegroundColor(Reset),
        SetAttribute(Attribute::Bold),
        Print(message),
        SetAttribute(Attribute::Reset),
        MoveTo(0, 1),
        SetBackgroundColor(DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )
}

fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = max_number.to_string().len();
    format!("{:>width$}", value.to_string())
}

fn print_choices_with_selection(
    out: &mut impl Write,
    ui_state: &UiState,
    displayed: &[usize],
    choices: &[String],
) -> io::Result<()> {
    let viewport = &ui_state.viewport;

    let visible = displayed
        .iter()
        .enumerate()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (row, (position, index)) in visible.enumerate() {
        let number = pad_to_width_of(index + 1, choices.len());
        let content = format!("[{number}] {}", choices[*index]);
        let padding =
            " ".repeat((viewport.width as usize).saturating_sub(content.chars().count()));

        queue!(out, MoveTo(0, HEADER_ROWS + row as u16), Clear(ClearType::CurrentLine))?;

        if position == ui_state.selected_index {
            queue!(
                out,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
            )?;
        }

        queue!(
            out,
            Print(content),
            Print(padding),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(Reset),
            SetForegroundColor(Reset),
        )?;
    }

    Ok(())
}
