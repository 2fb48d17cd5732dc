use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Mode;
use crate::domain::models::SidebarItem;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::Themes;
use crate::infrastructure::storage::StorageManager;

const SIDEBAR_WIDTH: u16 = 30;

fn render_sidebar<B: Backend>(frame: &mut Frame<B>, rect: Rect, items: &[SidebarItem]) {
    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| return ListItem::new(format!("{}. {}", idx + 1, item.title)))
        .collect();

    let mut state = ListState::default();
    state.select(items.iter().position(|item| return item.active));

    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::RIGHT)
                .title("Conversations"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(list, rect, &mut state);
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    tx: mpsc::UnboundedSender<Action>,
    mut events: EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();

    #[cfg(feature = "dev")]
    {
        textarea = TextArea::from_text("/code Write a function in Rust that prints from 0 to 10, then explain it.");
        app_state.refresh(&TextArea::text(&textarea)).await;
    }

    loop {
        TextArea::apply_composer(&mut textarea, &app_state.view.composer);

        terminal.draw(|frame| {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                .split(frame.size());

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Max(5)])
                .split(columns[1]);

            if rows[0].width != app_state.last_known_width
                || rows[0].height != app_state.last_known_height
            {
                app_state.set_rect(rows[0]);
            }

            render_sidebar(frame, columns[0], &app_state.view.sidebar);

            app_state
                .bubble_list
                .render(frame, rows[0], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                rows[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            frame.render_widget(textarea.widget(), rows[1]);
        })?;

        match events.next().await? {
            Event::BackendResponse(response) => {
                app_state.handle_backend_response(response).await;
            }
            Event::ClipboardFailed(err) => {
                app_state.handle_clipboard_failed(err);
            }
            Event::KeyboardCharInput(input) => {
                textarea.input(input);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLN() => {
                app_state.new_conversation().await;
            }
            Event::KeyboardCTRLK() => {
                app_state.select_relative(-1);
            }
            Event::KeyboardCTRLJ() => {
                app_state.select_relative(1);
            }
            Event::KeyboardEnter() => {
                let input_str = TextArea::text(&textarea);
                let (should_break, consumed) = app_state.submit(&input_str, &tx).await?;
                if should_break {
                    break;
                }
                if consumed {
                    textarea = TextArea::default();
                }
            }
            Event::KeyboardModeToggle(mode) => {
                let toggled = Mode::toggle(&TextArea::text(&textarea), mode);
                textarea = TextArea::from_text(&toggled);
            }
            Event::KeyboardPaste(text) => {
                textarea.insert_str(text);
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UIResize() | Event::UITick() => (),
        }

        app_state.refresh(&TextArea::text(&textarea)).await;
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let theme = Themes::get(
        &Config::get(ConfigKey::Theme),
        &Config::get(ConfigKey::ThemeFile),
    )?;
    let mut app_state = AppState::new(StorageManager::get(), theme).await?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, EventsService::new(rx)).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
