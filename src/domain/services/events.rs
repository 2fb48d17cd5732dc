use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;
use crate::domain::models::Mode;

/// Ticks keep the quota countdown and copy feedback current while idle.
const TICK: time::Duration = time::Duration::from_secs(1);

fn mode_for_digit(digit: char) -> Option<Mode> {
    match digit {
        '1' => return Some(Mode::Code),
        '2' => return Some(Mode::Creative),
        '3' => return Some(Mode::Explain),
        '4' => return Some(Mode::Concise),
        _ => return None,
    }
}

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => {
                return Some(Event::KeyboardPaste(text));
            }
            CrosstermEvent::Resize(_, _) => {
                return Some(Event::UIResize());
            }
            CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
                MouseEventKind::ScrollUp => {
                    return Some(Event::UIScrollUp());
                }
                MouseEventKind::ScrollDown => {
                    return Some(Event::UIScrollDown());
                }
                _ => {
                    return None;
                }
            },
            CrosstermEvent::Key(keyevent) => match keyevent.into() {
                Input { key: Key::Down, .. } => {
                    return Some(Event::UIScrollDown());
                }
                Input { key: Key::Up, .. } => {
                    return Some(Event::UIScrollUp());
                }
                Input {
                    key: Key::PageDown, ..
                } => {
                    return Some(Event::UIScrollPageDown());
                }
                Input {
                    key: Key::PageUp, ..
                } => {
                    return Some(Event::UIScrollPageUp());
                }
                Input {
                    key: Key::Char('d'),
                    ctrl: true,
                    ..
                } => {
                    return Some(Event::UIScrollPageDown());
                }
                Input {
                    key: Key::Char('u'),
                    ctrl: true,
                    ..
                } => {
                    return Some(Event::UIScrollPageUp());
                }
                Input {
                    key: Key::Char('c'),
                    ctrl: true,
                    ..
                } => {
                    return Some(Event::KeyboardCTRLC());
                }
                Input {
                    key: Key::Char('n'),
                    ctrl: true,
                    ..
                } => {
                    return Some(Event::KeyboardCTRLN());
                }
                Input {
                    key: Key::Char('k'),
                    ctrl: true,
                    ..
                } => {
                    return Some(Event::KeyboardCTRLK());
                }
                Input {
                    key: Key::Char('j'),
                    ctrl: true,
                    ..
                } => {
                    return Some(Event::KeyboardCTRLJ());
                }
                Input {
                    key: Key::Char(digit),
                    alt: true,
                    ..
                } if mode_for_digit(digit).is_some() => {
                    return mode_for_digit(digit).map(Event::KeyboardModeToggle);
                }
                Input {
                    key: Key::Enter, ..
                } => {
                    return Some(Event::KeyboardEnter());
                }
                input => {
                    return Some(Event::KeyboardCharInput(input));
                }
            },
            _ => return None,
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(TICK) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
