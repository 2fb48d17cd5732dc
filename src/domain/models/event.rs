use tui_textarea::Input;

use super::DispatchResponse;
use super::Mode;

pub enum Event {
    BackendResponse(DispatchResponse),
    ClipboardFailed(String),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLJ(),
    KeyboardCTRLK(),
    KeyboardCTRLN(),
    KeyboardEnter(),
    KeyboardModeToggle(Mode),
    KeyboardPaste(String),
    UIResize(),
    UIScrollDown(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UIScrollUp(),
    UITick(),
}
