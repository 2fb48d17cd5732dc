pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
pub mod clipboard;
mod code_blocks;
pub mod events;
pub mod html;
pub mod markdown;
mod persistent_store;
mod quota_tracker;
mod scroll;
mod session_state;
mod syntaxes;
mod themes;
mod view_renderer;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use code_blocks::*;
pub use persistent_store::*;
pub use quota_tracker::*;
pub use scroll::*;
pub use session_state::*;
pub use syntaxes::*;
pub use themes::*;
pub use view_renderer::*;
