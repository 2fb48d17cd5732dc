mod action;
mod backend;
mod conversation;
mod event;
mod message;
mod mode;
mod quota;
mod settings;
mod slash_commands;
mod storage;
mod textarea;
mod view;

pub use action::*;
pub use backend::*;
pub use conversation::*;
pub use event::*;
pub use message::*;
pub use mode::*;
pub use quota::*;
pub use settings::*;
pub use slash_commands::*;
pub use storage::*;
pub use textarea::*;
pub use view::*;
