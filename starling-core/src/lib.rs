pub mod api;
pub mod app_state;
pub mod command;
pub mod config;
pub mod interaction;
pub mod notification;
pub mod query;
pub mod route;
pub mod search;
pub mod settings;
pub mod shell;
pub mod util;
pub mod view;

mod logic;
mod tokio_thread;
pub use logic::{Logic, LogicEvent};

pub use starling_state;
