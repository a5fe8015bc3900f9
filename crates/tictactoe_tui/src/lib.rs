//! Terminal front end for `tictactoe_history`.
//!
//! - **app**: key handling over a [`tictactoe_history::GameSession`]
//! - **ui**: ratatui rendering with a responsive board/history layout
//! - **replay**: the non-interactive `replay` command
//! - **config** / **cli**: settings file and command-line flags

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod replay;
pub mod terminal;
pub mod ui;

pub use app::{Action, App, Click, Focus};
pub use cli::{Cli, Command, PlayArgs};
pub use config::{ConfigError, TuiConfig};
pub use replay::{ReplayReport, replay};
