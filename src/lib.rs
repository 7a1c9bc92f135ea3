//! Osgood is a terminal-first workbench for legal research chat.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the conversation workspace, the case-brief
//!   library, provider/model catalogs, the simulated responder, and
//!   configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`commands`] implements slash-command parsing and command execution
//!   used by the chat loop.
//! - [`cli`] parses command-line arguments and dispatches into either the
//!   interactive session or the one-shot listing/config subcommands.
//!
//! Every asynchronous behavior in Osgood is a fixed-duration timer: replies,
//! case-brief page loads, and sign-in are all simulated. There is no network
//! client and no persistence beyond the configuration file.

pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
