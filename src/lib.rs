//! typedex - browse pokemon by type in the terminal
//!
//! The library holds the fetch-merge pipeline, the filter-paginate view
//! model and the tui-dispatch store; the binary wires them to a terminal.

pub mod action;
pub mod api;
pub mod category;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod reducer;
pub mod state;
pub mod tasks;
pub mod ui;
pub mod view;
