//! Minimal fixed-tick terminal runtime on top of ratatui and crossterm.

pub use self::{
    app::App,
    event_loop::{RenderMode, interval_from_rate},
    runtime::Runtime,
};

mod app;
mod event;
mod event_loop;
mod runtime;
