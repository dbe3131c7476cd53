//! Tabswitch TUI - Terminal surface for the two-tab switcher
//!
//! This crate hosts the headless switcher core in a full-screen terminal
//! UI: two scrollable pages under a collapsible header, switched by `Tab`,
//! a click on the header, or a sideways mouse drag.
//!
//! # Architecture
//!
//! - **App**: event loop and host side of the switcher protocol
//! - **Surface**: float-unit to cell geometry
//! - **Widgets**: page and header rendering
//! - **Theme**: colors

pub mod app;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use app::App;
