//! End-to-end shopping flows for the Snackshop sample app.
//!
//! This crate holds everything specific to the app under test: its UI label
//! vocabulary ([`strings`]), page objects for its screens ([`screens`]), and
//! an in-process double ([`sim`]) that lets the scenario suites run headless.
//! The suites themselves live under `tests/`; a live suite drives a real
//! device agent and is ignored by default.

pub mod screens;
pub mod sim;
pub mod strings;
