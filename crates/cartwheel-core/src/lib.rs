//! Core library for semantics-tree UI automation.
//!
//! This crate provides the building blocks for scripting end-to-end flows
//! against a mobile application: a backend-agnostic [`driver::UiDriver`]
//! trait, a semantics node model with matchers, bounded scroll and carousel
//! helpers, polling waits, and a high-level [`robot::Robot`] that journals
//! every step. A TCP-backed [`remote::RemoteDriver`] talks to an agent
//! embedded in the application under test; headless runs plug in an
//! in-process double instead.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use cartwheel_core::config::SuiteConfig;
//! use cartwheel_core::driver::UiDriver;
//! use cartwheel_core::remote::RemoteDriver;
//! use cartwheel_core::robot::Robot;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut driver = RemoteDriver::new("localhost", 9123);
//! driver.connect().await?;
//! let robot = Robot::new(Arc::new(driver), SuiteConfig::load());
//!
//! robot.scroll_until_visible("Newly Added").await?;
//! robot.exercise_carousel("Chips", 1).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod element;
pub mod error;
pub mod gesture;
pub mod journal;
pub mod matcher;
pub mod protocol;
pub mod remote;
pub mod robot;
pub mod scroll;
pub mod wait;
