//! Hintgen · Math hint generation backend
//!
//! Wraps a chat-completion service to produce rubric-guided hints for a fixed
//! bank of math questions and records each student's answers before and after
//! the hint.
//!
//! - `questions`, `prompts`, `gateway`, `checker`, `session`: the tutoring core
//! - `openai`: chat-completions implementation of the gateway
//! - `store`, `routes`, `console`: persistence and the two front ends

pub mod checker;
pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod logic;
pub mod openai;
pub mod prompts;
pub mod protocol;
pub mod questions;
pub mod routes;
pub mod seeds;
pub mod session;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod util;
