//! Jarvis - Voice-activated desktop assistant
//!
//! This library provides the command-interpretation pipeline:
//! - Speech capture (microphone, ambient calibration, recognition)
//! - Wake phrase detection
//! - Intent dispatch over an ordered keyword table
//! - Action handlers and spoken, translated responses
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Microphone                        │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                   Assistant                          │
//! │   Wake Word  │  STT  │  Intent Table  │  Actions    │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                 Collaborators                        │
//! │   Translator  │  TTS  │  Weather  │  Launcher       │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod actions;
pub mod assistant;
pub mod calculator;
pub mod config;
pub mod context;
pub mod error;
pub mod intent;
pub mod language;
pub mod phrases;
pub mod render;
pub mod services;
pub mod session;
pub mod voice;

pub use actions::Flow;
pub use assistant::Assistant;
pub use config::Config;
pub use context::{Context, Services, Settings};
pub use error::{Error, Result};
pub use intent::{Intent, IntentTable, Site};
pub use language::Language;
pub use session::Session;
