//! The command loop
//!
//! greet, then repeatedly: wait for the wake phrase (unless disabled),
//! capture a command, dispatch it and run its handler, until the exit
//! intent.

use crate::actions::{self, Flow};
use crate::config::Config;
use crate::context::Context;
use crate::intent::IntentTable;
use crate::voice::WakeWordDetector;
use crate::{Result, phrases};

/// Voice assistant driving a [`Context`]
pub struct Assistant {
    ctx: Context,
    intents: IntentTable,
    wake: Option<WakeWordDetector>,
}

impl Assistant {
    /// Create an assistant; `wake` of `None` listens for commands directly
    #[must_use]
    pub const fn new(ctx: Context, intents: IntentTable, wake: Option<WakeWordDetector>) -> Self {
        Self { ctx, intents, wake }
    }

    /// Assistant wired from configuration
    ///
    /// # Errors
    ///
    /// Returns error if a collaborator cannot be set up
    pub fn from_config(config: &Config) -> Result<Self> {
        let wake = config
            .wake
            .enabled
            .then(|| WakeWordDetector::new(config.wake.phrases.clone()));

        Ok(Self::new(
            Context::from_config(config)?,
            IntentTable::standard(),
            wake,
        ))
    }

    /// Greet by time of day and introduce itself
    pub async fn greet(&mut self) {
        let hour = chrono::Timelike::hour(&self.ctx.services.clock.now());
        self.ctx.respond(phrases::time_of_day_greeting(hour)).await;
        self.ctx.respond(phrases::INTRODUCTION).await;
    }

    /// Run until the exit intent
    ///
    /// # Errors
    ///
    /// Returns error if the microphone fails
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(wake = self.wake.is_some(), "assistant listening");

        loop {
            let Some(command) = self.next_command().await? else {
                continue;
            };

            if self.step(&command).await? == Flow::Exit {
                tracing::info!("exit requested");
                return Ok(());
            }
        }
    }

    /// Handle one recognized command
    ///
    /// # Errors
    ///
    /// Returns error if a handler's nested capture hits a microphone failure
    pub async fn step(&mut self, command: &str) -> Result<Flow> {
        let command = command.trim().to_lowercase();
        if command.is_empty() || command == "none" {
            return Ok(Flow::Continue);
        }

        let intent = self.intents.dispatch(&command);
        tracing::info!(command = %command, ?intent, "command recognized");

        actions::execute(intent, &command, &mut self.ctx).await
    }

    /// Say goodbye after an interrupt
    pub async fn shutdown(&mut self) {
        self.ctx.respond(phrases::SHUTDOWN).await;
    }

    /// Apologize before exiting on an unrecoverable error
    pub async fn fatal(&mut self) {
        self.ctx.respond(phrases::FATAL).await;
    }

    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.ctx
    }

    pub const fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    /// Wait for a wake phrase if gated, then capture a command
    async fn next_command(&mut self) -> Result<Option<String>> {
        let Some(detector) = self.wake.as_mut() else {
            return self.ctx.listen_command().await;
        };

        let Some(heard) = self.ctx.listen_wake().await? else {
            return Ok(None);
        };
        if !detector.check_wake_word(&heard) {
            tracing::trace!(heard = %heard, "no wake phrase");
            return Ok(None);
        }

        let command = match detector.command_after_wake(&heard) {
            Some(command) => Some(command),
            None => {
                self.ctx.respond(phrases::WAKE_ACK).await;
                self.ctx.listen_command().await?
            }
        };

        detector.reset();
        Ok(command)
    }
}
