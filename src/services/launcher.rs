//! Browser and process launching

use std::process::{Command, Stdio};

use super::Launcher;
use crate::{Error, Result};

/// Launches through the host OS; children are detached, never awaited
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    /// Program and leading arguments that open a URL or file on this OS
    #[must_use]
    pub const fn opener() -> (&'static str, &'static [&'static str]) {
        if cfg!(target_os = "windows") {
            // empty title argument keeps `start` from eating a quoted target
            ("cmd", &["/C", "start", ""])
        } else if cfg!(target_os = "macos") {
            ("open", &[])
        } else {
            ("xdg-open", &[])
        }
    }

    fn spawn(program: &str, args: &[&str]) -> Result<()> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|e| Error::Action(format!("failed to start {program}: {e}")))
    }
}

impl Launcher for SystemLauncher {
    fn open(&self, target: &str) -> Result<()> {
        let (program, args) = Self::opener();
        tracing::info!(target, program, "opening");

        let mut full_args = args.to_vec();
        full_args.push(target);
        Self::spawn(program, &full_args)
    }

    fn launch(&self, program: &str) -> Result<()> {
        tracing::info!(program, "launching application");
        Self::spawn(program, &[])
    }
}
