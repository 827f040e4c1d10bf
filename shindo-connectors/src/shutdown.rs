//! Shutdown Button
//!
//! A push button between a GPIO pin and ground powers the device off
//! cleanly. The pin uses the internal pull-up, so a press is a falling
//! edge. Edges closer together than the debounce interval are ignored.
//!
//! The button runs on the GPIO interrupt thread and never touches the
//! sampling loop: it runs the shutdown command and ends the process, even
//! when the command fails.

use std::io;
use std::process::{Command, ExitStatus};

use log::{error, warn};
use thiserror::Error;

/// Errors running the shutdown command or claiming the pin
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// The command line was empty
    #[error("Shutdown command is empty")]
    EmptyCommand,

    /// The command could not be started
    #[error("Running {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The command ran and reported failure
    #[error("{program:?} exited with {status}")]
    Failed { program: String, status: ExitStatus },

    /// Claiming or configuring the GPIO pin failed
    #[cfg(feature = "raspberry-pi")]
    #[error("GPIO{pin}: {source}")]
    Gpio {
        pin: u8,
        #[source]
        source: rppal::gpio::Error,
    },
}

/// External command that powers the device off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownAction {
    program: String,
    args: Vec<String>,
}

impl ShutdownAction {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a whitespace-separated command line such as `sudo shutdown -h now`
    pub fn from_command_line(line: &str) -> Result<Self, ShutdownError> {
        let mut words = line.split_whitespace();
        let program = words.next().ok_or(ShutdownError::EmptyCommand)?;
        Ok(Self::new(program, words))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the command and wait for it
    pub fn run(&self) -> Result<(), ShutdownError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|source| ShutdownError::Spawn { program: self.program.clone(), source })?;

        if !status.success() {
            return Err(ShutdownError::Failed { program: self.program.clone(), status });
        }
        Ok(())
    }

    /// Handle a button press: run the command, then end the process
    ///
    /// Exits with status 1 when the command could not power the device off.
    pub fn trigger(&self) -> ! {
        warn!("Shutdown requested, running {} {}", self.program, self.args.join(" "));
        match self.run() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                error!("Shutdown failed: {}", e);
                std::process::exit(1)
            }
        }
    }
}

#[cfg(feature = "raspberry-pi")]
pub use self::gpio::ShutdownButton;

#[cfg(feature = "raspberry-pi")]
mod gpio {
    use std::time::Duration;

    use log::info;
    use rppal::gpio::{Gpio, InputPin, Trigger};

    use super::{ShutdownAction, ShutdownError};

    /// Armed shutdown button; dropping it disarms the interrupt
    pub struct ShutdownButton {
        pin: InputPin,
    }

    impl ShutdownButton {
        /// Watch `pin` for presses and run `action` on each
        pub fn arm(pin: u8, debounce: Duration, action: ShutdownAction) -> Result<Self, ShutdownError> {
            let gpio_err = |source| ShutdownError::Gpio { pin, source };

            let mut input = Gpio::new()
                .map_err(gpio_err)?
                .get(pin)
                .map_err(gpio_err)?
                .into_input_pullup();

            input
                .set_async_interrupt(Trigger::FallingEdge, Some(debounce), move |_| action.trigger())
                .map_err(gpio_err)?;

            info!("Shutdown button armed on GPIO{} ({:?} debounce)", pin, debounce);
            Ok(Self { pin: input })
        }

        pub fn pin(&self) -> u8 {
            self.pin.pin()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_command() {
        let action = ShutdownAction::from_command_line("sudo shutdown -h now").unwrap();
        assert_eq!(action.program(), "sudo");
        assert_eq!(action.args(), ["shutdown", "-h", "now"]);
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(
            ShutdownAction::from_command_line("   "),
            Err(ShutdownError::EmptyCommand)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn run_reports_exit_status() {
        assert!(ShutdownAction::new("true", Vec::<String>::new()).run().is_ok());
        assert!(matches!(
            ShutdownAction::new("false", Vec::<String>::new()).run(),
            Err(ShutdownError::Failed { .. })
        ));
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let action = ShutdownAction::new("/nonexistent/shindo-poweroff", ["now"]);
        assert!(matches!(action.run(), Err(ShutdownError::Spawn { .. })));
    }
}
