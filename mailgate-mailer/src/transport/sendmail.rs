use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use tracing::{debug, warn};

use super::{MailTransport, OutgoingMessage};
use crate::error::TransportError;

/// Hands messages to a local sendmail-compatible delivery agent.
///
/// The rendered message is written to the agent's standard input; recipients
/// come from the headers (`-t`).
#[derive(Clone, Debug)]
pub struct SendmailTransport {
    path: PathBuf,
    args: Vec<String>,
}

impl SendmailTransport {
    #[must_use]
    pub const fn new(path: PathBuf, args: Vec<String>) -> Self {
        Self { path, args }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MailTransport for SendmailTransport {
    fn send(&self, message: &OutgoingMessage) -> Result<(), TransportError> {
        debug!("Piping message for {} to {}", message.to, self.path.display());

        let mut child = Command::new(&self.path)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()?;

        let written = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| stdin.write_all(message.render().as_bytes()));

        let status = child.wait()?;
        if let Err(err) = written {
            warn!("Delivery agent {} stopped reading: {err}", self.path.display());
            return Err(err.into());
        }

        if status.success() {
            Ok(())
        } else {
            Err(TransportError::Exit(status.code()))
        }
    }
}
