use std::sync::{Arc, Mutex, MutexGuard};

use shared::{
    error::RequestError,
    protocol::{classify_response, Command},
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub mod forms;
pub mod interaction;
pub mod transport;

pub use forms::{FormBindings, FormSource, FormValues};
pub use interaction::UserInteraction;
pub use transport::{CommandTransport, HttpTransport, TransportError};

/// `Ok` when the server answered with the success sentinel.
pub type RequestOutcome = Result<(), RequestError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitterOptions {
    /// Ask before every submission.
    pub confirm_requests: bool,
}

impl Default for SubmitterOptions {
    fn default() -> Self {
        Self {
            confirm_requests: true,
        }
    }
}

/// Confirms, sends and reports on commands, one independent request per call.
///
/// Requests are spawned on the current tokio runtime; nothing orders or
/// cancels them relative to each other.
#[derive(Clone)]
pub struct RequestSubmitter {
    transport: Arc<dyn CommandTransport>,
    interaction: Arc<dyn UserInteraction>,
    options: SubmitterOptions,
    in_flight: Arc<Mutex<Vec<JoinHandle<RequestOutcome>>>>,
}

impl RequestSubmitter {
    pub fn new(
        transport: Arc<dyn CommandTransport>,
        interaction: Arc<dyn UserInteraction>,
        options: SubmitterOptions,
    ) -> Self {
        Self {
            transport,
            interaction,
            options,
            in_flight: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn options(&self) -> SubmitterOptions {
        self.options
    }

    /// Submit handler body: fire the request and report `false` so the host
    /// never performs the form's own navigation, whatever happens next.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit_command(&self, command: Command) -> bool {
        if let Some(handle) = self.dispatch(command) {
            let mut in_flight = self.lock_in_flight();
            in_flight.retain(|task| !task.is_finished());
            in_flight.push(handle);
        }
        false
    }

    /// Requests started by [`submit_command`](Self::submit_command) that have
    /// not finished yet.
    pub fn pending(&self) -> usize {
        let mut in_flight = self.lock_in_flight();
        in_flight.retain(|task| !task.is_finished());
        in_flight.len()
    }

    /// Confirm if configured, then start the request. `None` means the user
    /// declined and nothing was sent.
    pub fn dispatch(&self, command: Command) -> Option<JoinHandle<RequestOutcome>> {
        if self.options.confirm_requests
            && !self.interaction.confirm(&command.confirmation_prompt())
        {
            debug!(%command, "request declined");
            return None;
        }

        let submitter = self.clone();
        Some(tokio::spawn(async move { submitter.send(&command).await }))
    }

    /// Send one command without asking, then notify the user unless the
    /// server accepted it.
    pub async fn send(&self, command: &Command) -> RequestOutcome {
        let outcome = match self.transport.send(command).await {
            Ok(body) => classify_response(&body).into_result(),
            Err(error) => Err(error.into_request_error()),
        };

        match &outcome {
            Ok(()) => info!(%command, "request accepted"),
            Err(error) => {
                let message = error.to_string();
                warn!(%command, error = %message.trim_end(), "request not accepted");
                self.interaction.notify(&message);
            }
        }
        outcome
    }

    /// Wait for the requests started by [`submit_command`](Self::submit_command)
    /// that are still tracked.
    ///
    /// Handles of finished requests are dropped whenever another command is
    /// submitted, so only outcomes of requests pending since the last
    /// submission are guaranteed to be returned. Outcomes come back in
    /// submission order, not completion order.
    pub async fn wait_idle(&self) -> Vec<RequestOutcome> {
        let handles = std::mem::take(&mut *self.lock_in_flight());
        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(join_error) => {
                    error!(%join_error, "request task ended abnormally");
                    outcomes.push(Err(RequestError::transport(
                        "error",
                        join_error.to_string(),
                    )));
                }
            }
        }
        outcomes
    }

    pub(crate) fn notify(&self, text: &str) {
        self.interaction.notify(text);
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Vec<JoinHandle<RequestOutcome>>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
