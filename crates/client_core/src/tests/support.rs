use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::protocol::Command;

use crate::{CommandTransport, RequestSubmitter, SubmitterOptions, TransportError, UserInteraction};

pub struct RecordingInteraction {
    answer: bool,
    prompts: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

impl RecordingInteraction {
    pub fn approving() -> Arc<Self> {
        Arc::new(Self::answering(true))
    }

    pub fn declining() -> Arc<Self> {
        Arc::new(Self::answering(false))
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl UserInteraction for RecordingInteraction {
    fn confirm(&self, text: &str) -> bool {
        self.prompts.lock().unwrap().push(text.to_string());
        self.answer
    }

    fn notify(&self, text: &str) {
        self.notices.lock().unwrap().push(text.to_string());
    }
}

pub struct StubTransport {
    reply: Result<String, TransportError>,
    sent: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn replying(body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(body.to_string()),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: TransportError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandTransport for StubTransport {
    async fn send(&self, command: &Command) -> Result<String, TransportError> {
        self.sent.lock().unwrap().push(command.to_string());
        self.reply.clone()
    }
}

pub fn submitter(
    transport: Arc<dyn CommandTransport>,
    interaction: Arc<dyn UserInteraction>,
    confirm_requests: bool,
) -> RequestSubmitter {
    RequestSubmitter::new(transport, interaction, SubmitterOptions { confirm_requests })
}
