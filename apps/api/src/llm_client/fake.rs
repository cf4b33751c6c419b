//! Deterministic in-process `CompletionService` for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionError, CompletionService, GenerationParameters};

type Reply = Box<dyn Fn() -> Result<String, CompletionError> + Send + Sync>;

/// Records every prompt it receives and answers with a fixed reply.
pub struct FakeCompletion {
    reply: Reply,
    calls: Mutex<Vec<(String, GenerationParameters)>>,
}

impl FakeCompletion {
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self {
            reply: Box::new(move || Ok(text.clone())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing<F>(error: F) -> Self
    where
        F: Fn() -> CompletionError + Send + Sync + 'static,
    {
        Self {
            reply: Box::new(move || Err(error())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, GenerationParameters)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for FakeCompletion {
    async fn complete(
        &self,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<String, CompletionError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *params));
        (self.reply)()
    }
}
