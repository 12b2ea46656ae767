//! Test-only mock provider.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::LlmError;
use crate::provider::{LlmProvider, Message};

/// Scripted provider for tests: queued chat responses, a deterministic
/// embedding function, failure toggles, and call accounting so tests can
/// assert that no inference call happened.
#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    pub default_response: String,
    embed_fn: Arc<dyn Fn(&str) -> Vec<f32> + Send + Sync>,
    fail_chat: Arc<AtomicBool>,
    fail_embed: Arc<AtomicBool>,
    chat_calls: Arc<AtomicUsize>,
    embed_calls: Arc<AtomicUsize>,
    last_chat: Arc<Mutex<Vec<Message>>>,
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("default_response", &self.default_response)
            .field("fail_chat", &self.fail_chat.load(Ordering::Relaxed))
            .field("fail_embed", &self.fail_embed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            default_response: "mock response".into(),
            embed_fn: Arc::new(letter_histogram),
            fail_chat: Arc::new(AtomicBool::new(false)),
            fail_embed: Arc::new(AtomicBool::new(false)),
            chat_calls: Arc::new(AtomicUsize::new(0)),
            embed_calls: Arc::new(AtomicUsize::new(0)),
            last_chat: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Normalized letter-frequency vector: deterministic, and texts sharing
/// vocabulary score closer under cosine similarity.
fn letter_histogram(text: &str) -> Vec<f32> {
    let mut counts = vec![0.0f32; 26];
    for c in text.chars().filter(char::is_ascii_alphabetic) {
        let idx = (c.to_ascii_lowercase() as usize) - ('a' as usize);
        counts[idx] += 1.0;
    }
    let norm: f32 = counts.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for c in &mut counts {
            *c /= norm;
        }
    }
    counts
}

impl MockProvider {
    #[must_use]
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.fail_chat.store(true, Ordering::Relaxed);
        mock
    }

    #[must_use]
    pub fn with_embed_fn(mut self, f: impl Fn(&str) -> Vec<f32> + Send + Sync + 'static) -> Self {
        self.embed_fn = Arc::new(f);
        self
    }

    pub fn set_fail_chat(&self, fail: bool) {
        self.fail_chat.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_embed(&self, fail: bool) {
        self.fail_embed.store(fail, Ordering::Relaxed);
    }

    #[must_use]
    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::Relaxed)
    }

    /// Messages passed to the most recent `chat` call.
    #[must_use]
    pub fn last_chat_messages(&self) -> Vec<Message> {
        self.last_chat.lock().unwrap().clone()
    }
}

impl LlmProvider for MockProvider {
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        self.chat_calls.fetch_add(1, Ordering::Relaxed);
        *self.last_chat.lock().unwrap() = messages.to_vec();
        if self.fail_chat.load(Ordering::Relaxed) {
            return Err(LlmError::Other("mock chat error".into()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_response.clone())
        } else {
            Ok(responses.remove(0))
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.embed_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_embed.load(Ordering::Relaxed) {
            return Err(LlmError::Other("mock embed error".into()));
        }
        Ok((self.embed_fn)(text))
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "mock"
    }
}
