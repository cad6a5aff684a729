//! Audio lookup for prompts and word cards
//!
//! Audio is best effort. Each [`AudioProvider`] returns `None` when it has
//! nothing to play, and a [`FallbackChain`] asks its strategies in order
//! until one answers: a local recording first, then whatever text-to-speech
//! proxy the host application plugs in, and finally silence, where the UI
//! falls back to the emoji/text card.

use std::path::{Path, PathBuf};

use crate::config::AudioConfig;

pub trait AudioProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Audio bytes for `text`, or `None` if this strategy cannot produce any.
    /// Must not panic on arbitrary input.
    fn synthesize(&self, text: &str) -> Option<Vec<u8>>;
}

/// Ordered strategies; the first `Some` wins.
#[derive(Default)]
pub struct FallbackChain {
    providers: Vec<Box<dyn AudioProvider>>,
}

impl FallbackChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl AudioProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn push(&mut self, provider: Box<dyn AudioProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Chain with the local recordings stage from `config`, if one is set.
    /// Append a TTS stage with [`FallbackChain::with`].
    pub fn from_config(config: &AudioConfig) -> Self {
        let mut chain = Self::new();
        if let Some(dir) = &config.recordings_dir {
            chain.push(Box::new(LocalRecordings::new(dir, config.extensions.clone())));
        }
        chain
    }
}

impl AudioProvider for FallbackChain {
    fn name(&self) -> &str {
        "fallback"
    }

    fn synthesize(&self, text: &str) -> Option<Vec<u8>> {
        for provider in &self.providers {
            match provider.synthesize(text) {
                Some(bytes) => {
                    log::debug!("Audio for '{}' from {}", text, provider.name());
                    return Some(bytes);
                }
                None => log::debug!("No audio for '{}' from {}", text, provider.name()),
            }
        }
        log::warn!("No audio available for '{}'", text);
        None
    }
}

/// Pre-recorded clips at `<dir>/<slug>.<ext>`.
pub struct LocalRecordings {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl LocalRecordings {
    pub fn new(dir: impl AsRef<Path>, extensions: Vec<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extensions,
        }
    }

    /// Candidate paths for `text`, one per extension.
    pub fn candidates(&self, text: &str) -> Vec<PathBuf> {
        let slug = slug(text);
        if slug.is_empty() {
            return Vec::new();
        }
        self.extensions
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", slug, ext)))
            .collect()
    }
}

impl AudioProvider for LocalRecordings {
    fn name(&self) -> &str {
        "local"
    }

    fn synthesize(&self, text: &str) -> Option<Vec<u8>> {
        self.candidates(text)
            .into_iter()
            .find_map(|path| std::fs::read(&path).ok())
    }
}

/// Adapter for a host-supplied synthesizer, e.g. an HTTP TTS proxy.
pub struct FnProvider<F> {
    name: String,
    synthesize: F,
}

impl<F> FnProvider<F>
where
    F: Fn(&str) -> Option<Vec<u8>> + Send + Sync,
{
    pub fn new(name: impl Into<String>, synthesize: F) -> Self {
        Self {
            name: name.into(),
            synthesize,
        }
    }
}

impl<F> AudioProvider for FnProvider<F>
where
    F: Fn(&str) -> Option<Vec<u8>> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn synthesize(&self, text: &str) -> Option<Vec<u8>> {
        (self.synthesize)(text)
    }
}

/// Visual-only mode: never any audio.
pub struct Silent;

impl AudioProvider for Silent {
    fn name(&self) -> &str {
        "silent"
    }

    fn synthesize(&self, _text: &str) -> Option<Vec<u8>> {
        None
    }
}

/// File name for a clip: lowercase, runs of non-alphanumerics become `_`.
/// "Ngoso'" -> "ngoso", "O maan koni?" -> "o_maan_koni".
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;
    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}
