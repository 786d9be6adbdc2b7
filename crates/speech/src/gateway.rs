//! Voice I/O gateway
//!
//! Owns the audio cache and the speaking/listening gates as explicit
//! resources (no module-level globals): the cache maps exact prompt text to
//! synthesized clips for the gateway's lifetime, and a single active
//! utterance preempts any prior playback. Capture is modeled as one
//! suspension point per `listen` call that settles exactly once.

use async_trait::async_trait;
use carvoice_core::{
    AudioClip, AudioSink, ListenOptions, ManualEntry, RecognizeOptions, Result, SpeechError,
    SpeechRecognizer, SpeechSynthesizer, VoiceCapabilities, VoiceIo,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Voice I/O gateway composing synthesis, playback, and capture
pub struct VoiceGateway {
    synthesizer: Box<dyn SpeechSynthesizer>,
    fallback: Option<Box<dyn SpeechSynthesizer>>,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    manual_entry: Option<Box<dyn ManualEntry>>,
    sink: Box<dyn AudioSink>,
    cache: Mutex<HashMap<String, AudioClip>>,
    speaking: AtomicBool,
    listening: AtomicBool,
    recognize_opts: RecognizeOptions,
}

impl VoiceGateway {
    /// Create a gateway over a synthesis backend and playback sink
    ///
    /// Capability gaps are reported here, eagerly, rather than on first use.
    pub fn new(synthesizer: Box<dyn SpeechSynthesizer>, sink: Box<dyn AudioSink>) -> Self {
        if !synthesizer.is_configured() {
            tracing::warn!(
                backend = synthesizer.name(),
                "Synthesis backend is not configured; playback will rely on the fallback"
            );
        }

        Self {
            synthesizer,
            fallback: None,
            recognizer: None,
            manual_entry: None,
            sink,
            cache: Mutex::new(HashMap::new()),
            speaking: AtomicBool::new(false),
            listening: AtomicBool::new(false),
            recognize_opts: RecognizeOptions::default(),
        }
    }

    /// Attach an on-device fallback synthesizer
    pub fn with_fallback(mut self, fallback: Box<dyn SpeechSynthesizer>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Attach a speech recognition capability
    pub fn with_recognizer(mut self, recognizer: Box<dyn SpeechRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Attach a manual-entry fallback used when recognition is absent
    pub fn with_manual_entry(mut self, entry: Box<dyn ManualEntry>) -> Self {
        self.manual_entry = Some(entry);
        self
    }

    /// Number of cached clips (diagnostics)
    pub fn cached_clips(&self) -> usize {
        self.cache.lock().len()
    }

    /// Drop a cached clip, e.g. when its prompt is superseded
    pub fn evict(&self, text: &str) {
        self.cache.lock().remove(text);
    }

    /// Fetch a clip for `text`: cache, then synthesis, then fallback
    ///
    /// Only primary-synthesis clips are cached; fallback output is assumed
    /// cheap to regenerate.
    async fn clip_for(&self, text: &str) -> Option<AudioClip> {
        if let Some(clip) = self.cache.lock().get(text).cloned() {
            tracing::debug!(len = clip.len(), "Audio cache hit");
            return Some(clip);
        }

        match self.synthesizer.synthesize(text).await {
            Ok(clip) => {
                self.cache.lock().insert(text.to_string(), clip.clone());
                return Some(clip);
            }
            Err(err) => {
                tracing::warn!(
                    backend = self.synthesizer.name(),
                    error = %err,
                    "Synthesis failed; trying fallback"
                );
            }
        }

        if let Some(fallback) = &self.fallback {
            match fallback.synthesize(text).await {
                Ok(clip) => return Some(clip),
                Err(err) => {
                    tracing::warn!(backend = fallback.name(), error = %err, "Fallback synthesis failed");
                }
            }
        }

        None
    }

    async fn capture(&self, opts: ListenOptions) -> Result<String> {
        if let Some(recognizer) = &self.recognizer {
            // Dropping the recognize future on timeout cancels this capture
            // attempt only; retry logic upstream handles the empty result.
            return match tokio::time::timeout(opts.timeout, recognizer.recognize(&self.recognize_opts))
                .await
            {
                Ok(Ok(text)) => Ok(text),
                Ok(Err(err)) => {
                    tracing::warn!(backend = recognizer.name(), error = %err, "Recognition failed");
                    Ok(String::new())
                }
                Err(_) => {
                    tracing::debug!(timeout_ms = opts.timeout.as_millis() as u64, "Capture timed out");
                    Ok(String::new())
                }
            };
        }

        if let Some(entry) = &self.manual_entry {
            return entry
                .read_reply("Type your reply (speech recognition not available):")
                .await;
        }

        Err(SpeechError::RecognitionUnavailable.into())
    }
}

#[async_trait]
impl VoiceIo for VoiceGateway {
    async fn speak(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        // Single active utterance at a time: starting a new one preempts.
        self.sink.stop();

        let Some(clip) = self.clip_for(text).await else {
            tracing::warn!("No audio produced for utterance; continuing without playback");
            return Ok(());
        };

        self.speaking.store(true, Ordering::SeqCst);
        let played = self.sink.play(&clip).await;
        self.speaking.store(false, Ordering::SeqCst);

        if let Err(err) = played {
            tracing::warn!(error = %err, "Playback failed; utterance skipped");
        }
        Ok(())
    }

    async fn listen(&self, opts: ListenOptions) -> Result<String> {
        if self.speaking.load(Ordering::SeqCst) {
            return Err(SpeechError::CaptureWhileSpeaking.into());
        }
        if self.listening.swap(true, Ordering::SeqCst) {
            // A capture is already active; the duplicate call is a no-op.
            return Ok(String::new());
        }

        let result = self.capture(opts).await;
        self.listening.store(false, Ordering::SeqCst);
        result
    }

    async fn preload(&self, text: &str) {
        if text.is_empty() || self.cache.lock().contains_key(text) {
            return;
        }
        match self.synthesizer.synthesize(text).await {
            Ok(clip) => {
                self.cache.lock().insert(text.to_string(), clip);
            }
            Err(err) => {
                tracing::debug!(error = %err, "Audio preload failed");
            }
        }
    }

    fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    fn capabilities(&self) -> VoiceCapabilities {
        VoiceCapabilities {
            recognition: self.recognizer.is_some(),
            manual_entry: self.manual_entry.is_some(),
            synthesis_configured: self.synthesizer.is_configured(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carvoice_core::Error;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    struct CountingSynth {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl SpeechSynthesizer for CountingSynth {
        async fn synthesize(&self, text: &str) -> Result<AudioClip> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SpeechError::SynthesisUnavailable("down".to_string()).into());
            }
            Ok(AudioClip::new(text.as_bytes().to_vec(), "audio/mpeg"))
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct NullSink;

    #[async_trait]
    impl AudioSink for NullSink {
        async fn play(&self, _clip: &AudioClip) -> Result<()> {
            Ok(())
        }

        fn stop(&self) {}
    }

    struct SlowRecognizer;

    #[async_trait]
    impl SpeechRecognizer for SlowRecognizer {
        async fn recognize(&self, _opts: &RecognizeOptions) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    struct FixedRecognizer(&'static str);

    #[async_trait]
    impl SpeechRecognizer for FixedRecognizer {
        async fn recognize(&self, opts: &RecognizeOptions) -> Result<String> {
            assert!(!opts.interim_results);
            assert_eq!(opts.max_alternatives, 1);
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn gateway_with(synth: CountingSynth) -> VoiceGateway {
        VoiceGateway::new(Box::new(synth), Box::new(NullSink))
    }

    #[tokio::test]
    async fn test_cache_hit_skips_synthesis() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = gateway_with(CountingSynth {
            calls: calls.clone(),
            fail: false,
        });

        gateway.speak("What is your credit score?").await.unwrap();
        gateway.speak("What is your credit score?").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(gateway.cached_clips(), 1);
    }

    #[tokio::test]
    async fn test_preload_warms_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = gateway_with(CountingSynth {
            calls: calls.clone(),
            fail: false,
        });

        gateway.preload("Loan term in months?").await;
        gateway.preload("Loan term in months?").await;
        gateway.speak("Loan term in months?").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_synthesis_failure_uses_fallback_and_never_errors() {
        let primary_calls = Arc::new(AtomicUsize::new(0));
        let fallback_calls = Arc::new(AtomicUsize::new(0));
        let gateway = VoiceGateway::new(
            Box::new(CountingSynth {
                calls: primary_calls.clone(),
                fail: true,
            }),
            Box::new(NullSink),
        )
        .with_fallback(Box::new(CountingSynth {
            calls: fallback_calls.clone(),
            fail: false,
        }));

        gateway.speak("hello").await.unwrap();
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
        // Fallback output is not cached.
        assert_eq!(gateway.cached_clips(), 0);
    }

    #[tokio::test]
    async fn test_total_synthesis_failure_still_resolves() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = gateway_with(CountingSynth { calls, fail: true });
        assert!(gateway.speak("hello").await.is_ok());
    }

    #[tokio::test]
    async fn test_listen_timeout_yields_empty_transcript() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = gateway_with(CountingSynth { calls, fail: false })
            .with_recognizer(Box::new(SlowRecognizer));

        let text = gateway
            .listen(ListenOptions {
                timeout: Duration::from_millis(20),
            })
            .await
            .unwrap();
        assert_eq!(text, "");
        assert!(!gateway.is_listening());
    }

    #[tokio::test]
    async fn test_listen_returns_transcript() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = gateway_with(CountingSynth { calls, fail: false })
            .with_recognizer(Box::new(FixedRecognizer("thirty five thousand")));

        let text = gateway.listen(ListenOptions::default()).await.unwrap();
        assert_eq!(text, "thirty five thousand");
    }

    #[tokio::test]
    async fn test_listen_while_speaking_is_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = gateway_with(CountingSynth { calls, fail: false })
            .with_recognizer(Box::new(FixedRecognizer("hi")));

        gateway.speaking.store(true, Ordering::SeqCst);
        let err = gateway.listen(ListenOptions::default()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Speech(SpeechError::CaptureWhileSpeaking)
        ));
    }

    #[tokio::test]
    async fn test_reentrant_listen_is_noop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = gateway_with(CountingSynth { calls, fail: false })
            .with_recognizer(Box::new(FixedRecognizer("hi")));

        gateway.listening.store(true, Ordering::SeqCst);
        let text = gateway.listen(ListenOptions::default()).await.unwrap();
        assert_eq!(text, "");
        // The guard set by the outer capture is left in place.
        assert!(gateway.is_listening());
    }

    #[tokio::test]
    async fn test_no_recognizer_without_manual_entry_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = gateway_with(CountingSynth { calls, fail: false });

        assert!(!gateway.capabilities().recognition);
        let err = gateway.listen(ListenOptions::default()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Speech(SpeechError::RecognitionUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_evict_superseded_clip() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = gateway_with(CountingSynth {
            calls: calls.clone(),
            fail: false,
        });

        gateway.preload("old prompt").await;
        assert_eq!(gateway.cached_clips(), 1);
        gateway.evict("old prompt");
        assert_eq!(gateway.cached_clips(), 0);
    }
}
