use crate::config::TtsConfig;
use crate::error::VoiceError;
use crate::segment::{split_text, MAX_SEGMENT_CHARS};
use bytes::Bytes;
use std::time::Duration;

/// Maximum text input size for TTS (64 KiB). Prevents resource exhaustion from
/// oversized synthesis requests.
pub const MAX_TTS_INPUT_BYTES: usize = 64 * 1024;

/// MIME type of the audio the provider returns.
pub const AUDIO_MPEG: &str = "audio/mpeg";

/// The endpoint refuses requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// An encoded MPEG audio clip, kept as the ordered per-segment payloads.
///
/// MPEG frames concatenate, so playing the segments back to back is the
/// full clip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioClip {
    segments: Vec<Bytes>,
}

impl AudioClip {
    pub fn new(segments: Vec<Bytes>) -> Self {
        Self { segments }
    }

    /// Total size in bytes.
    pub fn len(&self) -> usize {
        self.segments.iter().map(Bytes::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn segments(&self) -> &[Bytes] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Bytes> {
        self.segments
    }

    /// Copies the clip into one contiguous buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        self.segments.concat()
    }
}

/// Service for generating speech from text.
///
/// Every call re-synthesizes; nothing is cached.
#[derive(Debug, Clone)]
pub struct TtsService {
    http: reqwest::Client,
    config: TtsConfig,
}

impl TtsService {
    pub fn new(config: TtsConfig) -> Result<Self, VoiceError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(VoiceError::Client)?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_tts", self.config.base_url.trim_end_matches('/'))
    }

    /// Synthesizes speech from `text`, buffering the whole clip.
    ///
    /// Text longer than one provider request is split into segments that are
    /// rendered in order. Any failed segment fails the whole call.
    pub async fn synthesize(&self, text: &str) -> Result<AudioClip, VoiceError> {
        if text.len() > MAX_TTS_INPUT_BYTES {
            return Err(VoiceError::TextTooLong {
                len: text.len(),
                limit: MAX_TTS_INPUT_BYTES,
            });
        }

        let parts = split_text(text, MAX_SEGMENT_CHARS);
        if parts.is_empty() {
            return Err(VoiceError::EmptyText);
        }

        tracing::debug!(
            segments = parts.len(),
            lang = %self.config.lang,
            "synthesizing speech"
        );

        let total = parts.len().to_string();
        let mut segments = Vec::with_capacity(parts.len());
        for (idx, part) in parts.iter().enumerate() {
            segments.push(self.synthesize_segment(part, idx, &total).await?);
        }

        Ok(AudioClip::new(segments))
    }

    async fn synthesize_segment(
        &self,
        part: &str,
        idx: usize,
        total: &str,
    ) -> Result<Bytes, VoiceError> {
        let idx_param = idx.to_string();
        let textlen = part.chars().count().to_string();

        let response = self
            .http
            .get(self.endpoint())
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.config.lang.as_str()),
                ("ttsspeed", self.config.speed_param()),
                ("total", total),
                ("idx", idx_param.as_str()),
                ("textlen", textlen.as_str()),
                ("q", part),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoiceError::Api {
                status: status.as_u16(),
                segment: idx,
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(VoiceError::EmptyAudio(idx));
        }
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_length_sums_segments() {
        let clip = AudioClip::new(vec![Bytes::from_static(b"abc"), Bytes::from_static(b"de")]);
        assert_eq!(clip.len(), 5);
        assert!(!clip.is_empty());
        assert_eq!(clip.to_vec(), b"abcde");
    }

    #[test]
    fn slow_flag_selects_speed() {
        let mut config = TtsConfig::default();
        assert_eq!(config.speed_param(), "1");
        config.slow = true;
        assert_eq!(config.speed_param(), "0.3");
    }

    #[tokio::test]
    async fn rejects_oversized_text_before_any_request() {
        // Port 9 (discard) is never contacted; the size check comes first.
        let service =
            TtsService::new(TtsConfig::default().with_base_url("http://127.0.0.1:9")).unwrap();
        let text = "a".repeat(MAX_TTS_INPUT_BYTES + 1);
        match service.synthesize(&text).await {
            Err(VoiceError::TextTooLong { len, limit }) => {
                assert_eq!(len, MAX_TTS_INPUT_BYTES + 1);
                assert_eq!(limit, MAX_TTS_INPUT_BYTES);
            }
            other => panic!("expected TextTooLong, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejects_blank_text() {
        let service =
            TtsService::new(TtsConfig::default().with_base_url("http://127.0.0.1:9")).unwrap();
        assert!(matches!(
            service.synthesize("   ").await,
            Err(VoiceError::EmptyText)
        ));
    }
}
