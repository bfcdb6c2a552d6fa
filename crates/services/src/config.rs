use std::env;
use std::time::Duration;

pub const DEFAULT_TRIVIA_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_GENERATION_PASSES: usize = 2;

/// Hosted text-generation endpoint (Hugging Face style `{inputs, parameters}`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferenceConfig {
    pub url: String,
    pub token: Option<String>,
}

/// OpenAI-compatible chat completions endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

/// Runtime settings for question acquisition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub trivia_url: String,
    pub timeout: Duration,
    pub generation_passes: usize,
    pub inference: Option<InferenceConfig>,
    pub chat: Option<ChatConfig>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            trivia_url: DEFAULT_TRIVIA_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            generation_passes: DEFAULT_GENERATION_PASSES,
            inference: None,
            chat: None,
        }
    }
}

impl QuizConfig {
    /// Read settings from `QUIZ_*` environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Blank values count as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let trivia_url = get("QUIZ_TRIVIA_URL").unwrap_or_else(|| DEFAULT_TRIVIA_URL.into());
        let timeout = get("QUIZ_HTTP_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);
        let generation_passes = get("QUIZ_GENERATION_PASSES")
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|passes| *passes > 0)
            .unwrap_or(DEFAULT_GENERATION_PASSES);

        let inference = get("QUIZ_INFERENCE_URL").map(|url| InferenceConfig {
            url,
            token: get("QUIZ_INFERENCE_TOKEN"),
        });
        let chat = get("QUIZ_AI_API_KEY").map(|api_key| ChatConfig {
            base_url: get("QUIZ_AI_BASE_URL").unwrap_or_else(|| "https://api.openai.com/v1".into()),
            api_key,
            model: get("QUIZ_AI_MODEL").unwrap_or_else(|| "gpt-4o-mini".into()),
        });

        Self {
            trivia_url,
            timeout,
            generation_passes,
            inference,
            chat,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
