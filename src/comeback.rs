//! Style validation, prompt composition and the roast round trip.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use phf::phf_map;

use crate::consts;
use crate::errors::RoastError;
use crate::llm_client::CompletionProvider;

const SAVAGE_INSTRUCTION: &str = "Respond with a brutally savage comeback: short, blunt and harsh, \
     with no softening or conciliatory language.";
const SARCASTIC_INSTRUCTION: &str = "Respond with a sarcastic remark: dry, ironic and clever, \
     sharp but playful rather than cruel.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Savage,
    Sarcastic,
}

static STYLES: phf::Map<&'static str, Style> = phf_map! {
    "savage" => Style::Savage,
    "sarcastic" => Style::Sarcastic,
};

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Savage => "savage",
            Style::Sarcastic => "sarcastic",
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            Style::Savage => SAVAGE_INSTRUCTION,
            Style::Sarcastic => SARCASTIC_INSTRUCTION,
        }
    }
}

impl FromStr for Style {
    type Err = RoastError;

    /// Case-insensitive; surrounding whitespace is not forgiven.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STYLES
            .get(s.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| RoastError::ValidationError(consts::INVALID_STYLE_MESSAGE.to_string()))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoastRequest {
    style: Style,
    message: String,
}

impl RoastRequest {
    pub fn new(style: &str, message: impl Into<String>) -> Result<Self, RoastError> {
        Ok(Self {
            style: style.parse()?,
            message: message.into(),
        })
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn prompt(&self) -> String {
        format!(
            "Someone said: \"{}\"\nYour job: {}\nOnly reply with the comeback, no commentary or preamble.",
            self.message,
            self.style.instruction()
        )
    }
}

/// Outcome of one roast call.
#[derive(Debug, Clone)]
pub enum Comeback {
    Generated(String),
    InvalidStyle,
    Failed(RoastError),
}

impl Comeback {
    pub fn is_generated(&self) -> bool {
        matches!(self, Comeback::Generated(_))
    }

    /// Flattens the outcome into the string a tool caller sees.
    pub fn into_text(self) -> String {
        match self {
            Comeback::Generated(text) => text,
            Comeback::InvalidStyle => consts::INVALID_STYLE_MESSAGE.to_string(),
            Comeback::Failed(err) => format!("{}{}", consts::ERROR_PREFIX, err.detail()),
        }
    }
}

#[derive(Clone)]
pub struct ComebackGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl ComebackGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub async fn comeback(&self, style: &str, message: &str) -> Comeback {
        let request = match RoastRequest::new(style, message) {
            Ok(request) => request,
            Err(_) => {
                log::info!("rejected roast style {style:?}");
                return Comeback::InvalidStyle;
            }
        };

        match self.provider.complete(&request.prompt()).await {
            Ok(text) => Comeback::Generated(text.trim().to_string()),
            Err(e) => {
                log::error!("{} roast failed: {}", request.style(), e);
                Comeback::Failed(e)
            }
        }
    }

    pub async fn generate(&self, style: &str, message: &str) -> String {
        self.comeback(style, message).await.into_text()
    }
}
