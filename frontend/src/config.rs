use log::Level;

use crate::faq::{KnowledgeBase, KnowledgeBaseError};

const KNOWLEDGE_BASE_JSON: &str = include_str!("../assets/knowledge_base.json");

#[cfg(debug_assertions)]
pub fn get_log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn get_log_level() -> Level {
    Level::Info
}

#[cfg(debug_assertions)]
pub fn get_reply_delay_ms() -> u32 {
    250  // Shorter wait while iterating locally
}

#[cfg(not(debug_assertions))]
pub fn get_reply_delay_ms() -> u32 {
    1000
}

/// Settings for the support chat widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    pub title: String,
    pub greeting: String,
    pub placeholder: String,
    /// How long the bot "types" before its answer shows up.
    pub reply_delay_ms: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            title: "SoftSell Support".to_string(),
            greeting: "Hello! I'm here to help answer your questions about SoftSell. What would you like to know?".to_string(),
            placeholder: "Type your question...".to_string(),
            reply_delay_ms: get_reply_delay_ms(),
        }
    }
}

/// The FAQ table bundled into the binary.
pub fn load_knowledge_base() -> Result<KnowledgeBase, KnowledgeBaseError> {
    KnowledgeBase::from_json(KNOWLEDGE_BASE_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faq::{respond, FALLBACK_RESPONSE};

    #[test]
    fn bundled_knowledge_base_parses_in_order() {
        let kb = load_knowledge_base().unwrap();
        let keywords: Vec<&str> = kb.entries().iter().map(|e| e.keyword()).collect();
        assert_eq!(
            keywords,
            vec![
                "how do i sell my license",
                "what types of software licenses do you accept",
                "how fast is the payment process",
                "is my information safe",
            ]
        );
    }

    #[test]
    fn bundled_answers() {
        let kb = load_knowledge_base().unwrap();

        let security = respond("So... is my information safe?", &kb);
        assert!(security.starts_with("Absolutely! Security is our top priority."));

        let selling = respond("How do I sell my license", &kb);
        assert_eq!(selling.lines().count(), 4);
        assert!(selling.contains("\n2. Our experts will review"));

        assert_eq!(respond("what's the weather like", &kb), FALLBACK_RESPONSE);
    }

    #[test]
    fn default_chat_config() {
        let config = ChatConfig::default();
        assert_eq!(config.title, "SoftSell Support");
        assert_eq!(config.reply_delay_ms, get_reply_delay_ms());
        assert!(config.greeting.starts_with("Hello!"));
    }

    #[test]
    fn reply_delay_follows_build_profile() {
        let delay = ChatConfig::default().reply_delay_ms;
        if cfg!(debug_assertions) {
            assert_eq!(delay, 250);
        } else {
            assert_eq!(delay, 1000);
        }
    }
}
