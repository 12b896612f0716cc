use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn css_class(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    sender: Sender,
    text: String,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp,
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `HH:MM`, the way the widget shows it under each bubble.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Append-only message log for one chat session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// A transcript that opens with a bot greeting.
    pub fn with_greeting(greeting: &str) -> Self {
        let mut transcript = Self::default();
        transcript.push(Sender::Bot, greeting);
        transcript
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) {
        self.messages.push(ChatMessage::new(sender, text, Local::now()));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

/// Blank and whitespace-only input is never sent.
pub fn is_sendable(input: &str) -> bool {
    !input.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn starts_with_greeting() {
        let transcript = Transcript::with_greeting("Hello!");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].sender(), Sender::Bot);
        assert_eq!(transcript.messages()[0].text(), "Hello!");
    }

    #[test]
    fn appends_in_order() {
        let mut transcript = Transcript::default();
        assert_eq!(transcript.len(), 0);

        transcript.push(Sender::User, "  is my information safe  ");
        transcript.push(Sender::Bot, "Absolutely!");

        let senders: Vec<Sender> = transcript.messages().iter().map(|m| m.sender()).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot]);
        assert_eq!(transcript.messages()[0].text(), "  is my information safe  ");
        assert!(transcript.messages()[0].timestamp <= transcript.messages()[1].timestamp);
    }

    #[test]
    fn time_label_is_hours_and_minutes() {
        let at = Local.with_ymd_and_hms(2025, 3, 4, 9, 5, 42).unwrap();
        let message = ChatMessage::new(Sender::Bot, "hi", at);
        assert_eq!(message.time_label(), "09:05");
    }

    #[test]
    fn blank_input_is_not_sendable() {
        assert!(!is_sendable(""));
        assert!(!is_sendable("   \n\t"));
        assert!(is_sendable(" hi "));
    }

    #[test]
    fn sender_classes() {
        assert_eq!(Sender::User.css_class(), "user");
        assert_eq!(Sender::Bot.css_class(), "bot");
    }
}
