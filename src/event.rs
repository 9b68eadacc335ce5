use serde::Deserialize;

/// Message texts that request a report when matched exactly.
pub const COMMANDS: &[&str] = &["prs", "pr patrol", "what needs review?"];

// TODO: resolve the bot user id via auth.test at startup instead of
// hard-coding the mention text.
pub const WORKAROUND_PHRASE: &str = "<@U04PRPATROL> what needs review?";

// Slack direct-message channel ids start with D.
const DIRECT_MESSAGE_PREFIX: char = 'D';
const BOT_MESSAGE_SUBTYPE: &str = "bot_message";
const MESSAGE_KIND: &str = "message";

/// Inbound chat event as the transport hands it over.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub channel: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// What an inbound event asks of the bot. The scheduled run originates
/// from the timer rather than from an inbound event, so it has no variant
/// here; everything that is not a recognised request is `Ignore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    DirectMessage,
    CommandPhrase,
    WorkaroundPhrase,
    Ignore,
}

impl Trigger {
    pub fn requests_report(self) -> bool {
        !matches!(self, Trigger::Ignore)
    }
}

fn is_direct_message(event: &ChatEvent) -> bool {
    event.channel.starts_with(DIRECT_MESSAGE_PREFIX)
}

fn is_bot_message(event: &ChatEvent) -> bool {
    event.subtype.as_deref() == Some(BOT_MESSAGE_SUBTYPE)
}

/// Classifies an inbound event. Command phrases match in any channel;
/// direct messages trigger on their own unless another bot sent them.
pub fn classify(event: &ChatEvent) -> Trigger {
    if event.kind != MESSAGE_KIND {
        return Trigger::Ignore;
    }

    let text = event.text.as_deref().unwrap_or_default();
    if COMMANDS.contains(&text) {
        return Trigger::CommandPhrase;
    }
    if text == WORKAROUND_PHRASE {
        return Trigger::WorkaroundPhrase;
    }
    if is_direct_message(event) && !is_bot_message(event) {
        return Trigger::DirectMessage;
    }

    Trigger::Ignore
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: &str, channel: &str, subtype: Option<&str>, text: Option<&str>) -> ChatEvent {
        ChatEvent {
            kind: kind.to_string(),
            channel: channel.to_string(),
            subtype: subtype.map(str::to_string),
            text: text.map(str::to_string),
        }
    }

    #[test]
    fn classification_table() {
        let cases = [
            // Command phrases match exactly, in any channel.
            (event("message", "C123", None, Some("prs")), Trigger::CommandPhrase),
            (
                event("message", "C123", None, Some("what needs review?")),
                Trigger::CommandPhrase,
            ),
            (event("message", "C123", None, Some("prs please")), Trigger::Ignore),
            // The workaround mention is its own variant.
            (
                event("message", "C123", None, Some(WORKAROUND_PHRASE)),
                Trigger::WorkaroundPhrase,
            ),
            // Direct messages trigger unless sent by a bot.
            (event("message", "D123", None, Some("hello")), Trigger::DirectMessage),
            (
                event("message", "D123", Some("bot_message"), Some("hello")),
                Trigger::Ignore,
            ),
            (
                event("message", "D123", Some("me_message"), Some("hello")),
                Trigger::DirectMessage,
            ),
            // Anything that is not a message is ignored.
            (event("reaction_added", "D123", None, Some("prs")), Trigger::Ignore),
            // Plain channel chatter is ignored.
            (event("message", "C123", None, Some("hello")), Trigger::Ignore),
            (event("message", "C123", None, None), Trigger::Ignore),
        ];

        for (event, expected) in cases {
            assert_eq!(classify(&event), expected, "{:?}", event);
        }
    }

    #[test]
    fn command_in_a_direct_message_classifies_as_command() {
        let event = event("message", "D123", None, Some("prs"));
        assert_eq!(classify(&event), Trigger::CommandPhrase);
    }

    #[test]
    fn only_ignore_declines_a_report() {
        assert!(Trigger::DirectMessage.requests_report());
        assert!(Trigger::CommandPhrase.requests_report());
        assert!(Trigger::WorkaroundPhrase.requests_report());
        assert!(!Trigger::Ignore.requests_report());
    }

    #[test]
    fn event_deserialises_from_the_transport_shape() {
        let event: ChatEvent = serde_json::from_str(
            r#"{"type": "message", "channel": "D024BE91L", "text": "prs"}"#,
        )
        .unwrap();
        assert_eq!(event.kind, "message");
        assert_eq!(event.channel, "D024BE91L");
        assert_eq!(event.subtype, None);
        assert_eq!(classify(&event), Trigger::CommandPhrase);
    }
}
