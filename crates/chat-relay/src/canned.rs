//! Keyword-matched replies used when no backend answers.

use tracing::debug;

/// How a [`KeywordRule`] tests the lower-cased message.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Matcher {
    /// The first word is one of these.
    FirstWord(Vec<String>),
    /// Every keyword appears somewhere.
    AllOf(Vec<String>),
    /// At least one keyword appears somewhere.
    AnyOf(Vec<String>),
}

/// One row of the canned table: a keyword test and the reply it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    matcher: Matcher,
    reply: String,
}

fn lowered(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

impl KeywordRule {
    /// Match when the message starts with one of `words`.
    pub fn first_word(words: &[&str], reply: impl Into<String>) -> Self {
        Self {
            matcher: Matcher::FirstWord(lowered(words)),
            reply: reply.into(),
        }
    }

    /// Match when the message contains every keyword.
    pub fn all_of(keywords: &[&str], reply: impl Into<String>) -> Self {
        Self {
            matcher: Matcher::AllOf(lowered(keywords)),
            reply: reply.into(),
        }
    }

    /// Match when the message contains any keyword.
    pub fn any_of(keywords: &[&str], reply: impl Into<String>) -> Self {
        Self {
            matcher: Matcher::AnyOf(lowered(keywords)),
            reply: reply.into(),
        }
    }

    /// Test an already lower-cased message.
    pub fn matches(&self, lowered: &str) -> bool {
        match &self.matcher {
            Matcher::FirstWord(words) => {
                let first = lowered
                    .split(|c: char| !c.is_alphanumeric())
                    .find(|w| !w.is_empty())
                    .unwrap_or_default();
                words.iter().any(|w| w == first)
            }
            Matcher::AllOf(keywords) => keywords.iter().all(|k| lowered.contains(k.as_str())),
            Matcher::AnyOf(keywords) => keywords.iter().any(|k| lowered.contains(k.as_str())),
        }
    }

    /// The reply this rule selects.
    pub fn reply(&self) -> &str {
        &self.reply
    }
}

/// Offline assistant: first matching rule wins, otherwise a default.
#[derive(Debug, Clone)]
pub struct CannedResponder {
    chat_rules: Vec<KeywordRule>,
    emergency_rules: Vec<KeywordRule>,
    emergency_default: String,
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self {
            chat_rules: default_chat_rules(),
            emergency_rules: default_emergency_rules(),
            emergency_default: DEFAULT_EMERGENCY_GUIDANCE.to_string(),
        }
    }
}

impl CannedResponder {
    /// The built-in tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `rule` before the built-in chat rules.
    pub fn with_chat_rule(mut self, rule: KeywordRule) -> Self {
        self.chat_rules.insert(0, rule);
        self
    }

    /// Check `rule` before the built-in emergency rules.
    pub fn with_emergency_rule(mut self, rule: KeywordRule) -> Self {
        self.emergency_rules.insert(0, rule);
        self
    }

    /// Reply to a chat message. Unmatched messages get a reply that
    /// echoes the question and asks for details.
    pub fn reply(&self, message: &str) -> String {
        let lowered = message.trim().to_lowercase();
        match self.chat_rules.iter().find(|r| r.matches(&lowered)) {
            Some(rule) => rule.reply().to_string(),
            None => {
                debug!("No canned rule matched, using default reply");
                format!(
                    "I understand you're asking about \"{}\". As your safety assistant, I'm here to \
                     help with personal safety and using Aksha. Could you share a few more details \
                     so I can give you the most helpful information?",
                    message.trim()
                )
            }
        }
    }

    /// Numbered guidance for an emergency situation.
    pub fn emergency_guidance(&self, situation: &str) -> String {
        let lowered = situation.to_lowercase();
        self.emergency_rules
            .iter()
            .find(|r| r.matches(&lowered))
            .map(|r| r.reply().to_string())
            .unwrap_or_else(|| self.emergency_default.clone())
    }
}

const DEFAULT_EMERGENCY_GUIDANCE: &str = "Emergency guidance:\n\n\
1. Stay calm and assess your surroundings\n\
2. Move to a safe location if possible\n\
3. Use Aksha's SOS feature to alert your emergency contacts\n\
4. Call emergency services (112) if you are in immediate danger\n\
5. Share your exact location with the app's location sharing";

fn default_chat_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::first_word(
            &["hi", "hello", "hey", "greetings"],
            "Hello! I'm Aksha's safety assistant. I can help with safety concerns or questions \
             about using the app. How can I help you today?",
        ),
        KeywordRule::all_of(
            &["safe", "walk"],
            "When walking, especially at night, stay in well-lit areas, avoid wearing headphones, \
             and tell someone your route. Live location sharing lets your trusted contacts follow \
             your journey, and the SOS button is always there if you need it.",
        ),
        KeywordRule::any_of(
            &["public transport", "bus", "train"],
            "On public transport, wait in well-lit, populated areas, sit near the driver if you \
             can, and keep your belongings secure. Share your live location so your contacts know \
             where you are.",
        ),
        KeywordRule::any_of(
            &["uber", "taxi", "ride"],
            "Before getting into a taxi or ride-share, check that the driver and vehicle match \
             the booking. Share your trip with a trusted contact and keep live location sharing \
             on until you arrive.",
        ),
        KeywordRule::any_of(
            &["add contact", "emergency contact"],
            "Open your contacts and select the people who should be alerted. You can select up \
             to 5 emergency contacts; each needs a phone number.",
        ),
        KeywordRule::any_of(
            &["being followed", "stalked"],
            "If you think you're being followed, stay calm and move toward populated areas right \
             away. Don't go straight home. Call a trusted contact, go into a shop or other public \
             place, or approach a police officer. Use SOS to send your location to your \
             emergency contacts.",
        ),
        KeywordRule::any_of(
            &["emergency", "danger", "help me"],
            "If you're in immediate danger, press SOS to alert your emergency contacts with your \
             location. Move somewhere safe if you can and call emergency services (112). Your \
             safety comes first.",
        ),
        KeywordRule::all_of(
            &["how", "sos"],
            "To send an SOS, press the SOS button. Your selected emergency contacts get a text \
             with your location and battery level. Choose up to 5 contacts first.",
        ),
        KeywordRule::any_of(
            &["track", "journey", "location"],
            "Live location sharing uploads your position regularly while you're signed in, so \
             trusted contacts can follow your journey. Your last known location is also used in \
             SOS messages if a fresh fix isn't available.",
        ),
        KeywordRule::any_of(
            &["what can you do", "how can you help"],
            "I give personal safety guidance, explain Aksha features like SOS alerts and location \
             sharing, and offer step-by-step help in emergencies.",
        ),
        KeywordRule::any_of(
            &["thank"],
            "You're welcome! Your safety matters. Is there anything else I can help with?",
        ),
    ]
}

fn default_emergency_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::any_of(
            &["follow"],
            "If someone is following you:\n\n\
             1. Stay calm and move to a crowded, well-lit area\n\
             2. Go into a public place like a shop or restaurant\n\
             3. Call a trusted contact\n\
             4. Use the SOS button to alert your emergency contacts\n\
             5. If the threat is immediate, call 112",
        ),
        KeywordRule::any_of(
            &["assault"],
            "If you're facing potential assault:\n\n\
             1. Press SOS immediately\n\
             2. Put distance between yourself and the threat if you can\n\
             3. Make noise to attract attention\n\
             4. Call 112 or have someone call for you\n\
             5. Stay where other people can see you",
        ),
        KeywordRule::any_of(
            &["lost", "unfamiliar"],
            "If you're lost or somewhere unfamiliar:\n\n\
             1. Stay in a well-lit, populated area\n\
             2. Check your location on a map\n\
             3. Contact a trusted person to guide you\n\
             4. Consider a registered taxi or ride-share\n\
             5. Turn on live location sharing",
        ),
        KeywordRule::any_of(
            &["dark", "night"],
            "For night safety:\n\n\
             1. Stay in well-lit areas and avoid shortcuts through dark places\n\
             2. Share your route with trusted contacts\n\
             3. Keep your phone charged and within reach\n\
             4. Consider carrying a personal alarm or whistle\n\
             5. Use SOS if you need help",
        ),
        KeywordRule::any_of(
            &["suspicious", "person"],
            "If you encounter a suspicious person:\n\n\
             1. Trust your instincts and act on them\n\
             2. Move to a public area with other people around\n\
             3. Go into a business or ask someone in uniform for help\n\
             4. Share your live location\n\
             5. If it escalates, press SOS to alert your contacts",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_matches_first_word_only() {
        let canned = CannedResponder::new();
        assert!(canned.reply("Hello there").starts_with("Hello! I'm Aksha"));
        assert!(canned.reply("hey, are you there?").starts_with("Hello!"));
        // "history" starts with "hi" but is not a greeting.
        assert!(!canned.reply("history of this area").starts_with("Hello!"));
    }

    #[test]
    fn test_followed_reply() {
        let reply = CannedResponder::new().reply("I think I'm BEING FOLLOWED");
        assert!(reply.contains("populated areas"));
    }

    #[test]
    fn test_all_of_requires_every_keyword() {
        let canned = CannedResponder::new();
        assert!(canned.reply("Is it safe to walk home?").contains("well-lit"));
        assert!(canned.reply("how do I send an sos").contains("SOS button"));
        assert!(!canned.reply("is it safe").contains("well-lit areas, avoid"));
    }

    #[test]
    fn test_rule_order() {
        // Transport is checked before the general emergency rule.
        let reply = CannedResponder::new().reply("please help me, emergency at the bus stop");
        assert!(reply.starts_with("On public transport"));

        let reply = CannedResponder::new().reply("help me");
        assert!(reply.contains("112"));
    }

    #[test]
    fn test_contact_question_is_not_an_emergency() {
        let reply = CannedResponder::new().reply("How many emergency contacts can I add?");
        assert!(reply.contains("up to 5"));
    }

    #[test]
    fn test_default_echoes_question() {
        let reply = CannedResponder::new().reply("  what's the weather like  ");
        assert!(reply.contains("\"what's the weather like\""));
    }

    #[test]
    fn test_custom_rule_takes_priority() {
        let canned = CannedResponder::new()
            .with_chat_rule(KeywordRule::any_of(&["Campus"], "Campus security: 555-0100"));
        assert_eq!(canned.reply("campus bus at night"), "Campus security: 555-0100");
    }

    #[test]
    fn test_emergency_guidance() {
        let canned = CannedResponder::new();
        assert!(canned
            .emergency_guidance("Someone is following me")
            .starts_with("If someone is following you"));
        assert!(canned
            .emergency_guidance("walking at NIGHT")
            .starts_with("For night safety"));
        let fallback = canned.emergency_guidance("flat tyre");
        assert!(fallback.starts_with("Emergency guidance"));
        assert!(fallback.contains("112"));
    }
}
