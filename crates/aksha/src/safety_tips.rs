//! Offline safety tips, grouped by situation.

/// Tips for one kind of situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyTopic {
    /// Short name accepted on the command line.
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tips: &'static [&'static str],
}

impl SafetyTopic {
    /// Title, description and numbered tips.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n{}\n", self.title, self.description);
        for (i, tip) in self.tips.iter().enumerate() {
            out.push_str(&format!("\n{}. {}", i + 1, tip));
        }
        out
    }
}

/// Topics in display order.
pub const SAFETY_TOPICS: &[SafetyTopic] = &[
    SafetyTopic {
        slug: "followed",
        title: "Being Followed",
        description: "What to do if you think someone is following you",
        tips: &[
            "Stay calm and trust your instincts. If you feel unsafe, you probably are.",
            "Change your route and direction suddenly; see if they follow.",
            "Head to a public place with people around, like a store or restaurant.",
            "Call someone and tell them where you are and what's happening.",
            "Fake a phone call loudly saying someone is expecting you soon at your current location.",
            "Use Aksha's SOS to text your location to your emergency contacts.",
            "If you're certain someone is following you, don't go home. Go to a police station.",
        ],
    },
    SafetyTopic {
        slug: "domestic",
        title: "Domestic Abuse",
        description: "Resources and steps for those experiencing abuse",
        tips: &[
            "Your safety is the priority. Develop a safety plan and an escape route.",
            "Memorize important emergency numbers, including local shelters and 181.",
            "Keep important documents (ID, bank cards) accessible.",
            "Tell trusted friends or family about your situation if possible.",
            "Create code words with friends to signal when you need help.",
            "Document abuse with dates, times and descriptions when safe to do so.",
            "Keep your emergency contacts selected so one SOS reaches all of them.",
            "Contact a domestic violence hotline for professional guidance and support.",
        ],
    },
    SafetyTopic {
        slug: "transport",
        title: "Public Transport Safety",
        description: "Stay safe while using buses, trains and rideshares",
        tips: &[
            "Sit near the driver or in view of the security camera.",
            "Share your trip details with a trusted contact, including expected arrival time.",
            "Keep valuables hidden and bags secured close to your body.",
            "Trust your instincts. Change seats or vehicles if someone makes you uncomfortable.",
            "Stay awake and alert during your journey.",
            "Take a photo of taxi or rideshare license plates before getting in.",
            "Verify driver identity and car details before entering a rideshare.",
            "Keep an Aksha session running for live location sharing on late-night trips.",
        ],
    },
    SafetyTopic {
        slug: "harassment",
        title: "Street Harassment",
        description: "How to respond to unwanted attention or harassment",
        tips: &[
            "Project confidence with body language: stand tall with shoulders back.",
            "Avoid engaging with harassers. Don't respond to comments or questions.",
            "Change your route or cross the street to avoid continued interaction.",
            "Seek safety in numbers: join a group or enter a populated business.",
            "Be direct and firm if needed: 'Stop talking to me' or 'Leave me alone'.",
            "If in a public place, draw attention: 'This person is harassing me.'",
            "Document with your phone camera if safe to do so.",
            "Report recurring street harassment to local authorities.",
        ],
    },
    SafetyTopic {
        slug: "digital",
        title: "Digital Safety",
        description: "Protect your privacy and safety online",
        tips: &[
            "Use strong, unique passwords for all accounts, especially location services.",
            "Enable two-factor authentication on all important accounts.",
            "Regularly check privacy settings on all social media accounts.",
            "Avoid sharing real-time location data publicly on social media.",
            "Be selective about accepting friend or follow requests from people you don't know.",
            "Regularly check for unusual activity on your accounts.",
            "Use a VPN when on public WiFi networks.",
            "Disable location tags on photos before posting them online.",
        ],
    },
    SafetyTopic {
        slug: "party",
        title: "Party Safety",
        description: "Stay safe at parties, clubs and social gatherings",
        tips: &[
            "Go with trusted friends and establish a buddy system.",
            "Never leave your drink unattended; get a new one if you do.",
            "Set a drink limit before going out and stick to it.",
            "Watch your drinks being prepared when possible.",
            "Plan your journey home before going out.",
            "Set check-in times with friends not at the event.",
            "Share your location with trusted contacts through Aksha.",
            "Trust your instincts. Leave if you feel uncomfortable for any reason.",
        ],
    },
    SafetyTopic {
        slug: "travel",
        title: "Travel Safety",
        description: "Stay secure while traveling in unfamiliar places",
        tips: &[
            "Research your destination thoroughly, including unsafe areas to avoid.",
            "Share your itinerary with trusted contacts and update them regularly.",
            "Keep digital and physical copies of important documents.",
            "Secure your accommodation: always use door locks and security chains.",
            "Avoid displaying expensive items that might attract thieves.",
            "Learn basic phrases in the local language, including how to ask for help.",
            "Register with your embassy when traveling internationally.",
            "Use Aksha's location sharing to keep loved ones updated on your whereabouts.",
        ],
    },
    SafetyTopic {
        slug: "emergency",
        title: "Emergency Response",
        description: "What to do in immediate danger or crisis situations",
        tips: &[
            "Call emergency services immediately (112, or the local equivalent).",
            "If you can't speak, dial emergency services and leave the line open.",
            "Use your phone's built-in emergency SOS (rapid press of the power button on many phones).",
            "Trigger Aksha's SOS to alert all your selected contacts at once.",
            "If possible, move to a safer location while keeping the emergency call going.",
            "Give clear, concise information about your location and the situation.",
            "If driving, pull over in a well-lit, populated area if possible.",
            "Use simple code words with dispatchers if you can't speak freely.",
        ],
    },
];

/// Look up a topic by slug or case-insensitive title.
pub fn find(query: &str) -> Option<&'static SafetyTopic> {
    let query = query.trim();
    SAFETY_TOPICS
        .iter()
        .find(|t| t.slug.eq_ignore_ascii_case(query) || t.title.eq_ignore_ascii_case(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics() {
        assert_eq!(SAFETY_TOPICS.len(), 8);
        assert_eq!(SAFETY_TOPICS[0].title, "Being Followed");
        assert!(SAFETY_TOPICS.iter().all(|t| !t.tips.is_empty()));
    }

    #[test]
    fn test_find() {
        assert_eq!(find("party").map(|t| t.title), Some("Party Safety"));
        assert_eq!(find(" street harassment ").map(|t| t.slug), Some("harassment"));
        assert!(find("cooking").is_none());
    }

    #[test]
    fn test_render_numbers_tips() {
        let text = find("followed").unwrap().render();
        assert!(text.starts_with("Being Followed\n"));
        assert!(text.contains("\n1. Stay calm"));
        assert!(text.contains("\n7. If you're certain"));
    }
}
