//! National helpline directory.

/// A helpline the user can call directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Helpline {
    pub name: &'static str,
    pub number: &'static str,
    pub description: &'static str,
}

impl Helpline {
    /// `tel:` URI for the number.
    pub fn tel_link(&self) -> String {
        format!("tel:{}", self.number)
    }
}

/// Emergency services first, then the rest in display order.
pub const HELPLINES: &[Helpline] = &[
    Helpline {
        name: "Emergency Services",
        number: "112",
        description: "National emergency number",
    },
    Helpline {
        name: "Women Helpline",
        number: "1091",
        description: "Women in distress",
    },
    Helpline {
        name: "Women Helpline (Domestic Abuse)",
        number: "181",
        description: "Domestic abuse support",
    },
    Helpline {
        name: "Child Helpline",
        number: "1098",
        description: "Children in need of care and protection",
    },
    Helpline {
        name: "Medical Emergency",
        number: "108",
        description: "Ambulance services",
    },
    Helpline {
        name: "Police",
        number: "100",
        description: "Police control room",
    },
];

/// Look up a helpline by number or case-insensitive name.
pub fn find(query: &str) -> Option<&'static Helpline> {
    let query = query.trim();
    HELPLINES
        .iter()
        .find(|h| h.number == query || h.name.eq_ignore_ascii_case(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory() {
        assert_eq!(HELPLINES.len(), 6);
        assert_eq!(HELPLINES[0].number, "112");
        assert_eq!(HELPLINES[0].tel_link(), "tel:112");
    }

    #[test]
    fn test_find() {
        assert_eq!(find("1098").map(|h| h.name), Some("Child Helpline"));
        assert_eq!(find(" police ").map(|h| h.number), Some("100"));
        assert!(find("911").is_none());
    }
}
