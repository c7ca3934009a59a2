//! `sms:` URI construction.

use std::fmt;
use std::str::FromStr;

use safety_core::DispatchError;

/// Target platform; decides how multiple recipients are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmsPlatform {
    #[default]
    Android,
    Ios,
}

impl SmsPlatform {
    /// Separator placed between recipient numbers.
    pub fn separator(&self) -> char {
        match self {
            SmsPlatform::Android => ';',
            SmsPlatform::Ios => '&',
        }
    }
}

impl FromStr for SmsPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "android" => Ok(SmsPlatform::Android),
            "ios" => Ok(SmsPlatform::Ios),
            other => Err(format!("unknown SMS platform: {} (expected android or ios)", other)),
        }
    }
}

impl fmt::Display for SmsPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmsPlatform::Android => write!(f, "android"),
            SmsPlatform::Ios => write!(f, "ios"),
        }
    }
}

/// A pre-filled SMS compose request.
#[derive(Debug, Clone)]
pub struct SmsLink<'a> {
    recipients: &'a [String],
    body: &'a str,
    platform: SmsPlatform,
}

impl<'a> SmsLink<'a> {
    /// Create a link for the given recipients and body.
    pub fn new(recipients: &'a [String], body: &'a str, platform: SmsPlatform) -> Self {
        Self {
            recipients,
            body,
            platform,
        }
    }

    /// Numbers placed in the URI: whitespace removed, blanks dropped.
    pub fn numbers(&self) -> Vec<String> {
        self.recipients
            .iter()
            .map(|n| n.chars().filter(|c| !c.is_whitespace()).collect::<String>())
            .filter(|n| !n.is_empty())
            .collect()
    }

    /// Render as `sms:<numbers>?body=<percent-encoded body>`.
    pub fn to_uri(&self) -> Result<String, DispatchError> {
        let numbers = self.numbers();
        if numbers.is_empty() {
            return Err(DispatchError::NoRecipients);
        }

        let separator = self.platform.separator().to_string();
        Ok(format!(
            "sms:{}?body={}",
            numbers.join(&separator),
            urlencoding::encode(self.body)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_android_uri() {
        let recipients = vec!["+1555000111".to_string()];
        let link = SmsLink::new(&recipients, "SOS!\nLine two & more", SmsPlatform::Android);
        assert_eq!(
            link.to_uri().unwrap(),
            "sms:+1555000111?body=SOS%21%0ALine%20two%20%26%20more"
        );
    }

    #[test]
    fn test_ios_separator() {
        let recipients = vec!["+1 555 000 111".to_string(), "+1555000222".to_string()];
        let link = SmsLink::new(&recipients, "x", SmsPlatform::Ios);
        assert_eq!(link.to_uri().unwrap(), "sms:+1555000111&+1555000222?body=x");
    }

    #[test]
    fn test_numbers_drop_blanks() {
        let recipients = vec!["+1555000111".to_string(), " ".to_string(), "".to_string()];
        let link = SmsLink::new(&recipients, "x", SmsPlatform::Android);
        assert_eq!(link.numbers(), vec!["+1555000111".to_string()]);
    }

    #[test]
    fn test_empty_recipients() {
        let recipients = vec!["  ".to_string()];
        let link = SmsLink::new(&recipients, "x", SmsPlatform::Android);
        assert!(matches!(link.to_uri(), Err(DispatchError::NoRecipients)));
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!("iOS".parse::<SmsPlatform>().unwrap(), SmsPlatform::Ios);
        assert_eq!("android".parse::<SmsPlatform>().unwrap(), SmsPlatform::Android);
        assert!("symbian".parse::<SmsPlatform>().is_err());
        assert_eq!(SmsPlatform::Ios.to_string(), "ios");
    }
}
