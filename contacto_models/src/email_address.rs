use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(pub lettre::Address);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressWithName(pub lettre::message::Mailbox);

const GMAIL_DOMAINS: &[&str] = &["gmail.com", "googlemail.com"];

const ICLOUD_DOMAINS: &[&str] = &["icloud.com", "me.com"];

const OUTLOOK_DOMAINS: &[&str] = &[
    "hotmail.at",
    "hotmail.be",
    "hotmail.ca",
    "hotmail.cl",
    "hotmail.co.uk",
    "hotmail.com",
    "hotmail.com.ar",
    "hotmail.com.br",
    "hotmail.com.mx",
    "hotmail.de",
    "hotmail.es",
    "hotmail.fr",
    "hotmail.it",
    "live.com",
    "live.com.ar",
    "live.com.mx",
    "live.de",
    "live.es",
    "live.fr",
    "live.it",
    "msn.com",
    "outlook.at",
    "outlook.com",
    "outlook.com.ar",
    "outlook.com.br",
    "outlook.de",
    "outlook.es",
    "outlook.fr",
    "outlook.it",
    "passport.com",
];

const YAHOO_DOMAINS: &[&str] = &[
    "rocketmail.com",
    "yahoo.ca",
    "yahoo.co.uk",
    "yahoo.com",
    "yahoo.de",
    "yahoo.es",
    "yahoo.fr",
    "yahoo.in",
    "yahoo.it",
    "ymail.com",
];

const YANDEX_DOMAINS: &[&str] = &[
    "yandex.ru",
    "yandex.ua",
    "yandex.kz",
    "yandex.com",
    "yandex.by",
    "ya.ru",
];

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    /// Whether the domain ends in an alphabetic or punycode (`xn--...`) top
    /// level domain.
    ///
    /// Addresses like `user@localhost` or `user@[127.0.0.1]` are syntactically
    /// valid but cannot be reached from the public internet.
    pub fn has_tld(&self) -> bool {
        self.0
            .domain()
            .rsplit_once('.')
            .is_some_and(|(_, tld)| is_valid_tld(tld))
    }

    /// Returns the canonical representation of this address.
    ///
    /// The address is lowercased and the aliasing rules of the large mail
    /// providers are applied (dots and `+tag` suffixes for Gmail, `+tag` for
    /// iCloud and Outlook, `-tag` for Yahoo, `ya.ru` for Yandex). Returns
    /// `None` if nothing valid is left of the local part.
    pub fn normalize(&self) -> Option<Self> {
        let mut user = self.0.user().to_lowercase();
        let mut domain = self.0.domain().to_lowercase();

        if GMAIL_DOMAINS.contains(&domain.as_str()) {
            strip_subaddress(&mut user, '+');
            user.retain(|c| c != '.');
            domain = "gmail.com".into();
        } else if ICLOUD_DOMAINS.contains(&domain.as_str())
            || OUTLOOK_DOMAINS.contains(&domain.as_str())
        {
            strip_subaddress(&mut user, '+');
        } else if YAHOO_DOMAINS.contains(&domain.as_str()) {
            if let Some(pos) = user.rfind('-') {
                user.truncate(pos);
            }
        } else if YANDEX_DOMAINS.contains(&domain.as_str()) {
            domain = "yandex.ru".into();
        }

        lettre::Address::new(user, domain).ok().map(Self)
    }
}

fn is_valid_tld(tld: &str) -> bool {
    let tld = tld.to_ascii_lowercase();
    match tld.strip_prefix("xn--") {
        Some(punycode) => {
            !punycode.is_empty()
                && punycode
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        None => tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic),
    }
}

fn strip_subaddress(user: &mut String, separator: char) {
    if let Some(pos) = user.find(separator) {
        user.truncate(pos);
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::fmt::Display for EmailAddressWithName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<EmailAddress> for EmailAddressWithName {
    fn from(value: EmailAddress) -> Self {
        Self(value.0.into())
    }
}

impl FromStr for EmailAddress {
    type Err = <lettre::Address as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl FromStr for EmailAddressWithName {
    type Err = <lettre::message::Mailbox as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}
