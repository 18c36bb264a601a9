use nutype::nutype;

use crate::{email_address::EmailAddress, html};

/// A contact form submission exactly as it was received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub subject: String,
    pub content: String,
}

/// A validated and sanitized contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
    pub phone: Option<ContactMessageAuthorPhone>,
}

/// The fields of a [`ContactForm`] that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Content,
}

#[nutype(
    sanitize(trim, with = |s: String| html::escape(&s)),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    sanitize(trim, with = |s: String| html::escape(&s)),
    derive(Debug, Clone, PartialEq, Eq, From, Deref, Display)
)]
pub struct ContactMessageAuthorPhone(String);

#[nutype(
    sanitize(trim, with = |s: String| html::escape(&s)),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    sanitize(trim, with = |s: String| html::escape(&s)),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactMessageContent(String);

impl ContactForm {
    /// Validates and sanitizes every field of the form.
    ///
    /// All fields are checked, so on failure the returned list contains
    /// every invalid field (in declaration order of [`ContactField`]) rather
    /// than just the first one.
    pub fn validate(&self) -> Result<ContactMessage, Vec<ContactField>> {
        let name = ContactMessageAuthorName::try_new(self.name.clone());
        let email = parse_email(&self.email);
        let subject = ContactMessageSubject::try_new(self.subject.clone());
        let content = ContactMessageContent::try_new(self.content.clone());
        let phone = self.phone.clone().map(ContactMessageAuthorPhone::new);

        match (name, email, subject, content) {
            (Ok(name), Some(email), Ok(subject), Ok(content)) => Ok(ContactMessage {
                author: ContactMessageAuthor { name, email, phone },
                subject,
                content,
            }),
            (name, email, subject, content) => Err([
                name.is_err().then_some(ContactField::Name),
                email.is_none().then_some(ContactField::Email),
                subject.is_err().then_some(ContactField::Subject),
                content.is_err().then_some(ContactField::Content),
            ]
            .into_iter()
            .flatten()
            .collect()),
        }
    }
}

fn parse_email(email: &str) -> Option<EmailAddress> {
    email
        .trim()
        .parse::<EmailAddress>()
        .ok()
        .filter(EmailAddress::has_tld)?
        .normalize()
}
