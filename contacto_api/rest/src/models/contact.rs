use contacto_models::contact::{ContactField, ContactForm};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of a contact form submission.
///
/// Missing fields and `null` values are treated like empty strings. The phone
/// number is not validated, so any JSON value is accepted there.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiContactForm {
    #[serde(default, rename = "nombre")]
    pub name: Option<String>,
    #[serde(default, rename = "tef", deserialize_with = "any_as_text")]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "asunto")]
    pub subject: Option<String>,
    #[serde(default, rename = "mensaje")]
    pub message: Option<String>,
}

impl From<ApiContactForm> for ContactForm {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            phone: value.phone,
            email: value.email.unwrap_or_default(),
            subject: value.subject.unwrap_or_default(),
            content: value.message.unwrap_or_default(),
        }
    }
}

fn any_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(value) => Some(value.to_string()),
    })
}

#[derive(Debug, Serialize)]
pub struct ApiValidationErrors {
    pub errors: Vec<ApiContactFieldError>,
}

#[derive(Debug, Serialize)]
pub struct ApiContactFieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl From<Vec<ContactField>> for ApiValidationErrors {
    fn from(value: Vec<ContactField>) -> Self {
        Self {
            errors: value.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ContactField> for ApiContactFieldError {
    fn from(value: ContactField) -> Self {
        let (field, message) = match value {
            ContactField::Name => ("nombre", "El nombre es requerido"),
            ContactField::Email => ("email", "El correo electrónico no es válido"),
            ContactField::Subject => ("asunto", "El asunto es requerido"),
            ContactField::Content => ("mensaje", "El mensaje es requerido"),
        };
        Self { field, message }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn phone(body: Value) -> Option<String> {
        serde_json::from_value::<ApiContactForm>(body).unwrap().phone
    }

    #[test]
    fn phone_accepts_any_value() {
        for (tef, expected) in [
            (json!("600 123 456"), Some("600 123 456")),
            (json!(600123456), Some("600123456")),
            (json!(true), Some("true")),
            (json!(null), None),
        ] {
            assert_eq!(phone(json!({ "tef": tef })).as_deref(), expected);
        }
        assert_eq!(phone(json!({})), None);
    }
}
