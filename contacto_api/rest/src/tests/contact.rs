use std::{future::ready, sync::Arc, time::Duration};

use anyhow::anyhow;
use axum::{body::Body, http::Request, http::StatusCode};
use contacto_core_contact_contracts::{ContactSendMessageError, MockContactFeatureService};
use contacto_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use contacto_email_contracts::{ContentType, MockEmailService};
use contacto_models::contact::{ContactField, ContactForm};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::{contact_router, post_json, send};

fn contact_feature(email: MockEmailService) -> ContactFeatureServiceImpl<MockEmailService> {
    ContactFeatureServiceImpl::new(
        email,
        ContactFeatureConfig {
            recipient: Some(Arc::new("contacto@example.com".parse().unwrap())),
            send_timeout: Duration::from_secs(5),
        },
    )
}

fn valid_body() -> String {
    json!({
        "nombre": "Ana",
        "email": "ana@example.com",
        "asunto": "Hola",
        "mensaje": "Test",
    })
    .to_string()
}

#[tokio::test]
async fn delivered() {
    // Arrange
    let mut email = MockEmailService::new().with_is_configured(true);
    email
        .expect_send()
        .once()
        .withf(|email| {
            email.sender.to_string() == "ana@example.com"
                && email.recipient.to_string() == "contacto@example.com"
                && email.subject == "Hola"
                && email.content_type == ContentType::Html
        })
        .return_once(|_| Box::pin(ready(Ok(true))));

    let router = contact_router(contact_feature(email));

    // Act
    let response = send(router, post_json("/contacto", valid_body())).await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({"message": "Correo enviado correctamente"})
    );
}

#[tokio::test]
async fn all_fields_invalid() {
    // Arrange
    let router = contact_router(contact_feature(MockEmailService::new()));
    let body = json!({"nombre": "", "email": "bad", "asunto": "", "mensaje": ""});

    // Act
    let response = send(router, post_json("/contacto", body.to_string())).await;

    // Assert
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({"errors": [
            {"field": "nombre", "message": "El nombre es requerido"},
            {"field": "email", "message": "El correo electrónico no es válido"},
            {"field": "asunto", "message": "El asunto es requerido"},
            {"field": "mensaje", "message": "El mensaje es requerido"},
        ]})
    );
}

#[tokio::test]
async fn invalid_email() {
    // Arrange
    let router = contact_router(contact_feature(MockEmailService::new()));
    let body = json!({
        "nombre": "Ana",
        "email": "not-an-email",
        "asunto": "Hola",
        "mensaje": "Test",
    });

    // Act
    let response = send(router, post_json("/contacto", body.to_string())).await;

    // Assert
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({"errors": [
            {"field": "email", "message": "El correo electrónico no es válido"},
        ]})
    );
}

#[tokio::test]
async fn credentials_not_configured() {
    // Arrange
    let email = MockEmailService::new().with_is_configured(false);
    let router = contact_router(contact_feature(email));

    // Act
    let response = send(router, post_json("/contacto", valid_body())).await;

    // Assert
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, "Error en el servidor");
}

#[tokio::test]
async fn relay_error() {
    // Arrange
    let mut email = MockEmailService::new().with_is_configured(true);
    email
        .expect_send()
        .once()
        .return_once(|_| Box::pin(ready(Err(anyhow!("535 authentication failed")))));

    let router = contact_router(contact_feature(email));

    // Act
    let response = send(router, post_json("/contacto", valid_body())).await;

    // Assert
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json(), json!({"message": "Error al enviar el correo"}));
    assert!(!response.body.contains("535"));
}

#[tokio::test]
async fn relay_refused() {
    // Arrange
    let form = ContactForm {
        name: "Ana".into(),
        phone: None,
        email: "ana@example.com".into(),
        subject: "Hola".into(),
        content: "Test".into(),
    };
    let contact =
        MockContactFeatureService::new().with_send_message(form, Err(ContactSendMessageError::Send));

    // Act
    let response = send(contact_router(contact), post_json("/contacto", valid_body())).await;

    // Assert
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json(), json!({"message": "Error al enviar el correo"}));
}

#[tokio::test]
async fn missing_and_null_fields() {
    // Arrange
    let form = ContactForm {
        name: "".into(),
        phone: None,
        email: "".into(),
        subject: "Hola".into(),
        content: "".into(),
    };
    let contact = MockContactFeatureService::new().with_send_message(
        form,
        Err(ContactSendMessageError::Validation(vec![
            ContactField::Name,
            ContactField::Email,
            ContactField::Content,
        ])),
    );
    let body = json!({"nombre": null, "tef": null, "asunto": "Hola"});

    // Act
    let response = send(contact_router(contact), post_json("/contacto", body.to_string())).await;

    // Assert
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({"errors": [
            {"field": "nombre", "message": "El nombre es requerido"},
            {"field": "email", "message": "El correo electrónico no es válido"},
            {"field": "mensaje", "message": "El mensaje es requerido"},
        ]})
    );
}

#[tokio::test]
async fn phone_is_forwarded() {
    // Arrange
    let form = ContactForm {
        name: "Ana".into(),
        phone: Some("600 123 456".into()),
        email: "ana@example.com".into(),
        subject: "Hola".into(),
        content: "Test".into(),
    };
    let contact = MockContactFeatureService::new().with_send_message(form, Ok(()));
    let body = json!({
        "nombre": "Ana",
        "tef": "600 123 456",
        "email": "ana@example.com",
        "asunto": "Hola",
        "mensaje": "Test",
    });

    // Act
    let response = send(contact_router(contact), post_json("/contacto", body.to_string())).await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_body() {
    for request in [
        post_json("/contacto", "{\"nombre\": "),
        post_json("/contacto", "\"hola\""),
        post_json("/contacto", json!({"nombre": 42}).to_string()),
    ] {
        // Arrange
        let router = contact_router(MockContactFeatureService::new());

        // Act
        let response = send(router, request).await;

        // Assert
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(!response.body.is_empty());
    }
}

#[tokio::test]
async fn numeric_phone() {
    // Arrange
    let form = ContactForm {
        name: "Ana".into(),
        phone: Some("600123456".into()),
        email: "ana@example.com".into(),
        subject: "Hola".into(),
        content: "Test".into(),
    };
    let contact = MockContactFeatureService::new().with_send_message(form, Ok(()));
    let body = json!({
        "nombre": "Ana",
        "tef": 600123456,
        "email": "ana@example.com",
        "asunto": "Hola",
        "mensaje": "Test",
    });

    // Act
    let response = send(contact_router(contact), post_json("/contacto", body.to_string())).await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({"message": "Correo enviado correctamente"})
    );
}

#[tokio::test]
async fn missing_content_type() {
    // Arrange
    let router = contact_router(contact_feature(MockEmailService::new()));
    let request = Request::post("/contacto")
        .body(Body::from(valid_body()))
        .unwrap();

    // Act
    let response = send(router, request).await;

    // Assert
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({"errors": [
            {"field": "nombre", "message": "El nombre es requerido"},
            {"field": "email", "message": "El correo electrónico no es válido"},
            {"field": "asunto", "message": "El asunto es requerido"},
            {"field": "mensaje", "message": "El mensaje es requerido"},
        ]})
    );
}
