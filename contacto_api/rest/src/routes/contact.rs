use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use contacto_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use tracing::{debug, error};

use super::{message, server_error};
use crate::models::contact::{ApiContactForm, ApiValidationErrors};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/contacto", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    form: Result<Json<ApiContactForm>, JsonRejection>,
) -> Response {
    let form = match form {
        Ok(Json(form)) => form,
        // Bodies that are not declared as JSON are read as an empty form.
        Err(JsonRejection::MissingJsonContentType(_)) => ApiContactForm::default(),
        Err(rejection) => {
            debug!(%rejection, "rejected malformed contact form");
            return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response();
        }
    };

    match service.send_message(form.into()).await {
        Ok(()) => message(StatusCode::OK, "Correo enviado correctamente"),
        Err(ContactSendMessageError::Validation(fields)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiValidationErrors::from(fields)),
        )
            .into_response(),
        Err(ContactSendMessageError::NotConfigured) => server_error(),
        Err(ContactSendMessageError::Send) => send_failed(),
        Err(ContactSendMessageError::Other(err)) => {
            error!("failed to send contact message: {err:#}");
            send_failed()
        }
    }
}

fn send_failed() -> Response {
    message(StatusCode::INTERNAL_SERVER_ERROR, "Error al enviar el correo")
}
