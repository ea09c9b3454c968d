//! Consultation e-mail handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::email::ConsultationEmail;
use crate::error::ApiError;
use crate::state::AppState;

/// Consultation e-mail response.
#[derive(Debug, Serialize)]
pub struct ConsultationEmailResponse {
    /// Whether the confirmation was sent.
    pub success: bool,
    /// Provider message ID for the sent e-mail.
    pub email_id: String,
    /// The meeting link included in the confirmation.
    pub meeting_link: String,
}

/// Send a consultation confirmation e-mail to the patient.
///
/// The provider credentials never leave the server; clients submit the
/// booking details and the service renders and forwards the mail.
/// Delivery is one-shot: a provider failure maps to 502 and the caller
/// decides whether to retry.
pub async fn send_confirmation_email(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(booking): Json<ConsultationEmail>,
) -> Result<Json<ConsultationEmailResponse>, ApiError> {
    let email = state.email.as_ref().ok_or_else(|| {
        ApiError::NotConfigured("E-mail delivery is not configured on this deployment".into())
    })?;

    let meeting_link = booking.resolved_meeting_link();
    let subject = booking.subject();
    let html = booking.render_html();

    let email_id = email
        .send(&booking.patient_email, &subject, &html)
        .await
        .map_err(|e| {
            tracing::error!(
                user_id = %auth.user_id,
                consultation_id = %booking.consultation_id,
                error = %e,
                "Failed to send consultation confirmation"
            );
            ApiError::ExternalService("Failed to send confirmation e-mail".into())
        })?;

    tracing::info!(
        user_id = %auth.user_id,
        consultation_id = %booking.consultation_id,
        email_id = %email_id,
        "Consultation confirmation sent"
    );

    Ok(Json(ConsultationEmailResponse {
        success: true,
        email_id,
        meeting_link,
    }))
}
