//! Consultation confirmation e-mail content.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use veda_rewards_core::ConsultationId;

/// How the consultation will be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    /// Live video call with a meeting link.
    Video,
    /// Text chat inside the app.
    Chat,
}

impl ConsultationType {
    /// Human-readable label used in the e-mail body.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "Video Call",
            Self::Chat => "Chat",
        }
    }
}

/// A booked consultation to confirm by e-mail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationEmail {
    /// The consultation booking ID.
    pub consultation_id: ConsultationId,
    /// Patient display name.
    pub patient_name: String,
    /// Recipient address.
    pub patient_email: String,
    /// Doctor display name.
    pub doctor_name: String,
    /// Video or chat.
    pub consultation_type: ConsultationType,
    /// Scheduled calendar date.
    pub preferred_date: NaiveDate,
    /// Scheduled time slot, if one was picked.
    #[serde(default)]
    pub preferred_time: Option<String>,
    /// Meeting link override; generated from the booking ID when absent.
    #[serde(default)]
    pub meeting_link: Option<String>,
    /// Consultation fee in paise (hundredths of a rupee).
    pub total_amount_cents: i64,
}

impl ConsultationEmail {
    /// The meeting link to send: the provided one, or a generated room
    /// keyed by the booking ID.
    #[must_use]
    pub fn resolved_meeting_link(&self) -> String {
        self.meeting_link.clone().unwrap_or_else(|| {
            format!("https://meet.jit.si/consultation-{}", self.consultation_id)
        })
    }

    /// Scheduled date in long form, e.g. "Tuesday, July 1, 2025".
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.preferred_date.format("%A, %B %-d, %Y").to_string()
    }

    /// Consultation fee in rupees, e.g. "₹1500.00".
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn formatted_amount(&self) -> String {
        format!("₹{:.2}", self.total_amount_cents as f64 / 100.0)
    }

    /// Subject line for the confirmation.
    #[must_use]
    pub fn subject(&self) -> String {
        format!(
            "Consultation Confirmed with {} - {}",
            self.doctor_name,
            self.formatted_date()
        )
    }

    /// Render the HTML confirmation body.
    #[must_use]
    pub fn render_html(&self) -> String {
        let meeting_link = self.resolved_meeting_link();

        let time_row = self.preferred_time.as_deref().map_or_else(String::new, |time| {
            format!(
                r#"<div style="display: flex; justify-content: space-between; padding: 10px 0; border-bottom: 1px solid #E2E8F0;">
              <span style="font-weight: 600; color: #475569;">Time:</span>
              <span style="color: #64748B;">{}</span>
            </div>"#,
                escape(time)
            )
        });

        let video_block = if self.consultation_type == ConsultationType::Video {
            format!(
                r#"<div style="background: #EFF6FF; border: 1px solid #BFDBFE; padding: 20px; border-radius: 8px; margin-bottom: 25px;">
          <h3 style="color: #1E40AF; margin-top: 0;">Join Your Video Consultation</h3>
          <p style="color: #374151; margin-bottom: 15px;">Click the button below to join your video consultation at the scheduled time:</p>
          <a href="{link}"
             style="display: inline-block; background: linear-gradient(135deg, #8B5CF6, #3B82F6); color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; font-weight: 600;">
            Join Video Call
          </a>
          <p style="color: #6B7280; font-size: 14px; margin-top: 15px;">
            <strong>Meeting Link:</strong> {link}
          </p>
        </div>"#,
                link = escape(&meeting_link)
            )
        } else {
            String::new()
        };

        format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
        <div style="background: linear-gradient(135deg, #8B5CF6, #3B82F6); padding: 30px; border-radius: 12px; text-align: center; margin-bottom: 30px;">
          <h1 style="color: white; margin: 0; font-size: 28px;">Consultation Confirmed!</h1>
          <p style="color: #E0E7FF; margin: 10px 0 0 0; font-size: 16px;">Your Ayurvedic consultation has been scheduled</p>
        </div>

        <div style="background: #F8FAFC; padding: 25px; border-radius: 8px; margin-bottom: 25px;">
          <h2 style="color: #334155; margin-top: 0;">Consultation Details</h2>
          <div style="display: grid; gap: 15px;">
            <div style="display: flex; justify-content: space-between; padding: 10px 0; border-bottom: 1px solid #E2E8F0;">
              <span style="font-weight: 600; color: #475569;">Patient:</span>
              <span style="color: #64748B;">{patient}</span>
            </div>
            <div style="display: flex; justify-content: space-between; padding: 10px 0; border-bottom: 1px solid #E2E8F0;">
              <span style="font-weight: 600; color: #475569;">Doctor:</span>
              <span style="color: #64748B;">{doctor}</span>
            </div>
            <div style="display: flex; justify-content: space-between; padding: 10px 0; border-bottom: 1px solid #E2E8F0;">
              <span style="font-weight: 600; color: #475569;">Date:</span>
              <span style="color: #64748B;">{date}</span>
            </div>
            {time_row}
            <div style="display: flex; justify-content: space-between; padding: 10px 0; border-bottom: 1px solid #E2E8F0;">
              <span style="font-weight: 600; color: #475569;">Type:</span>
              <span style="color: #64748B;">{kind}</span>
            </div>
            <div style="display: flex; justify-content: space-between; padding: 10px 0;">
              <span style="font-weight: 600; color: #475569;">Total Amount:</span>
              <span style="color: #059669; font-weight: 600;">{amount}</span>
            </div>
          </div>
        </div>

        {video_block}

        <div style="background: #FEF3C7; border: 1px solid #F59E0B; padding: 20px; border-radius: 8px; margin-bottom: 25px;">
          <h3 style="color: #92400E; margin-top: 0;">Important Notes</h3>
          <ul style="color: #374151; margin: 0; padding-left: 20px;">
            <li>Please join the consultation 5 minutes before the scheduled time</li>
            <li>Ensure you have a stable internet connection for video calls</li>
            <li>Have your health concerns and questions ready</li>
            <li>Keep any relevant medical records accessible</li>
          </ul>
        </div>

        <div style="text-align: center; color: #6B7280; font-size: 14px; margin-top: 30px;">
          <p>If you have any questions, please contact our support team.</p>
          <p style="margin-top: 20px;">
            <strong>AyurGen Health Platform</strong><br>
            Your trusted partner in Ayurvedic wellness
          </p>
        </div>
      </div>"#,
            patient = escape(&self.patient_name),
            doctor = escape(&self.doctor_name),
            date = self.formatted_date(),
            time_row = time_row,
            kind = self.consultation_type.label(),
            amount = self.formatted_amount(),
            video_block = video_block,
        )
    }
}

/// Escape user-provided text for interpolation into HTML.
fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
