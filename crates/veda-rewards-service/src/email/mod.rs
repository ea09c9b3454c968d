//! Consultation e-mail integration.
//!
//! The transactional e-mail provider handles:
//! - Confirmation delivery to patients after a consultation is booked
//! - Nothing else; delivery is one-shot with no retry queue, and the
//!   booking itself is owned by the consultation service

pub mod client;
pub mod template;

pub use client::{EmailClient, EmailError};
pub use template::{ConsultationEmail, ConsultationType};
