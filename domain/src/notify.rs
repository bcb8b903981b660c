//! Outbound notification capability for completed summaries.
//!
//! The pipeline calls the notifier after successful persistence. Delivery is
//! fire-and-forget: every failure is logged and swallowed, never propagated
//! back into the pipeline.

use crate::gateway::mailersend::{EmailRecipient, EmailSender, MailerSendClient, SendEmailRequest};
use crate::summary::StructuredSummary;
use crate::Id;
use async_trait::async_trait;
use log::*;
use service::config::Config;

/// Capability interface for notifying interested parties that a structured
/// summary is ready. Injected into the pipeline so core logic never touches
/// email transport directly.
#[async_trait]
pub trait SummaryNotifier: Send + Sync {
    async fn summary_ready(&self, meeting_id: Id, summary: &StructuredSummary);
}

/// Sends summary-ready notifications via MailerSend to the configured
/// recipient address.
pub struct EmailSummaryNotifier {
    config: Config,
}

impl EmailSummaryNotifier {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SummaryNotifier for EmailSummaryNotifier {
    async fn summary_ready(&self, meeting_id: Id, summary: &StructuredSummary) {
        let recipient = match self.config.summary_notification_email() {
            Some(recipient) => recipient,
            None => {
                debug!("No summary notification recipient configured, skipping email");
                return;
            }
        };

        let client = match MailerSendClient::new(&self.config).await {
            Ok(client) => client,
            Err(e) => {
                warn!("Failed to create MailerSend client for summary notification: {e:?}");
                return;
            }
        };

        let body = format!(
            "A structured summary is ready for meeting {meeting_id}.\n\n\
             Overview: {}\n\
             Action items: {}\n\
             Decisions: {}\n\
             Context group: {}\n",
            summary.overview,
            summary.action_items.len(),
            summary.key_decisions.len(),
            summary.context_group,
        );

        let request = SendEmailRequest {
            from: EmailSender {
                email: self.config.notification_from_email().to_string(),
                name: Some("Momentum".to_string()),
            },
            to: vec![EmailRecipient {
                email: recipient,
                name: None,
            }],
            subject: "Meeting summary ready".to_string(),
            text: Some(body),
            html: None,
        };

        if let Err(e) = client.send_email(request).await {
            warn!("Failed to send summary notification for meeting {meeting_id}: {e:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn summary_with_overview(overview: &str) -> StructuredSummary {
        StructuredSummary {
            overview: overview.to_string(),
            ..StructuredSummary::fallback()
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_notifier_sends_email_when_configured() {
        let mut server = mockito::Server::new_async().await;
        env::set_var("MAILERSEND_API_KEY", "test_api_key_123");
        env::set_var("MAILERSEND_BASE_URL", server.url());
        env::set_var("SUMMARY_NOTIFICATION_EMAIL", "team@example.com");
        let config = Config::default();

        let mock = server
            .mock("POST", "/email")
            .with_status(202)
            .create_async()
            .await;

        let notifier = EmailSummaryNotifier::new(config);
        notifier
            .summary_ready(uuid::Uuid::new_v4(), &summary_with_overview("Weekly sync"))
            .await;

        mock.assert_async().await;
        env::remove_var("SUMMARY_NOTIFICATION_EMAIL");
    }

    #[tokio::test]
    #[serial]
    async fn test_notifier_skips_when_no_recipient_configured() {
        env::remove_var("SUMMARY_NOTIFICATION_EMAIL");
        env::set_var("MAILERSEND_API_KEY", "test_api_key_123");
        let config = Config::default();

        // Must not panic or attempt any network call
        let notifier = EmailSummaryNotifier::new(config);
        notifier
            .summary_ready(uuid::Uuid::new_v4(), &summary_with_overview("skipped"))
            .await;
    }

    #[tokio::test]
    #[serial]
    async fn test_notifier_swallows_send_failures() {
        let mut server = mockito::Server::new_async().await;
        env::set_var("MAILERSEND_API_KEY", "test_api_key_123");
        env::set_var("MAILERSEND_BASE_URL", server.url());
        env::set_var("SUMMARY_NOTIFICATION_EMAIL", "team@example.com");
        let config = Config::default();

        let _mock = server
            .mock("POST", "/email")
            .with_status(500)
            .with_body(r#"{"message": "server error"}"#)
            .create_async()
            .await;

        // Completes without panicking; the failure is only logged
        let notifier = EmailSummaryNotifier::new(config);
        notifier
            .summary_ready(uuid::Uuid::new_v4(), &summary_with_overview("tolerated"))
            .await;

        env::remove_var("SUMMARY_NOTIFICATION_EMAIL");
    }
}
