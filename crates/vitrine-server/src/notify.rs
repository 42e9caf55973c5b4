//! Outbound notifications.
//!
//! Site creation triggers a welcome notification to the owner. Delivery
//! is fire-and-forget: a failed or slow notifier must never fail or
//! delay the request that triggered it, so handlers spawn deliveries on
//! a background task and only log failures.

use uuid::Uuid;

/// A message addressed to a site owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Recipient owner id.
    pub owner: Uuid,
    /// Short subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

impl Notification {
    /// Welcome message sent after a site is bootstrapped.
    #[must_use]
    pub fn welcome(owner: Uuid, site_name: &str, domain: &str) -> Self {
        Self {
            owner,
            subject: format!("Your site {site_name} is ready"),
            body: format!(
                "Your new site {site_name} has been created at {domain} with a \
                 starter theme and pages. Happy building!"
            ),
        }
    }
}

/// Delivery failure.
#[derive(Debug, thiserror::Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Delivers notifications to site owners.
pub trait Notifier: Send + Sync {
    /// Deliver a single notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when delivery fails. Callers treat this
    /// as best-effort and only log the failure.
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Notifier that writes deliveries to the log.
///
/// The bundled backend for development; deployments install a real
/// channel (email, webhook) behind the same trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            owner = %notification.owner,
            subject = %notification.subject,
            "notification delivered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn welcome_addresses_the_owner() {
        let owner = Uuid::new_v4();
        let note = Notification::welcome(owner, "Atelier", "atelier.example.com");

        assert_eq!(note.owner, owner);
        assert!(note.subject.contains("Atelier"));
        assert!(note.body.contains("atelier.example.com"));
    }

    #[test]
    fn welcome_builds_from_site_fields() {
        // The site entity carries its domain as an Option; the welcome
        // constructor takes the resolved string.
        let mut site = vitrine_model::Site::new(Uuid::new_v4(), "Atelier");
        site.domain = Some("atelier.example.com".to_owned());

        let note = Notification::welcome(
            site.owner,
            &site.name,
            site.domain.as_deref().unwrap_or(""),
        );
        assert!(note.body.contains("atelier.example.com"));

        site.domain = None;
        let note = Notification::welcome(
            site.owner,
            &site.name,
            site.domain.as_deref().unwrap_or(""),
        );
        assert_eq!(note.owner, site.owner);
    }

    #[test]
    fn log_notifier_always_succeeds() {
        let note = Notification::welcome(Uuid::new_v4(), "Atelier", "atelier.example.com");
        assert!(LogNotifier.deliver(&note).is_ok());
    }
}
