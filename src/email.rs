//! Composition of the weekly notification email.
//!
//! Delivery is an external collaborator: the draft renders to text for a mail
//! transport to pick up. Sender and recipients come from configuration.

use std::path::{Path, PathBuf};

use crate::model::{day_label, Week};
use crate::placement::MissingPlacement;

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub sender: String,
    pub recipients: Vec<String>,
}

/// A fully composed message, ready for a transport.
#[derive(Debug, Clone)]
pub struct EmailDraft {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachment: PathBuf,
}

impl EmailDraft {
    /// Render the draft as plain text, headers first.
    pub fn to_text(&self) -> String {
        format!(
            "From: {}\nTo: {}\nSubject: {}\nAttachment: {}\n\n{}",
            self.from,
            self.to.join(", "),
            self.subject,
            self.attachment.display(),
            self.body
        )
    }
}

/// Compose the weekly email, appending a no-data section when any placement
/// came up empty.
pub fn compose_weekly_email(
    config: &MailConfig,
    week: &Week,
    attachment: &Path,
    missing: &[MissingPlacement],
) -> EmailDraft {
    let mut body = format!(
        "Hi,\n\nPlease find attached the training plan for {} to {}. \
         This is an automated email.\n",
        day_label(week.start()),
        day_label(week.end())
    );

    if !missing.is_empty() {
        body.push_str("\nThe following sports/groups had no data:\n");
        for notice in missing {
            body.push_str(&format!("- {}\n", notice));
        }
    }

    body.push_str("\nBest regards,\nOperations\n");

    EmailDraft {
        from: config.sender.clone(),
        to: config.recipients.clone(),
        subject: format!(
            "Weekly Training Plan - week beginning {}",
            week.start().format("%d %b %Y")
        ),
        body,
        attachment: attachment.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config() -> MailConfig {
        MailConfig {
            sender: "ops@example.org".to_string(),
            recipients: vec!["a@example.org".to_string(), "b@example.org".to_string()],
        }
    }

    fn week() -> Week {
        Week::starting(NaiveDate::from_ymd_opt(2025, 2, 16).unwrap())
    }

    #[test]
    fn test_compose_without_missing_data() {
        let draft = compose_weekly_email(&config(), &week(), Path::new("plan.xlsx"), &[]);
        assert_eq!(draft.subject, "Weekly Training Plan - week beginning 16 Feb 2025");
        assert!(draft.body.contains("Sun 16 Feb 2025"));
        assert!(!draft.body.contains("had no data"));
    }

    #[test]
    fn test_compose_lists_missing_placements() {
        let missing = vec![
            MissingPlacement {
                sport: "Development".to_string(),
                training_group: Some("Development 1".to_string()),
            },
            MissingPlacement {
                sport: "Padel".to_string(),
                training_group: None,
            },
        ];
        let draft = compose_weekly_email(&config(), &week(), Path::new("plan.xlsx"), &missing);
        assert!(draft.body.contains("- Development - Development 1.\n"));
        assert!(draft.body.contains("- No data found for Sport='Padel'.\n"));
    }

    #[test]
    fn test_draft_renders_headers() {
        let draft = compose_weekly_email(&config(), &week(), Path::new("plan.xlsx"), &[]);
        let text = draft.to_text();
        assert!(text.starts_with("From: ops@example.org\nTo: a@example.org, b@example.org\n"));
        assert!(text.contains("Attachment: plan.xlsx"));
    }
}
