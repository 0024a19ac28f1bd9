/// Human-readable label for a service, trigger, or reaction identifier.
///
/// Identifiers without a curated label are humanized: underscores become
/// spaces and the first letter is capitalized.
pub fn display_name(identifier: &str) -> String {
    match curated(identifier) {
        Some(name) => name.to_string(),
        None => humanize(identifier),
    }
}

fn curated(identifier: &str) -> Option<&'static str> {
    let name = match identifier {
        "common" => "Common",
        "send_sms" => "Send SMS",
        "send_email" => "Send Email",

        "google" => "Google",
        "email_received" => "Email Received",
        "email_received_from_person" => "Email Received from Specific Person",
        "email_sent" => "Email Sent",
        "email_sent_to_person" => "Email Sent to Specific Person",
        "calendar_event_created" => "Calendar Event Created",
        "create_google_cal_event" => "Create Google Calendar Event",

        "github" => "GitHub",
        "push_event" => "Push to Repository",
        "pull_request_to_main" => "Pull Request to Main Branch",
        "ci_cd_pipeline" => "CI/CD Pipeline Triggered",
        "create_github_issue" => "Create GitHub Issue",

        "crypto" => "Crypto",
        "send_usdc" => "Send USDC",

        "reddit" => "Reddit",
        "send_private_message" => "Send Private Message",
        "post_new_submission" => "Post New Submission",
        "post_new_comment" => "Post New Comment",
        "post_new_comment_on_post" => "Post New Comment on Post",
        _ => return None,
    };
    Some(name)
}

fn humanize(identifier: &str) -> String {
    let spaced = identifier.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_names() {
        assert_eq!(display_name("send_sms"), "Send SMS");
        assert_eq!(display_name("github"), "GitHub");
        assert_eq!(display_name("ci_cd_pipeline"), "CI/CD Pipeline Triggered");
    }

    #[test]
    fn test_unknown_names_are_humanized() {
        assert_eq!(display_name("foo_bar"), "Foo bar");
        assert_eq!(display_name(""), "");
    }
}
