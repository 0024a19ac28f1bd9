/// A pre-wired trigger/reaction pair offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub title: &'static str,
    pub trigger_service: &'static str,
    pub trigger: &'static str,
    pub reaction_service: &'static str,
    pub reaction: &'static str,
}

macro_rules! templates {
    ( $( ($id:expr, $title:expr, $trigger_service:expr, $trigger:expr, $reaction_service:expr, $reaction:expr) ),* $(,)? ) => {
        pub const TEMPLATES: &[Template] = &[
            $( Template {
                id: $id,
                title: $title,
                trigger_service: $trigger_service,
                trigger: $trigger,
                reaction_service: $reaction_service,
                reaction: $reaction,
            }, )*
        ];
    };
}

templates! {
    ("template-1", "Email to SMS notifier", "google", "email_received", "common", "send_sms"),
    ("template-2", "Github PR Reviewer Alert", "github", "pull_request_to_main", "common", "send_email"),
    ("template-3", "Calendar Event SMS Reminder", "google", "calendar_event_created", "common", "send_sms"),
    ("template-4", "Code Push Notification", "github", "push_event", "common", "send_email"),
    ("template-5", "CI/CD Status Update", "github", "ci_cd_pipeline", "common", "send_sms"),
    ("template-6", "Automated Issue Creator", "google", "email_received_from_person", "github", "create_github_issue"),
    ("template-7", "Reddit Post on Calendar Event", "google", "calendar_event_created", "reddit", "post_new_submission"),
    ("template-8", "Email-Triggered USDC Transfer", "google", "email_received_from_person", "crypto", "send_usdc"),
    ("template-9", "GitHub Activity Digest", "github", "push_event", "google", "create_google_cal_event"),
    ("template-10", "Automated PR Commenter", "github", "pull_request_to_main", "reddit", "post_new_submission"),
    ("template-11", "Email-to-Reddit Crosspost", "google", "email_received", "reddit", "post_new_submission"),
    ("template-12", "CI/CD Success Celebration", "github", "ci_cd_pipeline", "crypto", "send_usdc"),
    ("template-13", "Scheduled Reddit Posts", "google", "calendar_event_created", "reddit", "post_new_submission"),
}

pub fn template_by_id(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Reactions grouped by the service that executes them.
const SERVICE_REACTIONS: &[(&str, &[&str])] = &[
    ("common", &["send_sms", "send_email"]),
    ("google", &["create_google_cal_event"]),
    ("github", &["create_github_issue"]),
    ("crypto", &["send_usdc"]),
    (
        "reddit",
        &[
            "send_private_message",
            "post_new_submission",
            "post_new_comment",
            "post_new_comment_on_post",
        ],
    ),
];

/// Finds the service a reaction belongs to.
///
/// Stored tasks only keep the trigger's service, so the reaction side has to
/// be recovered from the reaction name. Unknown reactions yield `None`.
pub fn service_from_reaction(reaction: &str) -> Option<&'static str> {
    SERVICE_REACTIONS
        .iter()
        .find(|(_, reactions)| reactions.contains(&reaction))
        .map(|(service, _)| *service)
}
