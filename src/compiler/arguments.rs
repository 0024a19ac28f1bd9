/// Defines the contract for injecting backend-required arguments in front of
/// a trigger's user parameters.
pub trait TriggerArgsProvider: Send + Sync {
    fn applies_to(&self, trigger: &str) -> bool;
    fn leading_args(&self) -> Vec<String>;
}

/// Triggers that run against the backend's cloud project and need its
/// identity as their first two arguments.
pub const PROJECT_TRIGGERS: &[&str] = &[
    "email_sent",
    "email_received",
    "email_received_from_person",
    "calendar_event_created",
    "email_sent_to_person",
];

pub const DEFAULT_PROJECT_ID: &str = "area-epitech-437409";
pub const DEFAULT_PROJECT_NAME: &str = "Area-Epitech";

/// Prepends the backend project id and name for the mail and calendar triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub project_id: String,
    pub project_name: String,
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
        }
    }
}

impl ProjectContext {
    pub fn new(project_id: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            project_name: project_name.into(),
        }
    }

    /// Removes the leading project arguments from stored `args`, if present.
    pub fn strip(&self, trigger: &str, args: Vec<String>) -> Vec<String> {
        let leading = self.leading_args();
        if self.applies_to(trigger) && args.starts_with(&leading) {
            args.into_iter().skip(leading.len()).collect()
        } else {
            args
        }
    }
}

impl TriggerArgsProvider for ProjectContext {
    fn applies_to(&self, trigger: &str) -> bool {
        PROJECT_TRIGGERS.contains(&trigger)
    }

    fn leading_args(&self) -> Vec<String> {
        vec![self.project_id.clone(), self.project_name.clone()]
    }
}

/// Fixed leading arguments for an explicit list of triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticArgs {
    triggers: Vec<String>,
    args: Vec<String>,
}

impl StaticArgs {
    pub fn new<T, A>(triggers: T, args: A) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            triggers: triggers.into_iter().map(Into::into).collect(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl TriggerArgsProvider for StaticArgs {
    fn applies_to(&self, trigger: &str) -> bool {
        self.triggers.iter().any(|t| t == trigger)
    }

    fn leading_args(&self) -> Vec<String> {
        self.args.clone()
    }
}
