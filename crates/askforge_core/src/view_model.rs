use crate::Role;

/// Snapshot of the conversation for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub messages: Vec<MessageView>,
    pub input: String,
    /// A submission is in flight; further submits are rejected.
    pub busy: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub role: Role,
    pub content: String,
    /// This entry is a transient stage marker, not real content. Tracked
    /// positionally so a reply whose text equals a marker label is not
    /// mistaken for one.
    pub stage_marker: bool,
}
