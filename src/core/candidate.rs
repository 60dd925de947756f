use crate::core::CommandId;

/// An entry the palette can show and run. `A` is the host's action payload;
/// the palette never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<A> {
    pub id: CommandId,
    pub label: String,
    pub action: A,
    pub keys: Option<String>,
}

impl<A> Candidate<A> {
    pub fn new(id: impl Into<CommandId>, label: impl Into<String>, action: A) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            action,
            keys: None,
        }
    }

    pub fn with_keys(mut self, keys: impl Into<String>) -> Self {
        self.keys = Some(keys.into());
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}
