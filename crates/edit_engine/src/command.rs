//! Command system for document editing

use doc_model::{Document, Selection};

/// Result of applying a command
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The new document snapshot after the command
    pub document: Document,
    /// The new selection after the command
    pub selection: Option<Selection>,
    /// False when the command's preconditions did not hold and nothing changed
    pub applied: bool,
}

impl CommandResult {
    /// A changed snapshot
    pub fn applied(document: Document, selection: Option<Selection>) -> Self {
        Self {
            document,
            selection,
            applied: true,
        }
    }

    /// The input snapshot and selection, unchanged
    pub fn unchanged(document: &Document, selection: Option<&Selection>) -> Self {
        Self {
            document: document.clone(),
            selection: selection.cloned(),
            applied: false,
        }
    }
}

/// Trait for all editing commands
pub trait Command: std::fmt::Debug + Send + Sync {
    /// Apply this command to a snapshot
    fn apply(&self, doc: &Document, selection: Option<&Selection>) -> crate::Result<CommandResult>;

    /// Get a display name for this command
    fn display_name(&self) -> &str;

    /// Clone this command into a box
    fn clone_box(&self) -> Box<dyn Command>;
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Apply a sequence of commands, threading document and selection through
pub fn apply_all(
    commands: &[Box<dyn Command>],
    doc: &Document,
    selection: Option<&Selection>,
) -> crate::Result<CommandResult> {
    let mut current = CommandResult::unchanged(doc, selection);

    for command in commands {
        let next = command.apply(&current.document, current.selection.as_ref())?;
        tracing::debug!(
            command = command.display_name(),
            applied = next.applied,
            "applied command"
        );
        current = CommandResult {
            applied: current.applied || next.applied,
            ..next
        };
    }

    Ok(current)
}
