// finalizer.rs — The project-finalization collaborator.
//
// Marking the parent project completed is delegated so hosts can hang
// their own project lifecycle on it (multi-winner contests, escrow
// release, search index updates). The contract: idempotent, bounded,
// and failures abort the completion transaction.

use anyhow::Result;

use pw_domain::{Project, ProjectStatus};

/// Finalizes a project when its winning pitch completes. Must be idempotent:
/// completing an already-completed project is a no-op, not an error.
pub trait ProjectFinalizer: Send {
    fn complete_project(&self, project: &mut Project) -> Result<()>;
}

/// The default finalizer — flips the project status to Completed.
pub struct MarkCompletedFinalizer;

impl ProjectFinalizer for MarkCompletedFinalizer {
    fn complete_project(&self, project: &mut Project) -> Result<()> {
        project.status = ProjectStatus::Completed;
        Ok(())
    }
}
