use crate::core::document::Node;
use crate::core::upgrade::{CommandLineToolUpgrade, DocumentTransform, UpgradeError, WorkflowUpgrade};

const WORKFLOW_CLASS: &str = "Workflow";

/// Pick the rewrite for the document's `class` and apply it.
pub fn upgrade_document(doc: Node) -> Result<Node, UpgradeError> {
    let class = doc
        .get("class")
        .and_then(Node::as_str)
        .ok_or(UpgradeError::MissingClass)?;
    let transform: Box<dyn DocumentTransform> = if class == WORKFLOW_CLASS {
        Box::new(WorkflowUpgrade)
    } else {
        Box::new(CommandLineToolUpgrade)
    };
    tracing::debug!(class, transform = transform.name(), "upgrading document");
    transform.transform(doc)
}
