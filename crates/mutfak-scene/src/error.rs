use crate::scene::TemplateId;

/// Errors raised by scene operations that cannot silently no-op.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("unknown template {0:?}")]
    UnknownTemplate(TemplateId),
}
