pub(crate) mod block;
pub(crate) mod handlers;
pub(crate) mod inline;
pub(crate) mod registry;
pub(crate) mod scan;
pub(crate) mod text_style;
pub(crate) mod validate;

/// A reference that made it past validation could not be resolved while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("style '{0}' is not defined")]
    UndefinedStyle(String),

    #[error("block handler '{0}' is not defined")]
    UndefinedHandler(String),
}
