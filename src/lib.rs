//! Slidemark: a terminal slideshow viewer for documents written in a small markup language.
//!
//! This is not meant to be used as a crate!

pub(crate) mod config;
pub(crate) mod input;
pub(crate) mod markup;
pub(crate) mod media;
pub(crate) mod presentation;
pub(crate) mod presenter;
pub(crate) mod render;
pub(crate) mod ui;

pub use crate::{
    config::{Config, ConfigLoadError},
    markup::{handlers::BlockHandlerRegistry, registry::RegistryError, RenderError},
    media::loader::{ImageLoader, LoadImageError},
    presentation::document::{Document, DocumentConfig, LoadDocumentError},
    presenter::{PresentationError, Presenter},
    render::{
        highlighting::{CodeHighlighter, ThemeNotFound},
        properties::ViewportGeometry,
    },
};
