pub(crate) mod ansi;
pub(crate) mod block;
pub(crate) mod highlighting;
pub(crate) mod layout;
pub(crate) mod properties;
pub(crate) mod terminal;
