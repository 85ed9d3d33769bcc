pub(crate) mod ascii;
pub(crate) mod loader;
