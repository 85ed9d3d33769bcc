pub(crate) mod footer;
