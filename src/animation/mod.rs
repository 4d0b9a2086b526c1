pub(crate) mod ease;
pub(crate) mod state;
pub(crate) mod timeline;
