pub(crate) mod intersect;
pub(crate) mod ring;
pub(crate) mod star;
