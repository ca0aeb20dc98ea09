pub(crate) mod load;
pub(crate) mod record;
