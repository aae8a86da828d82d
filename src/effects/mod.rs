pub(crate) mod effect;
pub(crate) mod key_function;
