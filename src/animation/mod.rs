pub(crate) mod creation;
pub(crate) mod label;
pub(crate) mod method;
pub(crate) mod node;
pub(crate) mod path_func;
pub(crate) mod range;
pub(crate) mod rate;
pub(crate) mod transform;
