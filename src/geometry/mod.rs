pub(crate) mod bezier;
pub(crate) mod builder;
pub(crate) mod linalg;
pub(crate) mod space;
pub(crate) mod spline;
pub(crate) mod vpoints;
