pub(crate) mod config;
pub(crate) mod rate;
pub(crate) mod scheduler;
pub(crate) mod smoother;
pub(crate) mod visibility;
