pub mod collection;
pub mod logging;
