pub mod control;
pub mod payment;
pub mod project;
pub mod settings;
pub mod vendor;
