pub mod catalog;
pub mod error;
pub mod escalation;
pub mod repo;
pub mod service;
pub mod template;
pub mod validation;
