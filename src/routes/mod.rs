//! HTTP route handlers. Handlers stay thin: extract, call the service,
//! serialize the result.

pub mod appointments;
pub mod campaigns;
pub mod catalog;
pub mod clients;
pub mod conversations;
pub mod finance;
pub mod inventory;
pub mod main;
pub mod professionals;
pub mod subscriptions;
pub mod webhooks;
