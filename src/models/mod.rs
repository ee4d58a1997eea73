pub mod audit;
pub mod health;
pub mod integration;
pub mod notification;
pub mod phone;
pub mod probe;
pub mod response;
pub mod retry;
pub mod status;
pub mod template;
