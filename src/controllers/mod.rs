pub mod health;
pub mod history;
pub mod speech;
pub mod voices;
