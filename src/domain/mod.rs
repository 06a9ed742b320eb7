pub mod history;
pub mod speech;
