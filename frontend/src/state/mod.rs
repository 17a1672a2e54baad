pub mod accounts;
pub mod connection;
