pub mod admin;
pub mod oracle;
pub mod publication;
