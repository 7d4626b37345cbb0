pub mod documents;
pub mod login;
