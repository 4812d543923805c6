pub mod extractor;
pub mod jwt;
pub mod lockout;
pub mod password;
pub mod roles;
pub mod token;
