pub mod password;
pub mod verification_token;
