pub mod google;
pub mod login;
pub mod publish;
pub mod signup;
pub mod user;
pub mod verification;
