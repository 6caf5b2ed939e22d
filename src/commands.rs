pub mod generate_secret;
pub mod issue_token;
pub mod migrate;
pub mod serve;
pub mod version;
