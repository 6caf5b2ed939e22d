use std::process;

use crate::{
    auth::{generate_token, UserDetails},
    config::Config,
};

/// Prints a signed admin token, for bootstrapping access to the admin API.
pub fn handle_issue_token_command(config: &Config, user_id: i64, username: String) {
    let user = UserDetails {
        id: user_id,
        username,
    };

    match generate_token(config, &user) {
        Ok(token) => {
            println!("🔑 Token for {} (id {}):", user.username, user.id);
            println!();
            println!("{token}");
            println!();
            println!(
                "Valid for {} day(s). Send it as 'Authorization: Bearer <token>'.",
                config.jwt.expiration_days
            );
        }
        Err(e) => {
            eprintln!("❌ Failed to sign token: {e}");
            process::exit(1);
        }
    }
}
