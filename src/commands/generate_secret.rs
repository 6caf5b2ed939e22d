use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;

/// Prints a random 64 byte, base64 encoded secret for signing admin tokens.
pub fn handle_generate_secret_command() {
    println!("🔐 Generated JWT Secret:");
    println!();
    println!("jwt:");
    println!("  secret: \"{}\"", generate_secret());
    println!("  expiration_days: 7");
    println!("  renew_within_hours: 24");
    println!();
    println!("Add this to your config/{{environment}}.yaml file.");
}

fn generate_secret() -> String {
    let mut secret = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut secret);
    general_purpose::STANDARD.encode(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_are_random_and_decode_to_64_bytes() {
        let first = generate_secret();
        let second = generate_secret();

        assert_ne!(first, second);
        assert_eq!(general_purpose::STANDARD.decode(first).unwrap().len(), 64);
    }
}
