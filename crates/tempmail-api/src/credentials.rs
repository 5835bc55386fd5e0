//! Random credentials for new disposable accounts.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of generated local parts.
pub const LOCAL_PART_LEN: usize = 10;

/// Length of generated passwords.
pub const PASSWORD_LEN: usize = 16;

/// Address and password for a registration attempt.
#[derive(Debug, Clone)]
pub struct GeneratedCredentials {
    /// Full email address.
    pub address: String,
    /// Account password.
    pub password: String,
}

impl GeneratedCredentials {
    /// Generates a random address on `domain` and a random password.
    #[must_use]
    pub fn generate(domain: &str) -> Self {
        Self {
            address: format!("{}@{domain}", random_string(LOCAL_PART_LEN).to_lowercase()),
            password: random_string(PASSWORD_LEN),
        }
    }
}

fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_address_shape() {
        let creds = GeneratedCredentials::generate("dispostable.test");
        let (local, domain) = creds.address.split_once('@').unwrap_or_default();
        assert_eq!(domain, "dispostable.test");
        assert_eq!(local.len(), LOCAL_PART_LEN);
        assert!(
            local
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
        assert_eq!(creds.password.len(), PASSWORD_LEN);
    }

    #[test]
    fn test_generation_is_random() {
        let a = GeneratedCredentials::generate("x.test");
        let b = GeneratedCredentials::generate("x.test");
        assert_ne!(a.address, b.address);
        assert_ne!(a.password, b.password);
    }
}
