use crate::config::settings::AuthConfig;

/// Mock credential check: the registered email OR the shared password is enough.
#[derive(Debug, Clone)]
pub struct CredentialPolicy {
    registered_email: String,
    shared_password: String,
}

impl CredentialPolicy {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            registered_email: config.registered_email.clone(),
            shared_password: config.shared_password.clone(),
        }
    }

    pub fn accepts(&self, email: &str, password: &str) -> bool {
        email == self.registered_email || password == self.shared_password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_either_credential_is_enough() {
        let policy = CredentialPolicy::new(&Settings::default().auth);

        assert!(policy.accepts("registered-user@rika-firenet.com", "wrong"));
        assert!(policy.accepts("someone@rika.com", "Secret"));
        assert!(!policy.accepts("someone@rika.com", "Secret!"));
        assert!(!policy.accepts("", ""));
    }
}
