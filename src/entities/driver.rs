use crate::core::kind::EntityKind;
use crate::impl_record;
use anyhow::{Result, anyhow};
use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use std::fmt;

impl_record!(
    Driver,
    EntityKind::Driver,
    fields: [username, first_name, last_name, license_number],
    unique: [username, license_number],
    {
        username: String,
        #[serde(default)]
        first_name: String,
        #[serde(default)]
        last_name: String,
        #[serde(default)]
        license_number: String,
        /// Argon2 PHC string; empty when no password is usable
        #[serde(skip)]
        password_hash: String,
    }
);

impl Driver {
    /// Create a driver without a usable password
    pub fn new(username: &str, license_number: &str) -> Self {
        Self {
            id: 0,
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            license_number: license_number.to_string(),
            password_hash: String::new(),
        }
    }

    pub fn with_name(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self
    }

    pub fn with_password(mut self, password: &str) -> Result<Self> {
        self.set_password(password)?;
        Ok(self)
    }

    /// Hash and store a password under a fresh random salt
    pub fn set_password(&mut self, password: &str) -> Result<()> {
        let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes())
            .map_err(|e| anyhow!("failed to encode password salt: {}", e))?;
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("failed to hash password: {}", e))?;
        self.password_hash = hash.to_string();
        Ok(())
    }

    pub fn has_usable_password(&self) -> bool {
        !self.password_hash.is_empty()
    }

    /// Check a candidate password against the stored hash
    pub fn check_password(&self, password: &str) -> bool {
        if !self.has_usable_password() {
            return false;
        }
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.full_name())
    }
}
