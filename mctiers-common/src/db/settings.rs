//! Settings table access and admin credential management
//!
//! The admin password is stored as a salted SHA-256 hash in the settings
//! table, never in plaintext. On first initialization the password is taken
//! from `MCTIERS_ADMIN_PASSWORD`, falling back to a documented default that
//! operators are expected to change.

use crate::Result;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use tracing::warn;

/// Environment variable supplying the initial admin password
pub const ADMIN_PASSWORD_ENV_VAR: &str = "MCTIERS_ADMIN_PASSWORD";

const ADMIN_HASH_KEY: &str = "admin_password_hash";
const ADMIN_SALT_KEY: &str = "admin_password_salt";

/// The password seeded when neither a stored hash nor the environment
/// variable is present. Kept for parity with historical deployments.
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Read a setting value
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(value,)| value))
}

/// Insert or replace a setting value
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
    Ok(())
}

/// Initialize default settings, including the admin credential when absent
pub async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    if get_setting(pool, ADMIN_HASH_KEY).await?.is_some() {
        return Ok(());
    }

    let password = match std::env::var(ADMIN_PASSWORD_ENV_VAR) {
        Ok(password) if !password.is_empty() => password,
        _ => {
            warn!(
                "No {} set; seeding the default admin password - change it",
                ADMIN_PASSWORD_ENV_VAR
            );
            DEFAULT_ADMIN_PASSWORD.to_string()
        }
    };

    let salt = generate_salt();
    let hash = hash_password(&salt, &password);
    set_setting(pool, ADMIN_SALT_KEY, &salt).await?;
    set_setting(pool, ADMIN_HASH_KEY, &hash).await?;

    Ok(())
}

/// Check a presented password against the stored admin credential
pub async fn verify_admin_password(pool: &SqlitePool, password: &str) -> Result<bool> {
    let (salt, hash) = match (
        get_setting(pool, ADMIN_SALT_KEY).await?,
        get_setting(pool, ADMIN_HASH_KEY).await?,
    ) {
        (Some(salt), Some(hash)) => (salt, hash),
        _ => return Ok(false),
    };
    Ok(hash_password(&salt, password) == hash)
}

/// Salted SHA-256, hex-encoded
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Random 128-bit salt, hex-encoded
fn generate_salt() -> String {
    use rand::Rng;
    let salt: u128 = rand::thread_rng().gen();
    format!("{salt:032x}")
}
