use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rocket::async_trait;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// name of the cookie the admin session token travels in
pub static SESSION_COOKIE: &str = "filedrop_session";

/// a single record in the credentials file. Passwords are stored as SHA-256
/// digests, never as plaintext
#[derive(Deserialize)]
pub struct CredentialRecord {
    pub username: String,
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
}

/// used to represent the result of checking a login attempt
#[derive(PartialEq, Debug)]
pub enum CheckCredentialsResult {
    Valid,
    Invalid,
    /// the credentials file is missing or unreadable
    Unavailable,
}

/// hashes a username + password pair the same way the credentials file
/// stores them
pub fn hash_credentials(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    // hash username and password combined
    let combined = format!("{}:{}", username.trim(), password.trim());
    hasher.write_all(combined.as_bytes()).unwrap();
    format!("{:x}", hasher.finalize())
}

/// compares a login attempt against the credentials file
pub fn check_credentials(
    credentials_path: &Path,
    username: &str,
    password: &str,
) -> CheckCredentialsResult {
    let contents = match fs::read_to_string(credentials_path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!(
                "Failed to read credentials file {credentials_path:?}. Nested exception is {e:?}"
            );
            return CheckCredentialsResult::Unavailable;
        }
    };
    let records: Vec<CredentialRecord> = match serde_json::from_str(&contents) {
        Ok(records) => records,
        Err(e) => {
            log::error!(
                "Credentials file {credentials_path:?} holds invalid JSON. Nested exception is {e:?}"
            );
            return CheckCredentialsResult::Unavailable;
        }
    };
    let hash = hash_credentials(username, password);
    let matched = records
        .iter()
        .any(|record| record.username == username && record.password_hash == hash);
    if matched {
        CheckCredentialsResult::Valid
    } else {
        CheckCredentialsResult::Invalid
    }
}

/// in-process store of live admin session tokens.
///
/// Tokens expire after the configured ttl; expired entries are dropped
/// lazily the next time they are looked up.
pub struct SessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<String, Instant>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> SessionStore {
        SessionStore {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// mints and records a fresh unguessable session token
    pub fn create(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let mut sessions = self.lock();
        sessions.insert(token.clone(), Instant::now() + self.ttl);
        token
    }

    /// checks a token, dropping it if it has expired
    pub fn is_valid(&self, token: &str) -> bool {
        let mut sessions = self.lock();
        match sessions.get(token) {
            Some(expiry) if *expiry > Instant::now() => true,
            Some(_) => {
                sessions.remove(token);
                false
            }
            None => false,
        }
    }

    pub fn revoke(&self, token: &str) {
        self.lock().remove(token);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Instant>> {
        match self.sessions.lock() {
            Ok(lock) => lock,
            Err(e) => {
                log::warn!("The session store mutex was poisoned! Continuing...");
                self.sessions.clear_poison();
                e.into_inner()
            }
        }
    }
}

/// request guard that only admits requests carrying a live session cookie.
/// A rejected request surfaces as a 401, which the catcher turns into a
/// redirect to the login surface.
#[derive(Debug)]
pub struct AdminSession {
    pub token: String,
}

#[derive(Debug)]
pub enum SessionError {
    Missing,
    Invalid,
}

#[async_trait]
impl<'a> FromRequest<'a> for AdminSession {
    type Error = SessionError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        let sessions = match request.rocket().state::<SessionStore>() {
            Some(sessions) => sessions,
            None => return Outcome::Error((Status::InternalServerError, SessionError::Missing)),
        };
        match request.cookies().get(SESSION_COOKIE) {
            None => Outcome::Error((Status::Unauthorized, SessionError::Missing)),
            Some(cookie) if sessions.is_valid(cookie.value()) => Outcome::Success(AdminSession {
                token: cookie.value().to_string(),
            }),
            Some(_) => Outcome::Error((Status::Unauthorized, SessionError::Invalid)),
        }
    }
}
