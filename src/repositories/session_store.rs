// src/repositories/session_store.rs
//
// Session Store - the three persisted session values
//
// The store is handed to every service that needs it; nothing reads the
// session through a global.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use rusqlite::params;

use crate::db::ConnectionPool;
use crate::domain::Session;
use crate::error::{AppError, AppResult};

const KEY_TOKEN: &str = "token";
const KEY_USER_NAME: &str = "userName";
const KEY_USER_EMAIL: &str = "userEmail";

pub trait SessionStore: Send + Sync {
    /// Current session; an absent token means "not signed in"
    fn get(&self) -> AppResult<Session>;

    /// Replace all three values at once. Readers never observe a mix of
    /// old and new values.
    fn set(&self, token: &str, user_name: &str, user_email: &str) -> AppResult<()>;

    /// Remove all three values
    fn clear(&self) -> AppResult<()>;
}

pub struct SqliteSessionStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteSessionStore {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl SessionStore for SqliteSessionStore {
    fn get(&self) -> AppResult<Session> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT key, value FROM session_entries")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut token = None;
        let mut user_name = None;
        let mut user_email = None;
        for (key, value) in rows {
            match key.as_str() {
                KEY_TOKEN => token = Some(value),
                KEY_USER_NAME => user_name = Some(value),
                KEY_USER_EMAIL => user_email = Some(value),
                other => log::warn!("Ignoring unknown session key {:?}", other),
            }
        }

        Ok(Session::new(token, user_name, user_email))
    }

    fn set(&self, token: &str, user_name: &str, user_email: &str) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let now = Utc::now().to_rfc3339();

        for (key, value) in [
            (KEY_TOKEN, token),
            (KEY_USER_NAME, user_name),
            (KEY_USER_EMAIL, user_email),
        ] {
            tx.execute(
                "INSERT OR REPLACE INTO session_entries (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![key, value, now],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM session_entries", [])?;
        Ok(())
    }
}

/// Session store that lives only as long as the process
#[derive(Default)]
pub struct InMemorySessionStore {
    session: RwLock<Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `session`
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self) -> AppResult<Session> {
        self.session
            .read()
            .map(|s| s.clone())
            .map_err(|_| AppError::Other("Session lock poisoned".to_string()))
    }

    fn set(&self, token: &str, user_name: &str, user_email: &str) -> AppResult<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| AppError::Other("Session lock poisoned".to_string()))?;
        *guard = Session::new(
            Some(token.to_string()),
            Some(user_name.to_string()),
            Some(user_email.to_string()),
        );
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| AppError::Other("Session lock poisoned".to_string()))?;
        *guard = Session::anonymous();
        Ok(())
    }
}
