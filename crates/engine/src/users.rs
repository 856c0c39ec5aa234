//! User records and the account operations on top of the store.
//!
//! A user is keyed by username; the password is stored and compared in plain
//! text (observed behavior of the data format, kept as-is).

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, SavingsRecord, store::Store};

/// One entry of the user data file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub password: String,
    /// `None` until the first "Calculate & Save"; stored as `{}` on disk so
    /// fresh registrations keep the historical file shape.
    #[serde(default, with = "savings_field")]
    pub savings: Option<SavingsRecord>,
}

impl UserRecord {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            savings: None,
        }
    }
}

/// Account operations over a [`Store`].
///
/// Every call reloads the data file and every mutation rewrites it, so the
/// file is the single source of truth between interactions.
#[derive(Debug, Clone)]
pub struct Accounts {
    store: Store,
}

impl Accounts {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Registers a new user. Returns `Ok(false)` when the username is taken;
    /// the existing record is left untouched.
    pub fn register(&self, username: &str, password: &str) -> ResultEngine<bool> {
        let mut users = self.store.load()?;
        if users.contains_key(username) {
            return Ok(false);
        }
        users.insert(username.to_string(), UserRecord::new(password));
        self.store.save(&users)?;
        Ok(true)
    }

    /// Returns `Ok(true)` iff the username exists and the stored password
    /// matches the given one exactly.
    pub fn authenticate(&self, username: &str, password: &str) -> ResultEngine<bool> {
        let users = self.store.load()?;
        Ok(users
            .get(username)
            .is_some_and(|record| record.password == password))
    }

    /// Latest persisted savings for a user, `None` before the first save.
    pub fn savings(&self, username: &str) -> ResultEngine<Option<SavingsRecord>> {
        let users = self.store.load()?;
        match users.get(username) {
            Some(record) => Ok(record.savings.clone()),
            None => Err(EngineError::KeyNotFound(username.to_string())),
        }
    }

    /// Overwrites a user's savings wholesale. No history is retained.
    pub fn update_savings(&self, username: &str, savings: SavingsRecord) -> ResultEngine<()> {
        let mut users = self.store.load()?;
        match users.get_mut(username) {
            Some(record) => record.savings = Some(savings),
            None => return Err(EngineError::KeyNotFound(username.to_string())),
        }
        self.store.save(&users)
    }
}

/// Serde codec for the `savings` field: `None` maps to the empty JSON object
/// `{}` instead of `null`, which is what the data file has always contained
/// for users that never saved a plan.
mod savings_field {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    use crate::SavingsRecord;

    pub fn serialize<S>(value: &Option<SavingsRecord>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(record) => record.serialize(serializer),
            None => serde_json::Map::new().serialize(serializer),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SavingsRecord>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.as_object().is_some_and(|map| map.is_empty()) {
            return Ok(None);
        }
        serde_json::from_value(value).map(Some).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_serializes_savings_as_empty_object() {
        let json = serde_json::to_string(&UserRecord::new("pw")).unwrap();
        assert_eq!(json, r#"{"password":"pw","savings":{}}"#);
    }

    #[test]
    fn empty_savings_object_deserializes_to_none() {
        let record: UserRecord =
            serde_json::from_str(r#"{"password":"pw","savings":{}}"#).unwrap();
        assert_eq!(record.savings, None);
    }

    #[test]
    fn missing_savings_field_deserializes_to_none() {
        let record: UserRecord = serde_json::from_str(r#"{"password":"pw"}"#).unwrap();
        assert_eq!(record.savings, None);
    }
}
