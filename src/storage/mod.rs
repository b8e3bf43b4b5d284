//! JSON file storage
//!
//! Atomic write-temp-then-rename persistence for the transaction ledger and
//! the goal list. The reporting engine itself only sees the `Ledger` trait.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{FintrackError, FintrackResult};
use crate::ledger::{self, Ledger, LedgerFilter};
use crate::models::{Goal, GoalId, Money, Transaction, UserId};

/// Read JSON from a file, returning a default value if the file doesn't exist
fn read_json<T>(path: &Path) -> FintrackResult<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| FintrackError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| FintrackError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> FintrackResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FintrackError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory so the rename stays atomic
    let temp_path = path.with_extension("json.tmp");
    let result = (|| -> std::io::Result<()> {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        fs::rename(&temp_path, path)
    })();

    result.map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FintrackError::Storage(format!("Failed to write {}: {}", path.display(), e))
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    users: HashMap<UserId, Vec<Transaction>>,
}

/// File-backed transaction ledger
#[derive(Debug)]
pub struct JsonLedger {
    path: PathBuf,
    data: LedgerFile,
}

impl JsonLedger {
    /// Load the ledger file, starting empty if it doesn't exist yet
    pub fn load(path: impl Into<PathBuf>) -> FintrackResult<Self> {
        let path = path.into();
        let data = read_json(&path)?;
        Ok(Self { path, data })
    }

    /// Make sure a user has a (possibly empty) ledger entry
    pub fn ensure_user(&mut self, user: UserId) {
        self.data.users.entry(user).or_default();
    }

    /// Append a transaction to a user's ledger
    pub fn insert(&mut self, user: UserId, transaction: Transaction) {
        self.data.users.entry(user).or_default().push(transaction);
    }

    /// Persist the ledger
    pub fn save(&self) -> FintrackResult<()> {
        write_json_atomic(&self.path, &self.data)
    }
}

impl Ledger for JsonLedger {
    fn fetch(&self, user: UserId, filter: &LedgerFilter) -> FintrackResult<Vec<Transaction>> {
        let transactions = self
            .data
            .users
            .get(&user)
            .ok_or_else(|| FintrackError::ledger_not_found(user.to_string()))?;

        let mut result = ledger::apply(transactions, filter);
        result.sort_by_key(|txn| txn.date);
        Ok(result)
    }
}

/// File-backed goal list
#[derive(Debug)]
pub struct GoalStore {
    path: PathBuf,
    goals: Vec<Goal>,
}

impl GoalStore {
    /// Load the goals file, starting empty if it doesn't exist yet
    pub fn load(path: impl Into<PathBuf>) -> FintrackResult<Self> {
        let path = path.into();
        let goals = read_json(&path)?;
        Ok(Self { path, goals })
    }

    pub fn add(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    pub fn list(&self) -> &[Goal] {
        &self.goals
    }

    /// Record a contribution against a stored goal
    pub fn contribute(&mut self, id: GoalId, amount: Money) -> FintrackResult<&Goal> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| FintrackError::goal_not_found(id.to_string()))?;

        goal.add_contribution(amount)
            .map_err(|e| FintrackError::Validation(e.to_string()))?;
        Ok(goal)
    }

    /// Persist the goals
    pub fn save(&self) -> FintrackResult<()> {
        write_json_atomic(&self.path, &self.goals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::{Duration, Local, NaiveDate};
    use tempfile::TempDir;

    fn txn(cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            TransactionKind::Expense,
            Money::from_cents(cents),
            "Entry",
            "General",
        )
    }

    #[test]
    fn test_ledger_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("ledger.json");
        let user = UserId::new();

        let mut ledger = JsonLedger::load(&path).unwrap();
        ledger.insert(user, txn(5000));
        ledger.insert(user, txn(1200));
        ledger.save().unwrap();

        let reloaded = JsonLedger::load(&path).unwrap();
        let fetched = reloaded.fetch(user, &LedgerFilter::new()).unwrap();
        assert_eq!(fetched.len(), 2);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");

        let mut ledger = JsonLedger::load(&path).unwrap();
        ledger.insert(UserId::new(), txn(100));
        ledger.save().unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_unknown_user_is_not_found() {
        let dir = TempDir::new().unwrap();
        let ledger = JsonLedger::load(dir.path().join("ledger.json")).unwrap();
        let err = ledger.fetch(UserId::new(), &LedgerFilter::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_ensure_user_makes_fetch_total_for_new_profiles() {
        let dir = TempDir::new().unwrap();
        let mut ledger = JsonLedger::load(dir.path().join("ledger.json")).unwrap();
        let user = UserId::new();
        ledger.ensure_user(user);
        assert!(ledger.fetch(user, &LedgerFilter::new()).unwrap().is_empty());
    }

    #[test]
    fn test_goal_store_contribution() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("goals.json");
        let deadline = Local::now().date_naive() + Duration::days(60);

        let mut store = GoalStore::load(&path).unwrap();
        let goal = Goal::new("Bike", Money::from_cents(50000), deadline).unwrap();
        let id = goal.id;
        store.add(goal);
        store.contribute(id, Money::from_cents(50000)).unwrap();
        store.save().unwrap();

        let reloaded = GoalStore::load(&path).unwrap();
        assert_eq!(reloaded.list().len(), 1);
        assert_eq!(
            reloaded.list()[0].status,
            crate::models::GoalStatus::Completed
        );
    }

    #[test]
    fn test_goal_store_unknown_id() {
        let dir = TempDir::new().unwrap();
        let mut store = GoalStore::load(dir.path().join("goals.json")).unwrap();
        let err = store
            .contribute(GoalId::new(), Money::from_cents(100))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
