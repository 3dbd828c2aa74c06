//! SQLite adapter: Implementation of Storage.
//!
//! Provides local persistence for assessments. Each row stores the raw
//! feature codes alongside the scoring result, so dashboard aggregates can be
//! computed without re-scoring.
//!
//! # Mutex Behavior
//!
//! Database connection is protected by `Mutex`. A poisoned mutex (from panic
//! in another thread) will cause panic. This fail-fast behavior is intentional
//! for data integrity in healthcare applications.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::domain::{
    Assessment, ChestPain, PatientRecord, RestEcg, RiskAssessment, Sex, Slope, Thal,
};
use crate::ports::Storage;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// SQLite storage adapter.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Create a new SQLite storage with the given database path.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().expect("Lock failed");

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS assessments (
                id TEXT PRIMARY KEY,
                age INTEGER NOT NULL,
                sex INTEGER NOT NULL,
                cp INTEGER NOT NULL,
                trestbps INTEGER NOT NULL,
                chol INTEGER NOT NULL,
                fbs INTEGER NOT NULL,
                restecg INTEGER NOT NULL,
                thalach INTEGER NOT NULL,
                exang INTEGER NOT NULL,
                oldpeak REAL NOT NULL,
                slope INTEGER NOT NULL,
                ca INTEGER NOT NULL,
                thal INTEGER NOT NULL,
                probability REAL NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_assessments_created_at
                ON assessments(created_at DESC);
            ",
        )?;

        Ok(())
    }

    fn row_to_assessment(row: &rusqlite::Row<'_>) -> Result<Assessment, rusqlite::Error> {
        let id: String = row.get("id")?;
        let created_at_raw: String = row.get("created_at")?;

        let record = PatientRecord {
            age: row.get("age")?,
            sex: Sex::from_code(row.get("sex")?)
                .ok_or_else(|| invalid_code(row, "sex"))?,
            cp: ChestPain::from_code(row.get("cp")?)
                .ok_or_else(|| invalid_code(row, "cp"))?,
            trestbps: row.get("trestbps")?,
            chol: row.get("chol")?,
            fbs: row.get::<_, i64>("fbs")? == 1,
            restecg: RestEcg::from_code(row.get("restecg")?)
                .ok_or_else(|| invalid_code(row, "restecg"))?,
            thalach: row.get("thalach")?,
            exang: row.get::<_, i64>("exang")? == 1,
            oldpeak: row.get("oldpeak")?,
            slope: Slope::from_code(row.get("slope")?)
                .ok_or_else(|| invalid_code(row, "slope"))?,
            ca: row.get("ca")?,
            thal: Thal::from_code(row.get("thal")?)
                .ok_or_else(|| invalid_code(row, "thal"))?,
        };

        let probability: f64 = row.get("probability")?;
        let created_at = created_at_raw
            .parse::<chrono::DateTime<chrono::Utc>>()
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(Assessment {
            id,
            record,
            result: RiskAssessment::new(probability),
            created_at,
        })
    }
}

/// Build a conversion error for an enum column holding an unknown code.
fn invalid_code(row: &rusqlite::Row<'_>, column: &str) -> rusqlite::Error {
    let code: i64 = row.get(column).unwrap_or(-1);
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Integer,
        format!("unknown {column} code {code}").into(),
    )
}

impl Storage for SqliteStorage {
    type Error = StorageError;

    fn save_assessment(&self, assessment: &Assessment) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        let r = &assessment.record;

        conn.execute(
            "INSERT OR REPLACE INTO assessments (
                id, age, sex, cp, trestbps, chol, fbs, restecg,
                thalach, exang, oldpeak, slope, ca, thal,
                probability, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                assessment.id,
                r.age,
                r.sex.code(),
                r.cp.code(),
                r.trestbps,
                r.chol,
                i64::from(r.fbs),
                r.restecg.code(),
                r.thalach,
                i64::from(r.exang),
                r.oldpeak,
                r.slope.code(),
                i64::from(r.ca),
                r.thal.code(),
                assessment.result.probability,
                assessment.created_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn load_assessments(&self) -> Result<Vec<Assessment>, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let mut stmt =
            conn.prepare("SELECT * FROM assessments ORDER BY created_at DESC, id")?;
        let rows = stmt.query_map([], Self::row_to_assessment)?;

        let mut assessments = Vec::new();
        for row in rows {
            assessments.push(row?);
        }
        Ok(assessments)
    }

    fn load_recent(&self, limit: usize) -> Result<Vec<Assessment>, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let mut stmt = conn
            .prepare("SELECT * FROM assessments ORDER BY created_at DESC, id LIMIT ?1")?;
        let rows = stmt.query_map([limit as i64], Self::row_to_assessment)?;

        let mut assessments = Vec::new();
        for row in rows {
            assessments.push(row?);
        }
        Ok(assessments)
    }

    fn count_assessments(&self) -> Result<usize, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM assessments", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn delete_assessment(&self, id: &str) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let affected = conn.execute("DELETE FROM assessments WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn clear_all(&self) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        conn.execute("DELETE FROM assessments", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_assessment(probability: f64) -> Assessment {
        let record = PatientRecord {
            age: 58,
            sex: Sex::Male,
            cp: ChestPain::AtypicalAngina,
            trestbps: 132,
            chol: 224,
            fbs: false,
            restecg: RestEcg::LvHypertrophy,
            thalach: 141,
            exang: true,
            oldpeak: 2.1,
            slope: Slope::Flat,
            ca: 1,
            thal: Thal::ReversibleDefect,
        };
        Assessment::new(record, RiskAssessment::new(probability))
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        let assessment = sample_assessment(0.41);

        storage
            .save_assessment(&assessment)
            .expect("Should save");

        let loaded = storage.load_assessments().expect("Should load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, assessment.id);
        assert_eq!(loaded[0].record, assessment.record);
        assert!((loaded[0].result.probability - 0.41).abs() < f64::EPSILON);
        assert_eq!(loaded[0].result.category, assessment.result.category);
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        for p in [0.1, 0.2, 0.3, 0.4, 0.5] {
            storage
                .save_assessment(&sample_assessment(p))
                .expect("Should save");
        }

        let recent = storage.load_recent(3).expect("Should load");
        assert_eq!(recent.len(), 3);

        let all = storage.load_assessments().expect("Should load");
        assert_eq!(all.len(), 5);
        for pair in all.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn test_count_and_clear() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        assert_eq!(storage.count_assessments().expect("Should count"), 0);

        storage
            .save_assessment(&sample_assessment(0.6))
            .expect("Should save");
        assert_eq!(storage.count_assessments().expect("Should count"), 1);

        storage.clear_all().expect("Should clear");
        assert_eq!(storage.count_assessments().expect("Should count"), 0);
    }

    #[test]
    fn test_delete_by_id() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        let assessment = sample_assessment(0.2);
        storage
            .save_assessment(&assessment)
            .expect("Should save");

        storage
            .delete_assessment(&assessment.id)
            .expect("Should delete");
        assert_eq!(storage.count_assessments().expect("Should count"), 0);

        let err = storage
            .delete_assessment(&assessment.id)
            .expect_err("Should be gone");
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
