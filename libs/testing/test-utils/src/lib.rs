//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let title = builder.name("tarefa", "main");
//!     let due = builder.due_date(3);
//! }
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime};

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Data derived from the same seed is identical across runs, and data from
/// different seeds does not collide, so tests sharing a database stay apart.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_task");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("tarefa", "main");
    /// assert!(name.starts_with("test-tarefa-"));
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A due date `day_offset` days after a seed-chosen day in 2030-2057.
    ///
    /// Always at 09:00 so tests can tell time-of-day handling apart.
    pub fn due_date(&self, day_offset: i64) -> NaiveDateTime {
        let base = NaiveDate::from_ymd_opt(2030, 1, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap_or_default();
        base + Duration::days((self.seed % 10_000) as i64 + day_offset)
    }
}

/// Test assertion helpers
pub mod assertions {
    use chrono::NaiveDateTime;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that two date-times fall on the same calendar day
    pub fn assert_same_day(actual: NaiveDateTime, expected: NaiveDateTime, context: &str) {
        assert_eq!(
            actual.date(),
            expected.date(),
            "{}: expected day {}, got {}",
            context,
            expected.date(),
            actual.date()
        );
    }
}
