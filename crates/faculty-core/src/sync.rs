// crates/faculty-core/src/sync.rs

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, SyncError};
use crate::mapper::{mongo_to_sql, sql_to_mongo};
use crate::options::SyncOptions;
use crate::types::{FacultyDocument, RelationalPayload, RelationalRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    SqlToMongo,
    MongoToSql,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::SqlToMongo => "sql-to-mongo",
            Direction::MongoToSql => "mongo-to-sql",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sql-to-mongo" => Ok(Direction::SqlToMongo),
            "mongo-to-sql" => Ok(Direction::MongoToSql),
            other => Err(SyncError::InvalidDirection {
                direction: other.to_string(),
            }),
        }
    }
}

/// A source record already decoded into the shape its direction expects.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncRequest {
    SqlToMongo(RelationalRecord),
    MongoToSql(FacultyDocument),
}

impl SyncRequest {
    pub fn direction(&self) -> Direction {
        match self {
            SyncRequest::SqlToMongo(_) => Direction::SqlToMongo,
            SyncRequest::MongoToSql(_) => Direction::MongoToSql,
        }
    }

    /// Decodes `data` into the record shape selected by `direction`.
    pub fn decode(direction: Direction, data: Value) -> Result<Self> {
        let decode_err = |source| SyncError::Decode {
            direction: direction.as_str(),
            source,
        };
        match direction {
            Direction::SqlToMongo => serde_json::from_value(data)
                .map(SyncRequest::SqlToMongo)
                .map_err(decode_err),
            Direction::MongoToSql => serde_json::from_value(data)
                .map(SyncRequest::MongoToSql)
                .map_err(decode_err),
        }
    }
}

/// The mapped value. Nothing has been persisted when this is returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SyncOutcome {
    Document(FacultyDocument),
    Relational(RelationalPayload),
}

impl SyncOutcome {
    pub fn as_document(&self) -> Option<&FacultyDocument> {
        match self {
            SyncOutcome::Document(document) => Some(document),
            SyncOutcome::Relational(_) => None,
        }
    }

    pub fn as_relational(&self) -> Option<&RelationalPayload> {
        match self {
            SyncOutcome::Relational(payload) => Some(payload),
            SyncOutcome::Document(_) => None,
        }
    }
}

/// Runs the mapping for an already typed request.
pub fn synchronize(request: &SyncRequest, options: &SyncOptions) -> SyncOutcome {
    if !options.is_empty() {
        options.log_ignored();
    }
    debug!(direction = %request.direction(), "Mapping faculty record");

    match request {
        SyncRequest::SqlToMongo(record) => SyncOutcome::Document(sql_to_mongo(record)),
        SyncRequest::MongoToSql(document) => SyncOutcome::Relational(mongo_to_sql(document)),
    }
}

/// Dispatches on a direction tag and maps an untyped record.
///
/// The tag is checked before `data` is looked at, so an unknown direction is
/// always reported as `SyncError::InvalidDirection`.
pub fn synchronize_data(direction: &str, data: Value, options: &SyncOptions) -> Result<SyncOutcome> {
    let direction: Direction = direction.parse()?;
    let request = SyncRequest::decode(direction, data)?;
    Ok(synchronize(&request, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn direction_tags_parse() {
        assert_eq!("sql-to-mongo".parse::<Direction>().unwrap(), Direction::SqlToMongo);
        assert_eq!("mongo-to-sql".parse::<Direction>().unwrap(), Direction::MongoToSql);
        assert_eq!(Direction::MongoToSql.to_string(), "mongo-to-sql");
    }

    #[test]
    fn direction_tags_are_case_sensitive() {
        let err = "SQL-TO-MONGO".parse::<Direction>().unwrap_err();
        assert!(matches!(err, SyncError::InvalidDirection { ref direction } if direction == "SQL-TO-MONGO"));
    }

    #[test]
    fn invalid_direction_wins_over_undecodable_data() {
        let err = synchronize_data("sideways", json!("not a record"), &SyncOptions::default())
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidDirection { .. }));
        assert_eq!(err.to_string(), "Invalid synchronization direction: sideways");
    }

    #[test]
    fn non_object_record_is_a_decode_error() {
        let err = synchronize_data("mongo-to-sql", json!("not a record"), &SyncOptions::default())
            .unwrap_err();
        assert!(matches!(err, SyncError::Decode { direction: "mongo-to-sql", .. }));
    }

    #[test]
    fn outcome_accessors_match_direction() {
        let outcome = synchronize(
            &SyncRequest::MongoToSql(FacultyDocument::default()),
            &SyncOptions::default(),
        );
        assert!(outcome.as_relational().is_some());
        assert!(outcome.as_document().is_none());
    }
}
