use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::{TaskError, TaskResult};

/// Message returned when a write carries no due date.
pub const EMPTY_DUE_DATE: &str = "A data da tarefa não pode ser vazia";

/// `0001-01-01T00:00:00`, the value an omitted due date deserializes to.
pub fn sentinel_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Task status.
///
/// Stored and serialized as an integer. Parsing also accepts the member
/// name, case-insensitively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[strum(ascii_case_insensitive)]
pub enum TaskStatus {
    #[default]
    #[sea_orm(num_value = 0)]
    #[strum(serialize = "Pendente")]
    Pending,
    #[sea_orm(num_value = 1)]
    #[strum(serialize = "Finalizado")]
    Finished,
}

impl TaskStatus {
    pub fn code(self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Finished => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Finished),
            _ => None,
        }
    }

    /// Accepts `"0"`/`"1"` or a member name.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(code) => Self::from_code(code),
            Err(_) => Self::from_str(raw).ok(),
        }
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatusVisitor;

        impl Visitor<'_> for StatusVisitor {
            type Value = TaskStatus;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("0, 1, \"Pendente\" or \"Finalizado\"")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TaskStatus, E> {
                TaskStatus::from_code(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TaskStatus, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(TaskStatus::from_code)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TaskStatus, E> {
                TaskStatus::parse(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(StatusVisitor)
    }
}

/// Lenient due-date parsing shared by request bodies and query strings.
///
/// Accepted forms, in order:
/// - `2024-01-01T10:00:00[.fff]` and `2024-01-01 10:00:00[.fff]`
/// - RFC 3339 with an offset, converted to UTC
/// - `2024-01-01`, read as midnight
///
/// `null` and the empty string yield [`sentinel_date`].
pub mod due_date {
    use super::*;

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Some(sentinel_date());
        }

        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc).naive_utc())
            })
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        struct DueDateVisitor;

        impl<'de> Visitor<'de> for DueDateVisitor {
            type Value = NaiveDateTime;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a date or date-time string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NaiveDateTime, E> {
                parse(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_unit<E: de::Error>(self) -> Result<NaiveDateTime, E> {
                Ok(sentinel_date())
            }

            fn visit_none<E: de::Error>(self) -> Result<NaiveDateTime, E> {
                Ok(sentinel_date())
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<NaiveDateTime, D::Error> {
                d.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(DueDateVisitor)
    }
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Assigned by the database
    pub id: i32,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    /// Due date, no offset
    #[serde(rename = "data")]
    #[schema(value_type = String, example = "2024-01-01T00:00:00")]
    pub due_date: NaiveDateTime,
    /// 0 = Pendente, 1 = Finalizado
    #[schema(value_type = i32, example = 0)]
    pub status: TaskStatus,
}

/// Request body for create and update.
///
/// An `id` in the body is ignored. Every field may be omitted; an omitted
/// `data` fails [`TaskInput::validate`].
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct TaskInput {
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(
        rename = "data",
        default = "sentinel_date",
        deserialize_with = "due_date::deserialize"
    )]
    #[schema(value_type = String, example = "2024-01-01T00:00:00")]
    pub due_date: NaiveDateTime,
    /// 0/1 or "Pendente"/"Finalizado"
    #[serde(default)]
    #[schema(value_type = i32, example = 0)]
    pub status: TaskStatus,
}

impl TaskInput {
    pub fn validate(&self) -> TaskResult<()> {
        if self.due_date == sentinel_date() {
            return Err(TaskError::InvalidArgument(EMPTY_DUE_DATE.to_string()));
        }
        Ok(())
    }
}

/// Query filters for listing tasks. All `None` lists everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    /// Substring of the title, matched literally
    pub title: Option<String>,
    /// Calendar day of the due date
    pub due_on: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
}

/// How title searches compare case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleMatch {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TitleQuery {
    /// Substring to look for. Empty matches every task.
    #[serde(default)]
    pub titulo: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateQuery {
    /// Any time on the wanted day
    #[serde(default = "sentinel_date", deserialize_with = "due_date::deserialize")]
    #[param(value_type = String, example = "2024-01-01T00:00:00")]
    pub data: NaiveDateTime,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    /// 0/1 or "Pendente"/"Finalizado"; defaults to Pendente
    #[serde(default)]
    #[param(value_type = String, example = "0")]
    pub status: TaskStatus,
}
