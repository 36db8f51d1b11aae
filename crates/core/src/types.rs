//! Shared primitive types and typed entity identifiers.

use serde::{Deserialize, Deserializer, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A calendar day. Reports are unique per user per day.
pub type CalendarDay = chrono::NaiveDate;

/// Declare a string-backed identifier newtype.
///
/// Every entity gets its own type so a report id can never be passed where a
/// user id is expected, even though both are plain text at rest.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh, time-ordered identifier (UUID v7).
            pub fn generate() -> Self {
                Self(uuid::Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a [`User`](crate::user::User).
    UserId
);
define_id!(
    /// Identifier of a [`DailyReport`](crate::report::DailyReport).
    DailyReportId
);
define_id!(
    /// Identifier of a department.
    DepartmentId
);
define_id!(
    /// Identifier of a [`Project`](crate::project::Project).
    ProjectId
);
define_id!(
    /// Identifier of a report line item. Regenerated whenever a report's task list is replaced.
    TaskId
);
define_id!(
    /// Identifier of a [`Comment`](crate::comment::Comment).
    CommentId
);
define_id!(
    /// Identifier of a notification. Notifications are dispatched by the caller.
    NotificationId
);

/// Deserialize a nullable field of a partial update.
///
/// Pair with `#[serde(default)]`: an absent field stays `None`, an explicit
/// `null` becomes `Some(None)`, and a value becomes `Some(Some(v))`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
