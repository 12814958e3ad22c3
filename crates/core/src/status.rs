//! Status enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table, and its name matches
//! the `name` column of that table.

use serde::{Serialize, Serializer};

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Resolve a database status ID, `None` for unknown ids.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Seeded `name` of the status row.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

define_status_enum! {
    /// Course publication status. Only active courses are listed and enrollable.
    CourseStatus {
        Draft = 1 => "draft",
        Active = 2 => "active",
        Inactive = 3 => "inactive",
    }
}

define_status_enum! {
    /// Per-(user, syllabus) progress.
    ProgressStatus {
        InProgress = 1 => "in_progress",
        Completed = 2 => "completed",
    }
}

define_status_enum! {
    /// Assignment submission lifecycle.
    SubmissionStatus {
        Submitted = 1 => "submitted",
        Graded = 2 => "graded",
    }
}

define_status_enum! {
    /// Wallet top-up status.
    TopupStatus {
        Pending = 1 => "pending",
        Completed = 2 => "completed",
    }
}
