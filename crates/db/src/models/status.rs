//! Status and priority enums mapping to PostgreSQL enum types.
//!
//! Variant names are the stored labels and the JSON representation, so
//! `IdeaStatus::ConvertedToProject` is `'ConvertedToProject'` in the
//! `idea_status` type and `"ConvertedToProject"` on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ideatrack_core::error::CoreError;
use ideatrack_core::task_status::normalize_task_status;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident => $pg_type:tt, $label:tt {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
        #[sqlx(type_name = $pg_type)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration (and database sort) order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The stored label.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( stringify!($variant) => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'",
                        $label
                    ))),
                }
            }
        }
    };
}

define_status_enum! {
    /// Idea lifecycle status. Transitions are client-driven; any status may
    /// follow any other.
    #[derive(Default)]
    IdeaStatus => "idea_status", "idea status" {
        #[default]
        Draft,
        Prioritized,
        Archived,
        ConvertedToProject,
        Implemented,
    }
}

define_status_enum! {
    /// Idea priority.
    IdeaPriority => "idea_priority", "idea priority" {
        Low,
        Medium,
        High,
    }
}

define_status_enum! {
    /// Project lifecycle status.
    #[derive(Default)]
    ProjectStatus => "project_status", "project status" {
        #[default]
        Planning,
        InProgress,
        OnHold,
        Completed,
        Cancelled,
    }
}

define_status_enum! {
    /// Task status. Client input goes through [`TaskStatus::from_input`],
    /// which also accepts display labels such as `"To Do"`.
    #[derive(Default)]
    TaskStatus => "task_status", "task status" {
        #[default]
        Todo,
        InProgress,
        Done,
        Blocked,
    }
}

impl TaskStatus {
    /// Normalize a client-supplied status (canonical name or display label).
    pub fn from_input(input: &str) -> Result<Self, CoreError> {
        normalize_task_status(input)?.parse()
    }
}
