//! Execution status table
//!
//! ZAPI identifies execution outcomes by numeric code. The codes are fixed
//! by the server and must not be renumbered.

use crate::error::ParseStatusError;
use std::fmt;
use std::str::FromStr;

/// Outcome of a test execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionStatus {
    Pass,
    Fail,
    Wip,
    Blocked,
    Unexecuted,
}

impl ExecutionStatus {
    /// Every status, in code order
    pub const ALL: [ExecutionStatus; 5] = [
        ExecutionStatus::Unexecuted,
        ExecutionStatus::Pass,
        ExecutionStatus::Fail,
        ExecutionStatus::Wip,
        ExecutionStatus::Blocked,
    ];

    /// Numeric code sent to `quickExecute`
    pub const fn code(self) -> i32 {
        match self {
            ExecutionStatus::Pass => 1,
            ExecutionStatus::Fail => 2,
            ExecutionStatus::Wip => 3,
            ExecutionStatus::Blocked => 4,
            ExecutionStatus::Unexecuted => -1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Upper-case name as used in ZAPI and in the CLI
    pub const fn name(self) -> &'static str {
        match self {
            ExecutionStatus::Pass => "PASS",
            ExecutionStatus::Fail => "FAIL",
            ExecutionStatus::Wip => "WIP",
            ExecutionStatus::Blocked => "BLOCKED",
            ExecutionStatus::Unexecuted => "UNEXECUTED",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExecutionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}
