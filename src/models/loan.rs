//! Loan (borrow) model and related types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// One active borrow as seen from one side of the ledger.
///
/// In the by-user index `counterpart` is a book title; in the by-title index it is a user name.
/// `date` is the borrow date exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanEntry {
    pub counterpart: String,
    pub date: String,
}

impl LoanEntry {
    pub fn new(counterpart: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            counterpart: counterpart.into(),
            date: date.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanAction {
    Borrow,
    Return,
}

impl LoanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanAction::Borrow => "borrow",
            LoanAction::Return => "return",
        }
    }
}

impl fmt::Display for LoanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "borrow" => Ok(LoanAction::Borrow),
            "return" => Ok(LoanAction::Return),
            other => Err(AppError::Validation(format!("unknown loan action '{}'", other))),
        }
    }
}

/// Entry of the chronological borrow/return log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub user: String,
    pub title: String,
    pub date: String,
    pub action: LoanAction,
}

impl HistoryRecord {
    pub fn new(
        user: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
        action: LoanAction,
    ) -> Self {
        Self {
            user: user.into(),
            title: title.into(),
            date: date.into(),
            action,
        }
    }

    /// Whether this record survives a trip through the record file. A comma or line break in
    /// any field would shift columns or split the row on replay.
    pub fn fits_record_row(&self) -> bool {
        [&self.user, &self.title, &self.date]
            .iter()
            .all(|field| !field.contains([',', '\n', '\r']))
    }
}

/// Renders as the record file row `user,title,date,action`. Fields are written unquoted;
/// see [`HistoryRecord::fits_record_row`].
impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.user, self.title, self.date, self.action)
    }
}
