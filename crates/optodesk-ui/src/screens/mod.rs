//! Page controllers.
//!
//! Each controller owns the state of one page, talks to the document store
//! and reports outcomes through a [`Toaster`]. Store failures are wrapped
//! with a user-facing `anyhow` context; the toast shows that context and
//! the full chain goes to the log.

mod bill;
mod data;
mod health;
mod patient;

pub use bill::{BillForm, BillManager, BillSection, CellRef};
pub use data::{DataEditor, DataForm};
pub use health::{HealthDataForm, HealthDataManager};
pub use patient::{PatientEdit, PatientForm, PatientManager};

use thiserror::Error;

use crate::toast::Toaster;

/// Validation failures; the message is what the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill all required fields")]
    MissingRequired(Vec<&'static str>),

    #[error("Please fill all fields")]
    Incomplete(Vec<&'static str>),

    #[error("Please select a patient")]
    NoPatientSelected,
}

/// Toast the outcome of a page action.
pub(crate) fn finish<T>(
    toaster: &mut Toaster,
    result: anyhow::Result<T>,
    success: Option<&str>,
) -> Option<T> {
    match result {
        Ok(value) => {
            if let Some(message) = success {
                toaster.success(message);
            }
            Some(value)
        }
        Err(err) => {
            tracing::warn!(event = "ui.screen.action_failed", error = %format!("{:#}", err));
            toaster.error(err.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_finish_reports_outer_context() {
        let mut toaster = Toaster::default();
        let result: anyhow::Result<()> =
            Err(anyhow::anyhow!("disk I/O error")).context("Failed to add patient. Try again.");

        assert_eq!(finish(&mut toaster, result, Some("ok")), None);
        assert_eq!(
            toaster.latest().unwrap().message,
            "Failed to add patient. Try again."
        );
    }

    #[test]
    fn test_finish_form_error_message() {
        let mut toaster = Toaster::default();
        let result: anyhow::Result<()> = Err(FormError::NoPatientSelected.into());
        finish(&mut toaster, result, None);
        assert_eq!(toaster.latest().unwrap().message, "Please select a patient");
    }
}
