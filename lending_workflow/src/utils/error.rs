use thiserror::Error;

/// Failures that abort a workflow run
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No account could be resolved or the network is not configured
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A write call failed to submit, reverted or was not confirmed in time
    #[error("transaction `{step}` failed: {reason}")]
    Transaction { step: String, reason: String },

    /// A read call failed or returned an unusable value
    #[error("contract call `{call}` failed: {reason}")]
    ContractCall { call: String, reason: String },

    /// A decimal value has no fixed-point representation
    #[error("conversion error: {0}")]
    Conversion(String),
}

impl WorkflowError {
    pub fn transaction(step: &str, reason: impl ToString) -> Self {
        Self::Transaction {
            step: step.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn contract_call(call: &str, reason: impl ToString) -> Self {
        Self::ContractCall {
            call: call.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
