//! # Request Lifecycle
//!
//! Every call to the backend runs through a [`RequestLifecycle`]:
//!
//! ```text
//! Idle ──begin──▶ Pending ──fulfill──▶ Fulfilled(payload)
//!                        └──reject───▶ Rejected(errors)
//! ```
//!
//! `Fulfilled` and `Rejected` are terminal. A new user action always starts a
//! fresh lifecycle; a settled one is never reused.
//!
//! The lifecycle is the gate in front of the record store:
//! - `Pending` is purely observational (a UI shows a spinner) and mutates nothing.
//! - Only a `Fulfilled` payload may be handed to a store mutation.
//! - `Rejected` never touches the store. Its error list is forwarded to a
//!   [`Notifier`] and that is the end of it.

use crate::commands::CmdMessage;
use crate::error::{Result, RolodexError};
use crate::store::backend::{BackendResult, Rejection};
use std::fmt;
use tracing::{debug, warn};

/// Which backend call a lifecycle is tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

/// Payload-free view of a [`RequestState`], used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Pending => "pending",
            Phase::Fulfilled => "fulfilled",
            Phase::Rejected => "rejected",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState<T> {
    Idle,
    Pending,
    Fulfilled(T),
    Rejected(Vec<String>),
}

impl<T> RequestState<T> {
    pub fn phase(&self) -> Phase {
        match self {
            RequestState::Idle => Phase::Idle,
            RequestState::Pending => Phase::Pending,
            RequestState::Fulfilled(_) => Phase::Fulfilled,
            RequestState::Rejected(_) => Phase::Rejected,
        }
    }
}

/// Sink for user-facing notices (a toast system, a terminal, a test buffer).
pub trait Notifier {
    fn notify(&mut self, message: CmdMessage);
}

impl Notifier for Vec<CmdMessage> {
    fn notify(&mut self, message: CmdMessage) {
        self.push(message);
    }
}

#[derive(Debug)]
pub struct RequestLifecycle<T> {
    operation: Operation,
    state: RequestState<T>,
}

impl<T> RequestLifecycle<T> {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            state: RequestState::Idle,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, RequestState::Pending)
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self.state,
            RequestState::Fulfilled(_) | RequestState::Rejected(_)
        )
    }

    /// Idle -> Pending.
    pub fn begin(&mut self) -> Result<()> {
        self.expect_phase(Phase::Idle, Phase::Pending)?;
        debug!(target: "rolodex::request", operation = %self.operation, "request pending");
        self.state = RequestState::Pending;
        Ok(())
    }

    /// Pending -> Fulfilled.
    pub fn fulfill(&mut self, payload: T) -> Result<()> {
        self.expect_phase(Phase::Pending, Phase::Fulfilled)?;
        debug!(target: "rolodex::request", operation = %self.operation, "request fulfilled");
        self.state = RequestState::Fulfilled(payload);
        Ok(())
    }

    /// Pending -> Rejected. An empty error list is replaced by a generic one so
    /// the user always sees something.
    pub fn reject(&mut self, errors: Vec<String>) -> Result<()> {
        self.expect_phase(Phase::Pending, Phase::Rejected)?;
        let errors = if errors.is_empty() {
            vec![format!("The {} request failed", self.operation)]
        } else {
            errors
        };
        warn!(
            target: "rolodex::request",
            operation = %self.operation,
            errors = ?errors,
            "request rejected"
        );
        self.state = RequestState::Rejected(errors);
        Ok(())
    }

    /// Settles a pending request from a backend response.
    pub fn resolve(&mut self, response: BackendResult<T>) -> Result<()> {
        match response {
            Ok(payload) => self.fulfill(payload),
            Err(Rejection { errors }) => self.reject(errors),
        }
    }

    /// The confirmed payload, if the request was fulfilled.
    pub fn confirmed(&self) -> Option<&T> {
        match &self.state {
            RequestState::Fulfilled(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn errors(&self) -> &[String] {
        match &self.state {
            RequestState::Rejected(errors) => errors,
            _ => &[],
        }
    }

    /// Consumes a settled lifecycle.
    ///
    /// A fulfilled request yields its payload for the store mutation. A rejected
    /// one forwards every error to `sink` and yields `None`. Calling this on an
    /// unsettled request is an error.
    pub fn settle<N: Notifier + ?Sized>(self, sink: &mut N) -> Result<Option<T>> {
        match self.state {
            RequestState::Fulfilled(payload) => Ok(Some(payload)),
            RequestState::Rejected(errors) => {
                for error in errors {
                    sink.notify(CmdMessage::error(error));
                }
                Ok(None)
            }
            other => Err(RolodexError::InvalidTransition {
                from: other.phase(),
                to: Phase::Fulfilled,
            }),
        }
    }

    fn expect_phase(&self, expected: Phase, to: Phase) -> Result<()> {
        let from = self.phase();
        if from != expected {
            return Err(RolodexError::InvalidTransition { from, to });
        }
        Ok(())
    }
}

/// Runs one backend call through a fresh lifecycle and returns it settled.
pub fn dispatch<T, F>(operation: Operation, call: F) -> Result<RequestLifecycle<T>>
where
    F: FnOnce() -> BackendResult<T>,
{
    let mut lifecycle = RequestLifecycle::new(operation);
    lifecycle.begin()?;
    lifecycle.resolve(call())?;
    Ok(lifecycle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    #[test]
    fn starts_idle() {
        let lifecycle: RequestLifecycle<u32> = RequestLifecycle::new(Operation::Load);
        assert_eq!(lifecycle.phase(), Phase::Idle);
        assert!(!lifecycle.is_pending());
        assert!(!lifecycle.is_settled());
        assert!(lifecycle.confirmed().is_none());
    }

    #[test]
    fn happy_path_reaches_fulfilled() {
        let mut lifecycle = RequestLifecycle::new(Operation::Create);
        lifecycle.begin().unwrap();
        assert!(lifecycle.is_pending());
        lifecycle.fulfill(7).unwrap();
        assert_eq!(lifecycle.confirmed(), Some(&7));
        assert!(lifecycle.is_settled());
    }

    #[test]
    fn cannot_fulfill_without_begin() {
        let mut lifecycle = RequestLifecycle::new(Operation::Update);
        match lifecycle.fulfill(1) {
            Err(RolodexError::InvalidTransition { from, to }) => {
                assert_eq!(from, Phase::Idle);
                assert_eq!(to, Phase::Fulfilled);
            }
            other => panic!("Expected InvalidTransition, got {:?}", other),
        }
    }

    #[test]
    fn terminal_states_are_final() {
        let mut lifecycle = RequestLifecycle::new(Operation::Delete);
        lifecycle.begin().unwrap();
        lifecycle.reject(vec!["nope".into()]).unwrap();

        assert!(lifecycle.fulfill(()).is_err());
        assert!(lifecycle.begin().is_err());
        assert!(lifecycle.reject(vec![]).is_err());
        assert_eq!(lifecycle.errors(), ["nope".to_string()]);
    }

    #[test]
    fn empty_rejection_gets_generic_message() {
        let mut lifecycle: RequestLifecycle<()> = RequestLifecycle::new(Operation::Load);
        lifecycle.begin().unwrap();
        lifecycle.reject(Vec::new()).unwrap();
        assert_eq!(lifecycle.errors(), ["The load request failed".to_string()]);
    }

    #[test]
    fn settle_forwards_rejection_errors_to_sink() {
        let lifecycle: RequestLifecycle<u32> = dispatch(Operation::Create, || {
            Err(Rejection::new(vec![
                "first_name can't be blank".into(),
                "email is invalid".into(),
            ]))
        })
        .unwrap();

        let mut sink: Vec<CmdMessage> = Vec::new();
        let payload = lifecycle.settle(&mut sink).unwrap();

        assert!(payload.is_none());
        assert_eq!(sink.len(), 2);
        assert!(sink.iter().all(|m| matches!(m.level, MessageLevel::Error)));
        assert_eq!(sink[0].content, "first_name can't be blank");
    }

    #[test]
    fn settle_yields_confirmed_payload_silently() {
        let lifecycle = dispatch(Operation::Load, || Ok(vec![1, 2, 3])).unwrap();
        let mut sink: Vec<CmdMessage> = Vec::new();
        assert_eq!(lifecycle.settle(&mut sink).unwrap(), Some(vec![1, 2, 3]));
        assert!(sink.is_empty());
    }

    #[test]
    fn settle_rejects_unsettled_lifecycle() {
        let mut lifecycle: RequestLifecycle<u32> = RequestLifecycle::new(Operation::Load);
        lifecycle.begin().unwrap();
        let mut sink: Vec<CmdMessage> = Vec::new();
        assert!(lifecycle.settle(&mut sink).is_err());
    }
}
