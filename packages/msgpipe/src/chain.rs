//! Ordered step execution

use crate::error::Result;
use crate::payload::Payload;
use crate::steps::Step;
use msgpipe_common::logging::log_rejected_message;
use std::fmt;

/// Which way a chain moves messages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Message to wire
    Transmit,
    /// Wire to message
    Receive,
}

impl Direction {
    /// Lowercase label for logs
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transmit => "transmit",
            Self::Receive => "receive",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Steps applied in order, stopping at the first failure
#[derive(Debug)]
pub struct Chain {
    direction: Direction,
    steps: Vec<Box<dyn Step>>,
}

impl Chain {
    /// Chain running `steps` in the given order
    #[must_use]
    pub fn new(direction: Direction, steps: Vec<Box<dyn Step>>) -> Self {
        Self { direction, steps }
    }

    /// Direction of this chain
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Step names in execution order
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the chain passes payloads through unchanged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run the payload through every step
    ///
    /// # Errors
    ///
    /// The error of the first step that fails; later steps are not run.
    pub fn process(&self, payload: Payload) -> Result<Payload> {
        tracing::trace!(
            direction = self.direction.as_str(),
            steps = self.steps.len(),
            input = payload.variant_name(),
            "processing message"
        );
        self.steps.iter().try_fold(payload, |payload, step| {
            step.apply(payload).inspect_err(|err| {
                log_rejected_message(self.direction.as_str(), step.name(), err);
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PipelineError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Append(u8, Arc<AtomicUsize>);

    impl Step for Append {
        fn name(&self) -> &'static str {
            "append"
        }

        fn apply(&self, payload: Payload) -> Result<Payload> {
            self.1.fetch_add(1, Ordering::SeqCst);
            let mut bytes = payload.into_bytes(self.name())?;
            bytes.push(self.0);
            Ok(Payload::Bytes(bytes))
        }
    }

    #[derive(Debug)]
    struct Fail;

    impl Step for Fail {
        fn name(&self) -> &'static str {
            "fail"
        }

        fn apply(&self, payload: Payload) -> Result<Payload> {
            Err(PipelineError::UnexpectedPayload {
                step: self.name(),
                expected: "nothing",
                found: payload.variant_name(),
            })
        }
    }

    #[test]
    fn runs_steps_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = Chain::new(
            Direction::Transmit,
            vec![
                Box::new(Append(1, Arc::clone(&calls))),
                Box::new(Append(2, Arc::clone(&calls))),
            ],
        );
        let out = chain.process(Payload::Bytes(vec![0])).expect("process");
        assert_eq!(out, Payload::Bytes(vec![0, 1, 2]));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn stops_at_first_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = Chain::new(
            Direction::Receive,
            vec![
                Box::new(Append(1, Arc::clone(&calls))),
                Box::new(Fail),
                Box::new(Append(2, Arc::clone(&calls))),
            ],
        );
        assert!(chain.process(Payload::Bytes(vec![])).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(chain.step_names(), ["append", "fail", "append"]);
    }

    #[test]
    fn empty_chain_is_identity() {
        let chain = Chain::new(Direction::Transmit, Vec::new());
        assert!(chain.is_empty());
        let value = Payload::Value(serde_json::json!({"a": [1, 2]}));
        assert_eq!(chain.process(value.clone()).expect("identity"), value);
    }
}
