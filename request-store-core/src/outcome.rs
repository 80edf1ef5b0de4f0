//! Result of a gateway request

use crate::error::ErrorInfo;

/// Outcome of a request: the value, or the error that was already reported
///
/// The gateway always resolves to an outcome, so callers branch on it
/// instead of propagating errors. By the time a `Failure` reaches the
/// caller, the error has already been logged and surfaced to the user.
#[must_use = "a request outcome carries the result of the request"]
#[derive(Clone, Debug, PartialEq)]
pub enum RequestOutcome<R> {
    Success(R),
    Failure(ErrorInfo),
}

impl<R> RequestOutcome<R> {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, RequestOutcome::Failure(_))
    }

    /// Borrow the success value, if any
    pub fn value(&self) -> Option<&R> {
        match self {
            RequestOutcome::Success(value) => Some(value),
            RequestOutcome::Failure(_) => None,
        }
    }

    /// Borrow the error, if any
    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            RequestOutcome::Success(_) => None,
            RequestOutcome::Failure(error) => Some(error),
        }
    }

    /// Take the success value, discarding the error
    pub fn ok(self) -> Option<R> {
        match self {
            RequestOutcome::Success(value) => Some(value),
            RequestOutcome::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<R, ErrorInfo> {
        self.into()
    }

    pub fn map<T, F: FnOnce(R) -> T>(self, f: F) -> RequestOutcome<T> {
        match self {
            RequestOutcome::Success(value) => RequestOutcome::Success(f(value)),
            RequestOutcome::Failure(error) => RequestOutcome::Failure(error),
        }
    }

    /// Call `f` with the success value, passing the outcome through
    pub fn inspect<F: FnOnce(&R)>(self, f: F) -> Self {
        if let RequestOutcome::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Call `f` with the error, passing the outcome through
    pub fn inspect_err<F: FnOnce(&ErrorInfo)>(self, f: F) -> Self {
        if let RequestOutcome::Failure(error) = &self {
            f(error);
        }
        self
    }
}

impl<R> From<RequestOutcome<R>> for Result<R, ErrorInfo> {
    fn from(outcome: RequestOutcome<R>) -> Self {
        match outcome {
            RequestOutcome::Success(value) => Ok(value),
            RequestOutcome::Failure(error) => Err(error),
        }
    }
}

impl<R> From<Result<R, ErrorInfo>> for RequestOutcome<R> {
    fn from(result: Result<R, ErrorInfo>) -> Self {
        match result {
            Ok(value) => RequestOutcome::Success(value),
            Err(error) => RequestOutcome::Failure(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenericError;
    use std::cell::Cell;

    #[test]
    fn test_accessors() {
        let ok: RequestOutcome<i32> = RequestOutcome::Success(7);
        assert!(ok.is_success());
        assert_eq!(ok.value(), Some(&7));
        assert!(ok.error().is_none());

        let err: RequestOutcome<i32> = RequestOutcome::Failure(GenericError::new("boom").into());
        assert!(err.is_failure());
        assert_eq!(err.error().map(ToString::to_string).as_deref(), Some("Error: boom"));
        assert_eq!(err.ok(), None);
    }

    #[test]
    fn test_map_and_result() {
        let doubled = RequestOutcome::Success(21).map(|v| v * 2);
        assert_eq!(doubled.into_result().unwrap(), 42);
    }

    #[test]
    fn test_inspect_only_runs_on_matching_variant() {
        let seen = Cell::new(0);
        let _ = RequestOutcome::Success(5)
            .inspect(|v| seen.set(*v))
            .inspect_err(|_| seen.set(-1));
        assert_eq!(seen.get(), 5);

        let _ = RequestOutcome::<i32>::Failure("nope".into())
            .inspect(|_| seen.set(100))
            .inspect_err(|_| seen.set(-1));
        assert_eq!(seen.get(), -1);
    }
}
