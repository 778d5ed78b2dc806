//! Raise, recover and rewrite bot exceptions
//!
//! The combinators work on any error type that can carry a [`BotException`].
//! Errors outside the taxonomy pass through untouched. Synchronous
//! computations use [`ExceptionResultExt`]; suspending ones use the functions
//! in [`future`].

use super::model::BotException;

/// An error type that can hold a bot exception
pub trait ExceptionCarrier: Sized {
    fn from_exception(exception: BotException) -> Self;

    /// Yield the bot exception, or give the error back if it is something else
    fn into_exception(self) -> Result<BotException, Self>;
}

impl ExceptionCarrier for BotException {
    fn from_exception(exception: BotException) -> Self {
        exception
    }

    fn into_exception(self) -> Result<BotException, Self> {
        Ok(self)
    }
}

/// A computation that always fails with `exception`
pub fn raise<T, E: ExceptionCarrier>(exception: BotException) -> Result<T, E> {
    Err(E::from_exception(exception))
}

/// Recovery combinators for synchronous results
pub trait ExceptionResultExt<T, E: ExceptionCarrier>: Sized {
    /// Run `recover` on a bot exception. Success and foreign errors pass through.
    fn attempt_recover<F>(self, recover: F) -> Result<T, E>
    where
        F: FnOnce(BotException) -> Result<T, E>;

    fn map_exception<F>(self, transform: F) -> Result<T, E>
    where
        F: FnOnce(BotException) -> BotException,
    {
        self.attempt_recover(|e| raise(transform(e)))
    }

    fn replace_exception(self, exception: BotException) -> Result<T, E> {
        self.attempt_recover(|_| raise(exception))
    }
}

impl<T, E: ExceptionCarrier> ExceptionResultExt<T, E> for Result<T, E> {
    fn attempt_recover<F>(self, recover: F) -> Result<T, E>
    where
        F: FnOnce(BotException) -> Result<T, E>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => match err.into_exception() {
                Ok(exception) => recover(exception),
                Err(foreign) => Err(foreign),
            },
        }
    }
}

/// The same combinators for computations that suspend
pub mod future {
    use std::future::Future;

    use super::{raise, BotException, ExceptionCarrier};

    pub async fn attempt_recover<T, E, M, F, R>(m: M, recover: F) -> Result<T, E>
    where
        E: ExceptionCarrier,
        M: Future<Output = Result<T, E>>,
        F: FnOnce(BotException) -> R,
        R: Future<Output = Result<T, E>>,
    {
        match m.await {
            Ok(value) => Ok(value),
            Err(err) => match err.into_exception() {
                Ok(exception) => recover(exception).await,
                Err(foreign) => Err(foreign),
            },
        }
    }

    pub async fn map_exception<T, E, M, F>(m: M, transform: F) -> Result<T, E>
    where
        E: ExceptionCarrier,
        M: Future<Output = Result<T, E>>,
        F: FnOnce(BotException) -> BotException,
    {
        attempt_recover(m, |e| async move { raise(transform(e)) }).await
    }

    pub async fn replace_exception<T, E, M>(m: M, exception: BotException) -> Result<T, E>
    where
        E: ExceptionCarrier,
        M: Future<Output = Result<T, E>>,
    {
        attempt_recover(m, |_| async move { raise(exception) }).await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::application::errors::{HandlerError, TransportError};

    #[test]
    fn test_attempt_recover_runs_once() {
        let calls = Cell::new(0);
        let result: Result<&str, BotException> =
            raise(BotException::parse("bad arg")).attempt_recover(|e| {
                calls.set(calls.get() + 1);
                assert_eq!(e, BotException::parse("bad arg"));
                Ok("default")
            });
        assert_eq!(result, Ok("default"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_attempt_recover_passes_success() {
        let calls = Cell::new(0);
        let result: Result<u32, BotException> = Ok(7).attempt_recover(|_| {
            calls.set(calls.get() + 1);
            Ok(0)
        });
        assert_eq!(result, Ok(7));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_failure_inside_recover_is_not_caught() {
        let calls = Cell::new(0);
        let result: Result<(), BotException> = raise(BotException::parse("first"))
            .attempt_recover(|_| {
                calls.set(calls.get() + 1);
                raise(BotException::parse("second"))
            });
        assert_eq!(result, Err(BotException::parse("second")));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_map_exception_wraps() {
        let result: Result<(), BotException> = raise(BotException::random_source("rng down"))
            .map_exception(|e| BotException::generic("Wrapped", e.format_operator()));
        match result {
            Err(BotException::Generic { name, message }) => {
                assert_eq!(name, "Wrapped");
                assert!(message.contains("RandomSourceFailure: rng down"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_replace_exception() {
        let replacement = BotException::generic("Unavailable", "try later");
        let failed: Result<u8, BotException> =
            raise(BotException::index_out_of_range(9, 1, 3)).replace_exception(replacement.clone());
        assert_eq!(failed, Err(replacement.clone()));

        let passed: Result<u8, BotException> = Ok(3).replace_exception(replacement);
        assert_eq!(passed, Ok(3));
    }

    #[test]
    fn test_foreign_errors_are_not_caught() {
        let result: Result<(), HandlerError> =
            Err(HandlerError::Transport(TransportError::Closed)).attempt_recover(|_| Ok(()));
        assert!(matches!(
            result,
            Err(HandlerError::Transport(TransportError::Closed))
        ));
    }

    #[test]
    fn test_carrier_recovers_bot_variant() {
        let result: Result<u8, HandlerError> =
            raise(BotException::parse("nope")).attempt_recover(|_| Ok(1));
        assert_eq!(result.ok(), Some(1));
    }

    #[tokio::test]
    async fn test_future_attempt_recover() {
        let calls = AtomicUsize::new(0);
        let result: Result<&str, BotException> = future::attempt_recover(
            async { raise(BotException::parse("bad arg")) },
            |_| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("default")
            },
        )
        .await;
        assert_eq!(result, Ok("default"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_future_foreign_errors_are_not_caught() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), HandlerError> = future::attempt_recover(
            async { Err(HandlerError::Transport(TransportError::Closed)) },
            |_| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(HandlerError::Transport(TransportError::Closed))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let replaced: Result<(), HandlerError> = future::replace_exception(
            async { Err(HandlerError::Transport(TransportError::Closed)) },
            BotException::parse("unused"),
        )
        .await;
        assert!(matches!(
            replaced,
            Err(HandlerError::Transport(TransportError::Closed))
        ));
    }

    #[tokio::test]
    async fn test_future_map_and_replace() {
        let mapped: Result<(), BotException> = future::map_exception(
            async {
                tokio::task::yield_now().await;
                raise(BotException::random_source("rng down"))
            },
            |e| BotException::generic("Wrapped", e.format_operator()),
        )
        .await;
        assert!(mapped
            .unwrap_err()
            .resolve()
            .message
            .contains("RandomSourceFailure: rng down"));

        let replaced: Result<u8, BotException> =
            future::replace_exception(async { Ok(4) }, BotException::parse("unused")).await;
        assert_eq!(replaced, Ok(4));
    }
}
