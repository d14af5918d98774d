use futures::channel::oneshot;
use tracing::error;

use crate::backend::ResponseReceiver;

#[derive(Debug)]
pub struct AwaitingType<T>(pub ResponseReceiver<T>);

impl<T> From<ResponseReceiver<T>> for AwaitingType<T> {
    fn from(value: ResponseReceiver<T>) -> Self {
        Self(value)
    }
}

#[derive(Debug, Default)]
pub enum DataState<T> {
    #[default]
    None,
    AwaitingResponse(AwaitingType<T>),
    Present(T),
    Failed(String),
}

impl<T> DataState<T> {
    /// Replaces whatever was there with a pending request. Any request that
    /// was already pending is dropped and its result will be ignored.
    pub fn start<F>(&mut self, fetch_fn: F)
    where
        F: FnOnce() -> AwaitingType<T>,
    {
        *self = DataState::AwaitingResponse(fetch_fn());
    }

    /// Checks if a pending request has completed
    ///
    /// Returns `None` if nothing changed, otherwise whether the data arrived
    /// or the error message if it did not
    pub fn poll(&mut self) -> Option<Result<(), String>> {
        let DataState::AwaitingResponse(rx) = self else {
            return None;
        };
        let new_state = Self::await_data(rx)?;
        let outcome = match &new_state {
            DataState::Failed(e) => Err(e.clone()),
            _ => Ok(()),
        };
        *self = new_state;
        Some(outcome)
    }

    fn await_data(rx: &mut AwaitingType<T>) -> Option<Self> {
        Some(match rx.0.try_recv() {
            Ok(recv_opt) => match recv_opt {
                Some(outcome_result) => match outcome_result {
                    Ok(data) => DataState::Present(data),
                    Err(e) => {
                        let err_msg = format!("error: {e}");
                        error!(err_msg, "Error response received instead of the data");
                        DataState::Failed(err_msg)
                    }
                },
                None => return None,
            },
            Err(oneshot::Canceled) => {
                let err_msg = "Error receiving on channel. Sender dropped".to_string();
                error!(err_msg, "Error receiving on channel");
                DataState::Failed(err_msg)
            }
        })
    }

    pub fn present(&self) -> Option<&T> {
        match self {
            DataState::Present(data) => Some(data),
            _ => None,
        }
    }

    pub fn failed(&self) -> Option<&str> {
        match self {
            DataState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if the data state is [`Present`].
    ///
    /// [`Present`]: DataState::Present
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(..))
    }

    /// Returns `true` if the data state is [`None`].
    ///
    /// [`None`]: DataState::None
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` if the data state is [`AwaitingResponse`].
    ///
    /// [`AwaitingResponse`]: DataState::AwaitingResponse
    #[must_use]
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingResponse(..))
    }
}
