use std::future::Future;
use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    ActionRequest, CardError, CardEvent, DetailRequest, DeviceActionHandler, DeviceCard,
    HostConnection, IconRequest,
};

/// Runs the requests of a card as tokio tasks and reports their results as [`CardEvent`]s.
///
/// Shutting down (or dropping) the driver cancels every task still in flight,
/// so nothing is delivered for a card that is gone.
pub struct CardDriver<C> {
    conn: Arc<C>,
    events: mpsc::Sender<CardEvent>,
    cancel: CancellationToken,
}

impl<C> CardDriver<C>
where
    C: HostConnection + Send + Sync + 'static,
{
    pub fn new(conn: Arc<C>, channel_size: usize) -> (Self, mpsc::Receiver<CardEvent>) {
        let (events, receiver) = mpsc::channel(channel_size);
        (
            Self {
                conn,
                events,
                cancel: CancellationToken::new(),
            },
            receiver,
        )
    }

    pub fn spawn_icon(&self, request: IconRequest) -> JoinHandle<()> {
        let conn = Arc::clone(&self.conn);
        self.spawn("icon", async move {
            CardEvent::Icon(request.fetch(conn.as_ref()).await)
        })
    }

    pub fn spawn_details(&self, request: DetailRequest) -> JoinHandle<()> {
        let conn = Arc::clone(&self.conn);
        self.spawn("details", async move {
            CardEvent::Details(request.fetch(conn.as_ref()).await)
        })
    }

    pub fn spawn_action<H>(&self, handler: Arc<H>, request: ActionRequest) -> JoinHandle<()>
    where
        H: DeviceActionHandler + Send + Sync + 'static,
    {
        self.spawn("action", async move {
            CardEvent::Action(request.invoke(handler.as_ref()).await)
        })
    }

    /// Mount `card` and start its icon lookup if it needs one.
    pub fn mount(&self, card: &mut DeviceCard) -> Option<JoinHandle<()>> {
        card.mount().map(|request| self.spawn_icon(request))
    }

    pub fn open_details(&self, card: &mut DeviceCard) -> Option<JoinHandle<()>> {
        card.open_details().map(|request| self.spawn_details(request))
    }

    pub fn refresh(&self, card: &mut DeviceCard) -> JoinHandle<()> {
        self.spawn_details(card.refresh())
    }

    pub fn invoke_action<H>(
        &self,
        card: &DeviceCard,
        handler: Arc<H>,
        action_id: &str,
    ) -> Result<JoinHandle<()>, CardError>
    where
        H: DeviceActionHandler + Send + Sync + 'static,
    {
        let request = card.begin_action(action_id)?;
        Ok(self.spawn_action(handler, request))
    }

    /// Apply `event` to `card` and start the follow-up request it asks for.
    pub fn handle_event(
        &self,
        card: &mut DeviceCard,
        event: CardEvent,
    ) -> Result<Option<JoinHandle<()>>, CardError> {
        Ok(card
            .handle_event(event)?
            .map(|request| self.spawn_details(request)))
    }

    /// Cancel all running tasks. Tasks spawned afterwards are cancelled right away.
    ///
    /// Cards that had requests running here must be [unmounted](DeviceCard::unmount)
    /// before they are mounted on another driver.
    pub fn shutdown(&self) {
        log::debug!("shutting down card driver");
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn spawn<F>(&self, kind: &'static str, task: F) -> JoinHandle<()>
    where
        F: Future<Output = CardEvent> + Send + 'static,
    {
        let cancel = self.cancel.child_token();
        let events = self.events.clone();
        tokio::task::spawn(async move {
            let event = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    log::debug!("{} request cancelled", kind);
                    return;
                }
                event = task => event,
            };
            if let Err(err) = events.send(event).await {
                log::warn!("Error sending card event: {}", err)
            }
        })
    }
}

impl<C> Drop for CardDriver<C> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
