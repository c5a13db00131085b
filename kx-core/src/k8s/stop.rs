use tokio::sync::watch;

// A cloneable one-shot stop signal; every clone observes the same signal, and calling `stop`
// after the first time is a no-op.
#[derive(Clone, Debug)]
pub struct StopSignal {
    tx: watch::Sender<bool>,
}

impl StopSignal {
    pub fn new() -> StopSignal {
        let (tx, _) = watch::channel(false);
        StopSignal { tx }
    }

    pub fn stop(&self) {
        self.tx.send_if_modified(|stopped| {
            if *stopped {
                return false;
            }
            *stopped = true;
            true
        });
    }

    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }

    pub async fn stopped(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in self, so this can't fail while we're borrowed
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        StopSignal::new()
    }
}
