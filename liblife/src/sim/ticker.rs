use std::{
    sync::mpsc::{self, Sender},
    thread,
    time::Duration,
};

/// Runs a callback on a fixed period from a background thread. The loop ends
/// when `stop` is called or when the callback itself returns false.
pub struct TickerHost {
    stop_sender: Sender<()>,
}

impl TickerHost {
    pub fn start(interval: Duration, mut tick: Box<dyn FnMut() -> bool + Send>) -> Self {
        let (stop_sender, stop_receiver) = mpsc::channel();

        thread::spawn(move || {
            while stop_receiver.try_recv().is_err() {
                if !tick() {
                    break;
                }

                thread::sleep(interval);
            }
        });

        Self { stop_sender }
    }

    pub fn stop(self) {
        // The thread may have already ended on its own.
        let _ = self.stop_sender.send(());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    #[test]
    fn ticks_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let tick_count = count.clone();

        let host = TickerHost::start(
            Duration::from_millis(5),
            Box::new(move || {
                tick_count.fetch_add(1, Ordering::SeqCst);
                true
            }),
        );

        thread::sleep(Duration::from_millis(50));
        host.stop();

        assert!(count.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn callback_can_end_the_loop() {
        let count = Arc::new(AtomicUsize::new(0));
        let tick_count = count.clone();

        let _host = TickerHost::start(
            Duration::from_millis(1),
            Box::new(move || {
                tick_count.fetch_add(1, Ordering::SeqCst);
                false
            }),
        );

        thread::sleep(Duration::from_millis(50));

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
