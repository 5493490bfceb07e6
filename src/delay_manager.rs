use std::time::Duration;
use std::thread;
use log::info;

/// Blocking pause used when the site rate limits us.
pub trait Delay {
    fn wait(&self, secs: u64, reason: &str);
}

impl<T: Delay + ?Sized> Delay for &T {
    fn wait(&self, secs: u64, reason: &str) {
        (**self).wait(secs, reason)
    }
}

/// Sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn wait(&self, secs: u64, reason: &str) {
        info!("Waiting for {} seconds ({})...", secs, reason);
        thread::sleep(Duration::from_secs(secs));
    }
}
