// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    pub mod interval {
        use std::time::Duration;

        /// Fixed-period ticker. The first tick completes immediately, like
        /// tokio's interval.
        pub struct Interval {
            period: Duration,
            first: bool,
        }

        impl Interval {
            pub fn new(period: Duration) -> Self {
                Self {
                    period,
                    first: true,
                }
            }

            pub async fn tick(&mut self) {
                if std::mem::take(&mut self.first) {
                    return;
                }
                gloo_timers::future::sleep(self.period).await;
            }
        }
    }

    /// Runs a future on the browser event loop.
    pub fn spawn_local<F: std::future::Future<Output = ()> + 'static>(future: F) {
        wasm_bindgen_futures::spawn_local(future);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    pub mod interval {
        use tokio::time::{self, Duration, MissedTickBehavior};
        pub struct Interval {
            inner: tokio::time::Interval,
        }
        impl Interval {
            pub fn new(duration: Duration) -> Self {
                let mut interval = time::interval(duration);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                Self { inner: interval }
            }
            pub async fn tick(&mut self) {
                self.inner.tick().await;
            }
        }
    }
}
