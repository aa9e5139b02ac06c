use crate::domain::ports::Progress;

/// Reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _label: &str, _total: usize) {}
    fn advance(&self) {}
    fn finish(&self) {}
}

#[cfg(feature = "cli")]
pub use bar::BarProgress;

#[cfg(feature = "cli")]
mod bar {
    use super::Progress;
    use indicatif::{ProgressBar, ProgressStyle};
    use std::sync::Mutex;

    pub const ENV_NO_PROGRESS: &str = "SHOPCTL_NO_PROGRESS";

    /// 終端機進度條，每個產品類型一條
    ///
    /// Disabled when `SHOPCTL_NO_PROGRESS` is set.
    #[derive(Default)]
    pub struct BarProgress {
        bar: Mutex<Option<ProgressBar>>,
    }

    impl BarProgress {
        pub fn new() -> Self {
            Self::default()
        }

        fn is_disabled() -> bool {
            std::env::var(ENV_NO_PROGRESS).is_ok()
        }
    }

    impl Progress for BarProgress {
        fn start(&self, label: &str, total: usize) {
            println!("{}", label);
            if Self::is_disabled() {
                return;
            }

            let bar = ProgressBar::new(total as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {elapsed_precise}")
            {
                bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏ "));
            }
            if let Ok(mut slot) = self.bar.lock() {
                *slot = Some(bar);
            }
        }

        fn advance(&self) {
            if let Ok(slot) = self.bar.lock() {
                if let Some(bar) = slot.as_ref() {
                    bar.inc(1);
                }
            }
        }

        fn finish(&self) {
            if let Ok(mut slot) = self.bar.lock() {
                if let Some(bar) = slot.take() {
                    bar.finish();
                }
            }
        }
    }

}
