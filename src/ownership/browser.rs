//! Headless Chrome session driving the ownership page.
//!
//! The harvest loop talks to the page through the [`PageDriver`] trait so it
//! can be exercised with scripted snapshots in tests. [`ChromeDriver`] is the
//! real implementation; the Chrome process it owns is torn down by RAII on
//! every exit path.

use crate::ownership::ScrapeError;
use anyhow::Context;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Minimal surface the harvest loop needs from a rendered page.
pub trait PageDriver {
    /// Navigates to the ownership page.
    fn open(&mut self, url: &str) -> Result<(), ScrapeError>;

    /// Blocks until the element matching `css` exists, bounded by `timeout`.
    fn wait_for_container(&mut self, css: &str, timeout: Duration) -> Result<(), ScrapeError>;

    /// Sets the scroll offset of the virtualization viewport (the container's
    /// first element child).
    fn set_scroll(&mut self, css: &str, offset: i64) -> Result<(), ScrapeError>;

    /// Scrolls the viewport all the way down.
    fn scroll_to_bottom(&mut self, css: &str) -> Result<(), ScrapeError>;

    /// Waits out the render pipeline. The page exposes no completion signal,
    /// so readiness is inferred from elapsed time.
    fn settle(&mut self, pause: Duration);

    /// Returns the current DOM serialized to HTML.
    fn content(&mut self) -> Result<String, ScrapeError>;
}

/// Headless Chrome implementation of [`PageDriver`].
pub struct ChromeDriver {
    browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeDriver {
    /// Launches headless Chrome and opens a tab. The browser process lives
    /// exactly as long as this value.
    pub fn launch() -> Result<Self, ScrapeError> {
        info!("Launching headless Chrome browser");

        let options = LaunchOptions {
            headless: true,
            sandbox: false,
            window_size: Some((1920, 1080)),
            // Long harvests sit in settle sleeps between CDP calls
            idle_browser_timeout: Duration::from_secs(300),
            args: vec![
                OsStr::new("--disable-blink-features=AutomationControlled"),
                OsStr::new("--disable-dev-shm-usage"),
            ],
            ..Default::default()
        };

        let browser = Browser::new(options)
            .context("Failed to launch headless Chrome. Is Chrome/Chromium installed?")?;
        let tab = browser.new_tab().context("Failed to open a browser tab")?;

        Ok(Self { browser, tab })
    }

    /// Chrome process id, exposed so a caller can force-terminate an
    /// in-flight harvest from outside. The error path still releases the
    /// session normally.
    pub fn process_id(&self) -> Option<u32> {
        self.browser.get_process_id()
    }

    fn scroll_script(css: &str, value: &str) -> String {
        // The scrollable pane is the container's first child div, not the
        // container itself.
        format!(
            r#"(() => {{
                const container = document.querySelector("{css}");
                const pane = container && container.firstElementChild;
                if (!pane) {{ return -1; }}
                pane.scrollTop = {value};
                return pane.scrollTop;
            }})()"#
        )
    }
}

impl PageDriver for ChromeDriver {
    fn open(&mut self, url: &str) -> Result<(), ScrapeError> {
        info!("Opening {}", url);
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .with_context(|| format!("Failed to navigate to {url}"))?;
        Ok(())
    }

    fn wait_for_container(&mut self, css: &str, timeout: Duration) -> Result<(), ScrapeError> {
        self.tab
            .wait_for_element_with_custom_timeout(css, timeout)
            .with_context(|| format!("Timed out waiting for {css}"))?;
        Ok(())
    }

    fn set_scroll(&mut self, css: &str, offset: i64) -> Result<(), ScrapeError> {
        debug!("Scrolling viewport to {}px", offset);
        self.tab
            .evaluate(&Self::scroll_script(css, &offset.to_string()), false)
            .context("Failed to apply scroll offset")?;
        Ok(())
    }

    fn scroll_to_bottom(&mut self, css: &str) -> Result<(), ScrapeError> {
        debug!("Scrolling viewport to bottom");
        self.tab
            .evaluate(&Self::scroll_script(css, "pane.scrollHeight"), false)
            .context("Failed to scroll to bottom")?;
        Ok(())
    }

    fn settle(&mut self, pause: Duration) {
        std::thread::sleep(pause);
    }

    fn content(&mut self) -> Result<String, ScrapeError> {
        let html = self.tab.get_content().context("Failed to capture page content")?;
        Ok(html)
    }
}

/// Scripted in-process page for harvest-loop tests: a fixed backing list of
/// players rendered window-by-window as the scroll offset advances, the way
/// a virtualized list materializes rows.
#[cfg(test)]
pub(crate) mod testkit {
    use super::*;

    pub(crate) const ROW_PX: i64 = 100;

    /// Renders one complete ownership row.
    pub(crate) fn row_html(player: &str) -> String {
        format!(
            r#"<div data-testid="ownershipPlayerRow">
                <div data-testid="ownershipPlayer">{player}</div>
                <div data-testid="ownershipPlayerTeam"><img alt="NYY logo"></div>
                <div data-testid="ownershipPlayerDkPrice">$5,000</div>
                <div data-testid="ownershipPlayerDkOwnership">10.0%</div>
                <div data-testid="ownershipPlayerFdPrice">$7,000</div>
                <div data-testid="ownershipPlayerFdOwnership">12.0%</div>
            </div>"#
        )
    }

    pub(crate) struct MockPage {
        /// Backing list of player names.
        pub players: Vec<String>,
        /// Viewport height in px; rows render up to scroll + viewport.
        pub viewport_px: i64,
        /// Players at index >= gate.1 render only once scroll >= gate.0.
        pub gate: Option<(i64, usize)>,
        /// Extra players that render only after a bottom jump.
        pub bottom_extras: Vec<String>,
        /// Fabricate a brand-new player on every snapshot (never exhausts).
        pub endless: bool,
        /// Inject one permanently incomplete row into every snapshot.
        pub broken_row: bool,
        /// Simulate a page without the expected container hook.
        pub container_missing: bool,

        scroll: i64,
        at_bottom: bool,
        serial: usize,
    }

    impl MockPage {
        pub(crate) fn with_players(count: usize) -> Self {
            Self {
                players: (1..=count).map(|i| format!("Player {i}")).collect(),
                viewport_px: 600,
                gate: None,
                bottom_extras: Vec::new(),
                endless: false,
                broken_row: false,
                container_missing: false,
                scroll: 0,
                at_bottom: false,
                serial: 0,
            }
        }

        fn rendered(&mut self) -> Vec<String> {
            let mut names: Vec<String> = if self.at_bottom {
                let mut all = self.players.clone();
                all.extend(self.bottom_extras.iter().cloned());
                all
            } else {
                let end = ((self.scroll + self.viewport_px) / ROW_PX).max(0) as usize;
                let mut end = end.min(self.players.len());
                if let Some((threshold, locked_from)) = self.gate {
                    if self.scroll < threshold {
                        end = end.min(locked_from);
                    }
                }
                self.players[..end].to_vec()
            };

            if self.endless {
                self.serial += 1;
                names.push(format!("Latecomer {}", self.serial));
            }

            names
        }
    }

    impl PageDriver for MockPage {
        fn open(&mut self, _url: &str) -> Result<(), ScrapeError> {
            Ok(())
        }

        fn wait_for_container(
            &mut self,
            _css: &str,
            _timeout: Duration,
        ) -> Result<(), ScrapeError> {
            if self.container_missing {
                Err(ScrapeError::Browser(anyhow::anyhow!("wait expired")))
            } else {
                Ok(())
            }
        }

        fn set_scroll(&mut self, _css: &str, offset: i64) -> Result<(), ScrapeError> {
            self.scroll = offset;
            self.at_bottom = false;
            Ok(())
        }

        fn scroll_to_bottom(&mut self, _css: &str) -> Result<(), ScrapeError> {
            self.at_bottom = true;
            Ok(())
        }

        fn settle(&mut self, _pause: Duration) {}

        fn content(&mut self) -> Result<String, ScrapeError> {
            let rows: String = self.rendered().iter().map(|name| row_html(name)).collect();
            let broken = if self.broken_row {
                r#"<div data-testid="ownershipPlayerRow"></div>"#
            } else {
                ""
            };
            Ok(format!(
                r#"<html><body><div data-testid="ownershipTablemlb"><div>{rows}{broken}</div></div></body></html>"#
            ))
        }
    }
}
