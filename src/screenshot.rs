use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use std::path::PathBuf;

/// Per-run screenshot artifacts, one file per channel, overwritten on
/// retake and removed wholesale at end of run.
pub struct ScreenshotStore {
    dir: PathBuf,
    site: String,
}

impl ScreenshotStore {
    pub fn new(dir: impl Into<PathBuf>, site: &str) -> Self {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).ok();
        Self {
            dir,
            site: site.to_string(),
        }
    }

    pub fn path_for(&self, method: &str, channel: &str) -> PathBuf {
        self.dir.join(format!(
            "{}_{}_{}_Payment_Page.png",
            self.site, method, channel
        ))
    }

    /// Capture the current page for a channel. Failures are logged, never
    /// raised; a missing screenshot must not change the classification.
    pub async fn capture(&self, page: &Page, method: &str, channel: &str) {
        let path = self.path_for(method, channel);
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        match page.screenshot(params).await {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(&path, &bytes) {
                    tracing::warn!("⚠️ Screenshot write failed ({:?}): {}", path, e);
                } else {
                    tracing::info!("📸 Screenshot saved: {:?} ({} bytes)", path, bytes.len());
                }
            }
            Err(e) => {
                tracing::warn!("⚠️ Screenshot capture failed: {}", e);
            }
        }
    }

    /// Delete every artifact this run produced, regardless of outcome.
    pub fn clear(&self) {
        let prefix = format!("{}_", self.site);
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("⚠️ Screenshot dir unreadable: {}", e);
                return;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(&prefix) && name.ends_with(".png") {
                if let Err(e) = std::fs::remove_file(entry.path()) {
                    tracing::warn!("⚠️ Could not remove {}: {}", name, e);
                }
            }
        }
    }
}
