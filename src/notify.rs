use crate::Result;
use crate::utils::send_notification;
use std::path::Path;

const NOTIFICATION_TITLE: &str = "Dynamic Wallpaper";

type Sender = fn(&str, &str) -> Result<()>;

/// Receives wallpaper change events from the dispatcher.
pub trait WallpaperEvents {
    fn wallpaper_changed(&self, path: &Path);
}

/// Logs every change and optionally raises a desktop notification.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    notifications: bool,
    send: Sender,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ChangeNotifier {
    pub fn new(notifications: bool) -> Self {
        Self {
            notifications,
            send: send_notification,
        }
    }

    pub fn notifications(&self) -> bool {
        self.notifications
    }

    #[cfg(test)]
    fn with_sender(notifications: bool, send: Sender) -> Self {
        Self {
            notifications,
            send,
        }
    }
}

impl WallpaperEvents for ChangeNotifier {
    fn wallpaper_changed(&self, path: &Path) {
        log::info!("Wallpaper changed to: {}", path.display());

        if self.notifications {
            if let Err(e) = (self.send)(NOTIFICATION_TITLE, "Wallpaper changed") {
                log::error!("Cannot show notification: {}", e);
            }
        }
    }
}
