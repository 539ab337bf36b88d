//! Linux desktop session detection.

use crate::command::CommandRunner;

/// Desktop session families with a dedicated wallpaper command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopEnvironment {
    /// GNOME and shells built on its settings schema (Unity, Budgie).
    Gnome,
    /// LXDE, wallpaper owned by pcmanfm.
    Lxde,
    Other,
}

const GNOME_MARKERS: [&str; 3] = ["GNOME", "UNITY", "BUDGIE"];
const LXDE_MARKERS: [&str; 1] = ["LXDE"];

/// Classifies the value of `XDG_CURRENT_DESKTOP`, e.g. `ubuntu:GNOME`.
pub fn classify(desktop: &str) -> DesktopEnvironment {
    let desktop = desktop.to_uppercase();

    if GNOME_MARKERS.iter().any(|marker| desktop.contains(marker)) {
        DesktopEnvironment::Gnome
    } else if LXDE_MARKERS.iter().any(|marker| desktop.contains(marker)) {
        DesktopEnvironment::Lxde
    } else {
        DesktopEnvironment::Other
    }
}

/// Asks the login shell which desktop is running.
///
/// Never fails: a broken query classifies as [`DesktopEnvironment::Other`].
pub async fn probe<R: CommandRunner>(runner: &R) -> DesktopEnvironment {
    let args = ["-c".to_string(), "echo $XDG_CURRENT_DESKTOP".to_string()];

    match runner.run("sh", &args).await {
        Ok(output) => classify(&output),
        Err(e) => {
            log::warn!("Get desktop environment: {}", e);
            DesktopEnvironment::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRunner;

    #[test]
    fn classifies_gnome_sessions() {
        assert_eq!(classify("GNOME"), DesktopEnvironment::Gnome);
        assert_eq!(classify("ubuntu:GNOME"), DesktopEnvironment::Gnome);
        assert_eq!(classify("Unity"), DesktopEnvironment::Gnome);
        assert_eq!(classify("Budgie:GNOME"), DesktopEnvironment::Gnome);
    }

    #[test]
    fn classifies_lxde_sessions() {
        assert_eq!(classify("LXDE"), DesktopEnvironment::Lxde);
        assert_eq!(classify("Lubuntu:LXDE"), DesktopEnvironment::Lxde);
    }

    #[test]
    fn everything_else_is_other() {
        assert_eq!(classify("KDE"), DesktopEnvironment::Other);
        assert_eq!(classify("LXQt"), DesktopEnvironment::Other);
        assert_eq!(classify(""), DesktopEnvironment::Other);
    }

    #[tokio::test]
    async fn probe_reads_the_session_variable() {
        let runner = FakeRunner::with_desktop("ubuntu:GNOME");

        assert_eq!(probe(&runner).await, DesktopEnvironment::Gnome);
        assert_eq!(runner.calls(), vec!["sh -c echo $XDG_CURRENT_DESKTOP"]);
    }

    #[tokio::test]
    async fn failed_probe_is_other() {
        let runner = FakeRunner::without_shell();

        assert_eq!(probe(&runner).await, DesktopEnvironment::Other);
    }
}
