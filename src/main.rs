use anyhow::Context;
use chrono::{Local, NaiveTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use dynamic_wallpaper::{
    Scheduler, Session, WallpaperConfig,
    clock::{SystemClock, clock_label, day_fraction, slot_fraction},
    desktop::system_dispatcher,
    files::{is_readable, scan_directory},
    selector::select_file,
    session::CycleOutcome,
};

#[derive(Parser)]
#[command(name = "dynamic-wallpaper")]
#[command(
    version,
    about = "Time-shifting desktop. Walks the wallpaper through a chronological list of images as the day goes by."
)]
pub struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Keep the wallpaper in sync with the time of day")]
    Run {
        #[arg(
            short,
            long,
            help = "Seconds between checks (defaults to the config value, 600)"
        )]
        interval: Option<u64>,
    },
    #[command(about = "Set the wallpaper for the current time once")]
    Apply {
        #[arg(long, value_parser = parse_time, help = "Use this time of day instead of now (HH:MM)")]
        at: Option<NaiveTime>,
    },
    #[command(about = "Show the wallpaper for a point of the day without applying it")]
    Preview {
        #[arg(help = "Position in the day from 0 to 100 (defaults to now)")]
        percent: Option<f64>,
    },
    #[command(about = "List the wallpapers and the time each one is shown at")]
    List,
    #[command(about = "Append image files to the end of the list")]
    Add {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    #[command(about = "Append every image in a folder, sorted by name")]
    AddFolder { folder: PathBuf },
    #[command(about = "Remove wallpapers by the numbers `list` shows")]
    Remove {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    #[command(about = "Replace the whole list")]
    Set {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    #[command(about = "Remove every wallpaper from the list")]
    Clear,
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| format!("{}: expected HH:MM", e))
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("dynamic_wallpaper={}", level)),
    )
    .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = WallpaperConfig::load_or_default()?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(execute(args.command, config))
}

async fn execute(command: Commands, mut config: WallpaperConfig) -> anyhow::Result<()> {
    match command {
        Commands::Run { interval } => {
            let period = interval
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or_else(|| config.interval());
            run(config, period).await
        }
        Commands::Apply { at } => {
            let clock = at.unwrap_or_else(|| Local::now().time());
            let mut session =
                Session::new(config.wallpapers.clone(), system_dispatcher(&config), clock);

            match session.run_cycle().await {
                CycleOutcome::Idle => {
                    println!("No wallpapers configured. Add some with `dynamic-wallpaper add`.")
                }
                CycleOutcome::Applied(file) => println!("Wallpaper set to {}", file.display()),
                CycleOutcome::Unchanged(file) => {
                    println!("{} is already the wallpaper", file.display())
                }
                CycleOutcome::Failed(file) => {
                    anyhow::bail!("Could not set wallpaper {}", file.display())
                }
            }
            Ok(())
        }
        Commands::Preview { percent } => {
            let fraction = percent
                .map(|percent| percent / 100.0)
                .unwrap_or_else(|| day_fraction(Local::now().time()));

            match select_file(fraction, &config.wallpapers) {
                Some(file) => println!("{}  {}", clock_label(fraction), file.display()),
                None => println!("No wallpapers configured"),
            }
            Ok(())
        }
        Commands::List => {
            let count = config.wallpapers.len();
            if count == 0 {
                println!("No wallpapers configured");
            }
            for (index, file) in config.wallpapers.iter().enumerate() {
                println!(
                    "{:>3}  {:>5}  {}",
                    index + 1,
                    clock_label(slot_fraction(index, count)),
                    file.display()
                );
            }
            Ok(())
        }
        Commands::Add { files } => {
            let added = accepted_files(&config, files).await?;
            println!("Added {} wallpapers", added.len());
            config.wallpapers.extend(added);
            config.save()?;
            Ok(())
        }
        Commands::AddFolder { folder } => {
            let added = scan_directory(&folder, &config.scan_options())
                .await
                .with_context(|| format!("Cannot read folder {}", folder.display()))?;
            println!("Added {} wallpapers from {}", added.len(), folder.display());
            config.wallpapers.extend(added);
            config.save()?;
            Ok(())
        }
        Commands::Remove { positions } => {
            let removed = config.remove_wallpapers(&positions)?;
            for file in &removed {
                println!("Removed {}", file.display());
            }
            config.save()?;
            Ok(())
        }
        Commands::Set { files } => {
            config.wallpapers = accepted_files(&config, files).await?;
            println!("Wallpaper list now has {} entries", config.wallpapers.len());
            config.save()?;
            Ok(())
        }
        Commands::Clear => {
            config.wallpapers.clear();
            config.save()?;
            println!("Wallpaper list cleared");
            Ok(())
        }
    }
}

/// Absolute paths of the readable images among `files`, in the given order.
async fn accepted_files(
    config: &WallpaperConfig,
    files: Vec<PathBuf>,
) -> anyhow::Result<Vec<PathBuf>> {
    let options = config.scan_options();
    let mut accepted = Vec::with_capacity(files.len());

    for file in files {
        let file = std::path::absolute(&file)
            .with_context(|| format!("Cannot resolve {}", file.display()))?;

        if !options.matches(&file) {
            log::warn!(
                "Skipping {}: extension is not one of {}",
                file.display(),
                options.extensions.join(", ")
            );
            continue;
        }
        if !is_readable(&file).await? {
            log::warn!("Skipping {}: file is not readable", file.display());
            continue;
        }
        accepted.push(file);
    }

    Ok(accepted)
}

async fn run(config: WallpaperConfig, period: Duration) -> anyhow::Result<()> {
    log::info!(
        "Starting with {} wallpapers from {}",
        config.wallpapers.len(),
        WallpaperConfig::config_path()?.display()
    );

    let session = Session::new(
        config.wallpapers.clone(),
        system_dispatcher(&config),
        SystemClock,
    );
    let (scheduler, handle) = Scheduler::new(session, period);
    let mut reload = ReloadSignal::new()?;
    handle.start()?;

    let control = async {
        loop {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        log::error!("Cannot listen for Ctrl-C: {}", e);
                    }
                    break;
                }
                _ = reload.recv() => match WallpaperConfig::load_or_default() {
                    Ok(config) => {
                        log::info!("Reloaded {} wallpapers", config.wallpapers.len());
                        if handle.set_list(config.wallpapers).is_err() {
                            break;
                        }
                    }
                    Err(e) => log::error!("Cannot reload config: {}", e),
                },
            }
        }
        handle.shutdown();
    };

    tokio::join!(scheduler.run(), control);
    Ok(())
}

/// SIGHUP asks a running daemon to reread its wallpaper list.
#[cfg(unix)]
struct ReloadSignal(tokio::signal::unix::Signal);

#[cfg(unix)]
impl ReloadSignal {
    fn new() -> std::io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};
        Ok(Self(signal(SignalKind::hangup())?))
    }

    async fn recv(&mut self) {
        if self.0.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
struct ReloadSignal;

#[cfg(not(unix))]
impl ReloadSignal {
    fn new() -> std::io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) {
        std::future::pending::<()>().await
    }
}
