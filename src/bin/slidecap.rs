use std::{fs::File, io::BufReader, path::Path, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use slidecap::{
    BrowserSession, CaptureConfig, CaptureOrchestrator, CaptureSession, DeckPage, FfmpegRecorder,
};

#[derive(Parser, Debug)]
#[command(name = "slidecap", version)]
struct Cli {
    /// Presentation URL to capture.
    #[arg(long)]
    url: Option<String>,

    /// Output root; each run creates its own timestamped directory inside.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Recording length per animated slide, in seconds.
    #[arg(long)]
    seconds: Option<u64>,

    /// Recording frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Run the browser headless.
    #[arg(long)]
    headless: bool,

    /// JSON config file; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn read_config_json(path: &Path) -> anyhow::Result<CaptureConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let cfg: CaptureConfig = serde_json::from_reader(r).with_context(|| "parse config JSON")?;
    Ok(cfg)
}

fn resolve_config(cli: &Cli) -> anyhow::Result<CaptureConfig> {
    let mut cfg = match &cli.config {
        Some(path) => read_config_json(path)?,
        None => CaptureConfig::default(),
    };

    if let Some(url) = &cli.url {
        cfg.url = url.clone();
    }
    if let Some(out) = &cli.out {
        cfg.output_root = out.clone();
    }
    if let Some(seconds) = cli.seconds {
        cfg.video_length_secs = seconds;
    }
    if let Some(fps) = cli.fps {
        cfg.recorder.fps = fps;
    }
    if cli.headless {
        cfg.headless = true;
    }

    cfg.validate()?;
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;

    let session = CaptureSession::create(&cfg.output_root, chrono::Local::now())?;
    let session_root = session.root().to_path_buf();

    let browser =
        BrowserSession::launch(cfg.headless, cfg.recorder.width, cfg.recorder.height).await?;
    let page: Arc<dyn DeckPage> = Arc::new(browser.open(&cfg.url).await?);

    let recorder = FfmpegRecorder::new(Arc::clone(&page), cfg.recorder.clone())?;
    let orchestrator =
        CaptureOrchestrator::new(page, Box::new(recorder), session, cfg.video_length());

    // Close the browser even when the traversal aborts.
    let result = orchestrator.run().await;
    browser.close().await?;
    let stats = result?;

    eprintln!(
        "captured {} slides ({} recordings) into {}",
        stats.slides,
        stats.recordings,
        session_root.display()
    );
    Ok(())
}
