use std::process;

use anyhow::{anyhow, Result};
use clap::error::ErrorKind;
use clap::Parser;
use eframe::NativeOptions;
use url::Url;

use egui_play::playlist::uri_from_input;
use egui_play::{PlayApp, Playlist, APP_NAME};

#[derive(Parser)]
#[command(name = APP_NAME, version, about = "Plays local files or URIs with GStreamer")]
struct Args {
    /// Files to play
    #[arg(value_name = "FILE|URI")]
    inputs: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => {
            eprintln!("Error initializing: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = gstreamer::init() {
        eprintln!("Error initializing: {err}");
        process::exit(1);
    }

    let uris = if args.inputs.is_empty() {
        let Some(paths) = rfd::FileDialog::new()
            .set_title("Select files to play")
            .pick_files()
        else {
            // A cancelled selection is a normal quit.
            return Ok(());
        };
        let mut uris = Vec::with_capacity(paths.len());
        for path in paths {
            let uri = Url::from_file_path(&path)
                .map_err(|_| anyhow!("cannot express {} as a URI", path.display()))?;
            uris.push(String::from(uri));
        }
        uris
    } else {
        let mut uris = Vec::with_capacity(args.inputs.len());
        for input in &args.inputs {
            uris.push(uri_from_input(input)?);
        }
        uris
    };

    let playlist = Playlist::new(uris)?;
    log::info!(
        "playing {} item(s), starting with {}",
        playlist.len(),
        playlist.current()
    );

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(PlayApp::new(cc, playlist)?))),
    )
    .map_err(|err| anyhow!("window system error: {err}"))
}
