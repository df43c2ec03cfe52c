//! Headless HUD demo writing PNG frames
//!
//! Run with: cargo run -p hudkit-overlay -- <output_dir> [--spinner|--pie|--ring|--bar|--text]
//!
//! Plays a scripted download: show with a grace period, report progress from
//! a command sender, then hide once the work is done. Every third frame of a
//! 30 fps timeline is written to `<output_dir>/frame_NNNN.png`.

use std::cell::Cell;
use std::env;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use hudkit_overlay::utils::formatting::format_amount;
use hudkit_overlay::utils::progress_text;
use hudkit_overlay::{
    default_style_path, load_style_or_default, show_hud_added_to, AnimationStyle,
    ApproximateMeasurer, Color, HeadlessContainer, Hud, HudError, ManualClock, Mode, Renderer,
    Size,
};
use tracing_subscriber::filter::EnvFilter;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 480;
const FRAME: Duration = Duration::from_nanos(1_000_000_000 / 30);
const MAX_FRAMES: u32 = 150;
const SAVE_EVERY: u32 = 3;
/// Seconds of simulated work
const WORK: f32 = 2.0;
const DOWNLOAD_BYTES: u64 = 4_200_000;

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(
            "hudkit_overlay=debug"
                .parse()
                .unwrap_or_else(|_| tracing::Level::INFO.into()),
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn mode_from_arg(arg: Option<&str>) -> Mode {
    match arg {
        Some("--pie") => Mode::Determinate,
        Some("--ring") => Mode::AnnularDeterminate,
        Some("--bar") => Mode::DeterminateBar,
        Some("--text") => Mode::TextOnly,
        _ => Mode::Indeterminate,
    }
}

fn run(out_dir: &Path, mode: Mode) -> Result<u32, HudError> {
    std::fs::create_dir_all(out_dir).map_err(|source| HudError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut style = default_style_path()
        .map(|path| load_style_or_default(&path))
        .unwrap_or_default();
    style.mode = mode;
    style.animation = AnimationStyle::ZoomIn;
    style.grace_time = 0.2;
    style.min_show_time = 1.0;

    let clock = Rc::new(ManualClock::new());
    let container = HeadlessContainer::new(Size::new(WIDTH as f32, HEIGHT as f32));

    let mut hud = Hud::new(style, clock.clone(), ApproximateMeasurer);
    hud.set_label("Downloading");
    hud.set_task_in_progress(true);
    let done = Rc::new(Cell::new(false));
    let done_flag = done.clone();
    hud.set_completion(move || done_flag.set(true));

    let sender = hud.sender();
    let shared = show_hud_added_to(&container, hud, true);

    let mut renderer = Renderer::new(WIDTH, HEIGHT)?;
    let background = Color::from_rgba8(46, 52, 64, 255);
    let mut saved = 0;
    let mut finished_work = false;

    for frame in 0..MAX_FRAMES {
        let elapsed = FRAME * frame;
        clock.set_elapsed(elapsed);

        let t = elapsed.as_secs_f32();
        if t < WORK {
            let progress = t / WORK;
            let received = (DOWNLOAD_BYTES as f32 * progress) as u64;
            sender.set_progress(progress);
            // Spinner and text modes have no progress shape, so show the percentage
            let details = if mode.is_determinate() {
                format_amount(received, DOWNLOAD_BYTES, false)
            } else {
                progress_text(progress)
            };
            sender.set_details(details);
        } else if !finished_work {
            finished_work = true;
            sender.set_progress(1.0);
            sender.set_task_in_progress(false);
            sender.set_label("Done");
            sender.hide(true);
        }

        shared.drain_commands();
        shared.poll();

        if frame % SAVE_EVERY == 0 {
            renderer.clear(background);
            renderer.draw_hud(&shared.borrow());
            renderer.save_png(&out_dir.join(format!("frame_{frame:04}.png")))?;
            saved += 1;
        }

        if done.get() {
            tracing::info!(frame, "hud hidden");
            break;
        }
    }

    Ok(saved)
}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let out_dir = PathBuf::from(args.get(1).map(String::as_str).unwrap_or("hud-frames"));
    let mode = mode_from_arg(args.get(2).map(String::as_str));

    match run(&out_dir, mode) {
        Ok(saved) => println!("Wrote {} frames to {}", saved, out_dir.display()),
        Err(e) => {
            tracing::error!(error = %e, "demo failed");
            std::process::exit(1);
        }
    }
}
