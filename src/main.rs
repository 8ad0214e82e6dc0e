// What you SEE:
// • A scratch card. Hold Left Mouse and drag to scratch the foil off.
// • Once enough foil is gone the cover fades out, the label switches to the
//   post text, and {"result":"won"} is printed on stdout.
// • R covers the card again with the same config. ESC quits.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use scratch_reveal::draw::{
    Drawer, PRIZE_BACKGROUND, TEXT_COLOR, blit, compose_card, draw_text_5x7, render_prize,
};
use scratch_reveal::{
    BoundingBox, CardConfig, DEFAULT_BRUSH_RADIUS, Error, FrameBuffer, PointerEvent, ScratchCard,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Height of the label strip under the card.
const STRIP_HEIGHT: usize = 16;
/// How long the cover takes to fade once the card is won.
const FADE: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "scratch-reveal")]
#[command(about = "Scratch-to-reveal prize card")]
#[command(version)]
struct Cli {
    /// Card config as JSON, e.g. '{"clear_percentage": 60, "bg": "prize.png"}'
    #[arg(short, long)]
    config: Option<String>,

    /// Read the card config from a JSON file
    #[arg(long, conflicts_with = "config")]
    config_file: Option<PathBuf>,

    /// Card width in pixels
    #[arg(long, default_value_t = 250)]
    width: usize,

    /// Card height in pixels
    #[arg(long, default_value_t = 250)]
    height: usize,

    /// Scratch brush radius in pixels
    #[arg(long, default_value_t = DEFAULT_BRUSH_RADIUS)]
    brush_radius: f32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "scratch_reveal={}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let raw_config = match (cli.config, cli.config_file) {
        (Some(json), _) => Some(json),
        (None, Some(path)) => Some(std::fs::read_to_string(path)?),
        (None, None) => None,
    };

    /* --- Card setup ---
       Visual: the card starts fully covered with the default config; a bad
       config is logged and the defaults stay. */
    let bounds = BoundingBox::new(0.0, 0.0, cli.width as f32, cli.height as f32);
    let mut card = ScratchCard::new(bounds).with_brush_radius(cli.brush_radius);
    card.configure(CardConfig::default());
    if let Some(raw) = raw_config {
        if card.apply_config(&raw).is_err() {
            warn!("keeping default card config");
        }
    }

    let (w, h) = match card.surface() {
        Some(s) => (s.width(), s.height()),
        None => (cli.width, cli.height),
    };
    let mut drawer = Drawer::new(card.label(), w, h + STRIP_HEIGHT)?;
    let mut title = card.label().to_string();

    /* --- Reusable buffers ---
       Visual: `screen` is what you see; `card_fb` is the card area only. */
    let mut screen = FrameBuffer::filled(w, h + STRIP_HEIGHT, PRIZE_BACKGROUND);
    let mut card_fb = FrameBuffer::filled(w, h, 0);
    let mut prize = render_prize(card.prize(), w, h);

    let mut was_down = false;
    let mut revealed_at: Option<Instant> = None;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Inputs */
        if drawer.r_pressed_once() {
            card.restart();
            prize = render_prize(card.prize(), w, h);
            revealed_at = None;
        }

        // minifb has no events; turn button state into down / move / up.
        let down = drawer.left_mouse_down();
        match (was_down, down, drawer.mouse_pos()) {
            (false, true, Some((mx, my))) => card.pointer_down(&PointerEvent::mouse(mx, my)),
            (true, true, Some((mx, my))) => card.pointer_move(&PointerEvent::mouse(mx, my)),
            (true, false, _) => card.pointer_up(),
            _ => {}
        }
        was_down = down;

        /* 2) Completion: tell the host once, start the fade. */
        for done in card.drain_completions() {
            match serde_json::to_string(&done) {
                Ok(json) => println!("{json}"),
                Err(e) => warn!(error = %e, "could not serialize completion"),
            }
            revealed_at = Some(now);
        }

        /* 3) Compose prize + cover.
           Visual: foil where the mask is opaque; it fades out after the win. */
        let fade = match revealed_at {
            None => 1.0,
            Some(t) => 1.0 - (now.duration_since(t).as_secs_f32() / FADE.as_secs_f32()),
        };
        match (card.surface(), card.cover()) {
            (Some(surface), Some(cover)) if fade > 0.0 => {
                compose_card(&mut card_fb, &prize, cover, surface.mask(), fade)?;
            }
            _ => card_fb.pixels.copy_from_slice(&prize.pixels),
        }
        blit(&mut screen, &card_fb, 0, 0);

        /* 4) Label strip: current label + how much is scratched. */
        let strip_start = w * h;
        screen.pixels[strip_start..].fill(PRIZE_BACKGROUND);
        let pct = card.surface().map_or(0.0, |s| s.coverage());
        let hud = format!("{} | {:.1}%", card.label(), pct);
        draw_text_5x7(&mut screen, 4, (h + 4) as i32, &hud, TEXT_COLOR);

        if card.label() != title {
            title = card.label().to_string();
            drawer.set_title(&title);
            info!(label = %title, "label changed");
        }

        /* 5) Present to the window. */
        drawer.present(&screen)?;
    }

    Ok(())
}
