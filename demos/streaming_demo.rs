//! Streaming Demo: a simulated LLM response revealed with a fade-in.
//!
//! A feed thread delivers the sample text in small chunks; the animator
//! reveals one character every few milliseconds and the fade view plays
//! each character's entry transition.
//!
//! Keys: `r` restart (clear), `p` stop (keep text), `q`/Esc quit.
//!
//! Set `FADESTREAM_LOG` to a file path to capture tracing output.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use fadestream::{
    AnimatorConfig, AnimatorError, Cell, ChunkFeed, Document, Element, FadeView, Grid, Modifiers, Rect, Rgb,
    StreamingAnimator, SurfaceHandle, TerminalSession,
};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sample text to stream (simulating an LLM response).
const SAMPLE_TEXT: &str = r"Here is how a streamed answer can feel calmer to read.

Each character waits in a queue until its turn comes. Chunks may arrive
in bursts of any size, yet the reveal keeps a steady rhythm: one
character, a short pause, the next character.

Every revealed character fades in from the background over a fraction
of a second, so new text appears softly instead of popping in.

Markup-looking text such as <b>bold</b> & friends stays literal.
";

const HEADER_BG: Rgb = Rgb::new(40, 80, 120);
const FOOTER_BG: Rgb = Rgb::new(30, 30, 30);
const TEXT_FG: Rgb = Rgb::new(210, 210, 210);
const ACCENT: Rgb = Rgb::new(120, 200, 255);

fn init_tracing() {
    let Ok(log_path) = std::env::var("FADESTREAM_LOG") else {
        // stdout is the terminal; never log there.
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let Ok(file) = std::fs::File::create(&log_path) else {
        eprintln!("Warning: Failed to create log file: {log_path}");
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

fn draw_text(grid: &mut Grid, x: u16, y: u16, text: &str, fg: Rgb, bg: Rgb) {
    let mut col = x;
    for ch in text.chars() {
        let cell = Cell::new(ch).with_fg(fg).with_bg(bg);
        if col >= grid.width() || !grid.set(col, y, cell) {
            break;
        }
        col += u16::from(cell.display_width().max(1));
    }
}

fn draw_chrome(grid: &mut Grid, status: &str) {
    let width = grid.width();
    let footer_y = grid.height().saturating_sub(1);
    grid.fill(Rect::new(0, 0, width, 1), Cell::EMPTY.with_bg(HEADER_BG));
    draw_text(grid, 2, 0, "Fadestream Demo", Rgb::WHITE, HEADER_BG);
    grid.fill(Rect::new(0, footer_y, width, 1), Cell::EMPTY.with_bg(FOOTER_BG));
    draw_text(grid, 2, footer_y, status, Rgb::new(150, 150, 150), FOOTER_BG);
}

fn content_area(width: u16, height: u16) -> Rect {
    Rect::new(1, 2, width.saturating_sub(2), height.saturating_sub(4))
}

fn new_animator(document: &Document) -> Result<StreamingAnimator, AnimatorError> {
    let config = AnimatorConfig::new("response")
        .with_delay_ms(18)
        .with_animation_duration(Duration::from_millis(450))
        .with_unit_factory(|ch| {
            // Digits and markup characters stand out.
            if ch.is_ascii_digit() || "<>&".contains(ch) {
                Element::span()
                    .with_color(ACCENT)
                    .with_modifiers(Modifiers::BOLD)
            } else {
                Element::span()
            }
        });

    StreamingAnimator::new(document, config)
}

fn main() -> std::io::Result<()> {
    init_tracing();

    let mut document = Document::new();
    let surface = SurfaceHandle::new();
    document.insert_surface("response", surface.clone());
    let mut animator = new_animator(&document).map_err(std::io::Error::other)?;
    let mut feed = ChunkFeed::spawn(SAMPLE_TEXT, Duration::from_millis(40), 6)?;

    let (width, height) = TerminalSession::size()?;
    let mut session = TerminalSession::enter()?;
    let mut grid = Grid::new(width, height);
    let mut view = FadeView::new(content_area(width, height)).with_colors(TEXT_FG, Rgb::BLACK);

    let frame = Duration::from_millis(16);
    let mut chunks_seen = 0usize;
    let mut running = true;

    while running {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => running = false,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        running = false;
                    }
                    KeyCode::Char('r') => {
                        feed.join();
                        animator.reset(true);
                        chunks_seen = 0;
                        feed = ChunkFeed::spawn(SAMPLE_TEXT, Duration::from_millis(40), 6)?;
                    }
                    KeyCode::Char('p') => {
                        feed.shutdown();
                        feed.drain();
                        animator.reset(false);
                    }
                    _ => {}
                },
                Event::Resize(w, h) => {
                    grid.resize(w, h);
                    view.set_area(content_area(w, h));
                }
                _ => {}
            }
        }

        for chunk in feed.drain() {
            chunks_seen += 1;
            if animator.add_chunk(&chunk).is_err() {
                break;
            }
        }
        animator.poll();

        let status = format!(
            "q quit | r restart | p stop | chunks: {chunks_seen} | shown: {} | queued: {}",
            surface.len(),
            animator.pending(),
        );
        draw_chrome(&mut grid, &status);
        view.render(&surface, document.registry(), Instant::now(), &mut grid);
        session.present(&grid)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }

    feed.join();
    animator.destroy(true);
    Ok(())
}
