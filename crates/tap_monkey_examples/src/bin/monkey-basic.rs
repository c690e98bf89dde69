use std::sync::Arc;
use std::thread;
use std::time::Duration;

use glam::{IVec2, UVec2};
use tap_monkey::prelude::*;
use tap_monkey_examples::{init_tracing, logging_sink, LoggingTarget};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Phone-sized screen with the status and navigation bars excluded.
    let screen = UVec2::new(1080, 1920);
    let status_bar = UVec2::new(screen.x, 80);
    let nav_bar = UVec2::new(screen.x, 120);

    let config = MonkeyConfig::new().with_interval_ms(100).with_seed(2025);
    let monkey = Monkey::try_new(config, FixedScreen::new(screen.x, screen.y))?;
    monkey
        .exclude(Rect::from_origin_size(IVec2::ZERO, status_bar))?
        .exclude(Rect::from_origin_size(
            IVec2::new(0, (screen.y - nav_bar.y) as i32),
            nav_bar,
        ))?
        .set_event_sink(logging_sink());

    let window = Arc::new(LoggingTarget::new("window"));
    monkey.get_target().set_target(&window);

    monkey.start()?;
    thread::sleep(Duration::from_millis(550));

    monkey.pause();
    thread::sleep(Duration::from_millis(300));
    monkey.resume()?;
    thread::sleep(Duration::from_millis(350));

    monkey.stop();
    tracing::info!("Delivered {} taps.", window.taps());
    Ok(())
}
