use std::sync::Arc;
use std::thread;
use std::time::Duration;

use glam::UVec2;
use tap_monkey::prelude::*;
use tap_monkey_examples::{init_tracing, LoggingTarget};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // The screen size is read on every tick, so rotating the device is picked up live.
    let portrait = UVec2::new(1080, 1920);
    let landscape = UVec2::new(portrait.y, portrait.x);
    let screen = SharedScreen::new(portrait.x, portrait.y);
    let config = MonkeyConfig::new().with_interval_ms(50).with_seed(11);
    let monkey = Monkey::with_shared_screen(config, Arc::new(screen.clone()))?;

    let target = Arc::new(LoggingTarget::new("rotating"));
    monkey.get_target().set_target(&target);
    monkey.start()?;
    thread::sleep(Duration::from_millis(200));

    tracing::info!("Rotating to landscape.");
    screen.resize(landscape.x, landscape.y);
    thread::sleep(Duration::from_millis(200));

    // A zero-size screen makes ticks fail without stopping the run.
    tracing::info!("Collapsing the screen.");
    screen.resize(0, 0);
    thread::sleep(Duration::from_millis(120));
    screen.resize(portrait.x, portrait.y);
    thread::sleep(Duration::from_millis(120));

    monkey.stop();
    tracing::info!("Delivered {} taps.", target.taps());
    Ok(())
}
