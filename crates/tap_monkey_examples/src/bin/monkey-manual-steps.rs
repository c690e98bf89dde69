use std::sync::Arc;

use tap_monkey::prelude::*;
use tap_monkey_examples::{init_tracing, LoggingTarget};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Step the monkey by hand; the same seed always yields the same taps.
    let config = MonkeyConfig::new().with_seed(7).with_driver(Driver::Manual);
    let monkey = Monkey::try_new(config, FixedScreen::new(800, 600))?;
    monkey.exclude_region(&Rect::new(0, 0, 400, 600))?;

    let target = Arc::new(LoggingTarget::new("left-excluded"));
    monkey.get_target().set_target(&target);
    monkey.start()?;

    let first: Vec<_> = (0..5).map(|_| monkey.step()).collect();

    // Reseeding restarts the sequence.
    monkey.set_sequence(7);
    let second: Vec<_> = (0..5).map(|_| monkey.step()).collect();
    anyhow::ensure!(first == second, "reseeded run diverged");

    // With the target gone, ticks are skipped rather than sampled.
    drop(target);
    let idle = monkey.step();
    tracing::info!("After the target was dropped: {:?}", idle);

    monkey.stop();
    Ok(())
}
