//! Demo binary: animates a couple of in-memory nodes and prints each
//! simulated frame, standing in for a host's display-refresh loop.

use anyhow::Result;

use glide::{AnimationRequest, Animator, GlideConfig, MemoryStyleSurface};

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let config = GlideConfig::load();
    let mut animator = Animator::from_config(&config.animation);

    let mut surface = MemoryStyleSurface::new();
    surface.set_style("hero", "left", "0px");
    surface.set_style("hero", "background-color", "rgb(255, 0, 0)");
    surface.set_style("panel", "opacity", "0");

    animator.animate(
        &mut surface,
        "hero",
        AnimationRequest::new([("left", "240px"), ("background-color", "oklch(0.7 0.1 200)")])
            .on_complete(|| println!("hero settled")),
        0.0,
    );
    animator.animate(
        &mut surface,
        "panel",
        AnimationRequest::new([("opacity", "1")]).duration_ms(200.0),
        0.0,
    );

    // Simulated 60fps frame loop.
    let mut now_ms = 0.0;
    loop {
        now_ms += 1000.0 / 60.0;
        let more = animator.tick(&mut surface, now_ms);

        println!(
            "{now_ms:7.1}ms  hero.left={:>6}  hero.bg={:<22}  panel.opacity={}",
            surface.style("hero", "left").unwrap_or("-"),
            surface.style("hero", "background-color").unwrap_or("-"),
            surface.style("panel", "opacity").unwrap_or("-"),
        );

        if !more {
            break;
        }
    }

    Ok(())
}
