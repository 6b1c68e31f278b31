use anyhow::Result;

use sidescroll_core::sim::{self, Frame, SimulatedViewport, Timeline};
use sidescroll_core::{AppConfig, Direction, ScrollerEngine, Track};

pub struct TraceOptions {
    pub direction: Direction,
    pub count: u32,
    pub json: bool,
    pub realtime: bool,
}

pub async fn run(config: &AppConfig, options: TraceOptions) -> Result<()> {
    let track = Track::uniform(
        config.items.iter().cloned(),
        config.ui.item_width,
        config.ui.item_margin,
    );
    let mut engine = ScrollerEngine::new(SimulatedViewport::new(track), config.scroller.options())?;

    if !options.json {
        println!(
            "{} x{}  duration={}s  num_to_scroll={}  item_width={}px  distance={}px",
            options.direction,
            options.count,
            config.scroller.duration,
            config.scroller.num_to_scroll,
            engine.item_width(),
            engine.total_move_distance(),
        );
        println!("start: {}", engine.viewport().track().labels().join(" "));
    }

    let mut timelines: Vec<Timeline> = Vec::with_capacity(options.count as usize);
    for session in 1..=options.count {
        if !options.json {
            println!();
            println!("session {}", session);
            println!("{:>10}  {:>7}  {:>8}  {:>5}  order", "t(ms)", "offset", "distance", "speed");
        }

        let timeline = if options.realtime {
            sim::play(&mut engine, options.direction, |frame| {
                if !options.json {
                    print_frame(frame);
                }
            })
            .await?
        } else {
            let timeline = sim::run_session(&mut engine, options.direction)?;
            if !options.json {
                timeline.frames.iter().for_each(print_frame);
            }
            timeline
        };

        if !options.json {
            if timeline.accepted {
                println!(
                    "{} steps in {:.1}ms",
                    timeline.steps,
                    timeline.duration_ms()
                );
            } else {
                println!("ignored: navigation disabled");
            }
        }
        timelines.push(timeline);
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&timelines)?);
    }

    Ok(())
}

fn print_frame(frame: &Frame) {
    println!(
        "{:>10.2}  {:>7}  {:>8}  {:>5}  {}",
        frame.elapsed_ms,
        frame.offset,
        frame.distance_moved,
        frame.speed_multiplier,
        frame.order.join(" ")
    );
}
