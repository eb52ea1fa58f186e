use anyhow::{Context, Result};
use chartwheel::aspects::AspectMatch;
use chartwheel::chart::{
    load_chart_data_from_json, ChartData, ChartLayer, ChartRenderer, ChartSettings,
    PositionEntry, RadixChart,
};
use chartwheel::layout::LocatedPoint;
use std::fs;
use std::time::Duration;

/// Fixed frame step for the animation preview (~60 fps)
const FRAME: Duration = Duration::from_millis(16);

/// Prints every draw call instead of drawing
struct PrintRenderer {
    frames: usize,
}

impl ChartRenderer for PrintRenderer {
    fn draw_points(&mut self, layer: ChartLayer, points: &[LocatedPoint]) {
        self.frames += 1;
        let line = points
            .iter()
            .map(|p| {
                let marker = if p.retrograde { " R" } else { "" };
                format!("{} {:.2}°{}", p.name, p.angle, marker)
            })
            .collect::<Vec<_>>()
            .join(" | ");
        println!("{:?} points: {}", layer, line);
    }

    fn draw_aspects(&mut self, aspects: &[AspectMatch]) {
        if aspects.is_empty() {
            println!("no aspects");
            return;
        }
        for a in aspects {
            println!(
                "  {} {} {} ({})",
                a.point.name,
                a.aspect.name,
                a.to_point.name,
                a.formatted_precision()
            );
        }
    }

    fn rotate_cusps(&mut self, rotation: f64) {
        log::trace!("cusps rotated to {:.2}", rotation);
    }

    fn snap_cusps(&mut self, angle: f64) {
        println!("cusps snapped to {:.2}°", angle);
    }
}

fn load_chart(path: &str) -> Result<ChartData> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    load_chart_data_from_json(&json).with_context(|| format!("loading {}", path))
}

fn sample_radix() -> ChartData {
    let planets = [
        ("Sun", PositionEntry::with_speed(12.4, 0.98)),
        ("Moon", PositionEntry::with_speed(14.1, 13.2)),
        ("Mercury", PositionEntry::with_speed(355.0, -0.4)),
        ("Venus", PositionEntry::with_speed(101.7, 1.2)),
        ("Mars", PositionEntry::with_speed(192.3, 0.6)),
        ("Jupiter", PositionEntry::with_speed(280.9, 0.1)),
    ];
    ChartData::new(
        planets
            .into_iter()
            .map(|(name, entry)| (name.to_string(), entry))
            .collect(),
    )
    .with_cusps((0..12).map(|i| 20.0 + 30.0 * i as f64).collect())
}

fn sample_transit(offset: f64) -> ChartData {
    let mut data = sample_radix();
    for entry in data.planets.values_mut() {
        entry.longitude += offset;
    }
    if let Some(cusps) = data.cusps.as_mut() {
        for cusp in cusps.iter_mut() {
            *cusp += offset;
        }
    }
    data
}

fn main() -> Result<()> {
    env_logger::init();

    // wheel_lab [--settings settings.toml] [radix.json [transit.json]]
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match args.iter().position(|a| a == "--settings") {
        Some(i) => {
            let path = args.get(i + 1).cloned().context("--settings needs a path")?;
            args.drain(i..=i + 1);
            ChartSettings::load_from_file(&path).with_context(|| format!("loading {}", path))?
        }
        None => ChartSettings::default(),
    };

    let radix_data = match args.first() {
        Some(path) => load_chart(path)?,
        None => sample_radix(),
    };
    let transit_data = match args.get(1) {
        Some(path) => load_chart(path)?,
        None => sample_transit(40.0),
    };

    let universe = settings.universe(800.0, 800.0);
    let radix = RadixChart::new(universe, &radix_data, &settings);
    let mut renderer = PrintRenderer { frames: 0 };

    println!("== radix");
    radix.render(&mut renderer).context("radix layout")?;

    let mut transit = radix.transit(transit_data);
    println!("== transit");
    transit.render(&mut renderer).context("transit layout")?;

    println!("== animation");
    let target = sample_transit(75.0);
    let mut animation = transit.animate(
        &target,
        Duration::from_secs(1),
        false,
        Some(Box::new(|| println!("animation complete"))),
    );
    while animation.is_running() {
        animation.tick(FRAME, &mut renderer);
    }
    transit.apply(target);
    transit.render(&mut renderer).context("transit layout")?;

    log::info!("{} point frames drawn", renderer.frames);
    Ok(())
}
