use anyhow::{Context, Result};
use stable_fluids::{Field2, Fluid2, FluidParams};

const DEFAULT_RESOLUTION: usize = 64;
const DEFAULT_FRAMES: usize = 120;
const LUMA_RAMP: &[u8] = b" .:-=+*#%@";

#[derive(Clone, Copy, Debug)]
struct EmitterConfig {
    position: [usize; 2],
    density: f32,
    push: [f32; 2],
}

impl EmitterConfig {
    fn new(resolution: usize) -> Self {
        Self {
            position: [resolution / 2, resolution / 5],
            density: 40.0,
            push: [0.0, 6.0],
        }
    }

    fn push_at(&self, frame: usize) -> [f32; 2] {
        let sway = (frame as f32 * 0.15).sin() * 2.0;
        [self.push[0] + sway, self.push[1]]
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parse {name}={value}")),
        Err(_) => Ok(default),
    }
}

fn density_to_luma(density: &Field2, out: &mut String) {
    let resolution = density.lattice().resolution();
    let (_, max_value) = density.min_max();
    let scale = if max_value > 0.0 { 1.0 / max_value } else { 0.0 };
    out.clear();
    for y in (0..resolution).rev() {
        for x in 0..resolution {
            let t = (density.get([x, y]) * scale).clamp(0.0, 1.0);
            let level = (t * (LUMA_RAMP.len() - 1) as f32).round() as usize;
            out.push(LUMA_RAMP[level] as char);
        }
        out.push('\n');
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let resolution = env_or("FLUID_RESOLUTION", DEFAULT_RESOLUTION)?;
    let frames = env_or("FLUID_FRAMES", DEFAULT_FRAMES)?;
    let params = FluidParams::new(0.0001, 0.0001, 0.1)
        .with_parallel_threshold(env_or("SIM_PAR_THRESHOLD", stable_fluids::DEFAULT_PAR_THRESHOLD)?);
    let mut fluid = Fluid2::new(resolution, params).context("create fluid grid")?;
    let emitter = EmitterConfig::new(resolution);

    for frame in 0..frames {
        fluid
            .add_density(emitter.position, emitter.density)
            .context("inject density")?;
        fluid
            .add_velocity(emitter.position, emitter.push_at(frame))
            .context("inject velocity")?;
        fluid.step();
        if frame % 10 == 0 || frame + 1 == frames {
            let d = fluid.diagnostics();
            log::info!(
                "frame {frame}: mass {:.2}, energy {:.3}, max speed {:.3}, divergence {:.2e}",
                d.total_density,
                d.kinetic_energy,
                d.max_speed,
                d.mean_abs_divergence
            );
        }
    }

    if !fluid.is_finite() {
        log::warn!("simulation blew up; density map will be blank");
    }
    let mut luma = String::new();
    density_to_luma(fluid.density(), &mut luma);
    print!("{luma}");
    Ok(())
}
