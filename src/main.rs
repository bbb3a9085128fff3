use archimede::{run_viewer, Scene, SceneConfig};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Spheres falling into a water tank")]
struct Args {
    /// Scene file, looked up in the `scenarios` directory
    #[arg(short, default_value = "tank.yaml")]
    file_name: String,

    /// Run fixed steps without a window and log where every body ended up
    #[arg(long)]
    headless: bool,

    /// Step count for headless runs (default: t_end / h0)
    #[arg(long)]
    steps: Option<usize>,
}

// load here to keep main clean
fn load_scene_from_yaml(file_name: &str) -> Result<SceneConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("cannot open {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scene_cfg: SceneConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("cannot parse {}", config_path.display()))?;
    Ok(scene_cfg)
}

fn run_headless(mut scene: Scene, steps: Option<usize>) -> Result<()> {
    let steps = steps.unwrap_or_else(|| scene.steps_to_end());
    info!("headless run: {} steps of {} s", steps, scene.parameters().h0);

    scene.run_fixed(steps).context("simulation step failed")?;

    for (i, p) in scene.placements().iter().enumerate() {
        info!(
            "form {i}: position ({:.4}, {:.4}, {:.4}), angles ({}, {})",
            p.position.x, p.position.y, p.position.z, p.angles.0, p.angles.1
        );
    }
    for s in scene.spheres() {
        info!("sphere r={} at rest: {}", s.radius(), s.anim().vel.norm() == 0.0);
    }
    info!("finished at t = {:.3} s", scene.t);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.headless {
        // the viewer installs Bevy's log subscriber instead
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let scene_cfg = load_scene_from_yaml(&args.file_name)?;
    let camera = scene_cfg.camera.clone();
    let scene = Scene::build_scene(scene_cfg).context("invalid scene")?;

    if args.headless {
        run_headless(scene, args.steps)
    } else {
        run_viewer(scene, camera);
        Ok(())
    }
}
