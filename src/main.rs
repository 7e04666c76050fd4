use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use raylite::camera::Camera;
use raylite::color::ColorDesc;
use raylite::render::RenderConfig;
use raylite::render::RenderJob;
use raylite::scene::CameraDesc;
use raylite::scene::LightDesc;
use raylite::scene::PrimitiveDesc;
use raylite::scene::Scene;
use raylite::scene::DEFAULT_FOV;
use raylite::vec3::Point;
use raylite::vec3::Vec3;

static CTRLC_HIT: AtomicBool = AtomicBool::new(false);

#[derive(Parser, Debug)]
#[command(name = "raylite", about = "minimal ray tracer")]
struct Options {
    #[arg(long, default_value = "pic.png")]
    img_file: PathBuf,
    #[arg(short = 'l', long, default_value = "scene.json")]
    scene_file: PathBuf,
    #[arg(short = 'x', long, default_value_t = 0)]
    res_x: u32,
    #[arg(short = 'y', long, default_value_t = 0)]
    res_y: u32,
    /// Write a scene with this many random spheres to the scene file and exit
    #[arg(short = 'n', long, default_value_t = 0)]
    num_spheres_to_generate: u32,
    /// Render the built-in demo scene instead of a scene file
    #[arg(long)]
    demo: bool,
}

fn generate_scene(num_spheres_to_generate: u32, scene_file: &Path) -> raylite::Result<()> {
    let mut rng = rand::thread_rng();

    println!("Generating scene w/ {} spheres", num_spheres_to_generate);
    let mut primitives = vec![PrimitiveDesc::Box {
        center: Point::new(0.0, -40.0, -80.0),
        extents: Vec3::new(200.0, 4.0, 120.0),
        color: ColorDesc::Named("grey".to_owned()),
        albedo: 1.0,
        reflective: false,
        bias: 0.05,
    }];
    for _ in 0..num_spheres_to_generate {
        let center = Point {
            x: rng.gen_range(-40.0..40.0),
            y: rng.gen_range(-30.0..30.0),
            z: rng.gen_range(-120.0..-50.0),
        };
        let rgb = Vec3 {
            x: rng.gen_range(60.0..255.0),
            y: rng.gen_range(60.0..255.0),
            z: rng.gen_range(60.0..255.0),
        };
        primitives.push(PrimitiveDesc::Sphere {
            center,
            radius: rng.gen_range(3.0..10.0),
            color: ColorDesc::Rgb(rgb),
            albedo: rng.gen_range(0.5..1.0),
            reflective: rng.gen_range(0..100) % 4 == 0,
            bias: 0.05,
        });
    }
    let lights = vec![
        LightDesc::Point {
            position: Point::new(10.0, 20.0, -10.0),
            color: ColorDesc::default(),
            power: 40.0,
        },
        LightDesc::Directional {
            direction: Vec3::new(0.5, -0.5, -0.5),
            color: ColorDesc::default(),
            power: 0.5,
        },
        LightDesc::Ambient {
            color: ColorDesc::default(),
            power: 0.1,
        },
    ];
    let json = serde_json::json!({
        "resolution": [ 400, 400 ],
        "camera": CameraDesc::default(),
        "primitives": primitives,
        "lights": lights,
    });
    let s0 = serde_json::to_string_pretty(&json)?;
    println!("Writing scene file {}", scene_file.display());
    fs::write(scene_file, s0)?;
    Ok(())
}

fn demo_job(cfg: RenderConfig) -> raylite::Result<RenderJob> {
    let res_x = if cfg.res_x == 0 { 400 } else { cfg.res_x };
    let res_y = if cfg.res_y == 0 { 400 } else { cfg.res_y };
    let camera = Camera::new(1.0, res_x, res_y, DEFAULT_FOV, Vec3::zero())?;
    let scene = Scene::demo()?;
    camera.display();
    scene.display();
    Ok(RenderJob::new(cfg, camera, scene))
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{elapsed_precise} [{bar:40.cyan/blue}] {pos:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

fn main() -> raylite::Result<()> {
    tracing_subscriber::fmt::init();
    let opt = Options::parse();

    if let Err(e) = ctrlc::set_handler(|| CTRLC_HIT.store(true, Ordering::SeqCst)) {
        log::warn!("cannot install ctrl-c handler: {e}");
    }

    if opt.num_spheres_to_generate != 0 {
        return generate_scene(opt.num_spheres_to_generate, &opt.scene_file);
    }

    let cfg = RenderConfig {
        res_x: opt.res_x,
        res_y: opt.res_y,
        scene_file: opt.scene_file,
        image_file: opt.img_file,
    };
    let s = format!("num_threads: {}", rayon::current_num_threads()).red();
    println!("{s}");

    let mut job = if opt.demo {
        demo_job(cfg)?
    } else {
        RenderJob::load_scene(cfg)?
    };

    let pb = progress_bar();
    let pb_render = pb.clone();
    let res = job.render_scene(
        &CTRLC_HIT,
        Some(Box::new(move |v: f32| pb_render.set_position((100.0 * v) as u64))),
    );
    pb.finish();
    res?;

    job.print_stats();

    Ok(())
}
