use colored::Colorize;
use log::{info, warn};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Mutex;
use std::time::Instant;

use crate::camera::Camera;
use crate::error::Result;
use crate::image::ImageFile;
use crate::image::ImageOutput;
use crate::scene;
use crate::scene::Scene;
use crate::vec3::Float;
use crate::ProgressFunc;
use crate::RenderStats;

pub struct RenderConfig {
    pub res_x: u32,
    pub res_y: u32,
    pub scene_file: PathBuf,
    pub image_file: PathBuf,
}

/// Renders one camera view of a scene. Columns are traced in parallel and
/// reassembled in generation order.
pub struct Renderer<'a> {
    camera: &'a Camera,
    scene: &'a Scene,
    progress_total: Mutex<usize>,
    progress_func: ProgressFunc,
    total_stats: Mutex<RenderStats>,
}

impl<'a> Renderer<'a> {
    pub fn new(camera: &'a Camera, scene: &'a Scene) -> Self {
        Self {
            camera,
            scene,
            progress_total: Mutex::new(0),
            progress_func: ProgressFunc {
                func: Box::new(|_| {}),
            },
            total_stats: Mutex::new(Default::default()),
        }
    }

    pub fn set_progress_func(&mut self, func: Box<dyn Fn(f32) + Send + Sync>) {
        self.progress_func.func = func;
    }

    fn report_progress(&self, v: u32) {
        let denom = (self.camera.width * self.camera.height) as usize;
        let mut total = self.progress_total.lock().unwrap();
        *total += v as usize;
        let pct = *total as f32 / denom as f32;
        (self.progress_func.func)(pct.min(1.0));
    }

    pub fn stats(&self) -> RenderStats {
        *self.total_stats.lock().unwrap()
    }

    /// Column-major RGB buffer. Columns not started before `exit_req` is
    /// raised are left at the background color.
    pub fn render_pixels(&self, exit_req: &AtomicBool) -> Vec<u8> {
        *self.progress_total.lock().unwrap() = 0;
        let columns: Vec<Vec<u8>> = (0..self.camera.width)
            .into_par_iter()
            .map(|x| {
                if exit_req.load(Ordering::SeqCst) {
                    self.report_progress(self.camera.height);
                    return self.camera.blank_column();
                }
                let mut stats = RenderStats::default();
                let column = self.camera.render_column(&mut stats, x, self.scene);
                self.report_progress(self.camera.height);
                self.total_stats.lock().unwrap().add(stats);
                column
            })
            .collect();
        if exit_req.load(Ordering::SeqCst) {
            warn!("render interrupted, image is incomplete");
        }
        columns.concat()
    }

    pub fn render(&self, output: &mut dyn ImageOutput, exit_req: &AtomicBool) -> Result<()> {
        let pixels = self.render_pixels(exit_req);
        output.write_pixels(&pixels, self.camera.width, self.camera.height)
    }
}

/// A scene file rendered to an image file.
pub struct RenderJob {
    pub camera: Camera,
    pub scene: Scene,
    cfg: RenderConfig,
    start_ts: Instant,
    total_stats: RenderStats,
}

impl RenderJob {
    pub fn new(cfg: RenderConfig, camera: Camera, scene: Scene) -> Self {
        Self {
            camera,
            scene,
            cfg,
            start_ts: Instant::now(),
            total_stats: Default::default(),
        }
    }

    pub fn load_scene(cfg: RenderConfig) -> Result<Self> {
        let (camera, scene) = scene::load_scene(&cfg.scene_file, cfg.res_x, cfg.res_y)?;
        camera.display();
        scene.display();
        Ok(Self::new(cfg, camera, scene))
    }

    /// Renders the scene and writes the image file.
    pub fn render_scene(
        &mut self,
        exit_req: &AtomicBool,
        progress: Option<Box<dyn Fn(f32) + Send + Sync>>,
    ) -> Result<()> {
        info!(
            "rendering {}x{} on {} threads",
            self.camera.width,
            self.camera.height,
            rayon::current_num_threads()
        );
        self.start_ts = Instant::now();
        let mut renderer = Renderer::new(&self.camera, &self.scene);
        if let Some(func) = progress {
            renderer.set_progress_func(func);
        }
        let mut out = ImageFile::new(&self.cfg.image_file);
        let res = renderer.render(&mut out, exit_req);
        self.total_stats = renderer.stats();
        res
    }

    pub fn print_stats(&self) {
        let stats = &self.total_stats;
        let pretty_print = |n: u64| {
            if n >= 1_000_000 {
                format!("{:6.3} M", n as Float / 1_000_000.0)
            } else {
                format!("{:6}  ", n)
            }
        };
        let elapsed = self.start_ts.elapsed();
        let num_rays = (stats.num_rays_primary + stats.num_rays_shadow + stats.num_rays_reflection)
            .max(1) as Float;
        let tot_lat_str = format!("{:.2} sec", elapsed.as_millis() as Float / 1000.0);
        let ray_lat_str = format!("{:.3} usec", elapsed.as_micros() as Float / num_rays);

        println!(
            "duration: {} -- {} per ray",
            tot_lat_str.bold(),
            ray_lat_str.bold(),
        );
        let counters = [
            ("num_rays_primary", stats.num_rays_primary),
            ("num_rays_shadow", stats.num_rays_shadow),
            ("num_rays_reflection", stats.num_rays_reflection),
            ("num_intersects_sphere", stats.num_intersects_sphere),
            ("num_intersects_box", stats.num_intersects_box),
        ];
        for (s, n) in counters {
            println!("{:<24} {:>12}", format!("{}:", s), pretty_print(n));
        }
    }
}
