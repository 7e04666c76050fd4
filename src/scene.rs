use colored::Colorize;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::aabb::Aabb;
use crate::camera::Camera;
use crate::color;
use crate::color::ColorDesc;
use crate::error::{Error, Result};
use crate::light::Light;
use crate::material::Material;
use crate::material::DEFAULT_BIAS;
use crate::three_d::Primitive;
use crate::three_d::Sphere;
use crate::vec3::Float;
use crate::vec3::Point;
use crate::vec3::Vec3;

pub const DEFAULT_RESOLUTION: (u32, u32) = (400, 400);
pub const DEFAULT_FOV: Float = 1.57;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new(primitives: Vec<Primitive>, lights: Vec<Light>) -> Scene {
        Scene { primitives, lights }
    }

    /// Four spheres around a red mirror ball, lit by one point light.
    pub fn demo() -> Result<Scene> {
        let sphere = |center: Point, color: Vec3, reflective: bool| -> Result<Primitive> {
            let m = Material::new(color, 0.9, reflective)?;
            Ok(Primitive::Sphere(Sphere::new(center, 20.0, m)?))
        };
        let primitives = vec![
            sphere(Vec3::new(0.0, 45.0, -60.0), color::BLUE, false)?,
            sphere(Vec3::new(0.0, -45.0, -60.0), color::GREEN, false)?,
            sphere(Vec3::new(45.0, 0.0, -60.0), color::GREEN, false)?,
            sphere(Vec3::new(0.0, 0.0, -60.0), color::RED, true)?,
        ];
        let lights = vec![Light::point(Vec3::new(10.0, 0.0, -10.0), color::WHITE, 1.0)?];
        Ok(Scene::new(primitives, lights))
    }

    pub fn display(&self) {
        self.primitives.iter().for_each(|obj| obj.display());
        self.lights.iter().for_each(|light| light.display());
    }
}

fn default_bias() -> Float {
    DEFAULT_BIAS
}

fn default_fov() -> Float {
    DEFAULT_FOV
}

fn default_near_plane() -> Float {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PrimitiveDesc {
    Sphere {
        center: Point,
        radius: Float,
        color: ColorDesc,
        albedo: Float,
        #[serde(default)]
        reflective: bool,
        #[serde(default = "default_bias")]
        bias: Float,
    },
    Box {
        center: Point,
        extents: Vec3,
        color: ColorDesc,
        albedo: Float,
        #[serde(default)]
        reflective: bool,
        #[serde(default = "default_bias")]
        bias: Float,
    },
}

impl PrimitiveDesc {
    pub fn build(&self) -> Result<Primitive> {
        match self {
            PrimitiveDesc::Sphere {
                center,
                radius,
                color,
                albedo,
                reflective,
                bias,
            } => {
                let m = Material::with_bias(color.resolve()?, *albedo, *reflective, *bias)?;
                Ok(Primitive::Sphere(Sphere::new(*center, *radius, m)?))
            }
            PrimitiveDesc::Box {
                center,
                extents,
                color,
                albedo,
                reflective,
                bias,
            } => {
                let m = Material::with_bias(color.resolve()?, *albedo, *reflective, *bias)?;
                Ok(Primitive::Box(Aabb::new(*center, *extents, m)?))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LightDesc {
    Directional {
        direction: Vec3,
        #[serde(default)]
        color: ColorDesc,
        power: Float,
    },
    Point {
        position: Point,
        #[serde(default)]
        color: ColorDesc,
        power: Float,
    },
    Ambient {
        #[serde(default)]
        color: ColorDesc,
        power: Float,
    },
}

impl LightDesc {
    pub fn build(&self) -> Result<Light> {
        match self {
            LightDesc::Directional {
                direction,
                color,
                power,
            } => Light::directional(*direction, color.resolve()?, *power),
            LightDesc::Point {
                position,
                color,
                power,
            } => Light::point(*position, color.resolve()?, *power),
            LightDesc::Ambient { color, power } => Light::ambient(color.resolve()?, *power),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraDesc {
    #[serde(default)]
    pub position: Point,
    #[serde(default = "default_fov")]
    pub fov: Float,
    #[serde(default = "default_near_plane")]
    pub near_plane: Float,
    #[serde(default)]
    pub background: ColorDesc,
}

impl Default for CameraDesc {
    fn default() -> Self {
        CameraDesc {
            position: Vec3::zero(),
            fov: DEFAULT_FOV,
            near_plane: default_near_plane(),
            background: ColorDesc::default(),
        }
    }
}

fn load_resolution(json: &serde_json::Value, res_x: u32, res_y: u32) -> Result<(u32, u32)> {
    if res_x != 0 && res_y != 0 {
        return Ok((res_x, res_y));
    }
    let (mut x, mut y) = DEFAULT_RESOLUTION;
    if !json["resolution"].is_null() {
        [x, y] = serde_json::from_value::<[u32; 2]>(json["resolution"].clone())?;
    }
    // a single override keeps the scene's other dimension
    if res_x != 0 {
        x = res_x;
    }
    if res_y != 0 {
        y = res_y;
    }
    info!("img resolution: {}x{}", x, y);
    Ok((x, y))
}

fn load_camera(json: &serde_json::Value, res: (u32, u32)) -> Result<Camera> {
    let desc: CameraDesc = if json["camera"].is_null() {
        CameraDesc::default()
    } else {
        serde_json::from_value(json["camera"].clone())?
    };
    let camera = Camera::new(desc.near_plane, res.0, res.1, desc.fov, desc.position)?;
    Ok(camera.with_background(desc.background.resolve()?))
}

fn load_primitives(scene: &mut Scene, json: &serde_json::Value) -> Result<()> {
    if json["primitives"].is_null() {
        return Ok(());
    }
    let descs: Vec<PrimitiveDesc> = serde_json::from_value(json["primitives"].clone())?;
    for (i, desc) in descs.iter().enumerate() {
        let obj = desc
            .build()
            .map_err(|e| Error::InvalidScene(format!("primitive #{i}: {e}")))?;
        scene.primitives.push(obj);
    }
    Ok(())
}

fn load_lights(scene: &mut Scene, json: &serde_json::Value) -> Result<()> {
    if json["lights"].is_null() {
        return Ok(());
    }
    let descs: Vec<LightDesc> = serde_json::from_value(json["lights"].clone())?;
    for (i, desc) in descs.iter().enumerate() {
        let light = desc
            .build()
            .map_err(|e| Error::InvalidScene(format!("light #{i}: {e}")))?;
        scene.lights.push(light);
    }
    Ok(())
}

/// Builds the camera and scene from a parsed scene file. A non-zero
/// `res_x`/`res_y` overrides the file's resolution.
pub fn parse_scene(json: &serde_json::Value, res_x: u32, res_y: u32) -> Result<(Camera, Scene)> {
    if !json.is_object() {
        return Err(Error::InvalidScene("top level must be an object".to_owned()));
    }
    let res = load_resolution(json, res_x, res_y)?;
    let camera = load_camera(json, res)?;

    let mut scene = Scene::default();
    load_primitives(&mut scene, json)?;
    load_lights(&mut scene, json)?;

    debug!(
        "scene: {} primitives, {} lights",
        scene.primitives.len(),
        scene.lights.len()
    );
    Ok((camera, scene))
}

pub fn load_scene(scene_file: &Path, res_x: u32, res_y: u32) -> Result<(Camera, Scene)> {
    if !scene_file.is_file() {
        return Err(Error::SceneNotFound(scene_file.to_path_buf()));
    }
    println!(
        "loading scene file {}",
        scene_file.display().to_string().bold()
    );
    let data = fs::read_to_string(scene_file)?;
    let json: serde_json::Value = serde_json::from_str(&data)?;
    parse_scene(&json, res_x, res_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_full_scene() {
        let json = json!({
            "resolution": [8, 6],
            "camera": { "position": [0, 0, 5], "fov": 1.2, "background": "black" },
            "primitives": [
                { "kind": "sphere", "center": [0, 0, -60], "radius": 20,
                  "color": "red", "albedo": 0.9, "reflective": true },
                { "kind": "box", "center": [0, 0, -100], "extents": [165, 150, 5],
                  "color": [100, 100, 100], "albedo": 1.0, "bias": 0.1 }
            ],
            "lights": [
                { "kind": "point", "position": [10, 0, -10], "power": 1.0 },
                { "kind": "directional", "direction": [0.58, 0.58, -0.58], "power": 0.8 },
                { "kind": "ambient", "color": "white", "power": 0.1 }
            ]
        });
        let (camera, scene) = parse_scene(&json, 0, 0).unwrap();
        assert_eq!((camera.width, camera.height), (8, 6));
        assert_eq!(camera.pos, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.background, color::BLACK);
        assert_eq!(camera.near_plane, 1.0);
        assert_eq!(scene.primitives.len(), 2);
        assert!(scene.primitives[0].material().reflective);
        assert!(!scene.primitives[1].material().reflective);
        assert_eq!(scene.primitives[1].material().bias, 0.1);
        assert_eq!(scene.primitives[0].material().bias, DEFAULT_BIAS);
        assert_eq!(scene.lights.len(), 3);
        assert!(matches!(scene.lights[0], Light::Point(_)));
        assert!(matches!(scene.lights[2], Light::Ambient(_)));
    }

    #[test]
    fn resolution_overrides() {
        let json = json!({ "resolution": [8, 6] });
        let (camera, _) = parse_scene(&json, 4, 2).unwrap();
        assert_eq!((camera.width, camera.height), (4, 2));
        let (camera, _) = parse_scene(&json, 0, 3).unwrap();
        assert_eq!((camera.width, camera.height), (8, 3));
        let (camera, scene) = parse_scene(&json!({}), 0, 0).unwrap();
        assert_eq!((camera.width, camera.height), DEFAULT_RESOLUTION);
        assert!(scene.primitives.is_empty());
    }

    #[test]
    fn invalid_entries_are_errors() {
        let bad_radius = json!({ "primitives": [
            { "kind": "sphere", "center": [0, 0, 0], "radius": -1, "color": "red", "albedo": 0.5 }
        ]});
        assert!(matches!(parse_scene(&bad_radius, 0, 0), Err(Error::InvalidScene(_))));

        let unknown_kind = json!({ "primitives": [ { "kind": "torus" } ] });
        assert!(matches!(parse_scene(&unknown_kind, 0, 0), Err(Error::Json(_))));

        let bad_light = json!({ "lights": [ { "kind": "directional", "direction": [0, 0, 0], "power": 1 } ] });
        assert!(parse_scene(&bad_light, 0, 0).is_err());

        let bad_camera = json!({ "camera": { "fov": 0.0 } });
        assert!(matches!(parse_scene(&bad_camera, 0, 0), Err(Error::InvalidCamera(_))));

        assert!(parse_scene(&json!([1, 2]), 0, 0).is_err());
    }

    #[test]
    fn missing_file() {
        let r = load_scene(Path::new("does/not/exist.json"), 0, 0);
        assert!(matches!(r, Err(Error::SceneNotFound(_))));
    }

    #[test]
    fn descriptors_round_trip_through_json() {
        let desc = PrimitiveDesc::Box {
            center: Vec3::new(1.0, 2.0, 3.0),
            extents: Vec3::new(1.0, 1.0, 1.0),
            color: ColorDesc::Named("cyan".to_owned()),
            albedo: 0.5,
            reflective: false,
            bias: DEFAULT_BIAS,
        };
        let v = serde_json::to_value(&desc).unwrap();
        assert_eq!(v["kind"], "box");
        let back: PrimitiveDesc = serde_json::from_value(v).unwrap();
        assert!(matches!(back.build().unwrap(), Primitive::Box(_)));
    }

    #[test]
    fn demo_scene() {
        let scene = Scene::demo().unwrap();
        assert_eq!(scene.primitives.len(), 4);
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(
            scene
                .primitives
                .iter()
                .filter(|p| p.material().reflective)
                .count(),
            1
        );
    }
}
