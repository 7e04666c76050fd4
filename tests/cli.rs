use assert_cmd::prelude::*;
use std::path::PathBuf;
use std::process::Command;

fn tmp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("raylite-{}-{}", std::process::id(), name))
}

#[test]
fn scene_spheres() -> Result<(), Box<dyn std::error::Error>> {
    let img = tmp_file("spheres.png");
    let mut cmd = Command::cargo_bin("raylite")?;
    cmd.arg("-l").arg("scenes/spheres.json")
        .arg("-x").arg("40").arg("-y").arg("40")
        .arg("--img-file").arg(&img)
        .assert().success();
    let pic = image::open(&img)?.to_rgb8();
    assert_eq!(pic.dimensions(), (40, 40));
    std::fs::remove_file(&img)?;

    Ok(())
}
#[test]
fn scene_box_room() -> Result<(), Box<dyn std::error::Error>> {
    let img = tmp_file("box-room.png");
    let mut cmd = Command::cargo_bin("raylite")?;
    cmd.arg("-l").arg("scenes/box-room.json")
        .arg("-x").arg("32").arg("-y").arg("24")
        .arg("--img-file").arg(&img)
        .assert().success();
    let pic = image::open(&img)?.to_rgb8();
    assert_eq!(pic.dimensions(), (32, 24));
    std::fs::remove_file(&img)?;

    Ok(())
}
#[test]
fn demo_scene() -> Result<(), Box<dyn std::error::Error>> {
    let img = tmp_file("demo.png");
    let mut cmd = Command::cargo_bin("raylite")?;
    cmd.arg("--demo").arg("-x").arg("16").arg("-y").arg("16")
        .arg("--img-file").arg(&img)
        .assert().success();
    assert!(img.is_file());
    std::fs::remove_file(&img)?;

    Ok(())
}
#[test]
fn generate_then_render() -> Result<(), Box<dyn std::error::Error>> {
    let scene = tmp_file("generated.json");
    let img = tmp_file("generated.png");
    let mut cmd = Command::cargo_bin("raylite")?;
    cmd.arg("-n").arg("12").arg("-l").arg(&scene).assert().success();
    assert!(scene.is_file());

    let mut cmd = Command::cargo_bin("raylite")?;
    cmd.arg("-l").arg(&scene)
        .arg("-x").arg("20").arg("-y").arg("20")
        .arg("--img-file").arg(&img)
        .assert().success();
    assert!(img.is_file());
    std::fs::remove_file(&scene)?;
    std::fs::remove_file(&img)?;

    Ok(())
}
#[test]
fn missing_scene_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("raylite")?;
    cmd.arg("-l").arg("scenes/nope.json").assert().failure();

    Ok(())
}
