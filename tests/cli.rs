use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/input").join(name)
}

/// 1x1 PNG carrying a single tEXt chunk.
fn png_with_text(keyword: &str, text: &str) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, 1, 1);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .add_text_chunk(keyword.to_string(), text.to_string())
            .expect("text chunk");
        let mut writer = encoder.write_header().expect("header");
        writer.write_image_data(&[0, 0, 0]).expect("image data");
        writer.finish().expect("finish");
    }
    out
}

#[test]
fn renders_html_fragment_to_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("geninfo")?;
    cmd.arg("--input").arg(fixture("txt2img.txt"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(r#"<div class="sd-mm-info">"#))
        .stdout(predicate::str::contains("DPM++ 2M Karras"))
        .stdout(predicate::str::contains("&lt;script&gt;"))
        .stdout(predicate::str::contains("<script>").not());

    Ok(())
}

#[test]
fn writes_page_inferred_from_extension() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let output_path = tmp.path().join("info.html");

    let mut cmd = Command::cargo_bin("geninfo")?;
    cmd.arg("-i")
        .arg(fixture("settings_only.txt"))
        .arg("-o")
        .arg(&output_path)
        .arg("--class-prefix")
        .arg("meta");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Rendered info"));

    let contents = fs::read_to_string(&output_path)?;
    assert!(contents.starts_with("<!DOCTYPE html>"));
    assert!(contents.contains("<title>settings_only.txt</title>"));
    assert!(contents.contains(r#"<div class="meta-row">"#));

    Ok(())
}

#[test]
fn reads_stdin_and_emits_json() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("geninfo")?;
    cmd.args(["-e", "json"])
        .write_stdin("a photo of a cat, Steps: 20\r\nNegative prompt: blurry, low quality");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(
        json,
        serde_json::json!([
            { "name": "Prompt", "value": "a photo of a cat" },
            { "name": "Steps", "value": "20" },
            { "name": "Negative prompt", "value": "blurry, low quality" }
        ])
    );

    Ok(())
}

#[test]
fn extracts_parameters_from_png() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let image = tmp.path().join("00001.png");
    fs::write(&image, png_with_text("parameters", "cat\nSteps: 20, Seed: 5"))?;

    let mut cmd = Command::cargo_bin("geninfo")?;
    cmd.arg("-i").arg(&image).args(["-e", "json", "-q"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""value": "cat""#))
        .stdout(predicate::str::contains(r#""name": "Seed""#));

    Ok(())
}

#[test]
fn png_without_parameters_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let image = tmp.path().join("plain.png");
    fs::write(&image, png_with_text("Comment", "x"))?;

    let mut cmd = Command::cargo_bin("geninfo")?;
    cmd.arg("-i").arg(&image);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("has no generation parameters"));

    Ok(())
}

#[test]
fn empty_stdin_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("geninfo")?;
    cmd.write_stdin("  \n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no generation info supplied"));

    Ok(())
}
