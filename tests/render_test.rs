use tablefix::config::RenderConfig;
use tablefix::prelude::*;
use tablefix::render::{render_fixtures, MANIFEST_FILE};

mod common;
use common::scratch_dir;

fn config_in(dir: &std::path::Path) -> RenderConfig {
    RenderConfig {
        output_dir: dir.join("out"),
        seed: Some(1),
        ..Default::default()
    }
}

#[test]
fn test_render_all_fixtures() {
    let tmp = scratch_dir();
    let config = config_in(tmp.path());
    let rendered = render_fixtures(&config).unwrap();

    // The path fixture has nothing to write.
    assert_eq!(rendered.len(), 6);
    assert!(!rendered.contains_key("test_data_dir"));
    let names: Vec<&str> = rendered.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "sample_image",
            "grayscale_image",
            "binary_image",
            "noisy_image",
            "empty_image",
            "rotated_image"
        ]
    );

    for r in rendered.values() {
        assert!(r.path.exists(), "{:?}", r.path);
        assert_eq!(Some(r.shape), r.fixture.shape());
    }
    assert!(config.output_dir.join(MANIFEST_FILE).exists());
    assert!(!config.output_dir.join("test_data").exists());
}

#[test]
fn test_png_round_trip_is_lossless() {
    let tmp = scratch_dir();
    let config = RenderConfig {
        fixtures: vec![
            "sample_image".to_string(),
            "grayscale_image".to_string(),
            "noisy_image".to_string(),
        ],
        ..config_in(tmp.path())
    };
    let rendered = render_fixtures(&config).unwrap();

    let expected = [
        ("sample_image", sample_image()),
        ("grayscale_image", grayscale_image()),
        ("noisy_image", noisy_image_seeded(1)),
    ];
    for (name, raster) in expected {
        let r = &rendered[name];
        let decoded = image::open(&r.path).unwrap();
        let reloaded = Raster::from_image(&decoded, raster.channels()).unwrap();
        assert_eq!(reloaded, raster, "{}", name);
        assert_eq!(r.digest, raster.digest(), "{}", name);
    }
}

#[test]
fn test_manifest_contents() {
    let tmp = scratch_dir();
    let config = RenderConfig {
        fixtures: vec!["binary_image".to_string(), "empty_image".to_string()],
        ..config_in(tmp.path())
    };
    let rendered = render_fixtures(&config).unwrap();

    let mut reader = csv::Reader::from_path(config.output_dir.join(MANIFEST_FILE)).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec!["name", "file", "height", "width", "channels", "sha256"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "binary_image");
    assert_eq!(&rows[0][1], "binary_image.png");
    assert_eq!(&rows[0][2], "100");
    assert_eq!(&rows[0][3], "150");
    assert_eq!(&rows[0][4], "1");
    assert_eq!(&rows[0][5], rendered["binary_image"].digest.as_str());
    assert_eq!(&rows[1][0], "empty_image");
    assert_eq!(&rows[1][4], "3");
}

#[test]
fn test_manifest_can_be_disabled() {
    let tmp = scratch_dir();
    let config = RenderConfig {
        fixtures: vec!["empty_image".to_string()],
        manifest: false,
        ..config_in(tmp.path())
    };
    render_fixtures(&config).unwrap();
    assert!(config.output_dir.join("empty_image.png").exists());
    assert!(!config.output_dir.join(MANIFEST_FILE).exists());
}

#[test]
fn test_unknown_fixture_fails_before_writing() {
    let tmp = scratch_dir();
    let config = RenderConfig {
        fixtures: vec!["bogus".to_string()],
        ..config_in(tmp.path())
    };
    assert!(render_fixtures(&config).is_err());
    assert!(!config.output_dir.exists());
}

#[test]
fn test_repeated_names_render_once() {
    let tmp = scratch_dir();
    let config = RenderConfig {
        fixtures: ["empty_image", "binary_image", "empty_image"]
            .map(String::from)
            .to_vec(),
        ..config_in(tmp.path())
    };
    let rendered = render_fixtures(&config).unwrap();
    let names: Vec<&str> = rendered.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["empty_image", "binary_image"]);

    let reader = csv::Reader::from_path(config.output_dir.join(MANIFEST_FILE)).unwrap();
    assert_eq!(reader.into_records().count(), 2);
}
