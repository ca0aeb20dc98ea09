use std::path::{Path, PathBuf};

use super::*;
use crate::compose::composer::compose;
use crate::design::config::DesignConfig;
use crate::render::labels::FixedLayout;

#[test]
fn format_follows_extension() {
    assert_eq!(
        OutputFormat::from_path(Path::new("chart.svg")).unwrap(),
        OutputFormat::Svg
    );
    assert_eq!(
        OutputFormat::from_path(Path::new("out/Chart.PNG")).unwrap(),
        OutputFormat::Png
    );
    for bad in ["chart.pdf", "chart", "svg"] {
        let err = OutputFormat::from_path(Path::new(bad)).unwrap_err();
        assert!(matches!(err, VinylError::Render(_)), "{bad}");
    }
}

#[test]
fn export_creates_parent_dirs() {
    let program = compose(&[], &[], &DesignConfig::reference()).unwrap();
    let dir = PathBuf::from("target").join("export_unit").join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let out = dir.join("decor.svg");

    let opts = RenderOpts {
        size_in: 2.0,
        dpi: 50.0,
        ..RenderOpts::default()
    };
    assert_eq!(
        export(&program, &opts, &FixedLayout, &out).unwrap(),
        OutputFormat::Svg
    );
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"<g id="grooves">"#));
    assert!(!svg.contains(r#"<g id="all_records">"#));
}

fn failure_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("export_unit").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn small_opts() -> RenderOpts {
    RenderOpts {
        size_in: 1.0,
        dpi: 40.0,
        ..RenderOpts::default()
    }
}

fn render_message(err: VinylError) -> String {
    match err {
        VinylError::Render(msg) => msg,
        other => panic!("expected render error, got {other:?}"),
    }
}

#[test]
fn parent_that_is_a_file_is_a_render_error_naming_it() {
    let dir = failure_dir("parent_is_file");
    let blocker = dir.join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let out = blocker.join("chart.svg");

    let program = compose(&[], &[], &DesignConfig::reference()).unwrap();
    let err = export(&program, &small_opts(), &FixedLayout, &out).unwrap_err();
    let msg = render_message(err);
    assert!(msg.contains(&blocker.display().to_string()), "{msg}");
    assert!(!out.exists());
}

#[test]
fn svg_write_failure_names_the_output() {
    let dir = failure_dir("svg_is_dir");
    let out = dir.join("chart.svg");
    std::fs::create_dir_all(&out).unwrap();

    let program = compose(&[], &[], &DesignConfig::reference()).unwrap();
    let err = export(&program, &small_opts(), &FixedLayout, &out).unwrap_err();
    let msg = render_message(err);
    assert!(msg.contains("write svg"), "{msg}");
    assert!(msg.contains(&out.display().to_string()), "{msg}");
}

#[test]
fn png_write_failure_names_the_output() {
    let dir = failure_dir("png_is_dir");
    let out = dir.join("chart.png");
    std::fs::create_dir_all(&out).unwrap();

    let program = compose(&[], &[], &DesignConfig::reference()).unwrap();
    let err = export(&program, &small_opts(), &FixedLayout, &out).unwrap_err();
    let msg = render_message(err);
    assert!(msg.contains("write png"), "{msg}");
    assert!(msg.contains(&out.display().to_string()), "{msg}");
}
