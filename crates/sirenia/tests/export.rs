#![cfg(feature = "export")]

use sirenia::export::{DirectorySink, ExportError, ExportFormat, MemorySink, UsvgDecoder};
use sirenia::{
    DiagramRenderError, DiagramRenderer, EditorMode, MemoryStore, Studio, StudioConfig,
    StudioError, Theme,
};
use std::time::{Duration, Instant};

struct BoxRenderer;

impl DiagramRenderer for BoxRenderer {
    fn render(&self, _source: &str, _theme: Theme) -> Result<String, DiagramRenderError> {
        Ok(r##"<svg xmlns="http://www.w3.org/2000/svg" width="100%" style="max-width: 120px;" viewBox="0 0 120 60"><rect width="120" height="60" fill="#00aa00"/></svg>"##.to_string())
    }
}

fn rendered_studio() -> Studio<MemoryStore, BoxRenderer> {
    let t0 = Instant::now();
    let mut studio = Studio::new(StudioConfig::default(), MemoryStore::new(), BoxRenderer, t0);
    assert!(studio.tick(t0 + Duration::from_millis(300)));
    studio
}

#[test]
fn exports_the_rendered_diagram_in_every_format() {
    let studio = rendered_studio();
    let decoder = UsvgDecoder::without_fonts();

    for (format, magic) in [
        (ExportFormat::Png, &b"\x89PNG"[..]),
        (ExportFormat::Jpg, &[0xff, 0xd8][..]),
        (ExportFormat::Svg, &b"<svg"[..]),
    ] {
        let artifact = futures::executor::block_on(studio.export(format, None, &decoder))
            .unwrap_or_else(|err| panic!("{format:?}: {err}"));
        assert!(artifact.bytes().starts_with(magic), "{format:?}");
        assert!(
            artifact
                .suggested_filename()
                .ends_with(&format!(".{}", format.extension()))
        );
    }
    assert_eq!(studio.export_ledger().allocated(), 2);
    assert_eq!(studio.export_ledger().live(), 0);
}

#[test]
fn exporting_before_anything_rendered_reports_no_content() {
    let t0 = Instant::now();
    let studio = Studio::new(StudioConfig::default(), MemoryStore::new(), BoxRenderer, t0);
    let mut sink = MemorySink::default();
    let err = futures::executor::block_on(studio.export_to(
        ExportFormat::Png,
        None,
        &UsvgDecoder::without_fonts(),
        &mut sink,
    ))
    .unwrap_err();

    match &err {
        StudioError::Export(failure) => assert!(matches!(failure.error, ExportError::NoContent)),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.user_message().starts_with("Export failed: nothing to export"));
    assert!(sink.artifacts.is_empty());
    assert_eq!(studio.export_ledger().allocated(), 0);
}

#[test]
fn exported_files_and_markdown_downloads_land_in_the_sink() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut sink = DirectorySink::new(tmp.path());

    let mut studio = rendered_studio();
    futures::executor::block_on(studio.export_to(
        ExportFormat::Svg,
        None,
        &UsvgDecoder::without_fonts(),
        &mut sink,
    ))
    .expect("svg export");

    studio.switch_mode(EditorMode::Markdown, Instant::now());
    let doc = studio.download_markdown(&mut sink).expect("markdown download");
    assert!(doc.suggested_filename().starts_with("document-"));

    assert_eq!(sink.saved().len(), 2);
    let md = std::fs::read_to_string(&sink.saved()[1]).expect("read md");
    assert_eq!(md, EditorMode::Markdown.default_document());
    let svg = std::fs::read_to_string(&sink.saved()[0]).expect("read svg");
    assert!(svg.contains(r#"viewBox="-40 -40 200 140""#), "{svg}");
}
