use pdf_view::*;

#[test]
fn test_default_options_are_valid() {
    let options = ViewerOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.padding, 12);
    assert_eq!(options.tick_interval().as_millis(), 30);
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases: Vec<(&str, Box<dyn Fn(&mut ViewerOptions)>)> = vec![
        ("Flip step", Box::new(|o: &mut ViewerOptions| o.flip_step = 0.0)),
        ("Flip step", Box::new(|o: &mut ViewerOptions| o.flip_step = 1.5)),
        ("Tick interval", Box::new(|o: &mut ViewerOptions| o.tick_interval_ms = 0)),
        ("Minimum flip scale", Box::new(|o: &mut ViewerOptions| o.min_flip_scale = 0.0)),
        ("Zoom step", Box::new(|o: &mut ViewerOptions| o.zoom_step = 1.0)),
        ("Zoom step", Box::new(|o: &mut ViewerOptions| o.zoom_step = f32::NAN)),
    ];

    for (expected, mutate) in cases {
        let mut options = ViewerOptions::default();
        mutate(&mut options);
        match options.validate() {
            Err(ViewerError::Config(msg)) => {
                assert!(msg.contains(expected), "{:?} missing from {:?}", expected, msg)
            }
            other => panic!("Expected Config error for {}, got {:?}", expected, other),
        }
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_save_and_load_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("viewer.json");

    let options = ViewerOptions {
        padding: 20,
        flip_step: 0.25,
        background: [0, 0, 0],
        ..Default::default()
    };
    options.save(&path).unwrap();

    let loaded = ViewerOptions::load(&path).unwrap();
    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[test]
fn test_partial_options_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("viewer.json");
    std::fs::write(&path, r#"{ "tick_interval_ms": 16 }"#).unwrap();

    let loaded = ViewerOptions::load(&path).unwrap();
    assert_eq!(loaded.tick_interval_ms, 16);
    assert_eq!(loaded.flip_step, ViewerOptions::default().flip_step);
}

#[cfg(feature = "serde")]
#[test]
fn test_load_rejects_invalid_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("viewer.json");

    std::fs::write(&path, r#"{ "flip_step": 2.0 }"#).unwrap();
    assert!(matches!(
        ViewerOptions::load(&path),
        Err(ViewerError::Config(_))
    ));

    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(ViewerOptions::load(&path), Err(ViewerError::Json(_))));

    assert!(matches!(
        ViewerOptions::load(dir.path().join("missing.json")),
        Err(ViewerError::Io(_))
    ));
}

#[test]
fn test_controller_uses_configured_step() {
    use pdf_view::rasterizer::RasterDocument;
    use std::path::Path;

    struct Blank;
    struct BlankDoc;

    impl Rasterizer for Blank {
        fn open(&self, _path: &Path) -> Result<Box<dyn RasterDocument>> {
            Ok(Box::new(BlankDoc))
        }
    }

    impl RasterDocument for BlankDoc {
        fn page_count(&self) -> usize {
            2
        }

        fn page_size(&self, _index: usize) -> Result<PageSize> {
            Ok(PageSize::new(10.0, 10.0))
        }

        fn render_page(&self, _index: usize, _scale: f32) -> Result<PixelBuffer> {
            Ok(PixelBuffer::new(1, 1, PixelFormat::Rgba, vec![0; 4]))
        }
    }

    let options = ViewerOptions {
        flip_step: 0.5,
        ..Default::default()
    };
    let mut controller = ViewportController::new(Box::new(Blank), options);
    controller.open_document("blank.pdf").unwrap();
    assert!(controller.next_page());
    assert!(matches!(controller.tick().unwrap(), Some(FlipTick::Frame { .. })));
    assert!(matches!(
        controller.tick().unwrap(),
        Some(FlipTick::Finished { target: 1 })
    ));
}
