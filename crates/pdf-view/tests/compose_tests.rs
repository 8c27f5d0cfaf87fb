use image::{Rgba, RgbaImage};
use pdf_view::constants::DEFAULT_BACKGROUND;
use pdf_view::*;

fn page(index: usize, width: u32, height: u32) -> PageImage {
    PageImage {
        page_index: index,
        scale: 1.0,
        image: RgbaImage::from_pixel(width, height, Rgba([index as u8, 255, 255, 255])),
    }
}

fn background() -> Rgba<u8> {
    let [r, g, b] = DEFAULT_BACKGROUND;
    Rgba([r, g, b, 255])
}

#[test]
fn test_single_page_is_centered_and_unmodified() {
    let compositor = LayoutCompositor::default();
    let source = page(4, 300, 400);
    let frame = compositor.compose(Spread::Single(source.clone()), Viewport::new(1000, 800));

    assert_eq!(frame.image, source.image);
    assert_eq!((frame.offset_x, frame.offset_y), (350, 200));
    assert_eq!(frame.placement(), (350, 200));
    assert_eq!(frame.scroll_region, (1000, 800));
    assert_eq!((frame.first_page, frame.last_page), (4, 4));
    assert_eq!(frame.kind, FrameKind::Steady);
}

#[test]
fn test_oversized_page_gets_negative_offset() {
    let compositor = LayoutCompositor::default();
    let frame = compositor.compose(Spread::Single(page(0, 1201, 900)), Viewport::new(1000, 800));

    assert_eq!((frame.offset_x, frame.offset_y), (-101, -50));
    assert_eq!(frame.scroll_region, (1201, 900));
    // The scroll region already holds the whole page
    assert_eq!(frame.placement(), (0, 0));
}

#[test]
fn test_oversized_flip_frame_stays_centered() {
    let compositor = LayoutCompositor::default();
    let frame = compositor.compose_flip(
        Spread::Single(page(0, 2000, 1000)),
        Viewport::new(1000, 800),
        0.15,
        0.85,
    );

    assert_eq!(frame.width(), 1700);
    assert_eq!(frame.scroll_region, (1000, 800));
    // Clipped evenly on both sides rather than pinned to the left edge
    assert_eq!(frame.placement(), (-350, -100));
}

#[test]
fn test_dual_pages_of_different_heights() {
    let compositor = LayoutCompositor::new(12, DEFAULT_BACKGROUND);
    let frame = compositor.compose(
        Spread::Dual(page(2, 300, 400), page(3, 250, 500)),
        Viewport::new(1024, 768),
    );

    assert_eq!(frame.width(), 300 + 12 + 250);
    assert_eq!(frame.height(), 500);
    assert_eq!((frame.first_page, frame.last_page), (2, 3));

    // Left page, gap, right page
    assert_eq!(frame.image.get_pixel(0, 0).0[0], 2);
    assert_eq!(*frame.image.get_pixel(305, 10), background());
    assert_eq!(frame.image.get_pixel(312, 0).0[0], 3);

    // Below the shorter left page is background
    assert_eq!(*frame.image.get_pixel(10, 450), background());
    assert_eq!(frame.image.get_pixel(400, 450).0[0], 3);
}

#[test]
fn test_gap_follows_configuration() {
    let compositor = LayoutCompositor::new(40, [0, 0, 0]);
    let frame = compositor.compose(
        Spread::Dual(page(0, 100, 100), page(1, 100, 100)),
        Viewport::new(800, 600),
    );
    assert_eq!(frame.width(), 240);
    assert_eq!(*frame.image.get_pixel(120, 50), Rgba([0, 0, 0, 255]));
}

#[test]
fn test_flip_frame_is_squashed_and_recentered() {
    let compositor = LayoutCompositor::default();
    let viewport = Viewport::new(1000, 800);
    let frame = compositor.compose_flip(
        Spread::Single(page(1, 400, 600)),
        viewport,
        0.3,
        0.7,
    );

    assert_eq!(frame.width(), 280);
    assert_eq!(frame.height(), 600);
    assert_eq!((frame.offset_x, frame.offset_y), (360, 100));
    assert_eq!(frame.scroll_region, (1000, 800));
    assert!(frame.is_flip());
}

#[test]
fn test_flip_frame_never_collapses() {
    let compositor = LayoutCompositor::default();
    let frame = compositor.compose_flip(
        Spread::Single(page(0, 3, 10)),
        Viewport::new(100, 100),
        0.9,
        0.1,
    );
    assert_eq!(frame.width(), 1);
}
