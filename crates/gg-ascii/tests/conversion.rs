use gg_ascii::preview::build_palette;
use gg_ascii::sampling::SamplingGeometry;
use gg_ascii::{Conversion, Phase, convert};
use gg_core::charset::GlyphRamp;
use gg_core::config::{ColorMode, GlyphMode, PipelineLimits, RenderOptions};
use gg_core::traits::NoProgress;
use gg_core::{CellColor, ConvertError, FrameBuffer, GlyphCell, Rgb};
use gg_source::resize::Resampler;

fn gradient(w: u32, h: u32) -> FrameBuffer {
    let mut fb = FrameBuffer::new(w, h);
    for y in 0..h {
        for x in 0..w {
            fb.set_pixel(
                x,
                y,
                Rgb::new((x * 255 / w.max(1)) as u8, (y * 255 / h.max(1)) as u8, 128),
            );
        }
    }
    fb
}

fn options(w: u32, h: u32) -> RenderOptions {
    RenderOptions {
        art_width: w,
        art_height: h,
        ..RenderOptions::default()
    }
}

fn run(frame: &FrameBuffer, options: &RenderOptions) -> Result<gg_core::GlyphGrid, ConvertError> {
    convert(frame, options, &PipelineLimits::default(), None, NoProgress)
}

#[test]
fn grid_dimensions_follow_sampling_bounds() {
    let limits = PipelineLimits::default();
    for (img_w, img_h, art_w, art_h, scale) in [
        (100, 100, 40, 40, 1.0),
        (300, 100, 60, 5, 1.0),
        (50, 200, 30, 200, 2.5),
        (7, 3, 120, 60, 6.0),
    ] {
        let frame = gradient(img_w, img_h);
        let opts = RenderOptions {
            scale,
            ..options(art_w, art_h)
        };
        let geo = SamplingGeometry::compute(&opts, &limits, img_w, img_h).unwrap();
        let grid = run(&frame, &opts).unwrap();
        assert_eq!(grid.height(), art_h.min(geo.sampling_height));
        assert_eq!(grid.width(), art_w.min(geo.sampling_width));
        assert_eq!(grid.rows().count(), grid.height() as usize);
        assert!(grid.rows().all(|row| row.len() == grid.width() as usize));
    }
}

#[test]
fn cells_below_threshold_are_blank() {
    // Colonne gauche sombre, colonne droite claire ; tailles identiques, pas de mélange.
    let mut frame = FrameBuffer::filled(2, 2, Rgb::new(10, 10, 10));
    frame.set_pixel(1, 0, Rgb::new(220, 220, 220));
    frame.set_pixel(1, 1, Rgb::new(220, 220, 220));
    let opts = RenderOptions {
        glyph_mode: GlyphMode::Shape,
        brightness_threshold: 5.0,
        ..options(2, 2)
    };
    let grid = convert(&frame, &opts, &PipelineLimits::default(), Some("<svg/>"), NoProgress).unwrap();
    for y in 0..2 {
        assert_eq!(*grid.get(0, y), GlyphCell::blank());
        let lit = grid.get(1, y);
        assert_ne!(lit.glyph, ' ');
        assert!(lit.brightness > 0.8);
    }
}

#[test]
fn full_threshold_blanks_everything_but_white() {
    let frame = gradient(64, 64);
    let opts = RenderOptions {
        brightness_threshold: 100.0,
        ..options(16, 16)
    };
    let grid = run(&frame, &opts).unwrap();
    assert!(grid.cells().iter().all(|c| c.glyph == ' ' && c.color == CellColor::Transparent));
    assert!(grid.cells().iter().all(|c| c.brightness == 0.0));
}

#[test]
fn sequential_mode_cycles_the_ramp() {
    let frame = FrameBuffer::filled(30, 30, Rgb::new(180, 180, 180));
    let opts = RenderOptions {
        force_sequence: true,
        charset: "abcd".into(),
        color_mode: ColorMode::Monochrome,
        ..options(13, 20)
    };
    // Petites bandes : le compteur traverse les bandes.
    let limits = PipelineLimits {
        chunk_height: 2,
        ..PipelineLimits::default()
    };
    let grid = convert(&frame, &opts, &limits, None, NoProgress).unwrap();
    let ramp = ['a', 'b', 'c', 'd'];
    for (i, cell) in grid.cells().iter().enumerate() {
        assert_eq!(cell.glyph, ramp[i % ramp.len()], "cellule {i}");
    }
}

#[test]
fn sequential_mode_is_ignored_with_full_ramp() {
    let frame = gradient(40, 40);
    let opts = RenderOptions {
        force_sequence: true,
        use_full_charset: true,
        color_mode: ColorMode::Monochrome,
        brightness_threshold: 0.0,
        ..options(10, 10)
    };
    let ramp = GlyphRamp::for_options(&opts);
    let grid = run(&frame, &opts).unwrap();
    assert!(grid.cells().iter().all(|c| c.glyph == ramp.glyph_for_brightness(c.brightness)));
}

#[test]
fn brightness_mapping_is_inverted() {
    // Mode forme à taille identique : aucun rééchantillonnage.
    let opts = RenderOptions {
        charset: ".#".into(),
        brightness_threshold: 0.0,
        color_mode: ColorMode::Monochrome,
        glyph_mode: GlyphMode::Shape,
        ..options(4, 4)
    };
    let limits = PipelineLimits::default();
    let dark = FrameBuffer::filled(4, 4, Rgb::new(1, 1, 1));
    let dark = convert(&dark, &opts, &limits, Some("<svg/>"), NoProgress).unwrap();
    assert!(dark.cells().iter().all(|c| c.glyph == '#'));
    let light = FrameBuffer::filled(4, 4, Rgb::WHITE);
    let light = convert(&light, &opts, &limits, Some("<svg/>"), NoProgress).unwrap();
    assert!(light.cells().iter().all(|c| c.glyph == '.'));
}

#[test]
fn solid_red_resolves_to_its_single_palette_entry() {
    let frame = FrameBuffer::filled(10, 10, Rgb::new(255, 0, 0));
    let opts = RenderOptions {
        max_colors: 8,
        ..options(10, 10)
    };
    let palette = build_palette(&frame, 8, 500, (800, 600), &mut Resampler::new()).unwrap();
    assert_eq!(palette.len(), 1);
    let entry = palette[0];
    assert!(entry.distance_sq(Rgb::new(255, 0, 0)) < 64);

    let grid = run(&frame, &opts).unwrap();
    let visible: Vec<_> = grid.cells().iter().filter(|c| !c.is_blank()).collect();
    assert!(!visible.is_empty());
    assert!(visible.iter().all(|c| c.color == CellColor::Rgb(entry)));
}

#[test]
fn monochrome_is_always_white() {
    let frame = gradient(80, 80);
    let opts = RenderOptions {
        color_mode: ColorMode::Monochrome,
        ..options(20, 20)
    };
    let grid = run(&frame, &opts).unwrap();
    for cell in grid.cells() {
        if cell.is_blank() {
            assert_eq!(cell.color, CellColor::Transparent);
        } else {
            assert_eq!(cell.color, CellColor::White);
        }
    }
}

#[test]
fn one_pixel_image_is_valid() {
    let frame = FrameBuffer::filled(1, 1, Rgb::new(90, 120, 200));
    let grid = run(&frame, &options(1, 1)).unwrap();
    assert_eq!((grid.width(), grid.height()), (1, 1));
    let grid = run(&frame, &options(6, 6)).unwrap();
    assert_eq!((grid.width(), grid.height()), (6, 3));
}

#[test]
fn tall_image_converts_in_color_mode() {
    let mut frame = FrameBuffer::new(1, 10_000);
    for y in 0..10_000 {
        frame.set_pixel(0, y, Rgb::new(200, (y % 256) as u8, 90));
    }
    let grid = run(&frame, &options(120, 60)).unwrap();
    assert_eq!(grid.height(), 60);
    assert!(grid.cells().iter().any(|c| matches!(c.color, CellColor::Rgb(_))));
}

#[test]
fn zero_dimension_images_are_empty() {
    for (w, h) in [(0, 5), (5, 0), (0, 0)] {
        let frame = FrameBuffer::new(w, h);
        assert_eq!(
            run(&frame, &options(10, 10)),
            Err(ConvertError::EmptyImage { width: w, height: h })
        );
    }
}

#[test]
fn shape_mode_requires_markup() {
    let frame = gradient(10, 10);
    let opts = RenderOptions {
        glyph_mode: GlyphMode::Shape,
        ..options(10, 10)
    };
    let limits = PipelineLimits::default();
    for shape in [None, Some("")] {
        assert!(matches!(
            convert(&frame, &opts, &limits, shape, NoProgress),
            Err(ConvertError::MissingInput(_))
        ));
    }
}

#[test]
fn shape_mode_is_checked_before_the_image() {
    let frame = FrameBuffer::new(0, 0);
    let opts = RenderOptions {
        glyph_mode: GlyphMode::Shape,
        ..options(10, 10)
    };
    assert!(matches!(run(&frame, &opts), Err(ConvertError::MissingInput(_))));
}

#[test]
fn non_positive_dimensions_are_invalid() {
    let frame = gradient(10, 10);
    assert!(matches!(run(&frame, &options(0, 10)), Err(ConvertError::InvalidArgument(_))));
    assert!(matches!(run(&frame, &options(10, 0)), Err(ConvertError::InvalidArgument(_))));
}

#[test]
fn progress_is_monotonic_and_ends_at_100() {
    let frame = gradient(200, 200);
    let limits = PipelineLimits {
        chunk_height: 7,
        ..PipelineLimits::default()
    };
    let mut seen = Vec::new();
    let grid = convert(&frame, &options(100, 100), &limits, None, |p| seen.push(p)).unwrap();
    assert_eq!(seen.len(), grid.height().div_ceil(7) as usize);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.last().copied(), Some(100.0));
    assert!(seen.iter().all(|&p| p > 0.0 && p <= 100.0));
}

#[test]
fn failed_conversion_yields_no_grid() {
    let frame = FrameBuffer::new(3, 0);
    let limits = PipelineLimits::default();
    let mut conversion = Conversion::new(&frame, &options(4, 4), &limits, None);
    assert!(conversion.step().is_err());
    assert_eq!(conversion.phase(), Phase::Failed);
    assert!(conversion.finish().is_err());
}

#[test]
fn concurrent_conversions_do_not_interfere() {
    let frame = gradient(120, 90);
    let opts = RenderOptions {
        force_sequence: true,
        ..options(40, 40)
    };
    let reference = run(&frame, &opts).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| run(&frame, &opts))).collect();
        for h in handles {
            assert_eq!(h.join().unwrap().unwrap(), reference);
        }
    });
}
