use super::*;
use crate::{
    draw::drawing::Drawing,
    effects::effect::{Colorfade, Movement},
    encode::sink::InMemorySink,
    foundation::{core::Fps, error::FlipbookResult},
    layer::layer::Layer,
};

fn animated_book(frames: u64) -> Flipbook {
    let mut book = Flipbook::new(frames, Fps::new(25, 1).unwrap(), Size::new(40, 30).unwrap()).unwrap();
    let square = |d: &mut Drawing, _f: FrameIndex| -> FlipbookResult<()> {
        d.rectangle(0.0, 0.0, 10.0, 10.0).fill();
        Ok(())
    };
    book.add(
        Layer::new(square)
            .with_effect(Colorfade::new(1, frames, "red", "blue").unwrap())
            .with_effect(Movement::new(1, frames, (0.0, 0.0), (30.0, 20.0)).unwrap()),
        (0.0, 0.0),
    );
    book
}

fn render(book: &Flipbook, opts: &RenderOpts) -> Vec<(FrameIndex, Raster)> {
    let mut sink = InMemorySink::new();
    book.render_frames(book.range(), &mut sink, opts).unwrap();
    assert!(sink.is_finished());
    sink.into_frames()
}

#[test]
fn parallel_matches_sequential() {
    let book = animated_book(9);
    let sequential = render(&book, &RenderOpts::default());
    let parallel = render(
        &book,
        &RenderOpts {
            threading: RenderThreading {
                parallel: true,
                chunk_size: 4,
                threads: Some(3),
            },
            ..RenderOpts::default()
        },
    );
    assert_eq!(sequential.len(), 9);
    assert_eq!(sequential, parallel);
    let order: Vec<u64> = parallel.iter().map(|(f, _)| f.0).collect();
    assert_eq!(order, (1..=9).collect::<Vec<_>>());
}

#[test]
fn output_size_override_and_clear() {
    let book = animated_book(2);
    let frames = render(
        &book,
        &RenderOpts {
            size: Some(Size::new(80, 60).unwrap()),
            clear: Some(Color::WHITE),
            ..RenderOpts::default()
        },
    );
    let (_, first) = &frames[0];
    assert_eq!((first.width, first.height), (80, 60));
    assert_eq!(first.pixel(5, 5), Some([255, 0, 0, 255]));
    assert_eq!(first.pixel(70, 50), Some([255, 255, 255, 255]));
}

#[test]
fn failing_frame_keeps_earlier_frames() {
    let mut book = Flipbook::new(5, Fps::new(25, 1).unwrap(), Size::new(8, 8).unwrap()).unwrap();
    book.add(
        Layer::new(|d: &mut Drawing, f: FrameIndex| -> FlipbookResult<()> {
            if f.0 == 3 {
                d.set_source("ultraviolet")?;
            }
            d.paint();
            Ok(())
        }),
        (0.0, 0.0),
    );

    for threading in [RenderThreading::default(), RenderThreading::parallel()] {
        let mut sink = InMemorySink::new();
        let opts = RenderOpts {
            threading,
            ..RenderOpts::default()
        };
        let err = book.render_frames(book.range(), &mut sink, &opts).unwrap_err();
        assert!(matches!(err, FlipbookError::Frame { frame: 3, .. }), "{err}");
        assert!(matches!(err.root(), FlipbookError::ColorParse(_)));
        let written: Vec<u64> = sink.frames().iter().map(|(f, _)| f.0).collect();
        assert_eq!(written, [1, 2]);
        assert!(!sink.is_finished());
    }
}

#[test]
fn invalid_requests_fail_before_rendering() {
    let book = animated_book(3);
    let mut sink = InMemorySink::new();
    let empty = FrameRange::new(FrameIndex(2), FrameIndex(2)).unwrap();
    assert!(book.render_frames(empty, &mut sink, &RenderOpts::default()).is_err());

    let zero_threads = RenderOpts {
        threading: RenderThreading {
            parallel: true,
            chunk_size: 8,
            threads: Some(0),
        },
        ..RenderOpts::default()
    };
    assert!(book.render_frames(book.range(), &mut sink, &zero_threads).is_err());
    assert!(sink.config().is_none());
}

#[test]
fn explicit_threads_win_over_environment() {
    let threading = RenderThreading {
        threads: Some(2),
        ..RenderThreading::parallel()
    };
    assert_eq!(threading.resolved_threads().unwrap(), Some(2));
    assert_eq!(normalized_chunk_size(0), 1);
}
