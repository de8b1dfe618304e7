use super::*;
use crate::capture::memory::InMemoryCapture;
use crate::foundation::error::LinesError;

fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0, 0, 0, 255],
        premultiplied: true,
    }
}

#[test]
fn captures_exactly_one_loop_then_finishes_once() {
    let mem = InMemoryCapture::new();
    let mut rec = Recorder::new(mem.clone(), 5);
    rec.start().unwrap();

    for f in 0..5 {
        assert_eq!(
            rec.on_frame(FrameIndex(f), &frame()).unwrap(),
            RecordEvent::Captured
        );
    }
    assert!(rec.is_recording());
    assert_eq!(
        rec.on_frame(FrameIndex(5), &frame()).unwrap(),
        RecordEvent::Finished
    );
    assert!(!rec.is_recording());

    // Later frames, including the next loop, never re-trigger.
    for f in 6..20 {
        assert_eq!(
            rec.on_frame(FrameIndex(f), &frame()).unwrap(),
            RecordEvent::Skipped
        );
    }

    let log = mem.log();
    assert_eq!(log.frames.len(), 5);
    assert_eq!(log.starts, 1);
    assert_eq!(log.stops, 1);
    assert_eq!(log.saves, 1);
    assert_eq!(rec.captured(), 5);
}

#[test]
fn first_frame_starts_an_idle_recorder() {
    let mem = InMemoryCapture::new();
    let mut rec = Recorder::new(mem.clone(), 3);
    assert_eq!(rec.state(), RecorderState::Idle);
    rec.on_frame(FrameIndex(0), &frame()).unwrap();
    assert_eq!(rec.state(), RecorderState::Recording);
    rec.start().unwrap();
    assert_eq!(mem.log().starts, 1);
}

#[test]
fn finishes_even_when_stop_fails() {
    struct FailingStop;
    impl CaptureAdapter for FailingStop {
        fn start(&mut self) -> LinesResult<()> {
            Ok(())
        }
        fn capture(&mut self, _frame: &FrameRGBA) -> LinesResult<()> {
            Ok(())
        }
        fn stop(&mut self) -> LinesResult<()> {
            Err(LinesError::capture("boom"))
        }
        fn save(&mut self) -> LinesResult<()> {
            Ok(())
        }
    }

    let mut rec = Recorder::new(FailingStop, 1);
    rec.on_frame(FrameIndex(0), &frame()).unwrap();
    assert!(rec.on_frame(FrameIndex(1), &frame()).is_err());
    assert_eq!(rec.state(), RecorderState::Finished);
    assert_eq!(
        rec.on_frame(FrameIndex(2), &frame()).unwrap(),
        RecordEvent::Skipped
    );
}

#[test]
fn boxed_adapters_are_adapters() {
    let mem = InMemoryCapture::new();
    let boxed: Box<dyn CaptureAdapter> = Box::new(mem.clone());
    let mut rec: Recorder = Recorder::new(boxed, 1);
    rec.on_frame(FrameIndex(0), &frame()).unwrap();
    rec.on_frame(FrameIndex(1), &frame()).unwrap();
    assert_eq!(mem.log().saves, 1);
}

#[test]
fn in_memory_capture_rejects_frames_outside_start_stop() {
    let mut mem = InMemoryCapture::new();
    assert!(mem.capture(&frame()).is_err());
    mem.start().unwrap();
    mem.capture(&frame()).unwrap();
    mem.stop().unwrap();
    assert!(mem.capture(&frame()).is_err());
}

#[test]
fn adapter_accessor_exposes_the_wrapped_capture() {
    let mut rec = Recorder::new(InMemoryCapture::new(), 2);
    for f in 0..3 {
        rec.on_frame(FrameIndex(f), &frame()).unwrap();
    }
    let log = rec.adapter().log();
    assert_eq!(log.frames.len(), 2);
    assert_eq!((log.starts, log.stops, log.saves), (1, 1, 1));
}
