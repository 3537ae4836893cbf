//! Short synthesized feedback tones.
//!
//! The session only queues [`SoundCue`]s; the host plays them through Web
//! Audio from inside the input handler, so the browser treats playback as
//! user-initiated.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SoundCue {
    Click,
    Purchase,
}

/// Oscillator and gain envelope for one cue.
#[derive(Debug, PartialEq)]
pub struct ToneShape {
    /// Frequency set points `(hz, offset_secs)`.
    pub steps: &'static [(f32, f64)],
    /// Exponential frequency sweep target, reached at `duration`.
    pub sweep_to: Option<f32>,
    pub duration: f64,
    pub gain_start: f32,
    pub gain_end: f32,
}

const CLICK_TONE: ToneShape = ToneShape {
    steps: &[(800.0, 0.0)],
    sweep_to: Some(400.0),
    duration: 0.1,
    gain_start: 0.1,
    gain_end: 0.01,
};

// C5 E5 G5
const PURCHASE_TONE: ToneShape = ToneShape {
    steps: &[(523.0, 0.0), (659.0, 0.1), (784.0, 0.2)],
    sweep_to: None,
    duration: 0.3,
    gain_start: 0.1,
    gain_end: 0.01,
};

impl SoundCue {
    pub fn shape(&self) -> &'static ToneShape {
        match self {
            SoundCue::Click => &CLICK_TONE,
            SoundCue::Purchase => &PURCHASE_TONE,
        }
    }
}

/// Play a cue. Audio failures are logged and otherwise ignored.
#[cfg(target_arch = "wasm32")]
pub fn play(cue: SoundCue) {
    if let Err(e) = web::play(cue.shape()) {
        crate::console::warn(&format!("audio playback failed: {e:?}"));
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn play(_cue: SoundCue) {}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;

    use web_sys::wasm_bindgen::JsValue;
    use web_sys::{AudioContext, OscillatorType};

    use super::ToneShape;

    thread_local! {
        static CONTEXT: RefCell<Option<AudioContext>> = RefCell::new(None);
    }

    pub fn play(shape: &ToneShape) -> Result<(), JsValue> {
        CONTEXT.with(|cell| {
            let mut slot = cell.borrow_mut();
            if slot.is_none() {
                *slot = Some(AudioContext::new()?);
            }
            let Some(ctx) = slot.as_ref() else {
                return Ok(());
            };
            // A context created before any gesture starts suspended.
            let _ = ctx.resume();

            let osc = ctx.create_oscillator()?;
            let gain = ctx.create_gain()?;
            osc.set_type(OscillatorType::Sine);
            osc.connect_with_audio_node(&gain)?;
            gain.connect_with_audio_node(&ctx.destination())?;

            let now = ctx.current_time();
            let freq = osc.frequency();
            for &(hz, offset) in shape.steps {
                freq.set_value_at_time(hz, now + offset)?;
            }
            if let Some(target) = shape.sweep_to {
                freq.exponential_ramp_to_value_at_time(target, now + shape.duration)?;
            }
            let level = gain.gain();
            level.set_value_at_time(shape.gain_start, now)?;
            level.exponential_ramp_to_value_at_time(shape.gain_end, now + shape.duration)?;

            osc.start_with_when(now)?;
            osc.stop_with_when(now + shape.duration)?;
            Ok(())
        })
    }
}
