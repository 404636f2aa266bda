//! Microphone input using Web Audio API
//!
//! Samples time-domain bytes from an `AnalyserNode` once per frame.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AnalyserNode, AudioContext, AudioContextState, MediaStream, MediaStreamConstraints,
};

use crate::sim::AudioTrigger;

/// Live microphone analyser
pub struct Microphone {
    ctx: AudioContext,
    analyser: AnalyserNode,
    buffer: Vec<u8>,
}

impl Microphone {
    /// Ask for microphone permission and wire it into an analyser
    pub async fn request() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let devices = window.navigator().media_devices()?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let promise = devices.get_user_media_with_constraints(&constraints)?;
        let stream: MediaStream = JsFuture::from(promise).await?.dyn_into()?;

        let ctx = AudioContext::new()?;
        let analyser = ctx.create_analyser()?;
        let source = ctx.create_media_stream_source(&stream)?;
        source.connect_with_audio_node(&analyser)?;

        let buffer = vec![128; analyser.frequency_bin_count() as usize];
        log::info!("Microphone ready ({} samples per frame)", buffer.len());

        let mic = Self {
            ctx,
            analyser,
            buffer,
        };
        mic.resume();
        Ok(mic)
    }

    /// Resume audio context if suspended (browsers require a user gesture)
    pub fn resume(&self) {
        if self.ctx.state() == AudioContextState::Suspended {
            log::debug!("Resuming suspended audio context");
            let _ = self.ctx.resume();
        }
    }

    /// Latest time-domain samples (128 = silence)
    pub fn sample(&mut self) -> &[u8] {
        self.analyser.get_byte_time_domain_data(&mut self.buffer);
        &self.buffer
    }

    /// Sample and check against the trigger threshold
    pub fn triggered(&mut self, trigger: &AudioTrigger) -> bool {
        trigger.fired(self.sample())
    }
}
