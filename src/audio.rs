//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::CardEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A candle flickers alight
    CandleLit,
    /// A balloon pops
    BalloonPop,
    /// Celebrate button pressed
    Celebrate,
    /// Confetti burst
    Completion,
}

impl SoundEffect {
    /// Sound for a card event, if it has one
    pub fn for_event(event: &CardEvent) -> Option<Self> {
        match event {
            CardEvent::CandleLit { .. } => Some(SoundEffect::CandleLit),
            CardEvent::BalloonPopped { .. } => Some(SoundEffect::BalloonPop),
            CardEvent::CelebrationStarted => Some(SoundEffect::Celebrate),
            CardEvent::CompletionEffectShown => Some(SoundEffect::Completion),
            CardEvent::CelebrationFinished => None,
        }
    }
}

/// Audio manager for the card
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(enabled: bool) -> Self {
        // Context creation fails outside a secure context
        let ctx = if enabled { AudioContext::new().ok() } else { None };
        if enabled && ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.8,
            muted: !enabled,
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play the sound for every event that has one
    pub fn play_events(&self, events: &[CardEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::CandleLit => self.play_candle(ctx, vol),
            SoundEffect::BalloonPop => self.play_pop(ctx, vol),
            SoundEffect::Celebrate => self.play_fanfare(ctx, vol),
            SoundEffect::Completion => self.play_sparkle(ctx, vol),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single enveloped tone starting `delay` seconds from now
    fn tone(&self, ctx: &AudioContext, freq: f32, osc_type: OscillatorType, vol: f32, delay: f64, len: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + len)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + len + 0.05).ok();
    }

    /// Candle - soft rising whoosh
    fn play_candle(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Balloon - sharp pop with a low thump
    fn play_pop(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 2500.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.04)
                .ok();
            osc.frequency().set_value_at_time(2500.0, t).ok();
            osc.frequency().set_value_at_time(400.0, t + 0.01).ok();
            osc.frequency().set_value_at_time(1800.0, t + 0.02).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.05).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Celebrate - rising major arpeggio
    fn play_fanfare(&self, ctx: &AudioContext, vol: f32) {
        // C5 E5 G5 C6
        for (i, freq) in [523.25, 659.25, 783.99, 1046.5].into_iter().enumerate() {
            self.tone(ctx, freq, OscillatorType::Triangle, vol * 0.3, i as f64 * 0.12, 0.3);
        }
    }

    /// Completion - high shimmering sparkles
    fn play_sparkle(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [1568.0, 2093.0, 1760.0, 2637.0, 2349.0].into_iter().enumerate() {
            self.tone(ctx, freq, OscillatorType::Sine, vol * 0.15, 0.05 + i as f64 * 0.07, 0.2);
        }
    }
}
