use birthday_wish::sim::{CardEvent, CardInput, CardSession, tick};
use birthday_wish::{CardConfig, CardView, Viewport};

const FRAME: f32 = 1.0 / 60.0;

fn new_session() -> CardSession {
    let config = CardConfig {
        confetti_seed: Some(2024),
        ..Default::default()
    };
    let mut session = CardSession::new(&config, 2024);
    session.set_viewport(Viewport::new(1280.0, 720.0));
    session
}

#[test]
fn test_completion_after_all_ten_clicks() {
    let mut session = new_session();
    let clicks: Vec<CardInput> = (0..5)
        .map(CardInput::LightCandle)
        .chain((0..5).map(CardInput::PopBalloon))
        .collect();

    for (n, click) in clicks.iter().enumerate() {
        tick(&mut session, &[*click], FRAME);
        let expected = n == clicks.len() - 1;
        assert_eq!(session.state.show_completion_effect(), expected, "after click {}", n + 1);
    }
    assert!(session.confetti.is_active());
    assert!(!session.state.celebrating());
}

#[test]
fn test_out_of_order_clicks_never_complete() {
    let mut session = new_session();
    let clicks = [
        CardInput::LightCandle(4),
        CardInput::PopBalloon(3),
        CardInput::LightCandle(1),
        CardInput::PopBalloon(1),
    ];
    let events = tick(&mut session, &clicks, FRAME);
    assert!(events.is_empty());
    assert_eq!(session.state.candles_lit(), 0);
    assert_eq!(session.state.balloons_popped(), 0);
    assert!(!session.state.show_completion_effect());
}

#[test]
fn test_celebrate_with_no_balloons_popped() {
    let mut session = new_session();
    let events = tick(&mut session, &[CardInput::Celebrate], 0.0);
    assert!(session.state.celebrating());
    assert!(session.state.show_completion_effect());
    assert_eq!(session.state.balloons_popped(), 0);
    assert_eq!(
        events,
        vec![CardEvent::CelebrationStarted, CardEvent::CompletionEffectShown]
    );
}

#[test]
fn test_celebration_lights_one_candle_per_interval() {
    let mut session = new_session();
    tick(&mut session, &[CardInput::Celebrate], 0.0);

    let mut lit_at = Vec::new();
    let mut elapsed = 0.0f32;
    for _ in 0..(60 * 4) {
        elapsed += FRAME;
        for event in tick(&mut session, &[], FRAME) {
            if let CardEvent::CandleLit { auto: true, index } = event {
                lit_at.push((index, elapsed));
            }
        }
    }

    assert_eq!(lit_at.len(), 5);
    for (n, (index, at)) in lit_at.iter().enumerate() {
        assert_eq!(*index, n as u32);
        // Each candle lands on its own 500 ms boundary (within a frame)
        let boundary = 0.5 * (n + 1) as f32;
        assert!(*at >= boundary - 1e-3 && *at < boundary + FRAME + 1e-3, "candle {index} at {at}");
    }
    assert!(!session.sequencer.is_running());
    assert_eq!(session.state.balloons_popped(), 0);
}

#[test]
fn test_double_celebrate_is_ignored() {
    let mut session = new_session();
    tick(&mut session, &[CardInput::Celebrate], 0.0);
    let events = tick(&mut session, &[CardInput::Celebrate], 0.0);
    assert!(!events.contains(&CardEvent::CelebrationStarted));
    assert_eq!(session.state.candles_lit(), 0);
}

#[test]
fn test_manual_clicks_during_celebration() {
    let mut session = new_session();
    tick(&mut session, &[CardInput::Celebrate], 0.0);
    tick(&mut session, &[], 0.5);
    assert_eq!(session.state.candles_lit(), 1);

    // The player can keep lighting candles alongside the sequence
    tick(&mut session, &[CardInput::LightCandle(1), CardInput::LightCandle(2)], 0.0);
    assert_eq!(session.state.candles_lit(), 3);

    tick(&mut session, &[], 0.5);
    tick(&mut session, &[], 0.5);
    assert_eq!(session.state.candles_lit(), 5);
    tick(&mut session, &[], 0.5);
    assert_eq!(session.state.candles_lit(), 5);
    assert!(!session.sequencer.is_running());
}

#[test]
fn test_view_tracks_session() {
    let config = CardConfig::default();
    let mut session = CardSession::new(&config, 1);
    tick(&mut session, &[CardInput::PopBalloon(0), CardInput::Celebrate], 0.0);

    let view = CardView::from_state(&session.state, &config);
    assert!(!view.celebrate_enabled);
    assert!(view.show_confetti);
    assert!(view.balloons[0].popped);
    assert!(!view.balloons[1].popped);
}

#[test]
fn test_confetti_burst_ends() {
    let mut session = new_session();
    tick(&mut session, &[CardInput::Celebrate], 0.0);
    for _ in 0..(60 * 40) {
        tick(&mut session, &[], FRAME);
        if session.confetti.is_finished() {
            break;
        }
    }
    assert!(session.confetti.is_finished());
    assert_eq!(session.confetti.emitted(), session.confetti.total());
    // The completion effect latches even after the burst is over
    assert!(session.state.show_completion_effect());
}
