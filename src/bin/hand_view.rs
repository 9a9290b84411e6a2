use anyhow::Result;
use std::time::{Duration, Instant};

use shadow_puppets::config::Config;
use shadow_puppets::gesture::GestureLabel;
use shadow_puppets::hand::{Hand, Landmark, LandmarkIndex};
use shadow_puppets::pipeline::FramePipeline;
use shadow_puppets::render::{Key, OverlayRenderer};
use shadow_puppets::screen::{OverlayRequest, UserIntent};

const CONFIG_PATH: &str = "config.toml";
const WIDTH: usize = 960;
const HEIGHT: usize = 540;

/// 各ジェスチャーを見せる時間（秒）
const POSE_CYCLE_SECS: f32 = 4.0;

/// 合成した手を順番に流して影絵パイプラインを目視確認するビューア
///
/// 操作: [H] ガイド表示  [C] ガイドを閉じる  [B] スポットライトへ戻る  [Esc] 終了
fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("Hand View ({})", env!("GIT_VERSION"));
    println!("操作: [H] ガイド  [C] 閉じる  [B] 戻る  [Esc] 終了");

    let mut pipeline = FramePipeline::from_config(&config);
    let mut renderer = OverlayRenderer::new("Shadow Puppets - Hand View", WIDTH, HEIGHT)?;

    let t0 = Instant::now();
    let startup_delay = Duration::from_millis(config.screen.startup_delay_ms);
    let mut started = false;
    let mut overlay_visible = false;
    let mut debug_timer = Instant::now();

    let cycle = [
        GestureLabel::Rabbit,
        GestureLabel::None,
        GestureLabel::Elephant,
        GestureLabel::None,
        GestureLabel::Butterfly,
        GestureLabel::None,
        GestureLabel::Wolf,
        GestureLabel::None,
    ];

    while renderer.is_open() {
        let now = Instant::now();
        let elapsed = now.duration_since(t0);

        if !started && elapsed >= startup_delay {
            let overlay = pipeline.startup_complete(now);
            apply_overlay(&mut overlay_visible, overlay, &pipeline);
            started = true;
        }

        if renderer.is_key_pressed(Key::H) {
            let overlay = pipeline.handle_intent(UserIntent::ShowGuide, now);
            apply_overlay(&mut overlay_visible, overlay, &pipeline);
        }
        if renderer.is_key_pressed(Key::C) {
            let overlay = pipeline.handle_intent(UserIntent::CloseGuide, now);
            apply_overlay(&mut overlay_visible, overlay, &pipeline);
        }
        if renderer.is_key_pressed(Key::B) {
            let overlay = pipeline.handle_intent(UserIntent::BackToSpotlight, now);
            apply_overlay(&mut overlay_visible, overlay, &pipeline);
        }

        // 自動復帰タイマー
        let overlay = pipeline.tick(now);
        apply_overlay(&mut overlay_visible, overlay, &pipeline);

        // 合成フレーム: 周期でジェスチャーを切り替え、軽く揺らす
        let t = elapsed.as_secs_f32();
        let slot = ((t / POSE_CYCLE_SECS) as usize) % cycle.len();
        let hands = match cycle[slot] {
            GestureLabel::None => Vec::new(),
            label => vec![gesture_hand(label, t)],
        };

        let out = pipeline.process_frame(&hands, now);
        if let Some(trigger) = out.trigger {
            println!("確定: {} → 画面: {}", trigger.label.as_str(), pipeline.current_screen().as_str());
        }
        apply_overlay(&mut overlay_visible, out.overlay, &pipeline);

        renderer.clear();
        if overlay_visible {
            for hand in &out.draw {
                renderer.draw_hand(hand);
            }
            renderer.draw_hold_indicator(out.hold_active);
        }
        renderer.update()?;

        // デバッグスナップショット（1秒に1回）
        if config.debug.view && debug_timer.elapsed().as_secs_f32() >= 1.0 {
            let snapshot = pipeline.debug_snapshot();
            eprintln!(
                "gesture={} screen={} camera={} holding={}",
                snapshot.label.as_str(),
                snapshot.screen.as_str(),
                if snapshot.camera_active { "active" } else { "inactive" },
                out.hold_active
            );
            debug_timer = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(33));
    }

    println!("Shutting down...");
    Ok(())
}

fn apply_overlay(visible: &mut bool, overlay: Option<OverlayRequest>, pipeline: &FramePipeline) {
    match overlay {
        Some(OverlayRequest::Show) => {
            *visible = true;
            println!("画面: {}", pipeline.current_screen().as_str());
        }
        Some(OverlayRequest::Hide) => {
            *visible = false;
            println!("画面: {}", pipeline.current_screen().as_str());
        }
        None => {}
    }
}

fn set(hand: &mut Hand, index: LandmarkIndex, x: f32, y: f32) {
    hand.landmarks[index as usize] = Landmark::new(x, y);
}

/// 時刻tで軽く揺れるジェスチャーの手を合成する
fn gesture_hand(label: GestureLabel, t: f32) -> Hand {
    use LandmarkIndex::*;

    let sway = (t * 1.5).sin() * 0.02;
    let mut hand = Hand::new([Landmark::new(0.5 + sway, 0.55); LandmarkIndex::COUNT]);

    // 手首と付け根で手のひらの輪郭を出す
    set(&mut hand, Wrist, 0.5 + sway, 0.8);
    set(&mut hand, ThumbCmc, 0.42 + sway, 0.72);
    set(&mut hand, IndexMcp, 0.44 + sway, 0.55);
    set(&mut hand, MiddleMcp, 0.5 + sway, 0.53);
    set(&mut hand, RingMcp, 0.56 + sway, 0.55);
    set(&mut hand, PinkyMcp, 0.62 + sway, 0.58);

    match label {
        GestureLabel::Rabbit => {
            set(&mut hand, IndexPip, 0.43 + sway, 0.42);
            set(&mut hand, IndexTip, 0.42 + sway, 0.25);
            set(&mut hand, MiddlePip, 0.52 + sway, 0.42);
            set(&mut hand, MiddleTip, 0.56 + sway, 0.25);
            set(&mut hand, RingTip, 0.55 + sway, 0.62);
            set(&mut hand, PinkyTip, 0.6 + sway, 0.64);
            set(&mut hand, ThumbTip, 0.45 + sway, 0.68);
        }
        GestureLabel::Elephant => {
            set(&mut hand, ThumbIp, 0.4 + sway, 0.6);
            set(&mut hand, ThumbTip, 0.36 + sway, 0.42);
            set(&mut hand, IndexTip, 0.46 + sway, 0.6);
            set(&mut hand, MiddleTip, 0.5 + sway, 0.6);
            set(&mut hand, RingTip, 0.55 + sway, 0.62);
            set(&mut hand, PinkyTip, 0.6 + sway, 0.64);
        }
        GestureLabel::Butterfly => {
            set(&mut hand, ThumbTip, 0.3 + sway, 0.4);
            set(&mut hand, IndexPip, 0.4 + sway, 0.42);
            set(&mut hand, IndexTip, 0.37 + sway, 0.3);
            set(&mut hand, MiddlePip, 0.5 + sway, 0.4);
            set(&mut hand, MiddleTip, 0.5 + sway, 0.26);
            set(&mut hand, RingPip, 0.58 + sway, 0.42);
            set(&mut hand, RingTip, 0.61 + sway, 0.3);
            set(&mut hand, PinkyPip, 0.64 + sway, 0.46);
            set(&mut hand, PinkyTip, 0.68 + sway, 0.34);
        }
        GestureLabel::Wolf => {
            // 親指は曲げたまま、小指側を深く落として傾きを出す
            set(&mut hand, ThumbTip, 0.44 + sway, 0.56);
            set(&mut hand, IndexTip, 0.46 + sway, 0.6);
            set(&mut hand, MiddleTip, 0.5 + sway, 0.62);
            set(&mut hand, RingTip, 0.55 + sway, 0.68);
            set(&mut hand, PinkyTip, 0.6 + sway, 0.74);
        }
        GestureLabel::None => {}
    }
    hand
}
