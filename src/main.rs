use anyhow::Result;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use shadow_puppets::config::Config;
use shadow_puppets::gesture::GestureLabel;
use shadow_puppets::hand::{Hand, Landmark, LandmarkIndex};
use shadow_puppets::pipeline::FramePipeline;
use shadow_puppets::screen::{OverlayRequest, UserIntent};

const CONFIG_PATH: &str = "config.toml";

/// フレーム間隔（シミュレーション時間）
const FRAME_STEP_MS: u64 = 500;

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("=== Shadow Puppets - Gesture Stage ({}) ===", env!("GIT_VERSION"));
    println!("Hold: {}ms  Auto return: {}ms", config.hold.duration_ms, config.screen.auto_return_ms);
    println!();
    println!("コマンド:");
    println!("  r / e / b / w - ジェスチャーの手をホールド時間ぶん送る (例: r = ウサギ)");
    println!("  o             - どの形でもない開いた手を1フレーム送る");
    println!("  n             - 手なしフレームを送る");
    println!("  g / c / k     - ガイド表示 / ガイドを閉じる / スポットライトへ戻る");
    println!("  t             - 自動復帰タイマーの期限まで時間を進める");
    println!("  x             - カメラ停止をシミュレート");
    println!("  d             - デバッグスナップショット表示");
    println!("  q             - 終了");
    println!();

    let mut pipeline = FramePipeline::from_config(&config);
    let t0 = Instant::now();
    let mut sim_ms: u64 = 0;

    // 起動タイマー: start → spotlight
    sim_ms += config.screen.startup_delay_ms;
    let overlay = pipeline.startup_complete(at(t0, sim_ms));
    report_transition(&pipeline, overlay);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let command = input.trim();

        if command.is_empty() {
            continue;
        }

        match command {
            "r" | "e" | "b" | "w" => {
                let label = match command {
                    "r" => GestureLabel::Rabbit,
                    "e" => GestureLabel::Elephant,
                    "b" => GestureLabel::Butterfly,
                    _ => GestureLabel::Wolf,
                };
                println!("{} の手を送信中...", label.as_str());
                let hand = gesture_hand(label);
                // ホールド時間を満たすまでフレームを刻む
                let mut held_ms: u64 = 0;
                loop {
                    let out = pipeline.process_frame(&[hand.clone()], at(t0, sim_ms));
                    if let Some(trigger) = out.trigger {
                        println!("  確定: {} (t={}ms)", trigger.label.as_str(), sim_ms);
                        report_transition(&pipeline, out.overlay);
                        break;
                    }
                    if !out.hold_active {
                        println!("  ホールド不可（画面: {}）", pipeline.current_screen().as_str());
                        break;
                    }
                    held_ms += FRAME_STEP_MS;
                    sim_ms += FRAME_STEP_MS;
                    if held_ms > config.hold.duration_ms + FRAME_STEP_MS {
                        println!("  確定せず");
                        break;
                    }
                }
            }
            "o" => {
                sim_ms += 33;
                let out = pipeline.process_frame(&[neutral_hand()], at(t0, sim_ms));
                println!("分類: {}", pipeline.debug_snapshot().label.as_str());
                report_transition(&pipeline, out.overlay);
            }
            "n" => {
                sim_ms += 33;
                let out = pipeline.process_frame(&[], at(t0, sim_ms));
                println!("手なしフレーム送信（ホールド解除）");
                report_transition(&pipeline, out.overlay);
            }
            "g" => {
                sim_ms += 33;
                let overlay = pipeline.handle_intent(UserIntent::ShowGuide, at(t0, sim_ms));
                report_transition(&pipeline, overlay);
            }
            "c" => {
                sim_ms += 33;
                let overlay = pipeline.handle_intent(UserIntent::CloseGuide, at(t0, sim_ms));
                report_transition(&pipeline, overlay);
            }
            "k" => {
                sim_ms += 33;
                let overlay = pipeline.handle_intent(UserIntent::BackToSpotlight, at(t0, sim_ms));
                report_transition(&pipeline, overlay);
            }
            "t" => {
                sim_ms += config.screen.auto_return_ms;
                let overlay = pipeline.tick(at(t0, sim_ms));
                if overlay.is_none() && !pipeline.current_screen().is_reveal() {
                    println!("予約済みタイマーなし");
                }
                report_transition(&pipeline, overlay);
            }
            "x" => {
                pipeline.perception_lost();
                // 知覚停止は致命的ではない: 画面は維持され、入力だけ止まる
                println!("カメラ停止。ジェスチャー入力は届かなくなります（画面: {}）",
                    pipeline.current_screen().as_str());
            }
            "d" => {
                let snapshot = pipeline.debug_snapshot();
                println!("Gesture: {}", snapshot.label.as_str());
                match (snapshot.thumb_tip, snapshot.index_tip) {
                    (Some(thumb), Some(index)) => {
                        println!("Thumb Y: {:.3}", thumb.y);
                        println!("Index Y: {:.3}", index.y);
                    }
                    _ => println!("Landmarks: (no hand)"),
                }
                println!("Screen: {}", snapshot.screen.as_str());
                println!("Camera: {}", if snapshot.camera_active { "Active" } else { "Inactive" });
            }
            "q" => {
                println!("終了します");
                break;
            }
            _ => {
                println!("不明なコマンド: {}", command);
            }
        }
    }

    Ok(())
}

fn at(t0: Instant, ms: u64) -> Instant {
    t0 + Duration::from_millis(ms)
}

fn report_transition(pipeline: &FramePipeline, overlay: Option<OverlayRequest>) {
    match overlay {
        Some(OverlayRequest::Show) => {
            println!("画面: {} (オーバーレイ表示)", pipeline.current_screen().as_str());
        }
        Some(OverlayRequest::Hide) => {
            println!("画面: {} (オーバーレイ非表示)", pipeline.current_screen().as_str());
        }
        None => {}
    }
}

fn set(hand: &mut Hand, index: LandmarkIndex, x: f32, y: f32) {
    hand.landmarks[index as usize] = Landmark::new(x, y);
}

/// 全関節を基準位置に置いた手
fn neutral_hand() -> Hand {
    Hand::new([Landmark::new(0.5, 0.5); LandmarkIndex::COUNT])
}

/// ラベルに対応する典型的な手の形
fn gesture_hand(label: GestureLabel) -> Hand {
    use LandmarkIndex::*;
    let mut hand = neutral_hand();
    match label {
        GestureLabel::Rabbit => {
            set(&mut hand, IndexTip, 0.44, 0.28);
            set(&mut hand, MiddleTip, 0.56, 0.28);
            set(&mut hand, RingTip, 0.5, 0.62);
            set(&mut hand, PinkyTip, 0.5, 0.62);
            set(&mut hand, ThumbTip, 0.5, 0.6);
        }
        GestureLabel::Elephant => {
            set(&mut hand, ThumbTip, 0.42, 0.3);
            set(&mut hand, IndexTip, 0.5, 0.62);
            set(&mut hand, MiddleTip, 0.5, 0.62);
            set(&mut hand, RingTip, 0.5, 0.62);
            set(&mut hand, PinkyTip, 0.5, 0.62);
        }
        GestureLabel::Butterfly => {
            set(&mut hand, ThumbTip, 0.25, 0.3);
            set(&mut hand, IndexTip, 0.35, 0.26);
            set(&mut hand, MiddleTip, 0.5, 0.24);
            set(&mut hand, RingTip, 0.62, 0.26);
            set(&mut hand, PinkyTip, 0.72, 0.3);
        }
        GestureLabel::Wolf => {
            set(&mut hand, ThumbTip, 0.42, 0.54);
            set(&mut hand, IndexTip, 0.5, 0.62);
            set(&mut hand, MiddleTip, 0.5, 0.62);
            set(&mut hand, RingTip, 0.5, 0.64);
            set(&mut hand, PinkyTip, 0.5, 0.76);
        }
        GestureLabel::None => {}
    }
    hand
}
