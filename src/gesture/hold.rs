use std::time::{Duration, Instant};

use crate::config::HoldConfig;
use crate::gesture::classify::GestureLabel;

/// ホールド完了で確定したジェスチャー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub label: GestureLabel,
}

/// ジェスチャーのホールド確定フィルタ
///
/// 同一の非Noneラベルがhold_duration連続した時点で1回だけトリガーを発行する。
/// ラベルが変わる・手が消える・resetで即ゼロからやり直し。
///
/// activeは(ラベル, 開始時刻)のペア: 開始時刻はラベルがある時だけ存在する。
pub struct HoldTracker {
    hold_duration: Duration,
    active: Option<(GestureLabel, Instant)>,
}

impl HoldTracker {
    pub fn new(hold_duration: Duration) -> Self {
        Self {
            hold_duration,
            active: None,
        }
    }

    pub fn from_config(config: &HoldConfig) -> Self {
        Self::new(Duration::from_millis(config.duration_ms))
    }

    /// フレームごとのラベルを消費し、ホールド完了時のみトリガーを返す
    ///
    /// Noneラベルがトリガーになることはない。
    pub fn update(&mut self, label: GestureLabel, now: Instant) -> Option<TriggerEvent> {
        if label == GestureLabel::None {
            self.active = None;
            return None;
        }

        match self.active {
            Some((held, started)) if held == label => {
                if now.duration_since(started) >= self.hold_duration {
                    // 発行後は完全クリア: 再発行には新規ホールドが必要
                    self.active = None;
                    Some(TriggerEvent { label })
                } else {
                    None
                }
            }
            // ラベル変更はタイマー再スタート（部分的な持ち越しなし）
            _ => {
                self.active = Some((label, now));
                None
            }
        }
    }

    /// 手が検出されなかったフレームで呼ぶ
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// ホールド進行中か（UIの進行インジケータ用）
    pub fn is_holding(&self) -> bool {
        self.active.is_some()
    }
}
