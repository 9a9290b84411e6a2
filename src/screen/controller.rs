use std::time::{Duration, Instant};

use crate::config::ScreenConfig;
use crate::gesture::{GestureLabel, TriggerEvent};

/// プレゼンテーションの画面（常にちょうど1つがカレント）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Spotlight,
    GestureGuide,
    RabbitReveal,
    ElephantReveal,
    ButterflyReveal,
    WolfReveal,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Spotlight => "spotlight",
            Self::GestureGuide => "gestureGuide",
            Self::RabbitReveal => "rabbitReveal",
            Self::ElephantReveal => "elephantReveal",
            Self::ButterflyReveal => "butterflyReveal",
            Self::WolfReveal => "wolfReveal",
        }
    }

    /// ジェスチャー確定で入るリビール画面か
    pub fn is_reveal(&self) -> bool {
        matches!(
            self,
            Self::RabbitReveal | Self::ElephantReveal | Self::ButterflyReveal | Self::WolfReveal
        )
    }
}

/// 明示的なユーザー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIntent {
    ShowGuide,
    CloseGuide,
    BackToSpotlight,
}

/// 描画レイヤーへのカメラオーバーレイ表示要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    Show,
    Hide,
}

/// 予約済みの自動復帰
///
/// fromは予約した時点の画面。発火前に画面が変わっていたら破棄する。
struct PendingReturn {
    from: Screen,
    deadline: Instant,
}

/// 画面遷移ステートマシン
///
/// カレント画面の変更は全てswitch_to経由。リビール画面に入ると
/// スポットライトへの自動復帰を予約し、どの遷移でも既存予約を無効化する。
pub struct ScreenController {
    current: Screen,
    pending_return: Option<PendingReturn>,
    auto_return: Duration,
}

impl ScreenController {
    pub fn new(auto_return: Duration) -> Self {
        Self {
            current: Screen::Start,
            pending_return: None,
            auto_return,
        }
    }

    pub fn from_config(config: &ScreenConfig) -> Self {
        Self::new(Duration::from_millis(config.auto_return_ms))
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// 起動タイマー満了: start → spotlight
    pub fn startup_complete(&mut self, now: Instant) -> Option<OverlayRequest> {
        if self.current != Screen::Start {
            return None;
        }
        self.switch_to(Screen::Spotlight, now)
    }

    /// 確定ジェスチャーを消費する
    ///
    /// spotlight以外で届いたトリガーは破棄（キューしない）。
    pub fn handle_trigger(&mut self, trigger: TriggerEvent, now: Instant) -> Option<OverlayRequest> {
        if self.current != Screen::Spotlight {
            return None;
        }
        let target = match trigger.label {
            GestureLabel::Rabbit => Screen::RabbitReveal,
            GestureLabel::Elephant => Screen::ElephantReveal,
            GestureLabel::Butterfly => Screen::ButterflyReveal,
            GestureLabel::Wolf => Screen::WolfReveal,
            // 上流のホールドフィルタはNoneを発行しない。届いても無視
            GestureLabel::None => return None,
        };
        self.switch_to(target, now)
    }

    pub fn handle_intent(&mut self, intent: UserIntent, now: Instant) -> Option<OverlayRequest> {
        match (intent, self.current) {
            (UserIntent::ShowGuide, Screen::Spotlight) => self.switch_to(Screen::GestureGuide, now),
            (UserIntent::CloseGuide, Screen::GestureGuide) => self.switch_to(Screen::Spotlight, now),
            (UserIntent::BackToSpotlight, s) if s.is_reveal() || s == Screen::GestureGuide => {
                self.switch_to(Screen::Spotlight, now)
            }
            _ => None,
        }
    }

    /// 予約済み自動復帰の判定。イベントループから毎周期呼ぶ。
    ///
    /// 期限が来ていても、予約時の画面から既に離れていれば発火しない。
    pub fn tick(&mut self, now: Instant) -> Option<OverlayRequest> {
        let scheduled_on = match self.pending_return.take() {
            Some(pending) => {
                if !pending.deadline.saturating_duration_since(now).is_zero() {
                    // 期限前: 予約を戻す
                    self.pending_return = Some(pending);
                    return None;
                }
                pending.from
            }
            None => return None,
        };
        if scheduled_on != self.current {
            return None;
        }
        self.switch_to(Screen::Spotlight, now)
    }

    fn switch_to(&mut self, target: Screen, now: Instant) -> Option<OverlayRequest> {
        // どの遷移でも既存の予約は無効化（古いタイマーの二重発火防止）
        self.pending_return = None;
        self.current = target;

        if target.is_reveal() {
            self.pending_return = Some(PendingReturn {
                from: target,
                deadline: now + self.auto_return,
            });
        }

        match target {
            Screen::Spotlight => Some(OverlayRequest::Show),
            Screen::GestureGuide => Some(OverlayRequest::Hide),
            t if t.is_reveal() => Some(OverlayRequest::Hide),
            _ => None,
        }
    }
}
