use std::time::Instant;

use crate::config::Config;
use crate::gesture::{GestureClassifier, GestureLabel, HoldTracker, TriggerEvent};
use crate::hand::{Hand, Landmark, LandmarkIndex};
use crate::screen::{OverlayRequest, Screen, ScreenController, UserIntent};

/// 1フレーム処理の結果
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// 描画層へ渡す手。分類結果に関係なく受け取ったまま毎フレーム返す
    pub draw: Vec<Hand>,
    /// このフレームで発生した画面遷移のオーバーレイ要求
    pub overlay: Option<OverlayRequest>,
    /// このフレームで確定したジェスチャー
    pub trigger: Option<TriggerEvent>,
    /// ホールド進行インジケータの表示状態
    pub hold_active: bool,
}

/// デバッグ表示用の読み取り専用スナップショット
#[derive(Debug, Clone, Copy)]
pub struct DebugSnapshot {
    pub label: GestureLabel,
    pub thumb_tip: Option<Landmark>,
    pub index_tip: Option<Landmark>,
    pub screen: Screen,
    pub camera_active: bool,
}

/// フレームパイプライン
///
/// 知覚コールバック・ユーザー操作・タイマーを1本のタイムラインで消費する
/// 同期ドライバ。分類器・ホールドフィルタ・画面ステートマシンを単独所有し、
/// 全エントリポイントは完走してから次のイベントを受ける。
pub struct FramePipeline {
    classifier: GestureClassifier,
    hold: HoldTracker,
    screen: ScreenController,
    last_label: GestureLabel,
    last_tips: Option<(Landmark, Landmark)>,
    camera_active: bool,
}

impl FramePipeline {
    pub fn from_config(config: &Config) -> Self {
        Self {
            classifier: GestureClassifier::from_config(&config.classify),
            hold: HoldTracker::from_config(&config.hold),
            screen: ScreenController::from_config(&config.screen),
            last_label: GestureLabel::None,
            last_tips: None,
            camera_active: false,
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.screen.current()
    }

    pub fn is_holding(&self) -> bool {
        self.hold.is_holding()
    }

    /// 起動タイマー満了（ドライバのイベントループから1回）
    pub fn startup_complete(&mut self, now: Instant) -> Option<OverlayRequest> {
        self.screen.startup_complete(now)
    }

    pub fn handle_intent(&mut self, intent: UserIntent, now: Instant) -> Option<OverlayRequest> {
        self.screen.handle_intent(intent, now)
    }

    /// 自動復帰タイマーの判定（イベントループから毎周期）
    pub fn tick(&mut self, now: Instant) -> Option<OverlayRequest> {
        self.screen.tick(now)
    }

    /// 知覚コールバック1回ぶんの処理
    ///
    /// フレームNで確定したトリガーはこの呼び出し内で画面に適用される。
    /// フレームN+1の評価がそれより先行することはない。
    pub fn process_frame(&mut self, hands: &[Hand], now: Instant) -> FrameOutput {
        self.camera_active = true;

        // 複数手が検出されても分類は先頭の手のみ
        let primary = hands.first();
        let label = match primary {
            Some(hand) => self.classifier.classify(hand),
            None => GestureLabel::None,
        };
        self.last_label = label;
        self.last_tips = primary.map(|hand| {
            (
                *hand.get(LandmarkIndex::ThumbTip),
                *hand.get(LandmarkIndex::IndexTip),
            )
        });

        // ホールドフィルタへの入力はspotlight画面のみ。
        // 手なしフレームと他画面では状態を持ち越さない
        let trigger = if primary.is_none() {
            self.hold.reset();
            None
        } else if self.screen.current() == Screen::Spotlight {
            self.hold.update(label, now)
        } else {
            self.hold.reset();
            None
        };

        let overlay = match trigger {
            Some(t) => self.screen.handle_trigger(t, now),
            None => None,
        };

        FrameOutput {
            draw: hands.to_vec(),
            overlay,
            trigger,
            hold_active: self.hold.is_holding(),
        }
    }

    /// 知覚側の停止通知
    ///
    /// 画面は現状維持のままジェスチャー入力だけが止まる。復旧は知覚側の責務。
    pub fn perception_lost(&mut self) {
        self.camera_active = false;
        self.hold.reset();
        self.last_tips = None;
        self.last_label = GestureLabel::None;
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            label: self.last_label,
            thumb_tip: self.last_tips.map(|(thumb, _)| thumb),
            index_tip: self.last_tips.map(|(_, index)| index),
            screen: self.screen.current(),
            camera_active: self.camera_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pipeline() -> FramePipeline {
        FramePipeline::from_config(&Config::default())
    }

    /// spotlight画面まで進めたパイプライン
    fn pipeline_at_spotlight(t0: Instant) -> FramePipeline {
        let mut p = pipeline();
        p.startup_complete(t0);
        assert_eq!(p.current_screen(), Screen::Spotlight);
        p
    }

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    fn set(hand: &mut Hand, index: LandmarkIndex, x: f32, y: f32) {
        hand.landmarks[index as usize] = Landmark::new(x, y);
    }

    /// ピースサイン（ウサギ）
    fn rabbit_hand() -> Hand {
        use LandmarkIndex::*;
        let mut hand = Hand::new([Landmark::new(0.5, 0.5); LandmarkIndex::COUNT]);
        set(&mut hand, IndexTip, 0.45, 0.3);
        set(&mut hand, MiddleTip, 0.55, 0.3);
        set(&mut hand, RingTip, 0.5, 0.6);
        set(&mut hand, PinkyTip, 0.5, 0.6);
        set(&mut hand, ThumbTip, 0.5, 0.6);
        hand
    }

    /// どのジェスチャーにも該当しない手
    fn neutral_hand() -> Hand {
        Hand::new([Landmark::new(0.5, 0.5); LandmarkIndex::COUNT])
    }

    #[test]
    fn test_hands_echoed_for_drawing_every_frame() {
        let t0 = Instant::now();
        let mut p = pipeline_at_spotlight(t0);
        // 分類結果がNoneでも手はそのまま描画層へ
        let out = p.process_frame(&[neutral_hand(), rabbit_hand()], t0);
        assert_eq!(out.draw.len(), 2);
        assert_eq!(out.draw[0], neutral_hand());
        // 手なしフレームは空
        let out = p.process_frame(&[], at(t0, 33));
        assert!(out.draw.is_empty());
    }

    #[test]
    fn test_first_hand_wins_classification() {
        let t0 = Instant::now();
        let mut p = pipeline_at_spotlight(t0);
        // 2番目の手がウサギでも先頭の手で分類する
        p.process_frame(&[neutral_hand(), rabbit_hand()], t0);
        assert_eq!(p.debug_snapshot().label, GestureLabel::None);
        assert!(!p.is_holding());
    }

    #[test]
    fn test_scenario_rabbit_hold_to_reveal() {
        // フレーム列 [rabbit@0, rabbit@1000, rabbit@2100], holdDuration=2000
        let t0 = Instant::now();
        let mut p = pipeline_at_spotlight(t0);

        let out = p.process_frame(&[rabbit_hand()], at(t0, 0));
        assert!(out.trigger.is_none());
        assert!(out.hold_active);

        let out = p.process_frame(&[rabbit_hand()], at(t0, 1000));
        assert!(out.trigger.is_none());
        assert_eq!(p.current_screen(), Screen::Spotlight);

        // 2100msで確定し、同フレーム内で画面遷移まで適用される
        let out = p.process_frame(&[rabbit_hand()], at(t0, 2100));
        assert_eq!(
            out.trigger,
            Some(TriggerEvent {
                label: GestureLabel::Rabbit
            })
        );
        assert_eq!(p.current_screen(), Screen::RabbitReveal);
        assert_eq!(out.overlay, Some(OverlayRequest::Hide));
    }

    #[test]
    fn test_scenario_interrupted_hold_restarts() {
        // フレーム列 [rabbit@0, 手なし@500, rabbit@1000, rabbit@2900, rabbit@3100]
        let t0 = Instant::now();
        let mut p = pipeline_at_spotlight(t0);

        assert!(p.process_frame(&[rabbit_hand()], at(t0, 0)).trigger.is_none());
        // 手なしフレームでホールドはゼロに戻る
        let out = p.process_frame(&[], at(t0, 500));
        assert!(out.trigger.is_none());
        assert!(!out.hold_active);

        assert!(p.process_frame(&[rabbit_hand()], at(t0, 1000)).trigger.is_none());
        // 2900ms時点では1000msからの1900msしか保持していない
        assert!(p.process_frame(&[rabbit_hand()], at(t0, 2900)).trigger.is_none());
        assert_eq!(p.current_screen(), Screen::Spotlight);

        // 期限(1000+2000=3000ms)以降の最初のフレームで発火する
        let out = p.process_frame(&[rabbit_hand()], at(t0, 3100));
        assert!(out.trigger.is_some());
        assert_eq!(p.current_screen(), Screen::RabbitReveal);
    }

    #[test]
    fn test_hold_ignored_outside_spotlight() {
        let t0 = Instant::now();
        let mut p = pipeline_at_spotlight(t0);
        p.handle_intent(UserIntent::ShowGuide, t0);
        assert_eq!(p.current_screen(), Screen::GestureGuide);

        // ガイド画面では何秒ホールドしてもトリガーは出ない
        for ms in [0, 1000, 2000, 3000, 4000] {
            let out = p.process_frame(&[rabbit_hand()], at(t0, ms));
            assert!(out.trigger.is_none());
            assert!(!out.hold_active);
        }
        assert_eq!(p.current_screen(), Screen::GestureGuide);
    }

    #[test]
    fn test_hold_does_not_carry_across_guide_visit() {
        let t0 = Instant::now();
        let mut p = pipeline_at_spotlight(t0);

        // スポットライトで1900msホールドしてからガイドへ
        p.process_frame(&[rabbit_hand()], at(t0, 0));
        p.process_frame(&[rabbit_hand()], at(t0, 1900));
        p.handle_intent(UserIntent::ShowGuide, at(t0, 1950));
        p.process_frame(&[rabbit_hand()], at(t0, 2000));
        p.handle_intent(UserIntent::CloseGuide, at(t0, 2050));

        // 復帰直後のフレームで古い開始時刻から発火してはいけない
        let out = p.process_frame(&[rabbit_hand()], at(t0, 2100));
        assert!(out.trigger.is_none());
        // 新規ホールドとして2100msから数え直し
        let out = p.process_frame(&[rabbit_hand()], at(t0, 4100));
        assert!(out.trigger.is_some());
    }

    #[test]
    fn test_auto_return_through_tick() {
        let t0 = Instant::now();
        let mut p = pipeline_at_spotlight(t0);
        p.process_frame(&[rabbit_hand()], at(t0, 0));
        p.process_frame(&[rabbit_hand()], at(t0, 2000));
        assert_eq!(p.current_screen(), Screen::RabbitReveal);

        assert_eq!(p.tick(at(t0, 4999)), None);
        let overlay = p.tick(at(t0, 5000));
        assert_eq!(p.current_screen(), Screen::Spotlight);
        assert_eq!(overlay, Some(OverlayRequest::Show));
        // ちょうど1回だけ
        assert_eq!(p.tick(at(t0, 9000)), None);
    }

    #[test]
    fn test_early_back_then_stale_timer_never_fires() {
        let t0 = Instant::now();
        let mut p = pipeline_at_spotlight(t0);
        p.process_frame(&[rabbit_hand()], at(t0, 0));
        p.process_frame(&[rabbit_hand()], at(t0, 2000));
        assert_eq!(p.current_screen(), Screen::RabbitReveal);

        // 500ms後に手動復帰
        p.handle_intent(UserIntent::BackToSpotlight, at(t0, 2500));
        assert_eq!(p.current_screen(), Screen::Spotlight);

        // 元の自動復帰期限(5000ms)を過ぎても2度目の遷移は起きない
        assert_eq!(p.tick(at(t0, 5100)), None);
        assert_eq!(p.current_screen(), Screen::Spotlight);
    }

    #[test]
    fn test_perception_lost_keeps_screen() {
        let t0 = Instant::now();
        let mut p = pipeline_at_spotlight(t0);
        p.process_frame(&[rabbit_hand()], at(t0, 0));
        assert!(p.is_holding());
        assert!(p.debug_snapshot().camera_active);

        p.perception_lost();
        // 画面は現状維持、ホールドとカメラフラグだけ落ちる
        assert_eq!(p.current_screen(), Screen::Spotlight);
        assert!(!p.is_holding());
        assert!(!p.debug_snapshot().camera_active);
    }

    #[test]
    fn test_debug_snapshot_tracks_tips() {
        let t0 = Instant::now();
        let mut p = pipeline_at_spotlight(t0);
        let hand = rabbit_hand();
        p.process_frame(&[hand.clone()], t0);

        let snapshot = p.debug_snapshot();
        assert_eq!(snapshot.label, GestureLabel::Rabbit);
        assert_eq!(snapshot.screen, Screen::Spotlight);
        assert_eq!(
            snapshot.thumb_tip,
            Some(*hand.get(LandmarkIndex::ThumbTip))
        );
        assert_eq!(
            snapshot.index_tip,
            Some(*hand.get(LandmarkIndex::IndexTip))
        );

        // 手なしフレームで座標は消える
        p.process_frame(&[], at(t0, 33));
        let snapshot = p.debug_snapshot();
        assert_eq!(snapshot.label, GestureLabel::None);
        assert!(snapshot.thumb_tip.is_none());
    }

    #[test]
    fn test_malformed_landmarks_treated_as_no_hand() {
        let t0 = Instant::now();
        let mut p = pipeline_at_spotlight(t0);
        p.process_frame(&[rabbit_hand()], at(t0, 0));
        assert!(p.is_holding());

        // 21点に満たない点列はHandにならず、手なしフレーム扱いになる
        let short = vec![Landmark::new(0.5, 0.5); 10];
        let hands: Vec<Hand> = Hand::from_slice(&short).into_iter().collect();
        let out = p.process_frame(&hands, at(t0, 500));
        assert!(!out.hold_active);
        assert!(out.trigger.is_none());
    }
}
