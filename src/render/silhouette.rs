use crate::hand::LandmarkIndex;

/// 手のシルエット接続定義 (開始ランドマーク, 終了ランドマーク)
pub const HAND_CONNECTIONS: [(LandmarkIndex, LandmarkIndex); 23] = [
    // 親指
    (LandmarkIndex::Wrist, LandmarkIndex::ThumbCmc),
    (LandmarkIndex::ThumbCmc, LandmarkIndex::ThumbMcp),
    (LandmarkIndex::ThumbMcp, LandmarkIndex::ThumbIp),
    (LandmarkIndex::ThumbIp, LandmarkIndex::ThumbTip),
    // 人差し指
    (LandmarkIndex::Wrist, LandmarkIndex::IndexMcp),
    (LandmarkIndex::IndexMcp, LandmarkIndex::IndexPip),
    (LandmarkIndex::IndexPip, LandmarkIndex::IndexDip),
    (LandmarkIndex::IndexDip, LandmarkIndex::IndexTip),
    // 中指
    (LandmarkIndex::Wrist, LandmarkIndex::MiddleMcp),
    (LandmarkIndex::MiddleMcp, LandmarkIndex::MiddlePip),
    (LandmarkIndex::MiddlePip, LandmarkIndex::MiddleDip),
    (LandmarkIndex::MiddleDip, LandmarkIndex::MiddleTip),
    // 薬指
    (LandmarkIndex::Wrist, LandmarkIndex::RingMcp),
    (LandmarkIndex::RingMcp, LandmarkIndex::RingPip),
    (LandmarkIndex::RingPip, LandmarkIndex::RingDip),
    (LandmarkIndex::RingDip, LandmarkIndex::RingTip),
    // 小指
    (LandmarkIndex::Wrist, LandmarkIndex::PinkyMcp),
    (LandmarkIndex::PinkyMcp, LandmarkIndex::PinkyPip),
    (LandmarkIndex::PinkyPip, LandmarkIndex::PinkyDip),
    (LandmarkIndex::PinkyDip, LandmarkIndex::PinkyTip),
    // 手のひら
    (LandmarkIndex::IndexMcp, LandmarkIndex::MiddleMcp),
    (LandmarkIndex::MiddleMcp, LandmarkIndex::RingMcp),
    (LandmarkIndex::RingMcp, LandmarkIndex::PinkyMcp),
];

/// 影の色 (RGB)
pub const SHADOW_COLOR: u32 = 0x141414;

/// スポットライト背景色 (RGB)
pub const BACKDROP_COLOR: u32 = 0xF2E3C2;

/// ホールドインジケータの色 (RGB)
pub const HOLD_COLOR: u32 = 0xE0802F;

/// 骨の描画半径（ピクセル）
pub const BONE_RADIUS: i32 = 5;

/// 関節の描画半径（ピクセル）
pub const JOINT_RADIUS: i32 = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connections_cover_all_landmarks() {
        // 21ランドマーク全てがどこかの接続に現れる
        let mut seen = [false; LandmarkIndex::COUNT];
        for (start, end) in HAND_CONNECTIONS.iter() {
            seen[*start as usize] = true;
            seen[*end as usize] = true;
        }
        for (i, s) in seen.iter().enumerate() {
            assert!(s, "landmark {} missing from connections", i);
        }
    }

    #[test]
    fn test_each_digit_chain_ends_at_tip() {
        use LandmarkIndex::*;
        for tip in [ThumbTip, IndexTip, MiddleTip, RingTip, PinkyTip] {
            let count = HAND_CONNECTIONS
                .iter()
                .filter(|(_, end)| *end == tip)
                .count();
            assert_eq!(count, 1, "{:?} should terminate exactly one bone", tip);
        }
    }
}
