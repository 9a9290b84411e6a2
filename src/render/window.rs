use anyhow::Result;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::hand::Hand;
use crate::render::silhouette::{
    BACKDROP_COLOR, BONE_RADIUS, HAND_CONNECTIONS, HOLD_COLOR, JOINT_RADIUS, SHADOW_COLOR,
};

/// minifbを使用した影絵オーバーレイレンダラー
///
/// 描画は不透明シルエットのみ。判定ロジックは一切持たない。
pub struct OverlayRenderer {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl OverlayRenderer {
    /// ウィンドウを作成
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        let buffer = vec![BACKDROP_COLOR; width * height];

        Ok(Self {
            window,
            buffer,
            width,
            height,
        })
    }

    /// ウィンドウが開いているか
    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// 背景で塗りつぶす
    pub fn clear(&mut self) {
        self.buffer.fill(BACKDROP_COLOR);
    }

    /// 手を影絵シルエットとして描画
    pub fn draw_hand(&mut self, hand: &Hand) {
        let w = self.width as u32;
        let h = self.height as u32;

        // 骨を太い線で描画
        for (start_idx, end_idx) in HAND_CONNECTIONS.iter() {
            let (x1, y1) = hand.get(*start_idx).to_pixel(w, h);
            let (x2, y2) = hand.get(*end_idx).to_pixel(w, h);
            self.draw_bone(x1, y1, x2, y2, BONE_RADIUS, SHADOW_COLOR);
        }

        // 関節を塗りつぶし円で描画
        for lm in hand.landmarks.iter() {
            let (px, py) = lm.to_pixel(w, h);
            self.draw_circle(px, py, JOINT_RADIUS, SHADOW_COLOR);
        }
    }

    /// ホールド進行インジケータ（右上の円）
    pub fn draw_hold_indicator(&mut self, active: bool) {
        if !active {
            return;
        }
        let cx = self.width as i32 - 30;
        self.draw_circle(cx, 30, 12, HOLD_COLOR);
    }

    /// バッファをウィンドウに表示
    pub fn update(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)?;
        Ok(())
    }

    /// Bresenhamで線分をなぞりながら円を置いて太い骨にする
    fn draw_bone(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, radius: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.draw_circle(x, y, radius, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// 円を描画（塗りつぶし）
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: u32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// ピクセルをセット（境界チェック付き）
    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize * self.width + x as usize] = color;
        }
    }
}
