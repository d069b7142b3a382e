//! # AlphaBlend 模块
//!
//! 单个混合求值器：在 `duration` 内把进度从 0 推进到 1，并按 `BlendOption` 整形。
//!
//! 求值器只关注时间轴，不知道被混合的是什么属性。

use crate::easing::BlendOption;

/// 混合时长阈值（秒）
///
/// 小于等于此值的时长视为瞬时混合。
pub const BLEND_EPSILON: f32 = 1.0e-4;

/// 混合求值器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaBlend {
    /// 混合时长（秒），瞬时混合为 0
    duration: f32,
    /// 混合形状
    option: BlendOption,
    /// 已推进的时间
    elapsed: f32,
    /// 当前混合值（0.0 - 1.0，已整形）
    blended: f32,
}

impl Default for AlphaBlend {
    fn default() -> Self {
        Self::new(0.0, BlendOption::default())
    }
}

impl AlphaBlend {
    /// 创建新的求值器
    ///
    /// 时长不超过 [`BLEND_EPSILON`]（或非有限值）时视为瞬时混合。
    pub fn new(duration: f32, option: BlendOption) -> Self {
        let duration = if is_instant(duration) { 0.0 } else { duration };
        let mut blend = Self {
            duration,
            option,
            elapsed: 0.0,
            blended: 0.0,
        };
        blend.refresh();
        blend
    }

    /// 推进 `dt` 秒
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
        self.refresh();
    }

    /// 直接定位到 `time` 秒处
    pub fn seek(&mut self, time: f32) {
        self.elapsed = time.max(0.0);
        self.refresh();
    }

    /// 回到起点
    pub fn reset(&mut self) {
        self.seek(0.0);
    }

    fn refresh(&mut self) {
        self.blended = if self.duration <= 0.0 {
            1.0
        } else {
            self.option.apply(self.elapsed / self.duration)
        };
    }

    /// 当前整形后的混合值
    pub fn blended_value(&self) -> f32 {
        self.blended
    }

    /// 未整形的线性进度
    pub fn linear_progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// 混合时长
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// 混合形状
    pub fn option(&self) -> BlendOption {
        self.option
    }

    /// 已推进的时间
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// 是否为瞬时混合
    pub fn is_instant(&self) -> bool {
        self.duration <= 0.0
    }

    /// 是否已完成
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// 时长是否视为瞬时
pub fn is_instant(duration: f32) -> bool {
    // NaN 也视为瞬时
    duration.is_nan() || duration <= BLEND_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_creation() {
        let blend = AlphaBlend::new(0.5, BlendOption::Linear);
        assert_eq!(blend.duration(), 0.5);
        assert_eq!(blend.blended_value(), 0.0);
        assert!(!blend.is_instant());
        assert!(!blend.is_complete());
    }

    #[test]
    fn test_blend_update() {
        let mut blend = AlphaBlend::new(1.0, BlendOption::Linear);

        blend.update(0.25);
        assert_eq!(blend.blended_value(), 0.25);

        blend.update(0.25);
        assert_eq!(blend.blended_value(), 0.5);

        // 超出时长后保持在 1
        blend.update(2.0);
        assert_eq!(blend.blended_value(), 1.0);
        assert!(blend.is_complete());
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut blend = AlphaBlend::new(1.0, BlendOption::Linear);
        blend.update(0.5);
        blend.update(-0.3);
        assert_eq!(blend.elapsed(), 0.5);
    }

    #[test]
    fn test_seek_and_reset() {
        let mut blend = AlphaBlend::new(2.0, BlendOption::Linear);
        blend.seek(1.0);
        assert_eq!(blend.blended_value(), 0.5);

        blend.reset();
        assert_eq!(blend.blended_value(), 0.0);
        assert_eq!(blend.elapsed(), 0.0);
    }

    #[test]
    fn test_shaped_progress() {
        let mut blend = AlphaBlend::new(1.0, BlendOption::QuadraticInOut);
        blend.update(0.25);
        assert_eq!(blend.linear_progress(), 0.25);
        assert!((blend.blended_value() - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        for duration in [0.0, BLEND_EPSILON, -1.0, f32::NAN] {
            let blend = AlphaBlend::new(duration, BlendOption::Linear);
            assert!(blend.is_instant());
            assert_eq!(blend.duration(), 0.0);
            assert_eq!(blend.blended_value(), 1.0);
            assert!(blend.is_complete());
        }
    }
}
