//! # Easing 模块
//!
//! 混合形状选择器，决定混入/混出阶段的进度曲线。

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// 混合形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendOption {
    /// 线性（匀速）
    #[default]
    Linear,
    /// 三次插值（两端切线为 0）
    Cubic,
    /// Hermite 三次平滑（smoothstep）
    HermiteCubic,
    /// 正弦
    Sinusoidal,
    /// 二次缓入缓出
    QuadraticInOut,
    /// 三次缓入缓出
    CubicInOut,
    /// 四次缓入缓出
    QuarticInOut,
    /// 五次缓入缓出
    QuinticInOut,
    /// 圆形缓入
    CircularIn,
    /// 圆形缓出
    CircularOut,
    /// 圆形缓入缓出
    CircularInOut,
    /// 指数缓入
    ExpIn,
    /// 指数缓出
    ExpOut,
    /// 指数缓入缓出
    ExpInOut,
}

impl BlendOption {
    /// 计算混合值
    ///
    /// # 参数
    /// - `t`: 线性进度 (0.0 - 1.0)，超出范围会被限制
    ///
    /// # 返回
    /// - 整形后的进度 (0.0 - 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        let value = match self {
            BlendOption::Linear => t,
            BlendOption::Cubic => cubic_interp(t),
            BlendOption::HermiteCubic => t * t * (3.0 - 2.0 * t),
            BlendOption::Sinusoidal => ((t * PI - PI / 2.0).sin() + 1.0) / 2.0,
            BlendOption::QuadraticInOut => ease_in_out(t, 2),
            BlendOption::CubicInOut => ease_in_out(t, 3),
            BlendOption::QuarticInOut => ease_in_out(t, 4),
            BlendOption::QuinticInOut => ease_in_out(t, 5),
            BlendOption::CircularIn => circular_in(t),
            BlendOption::CircularOut => circular_out(t),
            BlendOption::CircularInOut => {
                if t < 0.5 {
                    0.5 * circular_in(t * 2.0)
                } else {
                    0.5 * circular_out(t * 2.0 - 1.0) + 0.5
                }
            }
            BlendOption::ExpIn => exp_in(t),
            BlendOption::ExpOut => exp_out(t),
            BlendOption::ExpInOut => {
                if t < 0.5 {
                    0.5 * exp_in(t * 2.0)
                } else {
                    0.5 * exp_out(t * 2.0 - 1.0) + 0.5
                }
            }
        };

        value.clamp(0.0, 1.0)
    }
}

/// 端点切线为 0 的 Hermite 三次插值（0 → 1）
fn cubic_interp(t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    -2.0 * t3 + 3.0 * t2
}

/// 对称的幂次缓入缓出
fn ease_in_out(t: f32, exp: i32) -> f32 {
    if t < 0.5 {
        0.5 * (2.0 * t).powi(exp)
    } else {
        1.0 - 0.5 * (2.0 * (1.0 - t)).powi(exp)
    }
}

fn circular_in(t: f32) -> f32 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

fn circular_out(t: f32) -> f32 {
    let t = t - 1.0;
    (1.0 - t * t).max(0.0).sqrt()
}

fn exp_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2.0_f32.powf(10.0 * (t - 1.0))
    }
}

fn exp_out(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}
