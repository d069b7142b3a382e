//! # Curve 模块
//!
//! 关键帧缓动曲线，用于在混合求值器之后对 alpha 做第二次重映射。
//!
//! 曲线定义域与值域约定为 [0, 1]，但求值本身不做限制，由调用方钳制。

use serde::{Deserialize, Serialize};

/// 关键帧插值方式
///
/// 决定从该关键帧到下一关键帧之间的段如何插值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveInterp {
    /// 阶梯：保持当前关键帧的值
    Constant,
    /// 线性
    #[default]
    Linear,
    /// 三次 Hermite（使用离开/到达切线）
    Cubic,
}

/// 曲线关键帧
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub interp: CurveInterp,
    /// 到达切线（仅 Cubic 段使用）
    #[serde(default)]
    pub arrive_tangent: f32,
    /// 离开切线（仅 Cubic 段使用）
    #[serde(default)]
    pub leave_tangent: f32,
}

impl CurveKey {
    /// 创建线性关键帧
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            interp: CurveInterp::Linear,
            arrive_tangent: 0.0,
            leave_tangent: 0.0,
        }
    }

    /// 设置插值方式
    pub fn with_interp(mut self, interp: CurveInterp) -> Self {
        self.interp = interp;
        self
    }

    /// 设置切线（到达与离开相同）
    pub fn with_tangent(mut self, tangent: f32) -> Self {
        self.arrive_tangent = tangent;
        self.leave_tangent = tangent;
        self
    }
}

/// 一维关键帧曲线
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve1D {
    keys: Vec<CurveKey>,
}

impl Curve1D {
    /// 从关键帧创建曲线，关键帧按时间排序
    pub fn from_keys(keys: impl IntoIterator<Item = CurveKey>) -> Self {
        let mut keys: Vec<CurveKey> = keys.into_iter().collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// 恒等曲线 (0,0) → (1,1)
    pub fn linear() -> Self {
        Self::from_keys([CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 1.0)])
    }

    /// 两端平缓的 S 形曲线
    pub fn smooth() -> Self {
        Self::from_keys([
            CurveKey::new(0.0, 0.0).with_interp(CurveInterp::Cubic),
            CurveKey::new(1.0, 1.0).with_interp(CurveInterp::Cubic),
        ])
    }

    /// 添加关键帧，保持有序
    pub fn add_key(&mut self, key: CurveKey) {
        let index = self.keys.partition_point(|k| k.time <= key.time);
        self.keys.insert(index, key);
    }

    /// 关键帧数量
    pub fn num_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// 关键帧时间是否单调不减（反序列化得到的曲线可能无序）
    pub fn is_sorted(&self) -> bool {
        self.keys.windows(2).all(|w| w[0].time <= w[1].time)
    }

    /// 在 `time` 处求值
    ///
    /// - 无关键帧：返回 `None`
    /// - 超出关键帧范围：返回首/尾关键帧的值
    pub fn eval(&self, time: f32) -> Option<f32> {
        let first = self.keys.first()?;
        let last = self.keys.last()?;

        if time <= first.time {
            return Some(first.value);
        }
        if time >= last.time {
            return Some(last.value);
        }

        // 找到 time 所在段 [k0, k1)
        let index = self.keys.partition_point(|k| k.time <= time);
        let k0 = &self.keys[index - 1];
        let k1 = &self.keys[index];
        Some(eval_segment(k0, k1, time))
    }
}

fn eval_segment(k0: &CurveKey, k1: &CurveKey, time: f32) -> f32 {
    let span = k1.time - k0.time;
    if span <= 0.0 {
        return k1.value;
    }
    let s = (time - k0.time) / span;

    match k0.interp {
        CurveInterp::Constant => k0.value,
        CurveInterp::Linear => k0.value + (k1.value - k0.value) * s,
        CurveInterp::Cubic => {
            let s2 = s * s;
            let s3 = s2 * s;
            let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
            let h10 = s3 - 2.0 * s2 + s;
            let h01 = -2.0 * s3 + 3.0 * s2;
            let h11 = s3 - s2;
            h00 * k0.value
                + h10 * span * k0.leave_tangent
                + h01 * k1.value
                + h11 * span * k1.arrive_tangent
        }
    }
}
