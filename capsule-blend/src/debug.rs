//! # Debug 模块
//!
//! 调试可视化：根据当前插值结果计算要绘制的胶囊体，交给绘制器。
//!
//! 纯观察用途，不影响会话状态。

use tracing::trace;

use crate::math::{LinearColor, Rotator, Vec3, WorldTransform};

/// 一帧的调试胶囊体
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugCapsule {
    /// 世界坐标
    pub location: Vec3,
    /// 世界旋转
    pub rotation: Rotator,
    /// 已应用世界缩放的半径
    pub radius: f32,
    /// 已应用世界缩放的半高
    pub half_height: f32,
    /// 颜色
    pub color: LinearColor,
    /// 存活时长（秒），0 表示只绘制一帧
    pub lifetime: f32,
    /// 线宽
    pub thickness: f32,
}

impl DebugCapsule {
    /// 由世界变换与未缩放的半径/半高计算
    ///
    /// 半径取 XY 缩放的较大者，半高使用 Z 缩放。
    pub fn from_world(world: &WorldTransform, radius: f32, half_height: f32) -> Self {
        Self {
            location: world.location,
            rotation: world.rotation,
            radius: radius * world.scale.x.max(world.scale.y),
            half_height: half_height * world.scale.z,
            color: LinearColor::YELLOW,
            lifetime: 0.0,
            thickness: 1.0,
        }
    }
}

/// 调试绘制器
pub trait DebugDraw {
    fn draw_capsule(&self, capsule: &DebugCapsule);
}

/// 默认绘制器：只输出 trace 日志
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceDraw;

impl DebugDraw for TraceDraw {
    fn draw_capsule(&self, capsule: &DebugCapsule) {
        trace!(
            x = capsule.location.x,
            y = capsule.location.y,
            z = capsule.location.z,
            radius = capsule.radius,
            half_height = capsule.half_height,
            "调试胶囊体"
        );
    }
}
