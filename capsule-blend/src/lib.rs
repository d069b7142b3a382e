//! # Capsule Blend
//!
//! 在一次外部计时事件内临时覆盖胶囊体形状属性的混合控制器。
//!
//! ## 架构概述
//!
//! `capsule-blend` 不拥有目标对象，也不驱动时间。宿主动画系统在事件开始、
//! 每帧、结束时分别调用 `begin` / `tick` / `end`：
//!
//! ```text
//! Host                              BlendSession                 ShapeTarget
//!   │── begin(owner, total, cfg) ──►│── 捕获原始值/碰撞快照 ──────►│
//!   │                               │── 覆盖碰撞（瞬时混入则写入目标值）►│
//!   │── tick(dt) ──────────────────►│── lerp(original, target, α) ─►│
//!   │── end() ─────────────────────►│── 写回原始值 + 还原碰撞 ─────►│
//! ```
//!
//! ## 核心类型
//!
//! - [`BlendSession`]：会话状态机
//! - [`BlendConfig`]：属性覆盖、混合窗口、缓动曲线、碰撞覆盖
//! - [`ShapeTarget`] / [`ShapeOwner`]：与外部对象图的边界
//! - [`AlphaBlend`] / [`BlendOption`]：混入混出求值器
//! - [`Curve1D`]：可选的 alpha 重映射曲线
//! - [`CollisionOverrides`] / [`CollisionSnapshot`]：碰撞设置覆盖与还原
//!
//! ## 使用示例
//!
//! ```ignore
//! use capsule_blend::{BlendConfig, BlendOption, BlendSession, CapsuleShape};
//!
//! let capsule = Rc::new(CapsuleShape::new(34.0, 88.0));
//! let config = BlendConfig::default()
//!     .with_radius(50.0)
//!     .with_blend_in(0.5, BlendOption::Linear)
//!     .with_blend_out(0.5, BlendOption::Linear);
//!
//! let mut session = BlendSession::new();
//! session.begin(Some(&capsule), 2.0, &config);
//! session.tick(0.25);
//! session.end();
//! ```
//!
//! ## 模块结构
//!
//! - [`session`]：会话与阶段判定
//! - [`alpha_blend`]：混合求值器
//! - [`easing`]：混合形状
//! - [`curve`]：关键帧曲线
//! - [`collision`]：碰撞通道、响应表、覆盖与快照
//! - [`target`]：目标边界接口与内存实现
//! - [`config`]：配置加载与校验
//! - [`debug`]：调试可视化
//! - [`math`]：基础数值类型
//! - [`error`]：错误类型定义

pub mod alpha_blend;
pub mod collision;
pub mod config;
pub mod curve;
pub mod debug;
pub mod easing;
pub mod error;
pub mod math;
pub mod session;
pub mod target;

// 重导出核心类型
pub use alpha_blend::{AlphaBlend, BLEND_EPSILON};
pub use collision::{
    CHANNEL_COUNT, CollisionChannel, CollisionEnabled, CollisionOverrides, CollisionResponse,
    CollisionSnapshot, ResponseTable,
};
pub use config::{AttributeOverride, BlendConfig, BlendWindow, DebugConfig, ShapeOverrides};
pub use curve::{Curve1D, CurveInterp, CurveKey};
pub use debug::{DebugCapsule, DebugDraw, TraceDraw};
pub use easing::BlendOption;
pub use error::{BlendResult, ConfigError};
pub use math::{Lerp, LinearColor, Rotator, Vec3, WorldTransform};
pub use session::{BlendPhase, BlendSession};
pub use target::{CapsuleShape, CapsuleShapeData, ShapeOwner, ShapeTarget};
