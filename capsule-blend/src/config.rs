//! # Config 模块
//!
//! 会话配置：哪些属性被覆盖、覆盖成什么值、如何混入混出、碰撞如何覆盖。
//!
//! 配置在 `begin` 时读取；混合窗口在 `tick` 中每帧重新读取，
//! 因此会话进行中修改 `blend_in` / `blend_out` 会立即生效。
//!
//! 配置可以从 JSON 加载，所有字段都有默认值：
//!
//! ```json
//! {
//!   "shape": { "radius": { "enabled": true, "value": 50.0 } },
//!   "blend_in": { "duration": 0.5, "option": "Linear" },
//!   "collision": { "override_enabled": true, "force_query_only": true }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collision::CollisionOverrides;
use crate::curve::Curve1D;
use crate::easing::BlendOption;
use crate::error::{BlendResult, ConfigError};
use crate::math::{LinearColor, Vec3};

/// 单个属性的覆盖设置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeOverride<T> {
    /// 是否覆盖该属性
    #[serde(default)]
    pub enabled: bool,
    /// 覆盖目标值
    pub value: T,
}

impl<T> AttributeOverride<T> {
    /// 未开启的覆盖
    pub fn disabled(value: T) -> Self {
        Self {
            enabled: false,
            value,
        }
    }

    /// 开启的覆盖
    pub fn enabled(value: T) -> Self {
        Self {
            enabled: true,
            value,
        }
    }
}

/// 五个可混合属性的覆盖设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeOverrides {
    /// 半径
    #[serde(default = "default_radius")]
    pub radius: AttributeOverride<f32>,

    /// 半高
    #[serde(default = "default_half_height")]
    pub half_height: AttributeOverride<f32>,

    /// 相对缩放
    #[serde(default = "default_scale")]
    pub scale: AttributeOverride<Vec3>,

    /// 调试线宽
    #[serde(default = "default_line_thickness")]
    pub line_thickness: AttributeOverride<f32>,

    /// 形状颜色
    #[serde(default = "default_shape_color")]
    pub shape_color: AttributeOverride<LinearColor>,
}

/// 混入或混出窗口
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWindow {
    /// 时长（秒），不超过 `BLEND_EPSILON` 视为瞬时
    #[serde(default = "default_blend_duration")]
    pub duration: f32,

    /// 混合形状
    #[serde(default)]
    pub option: BlendOption,
}

impl BlendWindow {
    pub fn new(duration: f32, option: BlendOption) -> Self {
        Self { duration, option }
    }

    /// 瞬时窗口
    pub fn instant() -> Self {
        Self::new(0.0, BlendOption::Linear)
    }

    /// 线性窗口
    pub fn linear(duration: f32) -> Self {
        Self::new(duration, BlendOption::Linear)
    }
}

/// 调试配置
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DebugConfig {
    /// 每帧绘制当前插值后的形状
    #[serde(default)]
    pub draw_shape: bool,
}

/// 会话配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendConfig {
    /// 属性覆盖
    #[serde(default)]
    pub shape: ShapeOverrides,

    /// 混入窗口
    #[serde(default = "default_blend_window")]
    pub blend_in: BlendWindow,

    /// 混出窗口
    #[serde(default = "default_blend_window")]
    pub blend_out: BlendWindow,

    /// 可选缓动曲线，在混合形状之后再次重映射 alpha
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease_curve: Option<Curve1D>,

    /// 碰撞覆盖
    #[serde(default)]
    pub collision: CollisionOverrides,

    /// 调试配置
    #[serde(default)]
    pub debug: DebugConfig,
}

// 默认值函数
fn default_radius() -> AttributeOverride<f32> {
    AttributeOverride::disabled(34.0)
}

fn default_half_height() -> AttributeOverride<f32> {
    AttributeOverride::disabled(88.0)
}

fn default_scale() -> AttributeOverride<Vec3> {
    AttributeOverride::disabled(Vec3::one())
}

fn default_line_thickness() -> AttributeOverride<f32> {
    AttributeOverride::disabled(1.0)
}

fn default_shape_color() -> AttributeOverride<LinearColor> {
    AttributeOverride::disabled(LinearColor::WHITE)
}

fn default_blend_duration() -> f32 {
    0.25
}

fn default_blend_window() -> BlendWindow {
    BlendWindow::new(default_blend_duration(), BlendOption::default())
}

impl Default for ShapeOverrides {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            half_height: default_half_height(),
            scale: default_scale(),
            line_thickness: default_line_thickness(),
            shape_color: default_shape_color(),
        }
    }
}

impl Default for BlendWindow {
    fn default() -> Self {
        default_blend_window()
    }
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            shape: ShapeOverrides::default(),
            blend_in: default_blend_window(),
            blend_out: default_blend_window(),
            ease_curve: None,
            collision: CollisionOverrides::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl BlendConfig {
    /// 覆盖半径
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.shape.radius = AttributeOverride::enabled(radius);
        self
    }

    /// 覆盖半高
    pub fn with_half_height(mut self, half_height: f32) -> Self {
        self.shape.half_height = AttributeOverride::enabled(half_height);
        self
    }

    /// 覆盖相对缩放
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.shape.scale = AttributeOverride::enabled(scale);
        self
    }

    /// 覆盖调试线宽
    pub fn with_line_thickness(mut self, thickness: f32) -> Self {
        self.shape.line_thickness = AttributeOverride::enabled(thickness);
        self
    }

    /// 覆盖形状颜色
    pub fn with_shape_color(mut self, color: LinearColor) -> Self {
        self.shape.shape_color = AttributeOverride::enabled(color);
        self
    }

    /// 设置混入窗口
    pub fn with_blend_in(mut self, duration: f32, option: BlendOption) -> Self {
        self.blend_in = BlendWindow::new(duration, option);
        self
    }

    /// 设置混出窗口
    pub fn with_blend_out(mut self, duration: f32, option: BlendOption) -> Self {
        self.blend_out = BlendWindow::new(duration, option);
        self
    }

    /// 设置缓动曲线
    pub fn with_ease_curve(mut self, curve: Curve1D) -> Self {
        self.ease_curve = Some(curve);
        self
    }

    /// 设置碰撞覆盖
    pub fn with_collision(mut self, collision: CollisionOverrides) -> Self {
        self.collision = collision;
        self
    }

    /// 开启调试绘制
    pub fn with_debug_draw(mut self, draw_shape: bool) -> Self {
        self.debug.draw_shape = draw_shape;
        self
    }

    /// 从 JSON 字符串解析
    pub fn from_json_str(json: &str) -> BlendResult<Self> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    /// 加载配置文件
    pub fn load(path: impl AsRef<Path>) -> BlendResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        debug!(path = ?path, "混合配置加载成功");
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> BlendResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> BlendResult<()> {
        check_duration("blend_in.duration", self.blend_in.duration)?;
        check_duration("blend_out.duration", self.blend_out.duration)?;

        check_extent("shape.radius", &self.shape.radius)?;
        check_extent("shape.half_height", &self.shape.half_height)?;
        check_extent("shape.line_thickness", &self.shape.line_thickness)?;

        if self.shape.scale.enabled && !self.shape.scale.value.is_finite() {
            return Err(ConfigError::validation("shape.scale", "必须是有限值"));
        }
        if self.shape.shape_color.enabled && !self.shape.shape_color.value.is_finite() {
            return Err(ConfigError::validation("shape.shape_color", "必须是有限值"));
        }

        if let Some(curve) = &self.ease_curve {
            if !curve.is_sorted() {
                return Err(ConfigError::validation(
                    "ease_curve",
                    "关键帧时间必须单调不减",
                ));
            }
            if curve.keys().iter().any(|k| {
                !k.time.is_finite()
                    || !k.value.is_finite()
                    || !k.arrive_tangent.is_finite()
                    || !k.leave_tangent.is_finite()
            }) {
                return Err(ConfigError::validation("ease_curve", "关键帧必须是有限值"));
            }
        }

        Ok(())
    }

    /// 是否有任一属性被覆盖
    pub fn modifies_any_attribute(&self) -> bool {
        self.shape.radius.enabled
            || self.shape.half_height.enabled
            || self.shape.scale.enabled
            || self.shape.line_thickness.enabled
            || self.shape.shape_color.enabled
    }
}

fn check_duration(field: &str, duration: f32) -> BlendResult<()> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(ConfigError::validation(field, "必须是非负有限值"));
    }
    Ok(())
}

fn check_extent(field: &str, attr: &AttributeOverride<f32>) -> BlendResult<()> {
    if attr.enabled && (!attr.value.is_finite() || attr.value < 0.0) {
        return Err(ConfigError::validation(field, "必须是非负有限值"));
    }
    Ok(())
}
