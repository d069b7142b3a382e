//! # Math 模块
//!
//! 形状属性使用的基础数值类型：三维向量、旋转、线性颜色与世界变换。

use serde::{Deserialize, Serialize};

/// 可线性插值的值
///
/// 标量、向量、颜色按分量插值。
pub trait Lerp: Copy {
    /// 从 `self` 插值到 `other`，`t` 为 0 时返回 `self`，为 1 时返回 `other`
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// 三维向量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// 创建新的向量
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// 零向量
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// 单位向量 (1, 1, 1)
    pub const fn one() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// 按分量相乘
    pub fn mul_components(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// 所有分量是否为有限值
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Lerp for Vec3 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x.lerp(other.x, t),
            y: self.y.lerp(other.y, t),
            z: self.z.lerp(other.z, t),
        }
    }
}


/// 旋转（角度制）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }
}

/// 线性空间颜色 (0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

fn default_alpha() -> f32 {
    1.0
}

impl Default for LinearColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl LinearColor {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgba(1.0, 1.0, 0.0, 1.0);

    /// 创建颜色
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 所有分量是否为有限值
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl Lerp for LinearColor {
    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r.lerp(other.r, t),
            g: self.g.lerp(other.g, t),
            b: self.b.lerp(other.b, t),
            a: self.a.lerp(other.a, t),
        }
    }
}

/// 世界变换
///
/// 仅用于调试绘制，会话不会修改它。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    /// 世界坐标
    pub location: Vec3,
    /// 世界旋转
    pub rotation: Rotator,
    /// 世界缩放
    pub scale: Vec3,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self {
            location: Vec3::zero(),
            rotation: Rotator::default(),
            scale: Vec3::one(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_lerp() {
        assert_eq!(30.0_f32.lerp(50.0, 0.0), 30.0);
        assert_eq!(30.0_f32.lerp(50.0, 0.5), 40.0);
        assert_eq!(30.0_f32.lerp(50.0, 1.0), 50.0);
    }

    #[test]
    fn test_vec3_lerp() {
        let v1 = Vec3::new(0.0, 0.0, 0.0);
        let v2 = Vec3::new(10.0, 20.0, -4.0);
        let mid = v1.lerp(v2, 0.5);
        assert_eq!(mid, Vec3::new(5.0, 10.0, -2.0));
    }

    #[test]
    fn test_color_lerp() {
        let c = LinearColor::WHITE.lerp(LinearColor::RED, 0.5);
        assert_eq!(c, LinearColor::rgba(1.0, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        let c: LinearColor = serde_json::from_str(r#"{"r":0.2,"g":0.4,"b":0.6}"#).unwrap();
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_vec3_mul_components() {
        let v = Vec3::new(2.0, 3.0, 4.0).mul_components(Vec3::new(0.5, 2.0, 0.0));
        assert_eq!(v, Vec3::new(1.0, 6.0, 0.0));
    }

    #[test]
    fn test_world_transform_default() {
        let t = WorldTransform::default();
        assert_eq!(t.location, Vec3::zero());
        assert_eq!(t.scale, Vec3::one());
    }
}
