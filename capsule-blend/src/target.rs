//! # Target 模块
//!
//! 会话与外部对象之间的边界接口。
//!
//! ## 核心概念
//!
//! - `ShapeTarget`: 被修改的形状（五个可混合属性 + 碰撞设置 + 世界变换）
//! - `ShapeOwner`: 持有形状的外部对象，负责定位具体的形状
//! - `CapsuleShape`: 基于 `Rc<RefCell<_>>` 的内存实现
//!
//! ## 设计说明
//!
//! 与 `Animatable` 一样，setter 使用 `&self`，由实现者负责内部可变性。
//! 会话只持有 `Weak` 引用，对象的生命周期归外部对象图所有。

use std::cell::RefCell;
use std::rc::Rc;

use crate::collision::{CollisionChannel, CollisionEnabled, CollisionResponse, ResponseTable};
use crate::math::{LinearColor, Vec3, WorldTransform};

/// 可被会话修改的形状
///
/// ## 实现示例
///
/// ```rust,ignore
/// struct MyCapsule {
///     inner: Rc<RefCell<MyCapsuleData>>,
/// }
///
/// impl ShapeTarget for MyCapsule {
///     fn radius(&self) -> f32 {
///         self.inner.borrow().radius
///     }
///
///     fn set_radius(&self, radius: f32) {
///         self.inner.borrow_mut().radius = radius;
///     }
///
///     // ...
/// }
/// ```
pub trait ShapeTarget {
    /// 未缩放的半径
    fn radius(&self) -> f32;
    fn set_radius(&self, radius: f32);

    /// 未缩放的半高
    fn half_height(&self) -> f32;
    fn set_half_height(&self, half_height: f32);

    /// 相对缩放
    fn relative_scale(&self) -> Vec3;
    fn set_relative_scale(&self, scale: Vec3);

    /// 调试线宽
    fn line_thickness(&self) -> f32;
    fn set_line_thickness(&self, thickness: f32);

    /// 形状颜色
    fn shape_color(&self) -> LinearColor;
    fn set_shape_color(&self, color: LinearColor);

    fn collision_enabled(&self) -> CollisionEnabled;
    fn set_collision_enabled(&self, enabled: CollisionEnabled);

    fn collision_profile_name(&self) -> String;
    fn set_collision_profile_name(&self, name: &str);

    fn generate_overlap_events(&self) -> bool;
    fn set_generate_overlap_events(&self, generate: bool);

    fn collision_response(&self, channel: CollisionChannel) -> CollisionResponse;
    fn set_collision_response(&self, channel: CollisionChannel, response: CollisionResponse);

    /// 世界变换（只读，用于调试绘制）
    ///
    /// 缩放为组件的最终世界缩放，已包含 `relative_scale`。
    fn world_transform(&self) -> WorldTransform;
}

/// 持有形状的外部对象
///
/// 会话开始时通过它定位实际要修改的形状；返回 `None` 表示没有合适的形状，
/// 会话将保持非激活状态。
pub trait ShapeOwner {
    fn find_shape(&self) -> Option<Rc<dyn ShapeTarget>>;
}

/// 形状本身即可作为自己的持有者
impl<T: ShapeTarget + 'static> ShapeOwner for Rc<T> {
    fn find_shape(&self) -> Option<Rc<dyn ShapeTarget>> {
        Some(self.clone() as Rc<dyn ShapeTarget>)
    }
}

/// 胶囊体的内部数据
#[derive(Debug, Clone, PartialEq)]
pub struct CapsuleShapeData {
    pub radius: f32,
    pub half_height: f32,
    pub relative_scale: Vec3,
    pub line_thickness: f32,
    pub shape_color: LinearColor,
    pub collision_enabled: CollisionEnabled,
    pub profile_name: String,
    pub generate_overlap_events: bool,
    pub responses: ResponseTable,
    /// 父级世界变换，不含 `relative_scale`
    pub world: WorldTransform,
}

impl CapsuleShapeData {
    /// 创建胶囊体数据（其余字段取默认值）
    pub fn new(radius: f32, half_height: f32) -> Self {
        Self {
            radius,
            half_height,
            relative_scale: Vec3::one(),
            line_thickness: 0.0,
            shape_color: LinearColor::RED,
            collision_enabled: CollisionEnabled::default(),
            profile_name: "Pawn".to_string(),
            generate_overlap_events: false,
            responses: ResponseTable::default(),
            world: WorldTransform::default(),
        }
    }
}

/// 内存中的胶囊体
///
/// 使用 `Rc<RefCell<CapsuleShapeData>>` 包装内部数据，克隆共享同一份数据。
#[derive(Debug, Clone)]
pub struct CapsuleShape {
    data: Rc<RefCell<CapsuleShapeData>>,
}

impl CapsuleShape {
    /// 创建新的胶囊体
    pub fn new(radius: f32, half_height: f32) -> Self {
        Self::from_data(CapsuleShapeData::new(radius, half_height))
    }

    pub fn from_data(data: CapsuleShapeData) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
        }
    }

    /// 当前数据的副本
    pub fn snapshot(&self) -> CapsuleShapeData {
        self.data.borrow().clone()
    }

    /// 获取数据引用
    pub fn data_ref(&self) -> Rc<RefCell<CapsuleShapeData>> {
        self.data.clone()
    }

    /// 设置父级世界变换
    pub fn set_world_transform(&self, world: WorldTransform) {
        self.data.borrow_mut().world = world;
    }
}

impl ShapeTarget for CapsuleShape {
    fn radius(&self) -> f32 {
        self.data.borrow().radius
    }

    fn set_radius(&self, radius: f32) {
        self.data.borrow_mut().radius = radius;
    }

    fn half_height(&self) -> f32 {
        self.data.borrow().half_height
    }

    fn set_half_height(&self, half_height: f32) {
        self.data.borrow_mut().half_height = half_height;
    }

    fn relative_scale(&self) -> Vec3 {
        self.data.borrow().relative_scale
    }

    fn set_relative_scale(&self, scale: Vec3) {
        self.data.borrow_mut().relative_scale = scale;
    }

    fn line_thickness(&self) -> f32 {
        self.data.borrow().line_thickness
    }

    fn set_line_thickness(&self, thickness: f32) {
        self.data.borrow_mut().line_thickness = thickness;
    }

    fn shape_color(&self) -> LinearColor {
        self.data.borrow().shape_color
    }

    fn set_shape_color(&self, color: LinearColor) {
        self.data.borrow_mut().shape_color = color;
    }

    fn collision_enabled(&self) -> CollisionEnabled {
        self.data.borrow().collision_enabled
    }

    fn set_collision_enabled(&self, enabled: CollisionEnabled) {
        self.data.borrow_mut().collision_enabled = enabled;
    }

    fn collision_profile_name(&self) -> String {
        self.data.borrow().profile_name.clone()
    }

    fn set_collision_profile_name(&self, name: &str) {
        self.data.borrow_mut().profile_name = name.to_string();
    }

    fn generate_overlap_events(&self) -> bool {
        self.data.borrow().generate_overlap_events
    }

    fn set_generate_overlap_events(&self, generate: bool) {
        self.data.borrow_mut().generate_overlap_events = generate;
    }

    fn collision_response(&self, channel: CollisionChannel) -> CollisionResponse {
        self.data.borrow().responses.get(channel)
    }

    fn set_collision_response(&self, channel: CollisionChannel, response: CollisionResponse) {
        self.data.borrow_mut().responses.set(channel, response);
    }

    fn world_transform(&self) -> WorldTransform {
        let data = self.data.borrow();
        WorldTransform {
            scale: data.world.scale.mul_components(data.relative_scale),
            ..data.world
        }
    }
}
