//! # Session 模块
//!
//! 混合会话：在一次外部计时事件内临时覆盖形状属性，平滑混入混出，结束时完整还原。
//!
//! ## 生命周期
//!
//! 外部驱动按 `begin → tick* → end` 的顺序调用：
//!
//! ```rust,ignore
//! let mut session = BlendSession::new();
//! session.begin(Some(&character), 2.0, &config);
//! while playing {
//!     session.tick(dt);
//! }
//! session.end();
//! ```
//!
//! ## 阶段
//!
//! 每次 `tick` 都根据已经过时间与（当前配置中的）混合窗口重新判定阶段，
//! 自上而下取第一个满足的条件：
//!
//! 1. 混入：`blend_in > 0 && elapsed < blend_in`
//! 2. 保持：`blend_in <= elapsed <= total - blend_out`（边界处保持优先）
//! 3. 混出：`blend_out > 0 && elapsed > total - blend_out`
//! 4. 其余退化情况：alpha = 1
//!
//! 碰撞设置不参与混合，只在 `begin` 时覆盖、`end` 时还原。

use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::alpha_blend::AlphaBlend;
use crate::collision::CollisionSnapshot;
use crate::config::{BlendConfig, BlendWindow, ShapeOverrides};
use crate::debug::{DebugCapsule, DebugDraw, TraceDraw};
use crate::math::{Lerp, LinearColor, Vec3};
use crate::target::{ShapeOwner, ShapeTarget};

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendPhase {
    /// 未激活
    #[default]
    Inactive,
    /// 混入
    BlendIn,
    /// 保持在目标值
    Hold,
    /// 混出
    BlendOut,
}

impl BlendPhase {
    /// 是否为激活阶段
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }
}

/// 取样方式
#[derive(Debug, Clone, Copy)]
enum Sample {
    Original,
    Resolved,
    Alpha(f32),
}

/// 单个属性的原始值与目标值
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct AttributeTrack<T> {
    modify: bool,
    original: T,
    resolved: T,
}

impl<T: Lerp> AttributeTrack<T> {
    fn capture(modify: bool, original: T, configured: T) -> Self {
        Self {
            modify,
            original,
            resolved: if modify { configured } else { original },
        }
    }

    fn sample(&self, sample: Sample) -> T {
        match sample {
            Sample::Original => self.original,
            Sample::Resolved => self.resolved,
            // 端点直接返回快照值，保证逐位一致
            Sample::Alpha(alpha) if alpha <= 0.0 => self.original,
            Sample::Alpha(alpha) if alpha >= 1.0 => self.resolved,
            Sample::Alpha(alpha) => self.original.lerp(self.resolved, alpha),
        }
    }
}

/// 五个可混合属性
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct AttributeSet {
    radius: AttributeTrack<f32>,
    half_height: AttributeTrack<f32>,
    scale: AttributeTrack<Vec3>,
    line_thickness: AttributeTrack<f32>,
    shape_color: AttributeTrack<LinearColor>,
}

impl AttributeSet {
    fn capture(target: &dyn ShapeTarget, shape: &ShapeOverrides) -> Self {
        Self {
            radius: AttributeTrack::capture(
                shape.radius.enabled,
                target.radius(),
                shape.radius.value,
            ),
            half_height: AttributeTrack::capture(
                shape.half_height.enabled,
                target.half_height(),
                shape.half_height.value,
            ),
            scale: AttributeTrack::capture(
                shape.scale.enabled,
                target.relative_scale(),
                shape.scale.value,
            ),
            line_thickness: AttributeTrack::capture(
                shape.line_thickness.enabled,
                target.line_thickness(),
                shape.line_thickness.value,
            ),
            shape_color: AttributeTrack::capture(
                shape.shape_color.enabled,
                target.shape_color(),
                shape.shape_color.value,
            ),
        }
    }

    /// 写入被覆盖的属性；未覆盖的属性从不写入
    fn write(&self, target: &dyn ShapeTarget, sample: Sample) {
        if self.radius.modify {
            target.set_radius(self.radius.sample(sample));
        }
        if self.half_height.modify {
            target.set_half_height(self.half_height.sample(sample));
        }
        if self.scale.modify {
            target.set_relative_scale(self.scale.sample(sample));
        }
        if self.line_thickness.modify {
            target.set_line_thickness(self.line_thickness.sample(sample));
        }
        if self.shape_color.modify {
            target.set_shape_color(self.shape_color.sample(sample));
        }
    }

    fn modified_names(&self) -> Vec<&'static str> {
        [
            (self.radius.modify, "radius"),
            (self.half_height.modify, "half_height"),
            (self.scale.modify, "scale"),
            (self.line_thickness.modify, "line_thickness"),
            (self.shape_color.modify, "shape_color"),
        ]
        .into_iter()
        .filter_map(|(modify, name)| modify.then_some(name))
        .collect()
    }
}

/// 混合会话
///
/// 每次事件激活对应一次 `begin`/`end`。会话不持有目标，只保存 `Weak` 引用。
pub struct BlendSession {
    /// 当前配置
    config: BlendConfig,
    /// 目标形状（非拥有）
    target: Option<Weak<dyn ShapeTarget>>,
    /// 是否激活
    active: bool,
    /// 自 begin 起经过的时间
    elapsed: f32,
    /// 事件总时长
    total_duration: f32,
    /// 属性快照
    attributes: AttributeSet,
    /// 混入求值器
    blend_in: AlphaBlend,
    /// 混出求值器
    blend_out: AlphaBlend,
    /// 碰撞快照
    collision: CollisionSnapshot,
    /// 最近一次 tick 的阶段
    phase: BlendPhase,
    /// 最近一次 tick 的 alpha（已应用缓动曲线）
    alpha: f32,
    /// 调试绘制器
    drawer: Box<dyn DebugDraw>,
}

impl Default for BlendSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BlendSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlendSession")
            .field("active", &self.active)
            .field("phase", &self.phase)
            .field("elapsed", &self.elapsed)
            .field("total_duration", &self.total_duration)
            .field("alpha", &self.alpha)
            .finish()
    }
}

impl BlendSession {
    /// 创建未激活的会话
    pub fn new() -> Self {
        Self {
            config: BlendConfig::default(),
            target: None,
            active: false,
            elapsed: 0.0,
            total_duration: 0.0,
            attributes: AttributeSet::default(),
            blend_in: AlphaBlend::default(),
            blend_out: AlphaBlend::default(),
            collision: CollisionSnapshot::default(),
            phase: BlendPhase::Inactive,
            alpha: 0.0,
            drawer: Box::new(TraceDraw),
        }
    }

    /// 设置调试绘制器
    pub fn with_debug_draw(mut self, drawer: impl DebugDraw + 'static) -> Self {
        self.drawer = Box::new(drawer);
        self
    }

    /// 替换调试绘制器
    pub fn set_debug_draw(&mut self, drawer: Box<dyn DebugDraw>) {
        self.drawer = drawer;
    }

    // ========== 生命周期 ==========

    /// 开始会话
    ///
    /// 重置全部状态后定位目标；找不到目标时会话保持非激活，后续调用均不操作。
    /// 找到目标时一次性捕获原始值与碰撞快照、计算目标值、应用碰撞覆盖；
    /// 若混入为瞬时，立即写入目标值。
    ///
    /// 若上一次会话尚未结束，会先执行一次 `end` 还原上一个目标。
    pub fn begin(
        &mut self,
        owner: Option<&dyn ShapeOwner>,
        total_duration: f32,
        config: &BlendConfig,
    ) {
        if self.active {
            warn!("上一次混合会话尚未结束，先还原目标");
            self.end();
        }

        self.reset();
        self.config = config.clone();
        self.total_duration = sanitize_duration(total_duration);

        let Some(owner) = owner else {
            warn!("没有持有者，混合会话保持未激活");
            return;
        };
        let Some(target) = owner.find_shape() else {
            warn!("持有者上找不到形状，混合会话保持未激活");
            return;
        };
        let shape = &*target;

        // 一次性捕获原始值
        self.attributes = AttributeSet::capture(shape, &self.config.shape);
        self.collision = CollisionSnapshot::capture(shape);

        self.blend_in = AlphaBlend::new(self.config.blend_in.duration, self.config.blend_in.option);
        self.blend_out =
            AlphaBlend::new(self.config.blend_out.duration, self.config.blend_out.option);

        if self.blend_in.is_instant() {
            self.attributes.write(shape, Sample::Resolved);
            self.phase = BlendPhase::Hold;
            self.alpha = 1.0;
        } else {
            self.phase = BlendPhase::BlendIn;
            self.alpha = 0.0;
        }

        self.config.collision.apply(shape);

        self.target = Some(Rc::downgrade(&target));
        self.active = true;

        debug!(
            total_duration = self.total_duration,
            blend_in = self.blend_in.duration(),
            blend_out = self.blend_out.duration(),
            modified = ?self.attributes.modified_names(),
            collision_override = self.config.collision.any(),
            "混合会话开始"
        );
    }

    /// 推进会话
    ///
    /// 未激活时不操作。`frame_delta` 为负或非有限值时按 0 处理。
    pub fn tick(&mut self, frame_delta: f32) {
        if !self.active {
            return;
        }
        let Some(target) = self.live_target() else {
            warn!("目标已被释放，混合会话提前终止");
            self.reset();
            return;
        };

        let dt = if frame_delta.is_finite() {
            frame_delta.max(0.0)
        } else {
            0.0
        };
        self.elapsed += dt;

        let (phase, raw_alpha) = self.evaluate_phase(dt);
        let alpha = self.shape_alpha(raw_alpha);

        if phase != self.phase {
            debug!(from = ?self.phase, to = ?phase, elapsed = self.elapsed, "混合阶段切换");
        }
        self.phase = phase;
        self.alpha = alpha;

        let shape = &*target;
        self.attributes.write(shape, Sample::Alpha(alpha));
        trace!(elapsed = self.elapsed, raw_alpha, alpha, "混合 tick");

        if self.config.debug.draw_shape {
            let capsule = DebugCapsule::from_world(
                &shape.world_transform(),
                self.attributes.radius.sample(Sample::Alpha(alpha)),
                self.attributes.half_height.sample(Sample::Alpha(alpha)),
            );
            self.drawer.draw_capsule(&capsule);
        }
    }

    /// 结束会话
    ///
    /// 未激活时不操作。无论进行到哪个阶段，都把被覆盖的属性写回原始值，
    /// 并完整还原碰撞快照，然后清空会话。
    pub fn end(&mut self) {
        if !self.active {
            return;
        }

        match self.live_target() {
            Some(target) => {
                let shape = &*target;
                self.attributes.write(shape, Sample::Original);
                self.collision.restore(shape);
                debug!(elapsed = self.elapsed, "混合会话结束，已还原原始值");
            }
            None => warn!("目标已被释放，跳过还原"),
        }

        self.reset();
    }

    // ========== 查询方法 ==========

    /// 是否激活
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 最近一次 tick 的阶段
    pub fn phase(&self) -> BlendPhase {
        self.phase
    }

    /// 最近一次 tick 写入时使用的 alpha
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// 自 begin 起经过的时间
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// 事件总时长
    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    /// 当前目标（若仍存活）
    pub fn target(&self) -> Option<Rc<dyn ShapeTarget>> {
        self.live_target()
    }

    /// 会话配置
    pub fn config(&self) -> &BlendConfig {
        &self.config
    }

    /// 可变配置
    ///
    /// 混合窗口在下一次 tick 生效；属性目标值与碰撞覆盖只在 begin 时读取。
    pub fn config_mut(&mut self) -> &mut BlendConfig {
        &mut self.config
    }

    // ========== 内部方法 ==========

    fn live_target(&self) -> Option<Rc<dyn ShapeTarget>> {
        self.target.as_ref().and_then(Weak::upgrade)
    }

    fn reset(&mut self) {
        self.target = None;
        self.active = false;
        self.elapsed = 0.0;
        self.total_duration = 0.0;
        self.attributes = AttributeSet::default();
        self.blend_in = AlphaBlend::default();
        self.blend_out = AlphaBlend::default();
        self.collision = CollisionSnapshot::default();
        self.phase = BlendPhase::Inactive;
        self.alpha = 0.0;
    }

    /// 判定阶段并计算未经缓动曲线的 alpha
    fn evaluate_phase(&mut self, dt: f32) -> (BlendPhase, f32) {
        sync_window(&mut self.blend_in, &self.config.blend_in);
        sync_window(&mut self.blend_out, &self.config.blend_out);

        let blend_in = self.blend_in.duration();
        let blend_out = self.blend_out.duration();
        let out_start = self.total_duration - blend_out;

        let (phase, raw) = if blend_in > 0.0 && self.elapsed < blend_in {
            self.blend_in.update(dt);
            (BlendPhase::BlendIn, self.blend_in.blended_value())
        } else if self.elapsed >= blend_in && self.elapsed <= out_start {
            (BlendPhase::Hold, 1.0)
        } else if blend_out > 0.0 && self.elapsed > out_start {
            // 以进入混出阶段后的时间定位；窗口重叠时混出从混入结束处才开始计时
            let entered = out_start.max(blend_in);
            self.blend_out.seek(self.elapsed - entered);
            (BlendPhase::BlendOut, 1.0 - self.blend_out.blended_value())
        } else {
            (BlendPhase::Hold, 1.0)
        };

        (phase, raw.clamp(0.0, 1.0))
    }

    /// 缓动曲线重映射
    fn shape_alpha(&self, raw: f32) -> f32 {
        match self.config.ease_curve.as_ref().and_then(|curve| curve.eval(raw)) {
            Some(curved) if curved.is_finite() => curved.clamp(0.0, 1.0),
            Some(_) => {
                warn!(raw, "缓动曲线结果非有限值，忽略曲线");
                raw
            }
            None => raw,
        }
    }
}

/// 配置中的混合窗口改变时重建求值器，保留已推进的时间
fn sync_window(blend: &mut AlphaBlend, window: &BlendWindow) {
    let fresh = AlphaBlend::new(window.duration, window.option);
    if fresh.duration() != blend.duration() || fresh.option() != blend.option() {
        let elapsed = blend.elapsed();
        *blend = fresh;
        blend.seek(elapsed);
    }
}

fn sanitize_duration(duration: f32) -> f32 {
    if duration.is_finite() && duration >= 0.0 {
        duration
    } else {
        warn!(duration, "事件时长无效，按 0 处理");
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionEnabled, CollisionOverrides};
    use crate::curve::{Curve1D, CurveKey};
    use crate::easing::BlendOption;
    use crate::math::WorldTransform;
    use crate::target::CapsuleShape;
    use std::cell::RefCell;

    fn capsule() -> Rc<CapsuleShape> {
        Rc::new(CapsuleShape::new(30.0, 88.0))
    }

    fn radius_config() -> BlendConfig {
        BlendConfig::default()
            .with_radius(50.0)
            .with_blend_in(0.5, BlendOption::Linear)
            .with_blend_out(0.5, BlendOption::Linear)
    }

    #[test]
    fn test_session_creation() {
        let session = BlendSession::new();
        assert!(!session.is_active());
        assert_eq!(session.phase(), BlendPhase::Inactive);
        assert!(!session.phase().is_active());
        assert!(session.target().is_none());
    }

    #[test]
    fn test_tick_and_end_without_begin() {
        let mut session = BlendSession::new();
        session.tick(0.1);
        session.end();
        assert!(!session.is_active());
        assert_eq!(session.elapsed(), 0.0);
    }

    #[test]
    fn test_begin_without_owner() {
        let mut session = BlendSession::new();
        session.begin(None, 2.0, &radius_config());
        assert!(!session.is_active());

        session.tick(0.25);
        assert_eq!(session.elapsed(), 0.0);
    }

    #[test]
    fn test_radius_scenario() {
        let shape = capsule();
        let mut session = BlendSession::new();

        session.begin(Some(&shape), 2.0, &radius_config());
        assert!(session.is_active());
        assert_eq!(session.phase(), BlendPhase::BlendIn);
        assert!(session.phase().is_active());
        assert_eq!(shape.radius(), 30.0);

        session.tick(0.25);
        assert_eq!(shape.radius(), 40.0);

        session.tick(0.75);
        assert_eq!(session.phase(), BlendPhase::Hold);
        assert_eq!(shape.radius(), 50.0);

        session.tick(0.75);
        assert_eq!(session.phase(), BlendPhase::BlendOut);
        assert_eq!(shape.radius(), 40.0);

        session.tick(0.15);
        assert!((shape.radius() - 34.0).abs() < 1e-4);

        session.end();
        assert_eq!(shape.radius(), 30.0);
        assert!(!session.is_active());
        assert_eq!(session.total_duration(), 0.0);
    }

    #[test]
    fn test_phase_trace() {
        let shape = capsule();
        let mut session = BlendSession::new();
        session.begin(Some(&shape), 2.0, &radius_config());

        let mut trace = Vec::new();
        for _ in 0..8 {
            session.tick(0.25);
            trace.push((session.elapsed(), session.phase(), session.alpha()));
        }

        insta::assert_debug_snapshot!(trace, @r"
        [
            (
                0.25,
                BlendIn,
                0.5,
            ),
            (
                0.5,
                Hold,
                1.0,
            ),
            (
                0.75,
                Hold,
                1.0,
            ),
            (
                1.0,
                Hold,
                1.0,
            ),
            (
                1.25,
                Hold,
                1.0,
            ),
            (
                1.5,
                Hold,
                1.0,
            ),
            (
                1.75,
                BlendOut,
                0.5,
            ),
            (
                2.0,
                BlendOut,
                0.0,
            ),
        ]
        ");
    }

    #[test]
    fn test_hold_wins_at_blend_out_boundary() {
        let shape = capsule();
        let mut session = BlendSession::new();
        session.begin(Some(&shape), 2.0, &radius_config());

        session.tick(1.5);
        assert_eq!(session.phase(), BlendPhase::Hold);
        assert_eq!(session.alpha(), 1.0);
    }

    #[test]
    fn test_instant_blend_in_snaps_at_begin() {
        let shape = capsule();
        let mut session = BlendSession::new();
        let config = BlendConfig::default()
            .with_radius(50.0)
            .with_blend_in(0.0, BlendOption::Linear)
            .with_blend_out(0.0, BlendOption::Linear);

        session.begin(Some(&shape), 1.0, &config);
        assert_eq!(shape.radius(), 50.0);

        for _ in 0..6 {
            session.tick(0.2);
            assert_eq!(shape.radius(), 50.0);
        }

        session.end();
        assert_eq!(shape.radius(), 30.0);
    }

    #[test]
    fn test_blend_in_below_epsilon_is_instant() {
        let shape = capsule();
        let mut session = BlendSession::new();
        let config = radius_config().with_blend_in(1.0e-5, BlendOption::Linear);

        session.begin(Some(&shape), 2.0, &config);
        assert_eq!(shape.radius(), 50.0);
        assert_eq!(session.phase(), BlendPhase::Hold);
    }

    #[test]
    fn test_ease_curve_remaps_alpha() {
        let shape = capsule();
        let mut session = BlendSession::new();
        // 阶梯曲线：alpha < 1 时输出 0
        let curve = Curve1D::from_keys([
            CurveKey::new(0.0, 0.0).with_interp(crate::curve::CurveInterp::Constant),
            CurveKey::new(1.0, 1.0),
        ]);
        session.begin(Some(&shape), 2.0, &radius_config().with_ease_curve(curve));

        session.tick(0.25);
        assert_eq!(session.alpha(), 0.0);
        assert_eq!(shape.radius(), 30.0);

        session.tick(0.5);
        assert_eq!(session.alpha(), 1.0);
        assert_eq!(shape.radius(), 50.0);
    }

    #[test]
    fn test_empty_ease_curve_passes_through() {
        let shape = capsule();
        let mut session = BlendSession::new();
        session.begin(
            Some(&shape),
            2.0,
            &radius_config().with_ease_curve(Curve1D::default()),
        );

        session.tick(0.25);
        assert_eq!(session.alpha(), 0.5);
    }

    #[test]
    fn test_ease_curve_output_clamped() {
        let shape = capsule();
        let mut session = BlendSession::new();
        let curve = Curve1D::from_keys([CurveKey::new(0.0, 2.0), CurveKey::new(1.0, 2.0)]);
        session.begin(Some(&shape), 2.0, &radius_config().with_ease_curve(curve));

        session.tick(0.25);
        assert_eq!(session.alpha(), 1.0);
    }

    #[test]
    fn test_config_change_mid_flight() {
        let shape = capsule();
        let mut session = BlendSession::new();
        session.begin(Some(&shape), 4.0, &radius_config());

        session.tick(1.0);
        assert_eq!(session.phase(), BlendPhase::Hold);

        // 混出窗口加长到 2 秒：elapsed = 2.5 时已处于混出中点
        session.config_mut().blend_out = BlendWindow::linear(2.0);
        session.tick(1.5);
        assert_eq!(session.phase(), BlendPhase::BlendOut);
        assert_eq!(session.alpha(), 0.75);
    }

    #[test]
    fn test_overlapping_windows_stay_continuous() {
        let shape = capsule();
        let mut session = BlendSession::new();
        let config = radius_config()
            .with_blend_in(0.8, BlendOption::Linear)
            .with_blend_out(0.8, BlendOption::Linear);
        session.begin(Some(&shape), 1.0, &config);

        // 每步 0.05 秒，线性混合每步最多变化 0.05 / 0.8
        let mut previous = session.alpha();
        let mut phases = Vec::new();
        for _ in 0..20 {
            session.tick(0.05);
            assert!(
                (session.alpha() - previous).abs() <= 0.0625 + 1e-4,
                "elapsed = {}: {} -> {}",
                session.elapsed(),
                previous,
                session.alpha()
            );
            previous = session.alpha();
            phases.push(session.phase());
        }

        assert_eq!(phases.first(), Some(&BlendPhase::BlendIn));
        assert_eq!(phases.last(), Some(&BlendPhase::BlendOut));
        assert!(!phases.contains(&BlendPhase::Hold));
        // 混出从混入结束处开始：elapsed = 1.0 时只推进了 0.2 秒
        assert!((session.alpha() - 0.75).abs() < 1e-3);
    }

    #[test]
    fn test_blend_out_longer_than_total_with_instant_blend_in() {
        let shape = capsule();
        let mut session = BlendSession::new();
        let config = radius_config()
            .with_blend_in(0.0, BlendOption::Linear)
            .with_blend_out(2.0, BlendOption::Linear);
        session.begin(Some(&shape), 1.0, &config);
        assert_eq!(session.alpha(), 1.0);

        session.tick(0.5);
        assert_eq!(session.phase(), BlendPhase::BlendOut);
        assert!((session.alpha() - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_non_finite_ease_curve_ignored() {
        let shape = capsule();
        let mut session = BlendSession::new();
        let curve = Curve1D::from_keys([CurveKey::new(0.0, f32::NAN), CurveKey::new(1.0, f32::NAN)]);
        session.begin(Some(&shape), 2.0, &radius_config().with_ease_curve(curve));

        session.tick(0.25);
        assert_eq!(session.alpha(), 0.5);
        assert_eq!(shape.radius(), 40.0);
    }

    #[test]
    fn test_elapsed_past_total_with_instant_windows() {
        let shape = capsule();
        let mut session = BlendSession::new();
        let config = radius_config()
            .with_blend_in(0.0, BlendOption::Linear)
            .with_blend_out(0.0, BlendOption::Linear);
        session.begin(Some(&shape), 1.0, &config);

        session.tick(5.0);
        assert_eq!(session.alpha(), 1.0);
        assert_eq!(shape.radius(), 50.0);
    }

    #[test]
    fn test_invalid_frame_delta_ignored() {
        let shape = capsule();
        let mut session = BlendSession::new();
        session.begin(Some(&shape), 2.0, &radius_config());

        session.tick(-1.0);
        session.tick(f32::NAN);
        assert_eq!(session.elapsed(), 0.0);
    }

    #[test]
    fn test_invalid_total_duration() {
        let shape = capsule();
        let mut session = BlendSession::new();
        session.begin(Some(&shape), -3.0, &radius_config());
        assert!(session.is_active());
        assert_eq!(session.total_duration(), 0.0);
    }

    #[test]
    fn test_collision_overrides_applied_at_begin() {
        let shape = capsule();
        let mut session = BlendSession::new();
        let config = radius_config().with_collision(CollisionOverrides {
            override_enabled: true,
            enabled: CollisionEnabled::QueryAndPhysics,
            force_query_only: true,
            ..Default::default()
        });

        session.begin(Some(&shape), 2.0, &config);
        assert_eq!(shape.collision_enabled(), CollisionEnabled::QueryOnly);

        session.tick(0.25);
        assert_eq!(shape.collision_enabled(), CollisionEnabled::QueryOnly);

        session.end();
        assert_eq!(shape.collision_enabled(), CollisionEnabled::QueryAndPhysics);
    }

    #[test]
    fn test_rebegin_restores_previous_target() {
        let first = capsule();
        let second = Rc::new(CapsuleShape::new(10.0, 20.0));
        let mut session = BlendSession::new();
        let config = radius_config().with_blend_in(0.0, BlendOption::Linear);

        session.begin(Some(&first), 2.0, &config);
        assert_eq!(first.radius(), 50.0);

        session.begin(Some(&second), 2.0, &config);
        assert_eq!(first.radius(), 30.0);
        assert_eq!(second.radius(), 50.0);

        session.end();
        assert_eq!(second.radius(), 10.0);
    }

    #[test]
    fn test_target_dropped_mid_session() {
        let shape = capsule();
        let mut session = BlendSession::new();
        session.begin(Some(&shape), 2.0, &radius_config());
        drop(shape);

        session.tick(0.25);
        assert!(!session.is_active());
        session.end();
    }

    struct RecordingDraw(Rc<RefCell<Vec<DebugCapsule>>>);

    impl DebugDraw for RecordingDraw {
        fn draw_capsule(&self, capsule: &DebugCapsule) {
            self.0.borrow_mut().push(*capsule);
        }
    }

    #[test]
    fn test_debug_draw_uses_interpolated_extent() {
        let shape = capsule();
        let drawn = Rc::new(RefCell::new(Vec::new()));
        let mut session = BlendSession::new().with_debug_draw(RecordingDraw(drawn.clone()));

        session.begin(Some(&shape), 2.0, &radius_config().with_debug_draw(true));
        session.tick(0.25);

        let drawn = drawn.borrow();
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].radius, 40.0);
        assert_eq!(drawn[0].half_height, 88.0);
    }

    #[test]
    fn test_debug_draw_follows_blended_scale() {
        let shape = capsule();
        shape.set_world_transform(WorldTransform {
            scale: Vec3::new(1.0, 1.0, 2.0),
            ..Default::default()
        });
        let drawn = Rc::new(RefCell::new(Vec::new()));
        let mut session = BlendSession::new();
        session.set_debug_draw(Box::new(RecordingDraw(drawn.clone())));

        let config = radius_config()
            .with_scale(Vec3::new(2.0, 3.0, 0.5))
            .with_debug_draw(true);
        session.begin(Some(&shape), 2.0, &config);
        session.tick(0.25);

        // alpha = 0.5：相对缩放 (1.5, 2.0, 0.75)，半径 40
        let drawn = drawn.borrow();
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].radius, 80.0);
        assert_eq!(drawn[0].half_height, 132.0);
    }

    #[test]
    fn test_debug_draw_disabled() {
        let shape = capsule();
        let drawn = Rc::new(RefCell::new(Vec::new()));
        let mut session = BlendSession::new().with_debug_draw(RecordingDraw(drawn.clone()));

        session.begin(Some(&shape), 2.0, &radius_config());
        session.tick(0.25);
        assert!(drawn.borrow().is_empty());
    }
}
