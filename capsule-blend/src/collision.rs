//! # Collision 模块
//!
//! 碰撞设置的快照、覆盖与还原。
//!
//! 碰撞设置不参与混合：会话开始时一次性覆盖，结束时按快照原样写回。
//!
//! - [`CollisionOverrides`]：配置侧，每个子项独立开关
//! - [`CollisionSnapshot`]：会话开始时捕获的原始设置

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::target::ShapeTarget;

/// 碰撞启用模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollisionEnabled {
    /// 不参与任何碰撞
    NoCollision,
    /// 仅查询（射线、扫掠、重叠）
    QueryOnly,
    /// 仅物理模拟
    PhysicsOnly,
    /// 查询与物理
    #[default]
    QueryAndPhysics,
    /// 仅探测
    ProbeOnly,
    /// 查询与探测
    QueryAndProbe,
}

/// 对单个通道的碰撞响应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollisionResponse {
    Ignore,
    Overlap,
    #[default]
    Block,
}

/// 通道总数
pub const CHANNEL_COUNT: usize = 32;

/// 碰撞通道（固定集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollisionChannel {
    WorldStatic,
    WorldDynamic,
    Pawn,
    Visibility,
    Camera,
    PhysicsBody,
    Vehicle,
    Destructible,
    EngineTraceChannel1,
    EngineTraceChannel2,
    EngineTraceChannel3,
    EngineTraceChannel4,
    EngineTraceChannel5,
    EngineTraceChannel6,
    GameTraceChannel1,
    GameTraceChannel2,
    GameTraceChannel3,
    GameTraceChannel4,
    GameTraceChannel5,
    GameTraceChannel6,
    GameTraceChannel7,
    GameTraceChannel8,
    GameTraceChannel9,
    GameTraceChannel10,
    GameTraceChannel11,
    GameTraceChannel12,
    GameTraceChannel13,
    GameTraceChannel14,
    GameTraceChannel15,
    GameTraceChannel16,
    GameTraceChannel17,
    GameTraceChannel18,
}

impl CollisionChannel {
    /// 按索引顺序排列的全部通道
    pub const ALL: [CollisionChannel; CHANNEL_COUNT] = {
        use CollisionChannel::*;
        [
            WorldStatic,
            WorldDynamic,
            Pawn,
            Visibility,
            Camera,
            PhysicsBody,
            Vehicle,
            Destructible,
            EngineTraceChannel1,
            EngineTraceChannel2,
            EngineTraceChannel3,
            EngineTraceChannel4,
            EngineTraceChannel5,
            EngineTraceChannel6,
            GameTraceChannel1,
            GameTraceChannel2,
            GameTraceChannel3,
            GameTraceChannel4,
            GameTraceChannel5,
            GameTraceChannel6,
            GameTraceChannel7,
            GameTraceChannel8,
            GameTraceChannel9,
            GameTraceChannel10,
            GameTraceChannel11,
            GameTraceChannel12,
            GameTraceChannel13,
            GameTraceChannel14,
            GameTraceChannel15,
            GameTraceChannel16,
            GameTraceChannel17,
            GameTraceChannel18,
        ]
    };

    /// 通道在响应表中的索引
    pub fn index(self) -> usize {
        self as usize
    }
}

/// 完整的逐通道响应表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseTable([CollisionResponse; CHANNEL_COUNT]);

impl Default for ResponseTable {
    fn default() -> Self {
        Self::filled(CollisionResponse::default())
    }
}

impl ResponseTable {
    /// 所有通道使用同一响应
    pub fn filled(response: CollisionResponse) -> Self {
        Self([response; CHANNEL_COUNT])
    }

    /// 从目标读取全部通道
    pub fn read_from(target: &dyn ShapeTarget) -> Self {
        let mut table = Self::default();
        for channel in CollisionChannel::ALL {
            table.set(channel, target.collision_response(channel));
        }
        table
    }

    /// 写入全部通道到目标
    pub fn write_to(&self, target: &dyn ShapeTarget) {
        for (channel, response) in self.iter() {
            target.set_collision_response(channel, response);
        }
    }

    pub fn get(&self, channel: CollisionChannel) -> CollisionResponse {
        self.0[channel.index()]
    }

    pub fn set(&mut self, channel: CollisionChannel, response: CollisionResponse) {
        self.0[channel.index()] = response;
    }

    /// 设置单个通道（链式）
    pub fn with(mut self, channel: CollisionChannel, response: CollisionResponse) -> Self {
        self.set(channel, response);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (CollisionChannel, CollisionResponse)> + '_ {
        CollisionChannel::ALL
            .iter()
            .map(|&channel| (channel, self.get(channel)))
    }
}

/// 碰撞覆盖配置
///
/// 每个子项由各自的 `override_*` 开关控制，未开启的子项在会话期间保持原样。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollisionOverrides {
    /// 是否覆盖启用模式
    #[serde(default)]
    pub override_enabled: bool,
    /// 启用模式
    #[serde(default)]
    pub enabled: CollisionEnabled,
    /// 强制仅查询（优先于 `enabled`）
    #[serde(default)]
    pub force_query_only: bool,

    /// 是否覆盖碰撞预设名
    #[serde(default)]
    pub override_profile_name: bool,
    /// 碰撞预设名
    #[serde(default)]
    pub profile_name: String,

    /// 是否覆盖重叠事件开关
    #[serde(default)]
    pub override_overlap_events: bool,
    /// 是否生成重叠事件
    #[serde(default)]
    pub generate_overlap_events: bool,

    /// 是否覆盖逐通道响应
    #[serde(default)]
    pub override_responses: bool,
    /// 需要覆盖的通道响应（未列出的通道不变）
    #[serde(default)]
    pub responses: BTreeMap<CollisionChannel, CollisionResponse>,
}

impl CollisionOverrides {
    /// 实际写入的启用模式
    pub fn effective_enabled(&self) -> CollisionEnabled {
        if self.force_query_only {
            CollisionEnabled::QueryOnly
        } else {
            self.enabled
        }
    }

    /// 是否开启了任一覆盖
    pub fn any(&self) -> bool {
        self.override_enabled
            || self.override_profile_name
            || self.override_overlap_events
            || self.override_responses
    }

    /// 将开启的覆盖项写入目标
    pub fn apply(&self, target: &dyn ShapeTarget) {
        if self.override_enabled {
            target.set_collision_enabled(self.effective_enabled());
        }
        if self.override_profile_name {
            target.set_collision_profile_name(&self.profile_name);
        }
        if self.override_overlap_events {
            target.set_generate_overlap_events(self.generate_overlap_events);
        }
        if self.override_responses {
            for (&channel, &response) in &self.responses {
                target.set_collision_response(channel, response);
            }
        }
    }
}

/// 会话开始时捕获的碰撞设置
///
/// `restore_*` 标记哪些子项归会话所有、需要在结束时写回；
/// [`CollisionSnapshot::capture`] 会把四项全部标记。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollisionSnapshot {
    pub enabled: CollisionEnabled,
    pub profile_name: String,
    pub generate_overlap_events: bool,
    pub responses: ResponseTable,

    pub restore_enabled: bool,
    pub restore_profile_name: bool,
    pub restore_overlap_events: bool,
    pub restore_responses: bool,
}

impl CollisionSnapshot {
    /// 读取目标当前的全部碰撞设置
    pub fn capture(target: &dyn ShapeTarget) -> Self {
        Self {
            enabled: target.collision_enabled(),
            profile_name: target.collision_profile_name(),
            generate_overlap_events: target.generate_overlap_events(),
            responses: ResponseTable::read_from(target),
            restore_enabled: true,
            restore_profile_name: true,
            restore_overlap_events: true,
            restore_responses: true,
        }
    }

    /// 写回快照
    pub fn restore(&self, target: &dyn ShapeTarget) {
        if self.restore_enabled {
            target.set_collision_enabled(self.enabled);
        }
        if self.restore_profile_name {
            target.set_collision_profile_name(&self.profile_name);
        }
        if self.restore_overlap_events {
            target.set_generate_overlap_events(self.generate_overlap_events);
        }
        if self.restore_responses {
            self.responses.write_to(target);
        }
    }
}
