//! Entity records shared by both games
//!
//! Pure data: tokens, obstacles and tower blocks. Behaviour lives in the
//! spawner, motion and interaction modules.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Skill shown on a token or block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    React,
    Node,
    Solidity,
    Rust,
    Three,
    Wagmi,
    Substrate,
    GraphQL,
    TypeScript,
    Web3,
    DeFi,
    Nft,
}

impl Skill {
    /// Every skill, in display order
    pub const ALL: [Skill; 12] = [
        Skill::React,
        Skill::Node,
        Skill::Solidity,
        Skill::Rust,
        Skill::Three,
        Skill::Wagmi,
        Skill::Substrate,
        Skill::GraphQL,
        Skill::TypeScript,
        Skill::Web3,
        Skill::DeFi,
        Skill::Nft,
    ];

    /// Skills that appear as tower blocks
    pub const TOWER: [Skill; 8] = [
        Skill::React,
        Skill::Node,
        Skill::Solidity,
        Skill::Rust,
        Skill::Three,
        Skill::Wagmi,
        Skill::Substrate,
        Skill::GraphQL,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Skill::React => "React",
            Skill::Node => "Node.js",
            Skill::Solidity => "Solidity",
            Skill::Rust => "Rust",
            Skill::Three => "Three.js",
            Skill::Wagmi => "Wagmi",
            Skill::Substrate => "Substrate",
            Skill::GraphQL => "GraphQL",
            Skill::TypeScript => "TypeScript",
            Skill::Web3 => "Web3",
            Skill::DeFi => "DeFi",
            Skill::Nft => "NFT",
        }
    }

    /// Display color as 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            Skill::React => 0x61dafb,
            Skill::Node => 0x68a063,
            Skill::Solidity => 0x363636,
            Skill::Rust => 0xce422b,
            Skill::Three => 0x000000,
            Skill::Wagmi => 0xff6b35,
            Skill::Substrate => 0xe6007a,
            Skill::GraphQL => 0xe10098,
            Skill::TypeScript => 0x3178c6,
            Skill::Web3 => 0xf7931e,
            Skill::DeFi => 0xff6b35,
            Skill::Nft => 0xff4cf0,
        }
    }

    /// Cosmetic weight of a tower block (no gameplay effect)
    pub fn weight(&self) -> f32 {
        match self {
            Skill::React => 1.0,
            Skill::Node => 1.1,
            Skill::Solidity => 1.2,
            Skill::Rust => 1.3,
            Skill::Three => 0.9,
            Skill::Wagmi => 0.8,
            Skill::Substrate => 1.4,
            Skill::GraphQL => 1.1,
            _ => 1.0,
        }
    }
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Collectible runner token
    Token(Skill),
    /// Runner firewall; touching it ends the run
    Obstacle,
    /// Tower block
    Block(Skill),
}

impl EntityKind {
    /// Fixed bounding extent for this kind
    pub fn size(&self) -> Vec3 {
        match self {
            EntityKind::Token(_) => Vec3::splat(0.6),
            EntityKind::Obstacle => Vec3::new(0.4, 0.8, 0.1),
            EntityKind::Block(_) => Vec3::new(0.8, 0.5, 0.8),
        }
    }

    pub fn skill(&self) -> Option<Skill> {
        match self {
            EntityKind::Token(skill) | EntityKind::Block(skill) => Some(*skill),
            EntityKind::Obstacle => None,
        }
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, EntityKind::Obstacle)
    }
}

/// Entity identifier, unique for the lifetime of a game instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// A token, obstacle, or block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec3,
    pub size: Vec3,
    /// Collected (token) or placed (block). Set once via [`Entity::resolve`].
    resolved: bool,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, position: Vec3) -> Self {
        Self {
            id,
            kind,
            position,
            size: kind.size(),
            resolved: false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Mark as collected/placed. Returns false if it already was.
    pub fn resolve(&mut self) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        true
    }
}

/// Hands out entity IDs. Never rewinds, so IDs stay unique across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}
