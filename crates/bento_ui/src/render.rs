//! Visual command stream.
//!
//! Effects never touch the host's elements directly. They append
//! [`StyleCommand`]s to a [`CommandBuffer`]; the host drains it once per
//! event or frame and applies the commands (DOM style writes, element
//! creation/removal). Instanced renderers can read [`ParticleInstance`]
//! snapshots instead.

use std::fmt;

use bento_core::SlotHandle;
use bytemuck::{Pod, Zeroable};

use crate::animation::Transition;
use crate::layout::Point;
use crate::style::{Color, StyleProperty, StyleValue};
use crate::widget::CardId;

/// A CSS `transform` made of translate, rotate and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation in pixels.
    pub translate: Point,
    /// Rotation in degrees.
    pub rotate_deg: f32,
    /// Uniform scale.
    pub scale: f32,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self::scaled(1.0);

    /// A pure scale.
    #[must_use]
    pub const fn scaled(scale: f32) -> Self {
        Self {
            translate: Point::ZERO,
            rotate_deg: 0.0,
            scale,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.translate == Point::ZERO && self.rotate_deg == 0.0 {
            return write!(f, "scale({})", self.scale);
        }
        write!(
            f,
            "translate({}px, {}px) rotate({}deg) scale({})",
            self.translate.x, self.translate.y, self.rotate_deg, self.scale
        )
    }
}

/// Inline style of a particle element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleVisual {
    /// `transform`.
    pub transform: Transform,
    /// `opacity`.
    pub opacity: f32,
    /// `transition`.
    pub transition: Transition,
    /// New `left`/`top` when the particle was moved.
    pub position: Option<Point>,
}

/// A single change the host applies.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleCommand {
    /// Set a custom property on a card element.
    SetProperty {
        /// Target card.
        card: CardId,
        /// Property.
        property: StyleProperty,
        /// Value.
        value: StyleValue,
    },
    /// Append a particle element to a card (hidden: scale 0, opacity 0).
    SpawnParticle {
        /// Owning card.
        card: CardId,
        /// Particle handle, unique while the particle lives.
        particle: SlotHandle,
        /// `left`/`top` inside the card.
        position: Point,
        /// Diameter in pixels.
        size: f32,
        /// Fill and glow color.
        color: Color,
    },
    /// Restyle a live particle element.
    UpdateParticle {
        /// Owning card.
        card: CardId,
        /// Particle handle.
        particle: SlotHandle,
        /// New inline style.
        visual: ParticleVisual,
    },
    /// Remove a particle element.
    RemoveParticle {
        /// Owning card.
        card: CardId,
        /// Particle handle.
        particle: SlotHandle,
    },
}

impl StyleCommand {
    /// Card the command targets.
    #[must_use]
    pub const fn card(&self) -> CardId {
        match self {
            Self::SetProperty { card, .. }
            | Self::SpawnParticle { card, .. }
            | Self::UpdateParticle { card, .. }
            | Self::RemoveParticle { card, .. } => *card,
        }
    }
}

/// Commands collected between two host flushes.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    commands: Vec<StyleCommand>,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
        }
    }

    /// Adds a command.
    pub fn push(&mut self, command: StyleCommand) {
        self.commands.push(command);
    }

    /// Returns the buffered commands.
    #[must_use]
    pub fn as_slice(&self) -> &[StyleCommand] {
        &self.commands
    }

    /// Iterates over the buffered commands.
    pub fn iter(&self) -> std::slice::Iter<'_, StyleCommand> {
        self.commands.iter()
    }

    /// Hands every buffered command to the host, keeping the allocation.
    pub fn drain(&mut self) -> std::vec::Drain<'_, StyleCommand> {
        self.commands.drain(..)
    }

    /// Discards the buffered commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Returns the command count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Particle snapshot for instanced rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Anchor (`left`, `top`) inside the card.
    pub position: [f32; 2],
    /// Orbit translation.
    pub offset: [f32; 2],
    /// Rotation in degrees.
    pub rotation_deg: f32,
    /// Current scale.
    pub scale: f32,
    /// Current opacity.
    pub opacity: f32,
    /// Diameter in pixels.
    pub size: f32,
    /// Color (rgba).
    pub color: [f32; 4],
}

impl ParticleInstance {
    /// Size of an instance in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;

    #[test]
    fn test_transform_css() {
        assert_eq!(Transform::scaled(0.0).to_string(), "scale(0)");
        let orbit = Transform {
            translate: Point::new(75.0, -12.5),
            rotate_deg: 90.0,
            scale: 1.1,
        };
        assert_eq!(
            orbit.to_string(),
            "translate(75px, -12.5px) rotate(90deg) scale(1.1)"
        );
    }

    #[test]
    fn test_buffer_drain_keeps_capacity() {
        let mut buffer = CommandBuffer::new();
        buffer.push(StyleCommand::SetProperty {
            card: CardId(1),
            property: StyleProperty::GlowIntensity,
            value: StyleValue::Number(0.0),
        });
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.as_slice()[0].card(), CardId(1));

        let drained: Vec<_> = buffer.drain().collect();
        assert_eq!(drained.len(), 1);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_instance_layout_is_gpu_friendly() {
        assert_eq!(ParticleInstance::SIZE, 48);
        let instances = [ParticleInstance {
            opacity: 1.0,
            ..ParticleInstance::default()
        }];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), ParticleInstance::SIZE);

        let visual = ParticleVisual {
            transform: Transform::IDENTITY,
            opacity: 1.0,
            transition: Transition::new(300, Easing::Ease),
            position: None,
        };
        assert_eq!(visual.transition.to_string(), "all 0.3s ease");
    }
}
