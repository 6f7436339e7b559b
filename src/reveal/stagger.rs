use instant::Duration;

use crate::reveal::{animation::RevealAnimation, block::RevealableBlock, block::BlockKey};

/// Blocks of one section that cascade in insertion order.
///
/// The block at index `i` is delayed by `base + i * increment`. The order is never
/// re-sorted: pushing is the only way in.
#[derive(Clone, Debug)]
pub struct StaggerGroup {
    name: String,
    base: Duration,
    increment: Duration,
    blocks: Vec<RevealableBlock>,
}

impl StaggerGroup {
    pub fn new(name: impl Into<String>, increment: Duration) -> Self {
        Self {
            name: name.into(),
            base: Duration::ZERO,
            increment,
            blocks: Vec::new(),
        }
    }

    /// Offsets the whole cascade, used when the group sits inside a staggered parent.
    pub fn with_base(mut self, base: Duration) -> Self {
        self.base = base;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn increment(&self) -> Duration {
        self.increment
    }

    pub fn delay_for(&self, index: usize) -> Duration {
        self.base + self.increment * index as u32
    }

    /// Appends a block, overwriting the delay of its animation with the cascade delay.
    pub fn push(&mut self, key: BlockKey, animation: RevealAnimation) -> &RevealableBlock {
        let delay = self.delay_for(self.blocks.len());
        self.blocks
            .push(RevealableBlock::new(key, animation.with_delay(delay)));
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[RevealableBlock] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [RevealableBlock] {
        &mut self.blocks
    }

    pub fn into_blocks(self) -> Vec<RevealableBlock> {
        self.blocks
    }
}
