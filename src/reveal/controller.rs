use std::collections::{BTreeMap, HashMap};

use instant::Duration;

use crate::{
    error::VisibilityError,
    reveal::{
        animation::Pose,
        block::{BlockKey, RevealableBlock},
        visibility::{Visibility, VisibilitySource},
    },
};

/// How a block is observed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealOptions {
    /// Stop observing once the block entered. Every block of the page sets this.
    pub trigger_once: bool,
    /// Grows (positive) or shrinks (negative) the viewport for this block's test.
    pub margin_px: f32,
    /// `false` reveals on the first check cycle without asking the visibility source.
    pub observe: bool,
    /// Latch in the same check cycle as this block instead of observing on its own.
    pub follow: Option<RevealHandle>,
}

impl RevealOptions {
    pub fn margin(margin_px: f32) -> Self {
        Self {
            margin_px,
            ..Default::default()
        }
    }

    /// Animates as soon as it is mounted, like the hero lines.
    pub fn on_mount() -> Self {
        Self {
            observe: false,
            ..Default::default()
        }
    }

    /// Shares the container's observation, like chips inside their card.
    pub fn following(leader: RevealHandle) -> Self {
        Self {
            follow: Some(leader),
            ..Default::default()
        }
    }
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            trigger_once: true,
            margin_px: 0.0,
            observe: true,
            follow: None,
        }
    }
}

/// Returned by [`RevealController::register`]. Handles are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RevealHandle(u64);

/// Emitted exactly once per block, in the check cycle where it entered.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealTrigger {
    pub handle: RevealHandle,
    pub key: BlockKey,
    /// When the animation starts: trigger time plus the block's delay.
    pub starts_at: Duration,
}

#[derive(Debug)]
struct Registration {
    block: RevealableBlock,
    options: RevealOptions,
    observing: bool,
    /// Visibility cannot be observed; the block shows up on the next check.
    fallback: bool,
    in_view: bool,
    starts_at: Option<Duration>,
}

/// Latches each registered block the first time its source reports it visible.
///
/// Several registrations may share a key, e.g. a block mounted again before the old
/// registration is dropped. The source keeps observing a key until the last of them
/// lets go of it.
#[derive(Debug)]
pub struct RevealController<V: VisibilitySource> {
    source: V,
    registrations: BTreeMap<RevealHandle, Registration>,
    observers: HashMap<BlockKey, usize>,
    next_handle: u64,
}

impl<V: VisibilitySource> RevealController<V> {
    pub fn new(source: V) -> Self {
        Self {
            source,
            registrations: BTreeMap::new(),
            observers: HashMap::new(),
            next_handle: 0,
        }
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    /// Scrolling and layout changes go through here.
    pub fn source_mut(&mut self) -> &mut V {
        &mut self.source
    }

    /// A block that already entered, e.g. one handed back by [`Self::unregister`], is
    /// shown in its final state and never triggers again.
    pub fn register(&mut self, block: RevealableBlock, options: RevealOptions) -> RevealHandle {
        let handle = RevealHandle(self.next_handle);
        self.next_handle += 1;

        let mut observing = false;
        let mut fallback = false;
        if options.observe && options.follow.is_none() && !block.has_entered() {
            match self
                .source
                .observe(block.key(), block.bounds, options.margin_px)
            {
                Ok(()) => {
                    *self.observers.entry(block.key().clone()).or_default() += 1;
                    observing = true;
                }
                Err(VisibilityError::Unsupported) => fallback = true,
                Err(e) => {
                    log::warn!("{e}, showing `{}` without waiting", block.key());
                    fallback = true;
                }
            }
        }
        log::debug!(
            "registered reveal block `{}` (observing: {observing})",
            block.key()
        );
        self.registrations.insert(
            handle,
            Registration {
                block,
                options,
                observing,
                fallback,
                in_view: false,
                starts_at: None,
            },
        );
        handle
    }

    /// Stops observing and forgets the block. Stale handles are ignored.
    pub fn unregister(&mut self, handle: RevealHandle) -> Option<RevealableBlock> {
        let registration = self.registrations.remove(&handle)?;
        if registration.observing {
            release(&mut self.source, &mut self.observers, registration.block.key());
        }
        Some(registration.block)
    }

    /// Unregisters every block, e.g. when the page is torn down.
    pub fn clear(&mut self) {
        let handles: Vec<_> = self.registrations.keys().copied().collect();
        for handle in handles {
            self.unregister(handle);
        }
    }

    /// One check cycle. Call it after mounting and on every layout or scroll change.
    ///
    /// Triggers come out in registration order.
    pub fn check(&mut self, now: Duration) -> Vec<RevealTrigger> {
        let mut entered: HashMap<RevealHandle, bool> = self
            .registrations
            .iter()
            .map(|(handle, r)| (*handle, r.block.has_entered()))
            .collect();
        let mut triggers = Vec::new();
        for (handle, registration) in self.registrations.iter_mut() {
            let visible = if let Some(leader) = registration.options.follow {
                // a follower whose leader is gone has nothing left to wait for
                entered.get(&leader).copied().unwrap_or(true)
            } else if !registration.options.observe || registration.fallback {
                true
            } else if registration.observing {
                matches!(
                    self.source.visibility(registration.block.key()),
                    Visibility::Visible | Visibility::Unsupported
                )
            } else {
                registration.in_view
            };
            registration.in_view = visible;

            if !visible || !registration.block.enter() {
                continue;
            }
            entered.insert(*handle, true);
            let starts_at = now + registration.block.animation.delay;
            registration.starts_at = Some(starts_at);
            if registration.options.trigger_once && registration.observing {
                release(&mut self.source, &mut self.observers, registration.block.key());
                registration.observing = false;
            }
            log::debug!("reveal `{}` at {:?}", registration.block.key(), starts_at);
            triggers.push(RevealTrigger {
                handle: *handle,
                key: registration.block.key().clone(),
                starts_at,
            });
        }
        triggers
    }

    pub fn block(&self, handle: RevealHandle) -> Option<&RevealableBlock> {
        self.registrations.get(&handle).map(|r| &r.block)
    }

    pub fn has_entered(&self, handle: RevealHandle) -> bool {
        self.block(handle).is_some_and(RevealableBlock::has_entered)
    }

    /// Last visibility seen by a check cycle.
    pub fn is_in_view(&self, handle: RevealHandle) -> bool {
        self.registrations
            .get(&handle)
            .is_some_and(|r| r.in_view)
    }

    /// Current pose to hand to the presentation layer.
    pub fn pose(&self, handle: RevealHandle, now: Duration) -> Option<Pose> {
        self.registrations
            .get(&handle)
            .map(|registration| registration.pose(now))
    }

    pub fn poses(&self, now: Duration) -> impl Iterator<Item = (&BlockKey, Pose)> + '_ {
        self.registrations
            .values()
            .map(move |registration| (registration.block.key(), registration.pose(now)))
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Blocks that have not entered yet.
    pub fn pending(&self) -> usize {
        self.registrations
            .values()
            .filter(|r| !r.block.has_entered())
            .count()
    }

    /// Every block entered and finished animating.
    pub fn is_settled(&self, now: Duration) -> bool {
        self.registrations.values().all(|r| match r.starts_at {
            Some(start) => now >= start && r.block.animation.is_finished(now - start),
            None => r.block.has_entered(),
        })
    }
}

/// Drops one observation of `key`; the source stops watching it with the last one.
fn release<V: VisibilitySource>(
    source: &mut V,
    observers: &mut HashMap<BlockKey, usize>,
    key: &BlockKey,
) {
    let Some(count) = observers.get_mut(key) else {
        return;
    };
    *count -= 1;
    if *count == 0 {
        observers.remove(key);
        source.unobserve(key);
    }
}

impl Registration {
    fn pose(&self, now: Duration) -> Pose {
        match self.starts_at {
            Some(start) if now >= start => self.block.animation.sample(now - start),
            Some(_) => self.block.resting_pose(),
            // entered under an earlier registration
            None if self.block.has_entered() => self.block.animation.target,
            None => self.block.resting_pose(),
        }
    }
}
