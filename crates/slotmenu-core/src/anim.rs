//! The animation scheduler: [`Animation`], [`Animate`], [`Ticker`].
//!
//! A single global [`Ticker`] owns a monotonic tick counter. Animations are
//! per-slot samplers: on a matching tick the frame function is evaluated
//! and the result pushed straight to viewers, bypassing the preset layer.
//! Ticks may be skipped when the host loop overruns, but pushes for a slot
//! are always ordered by tick — there is no queue or backlog.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::host::Host;

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

/// Frame source for one animation: `(animation-local tick, page) -> content`.
pub type FrameFn<D> = Rc<dyn Fn(u64, usize) -> D>;

/// A per-slot, time-varying content source.
///
/// Created when attached to a slot. Stopping makes it inert without
/// destroying it; resuming keeps the absolute tick phase. [`reset`]
/// re-bases the local tick to zero instead.
///
/// [`reset`]: Animation::reset
pub struct Animation<D> {
    interval: u64,
    frames: FrameFn<D>,
    running: bool,
    epoch: u64,
}

impl<D> Animation<D> {
    pub(crate) fn new(interval: u64, frames: FrameFn<D>) -> Self {
        Self {
            interval,
            frames,
            running: true,
            epoch: 0,
        }
    }

    /// Whether the animation is currently evaluated.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The evaluation cadence in ticks.
    #[inline]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub(crate) fn stop(&mut self) {
        self.running = false;
    }

    pub(crate) fn resume(&mut self) {
        self.running = true;
    }

    pub(crate) fn reset(&mut self, now: u64) {
        self.epoch = now;
    }

    /// The frame due at global tick `now`, with the local tick it was
    /// evaluated at, or `None` when `now` is off-cadence or the animation
    /// is stopped.
    pub(crate) fn frame_at(&self, now: u64, page: usize) -> Option<(u64, D)> {
        if !self.running {
            return None;
        }
        let local = now.saturating_sub(self.epoch);
        if local % self.interval != 0 {
            return None;
        }
        Some((local, (self.frames)(local, page)))
    }
}

// ---------------------------------------------------------------------------
// Animate / Ticker
// ---------------------------------------------------------------------------

/// Implemented by anything that evaluates animations on a tick. Menus (and
/// the wrappers around them) implement this; a menu with zero viewers
/// ignores the tick entirely.
pub trait Animate<D> {
    /// Evaluate all due animations for global tick `tick` and push results.
    fn animate(&mut self, tick: u64, host: &mut dyn Host<D>);
}

/// The single global tick source.
///
/// Menus are held weakly; a dropped menu falls out of the ticker on the
/// next advance. The counter is monotonic and never reset, which is what
/// gives stopped animations their resume-in-phase semantics.
pub struct Ticker<D> {
    tick: u64,
    menus: Vec<Weak<RefCell<dyn Animate<D>>>>,
}

impl<D> Ticker<D> {
    /// Create a ticker starting at tick zero.
    pub fn new() -> Self {
        Self {
            tick: 0,
            menus: Vec::new(),
        }
    }

    /// The next tick that [`advance`](Ticker::advance) will evaluate.
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Register a menu for tick evaluation.
    pub fn register<M: Animate<D> + 'static>(&mut self, menu: &Rc<RefCell<M>>) {
        let menu: Rc<RefCell<dyn Animate<D>>> = menu.clone();
        let weak: Weak<RefCell<dyn Animate<D>>> = Rc::downgrade(&menu);
        self.menus.push(weak);
    }

    /// Evaluate one tick across every registered, still-alive menu.
    pub fn advance(&mut self, host: &mut dyn Host<D>) {
        let now = self.tick;
        self.tick += 1;
        self.menus.retain(|weak| match weak.upgrade() {
            Some(menu) => {
                menu.borrow_mut().animate(now, host);
                true
            }
            None => false,
        });
    }
}

impl<D> Default for Ticker<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_cadence() {
        let anim: Animation<u64> = Animation::new(3, Rc::new(|tick, _page| tick * 10));
        assert_eq!(anim.frame_at(0, 0), Some((0, 0)));
        assert_eq!(anim.frame_at(1, 0), None);
        assert_eq!(anim.frame_at(2, 0), None);
        assert_eq!(anim.frame_at(3, 0), Some((3, 30)));
        assert_eq!(anim.frame_at(6, 0), Some((6, 60)));
    }

    #[test]
    fn stop_and_resume_keep_phase() {
        let mut anim: Animation<u64> = Animation::new(2, Rc::new(|tick, _| tick));
        anim.stop();
        assert_eq!(anim.frame_at(4, 0), None);
        anim.resume();
        // Phase unchanged: still the absolute tick.
        assert_eq!(anim.frame_at(4, 0), Some((4, 4)));
    }

    #[test]
    fn reset_rebases_local_tick() {
        let mut anim: Animation<u64> = Animation::new(2, Rc::new(|tick, _| tick));
        anim.reset(10);
        assert_eq!(anim.frame_at(10, 0), Some((0, 0)));
        assert_eq!(anim.frame_at(11, 0), None);
        assert_eq!(anim.frame_at(12, 0), Some((2, 2)));
    }

    #[test]
    fn ticker_drops_dead_menus() {
        struct Noop;
        impl Animate<()> for Noop {
            fn animate(&mut self, _tick: u64, _host: &mut dyn Host<()>) {}
        }
        struct NullHost;
        impl Host<()> for NullHost {
            fn render_slot(
                &mut self,
                _viewer: crate::context::ViewerId,
                _surface: crate::host::Surface,
                _slot: usize,
                _content: Option<&()>,
            ) {
            }
            fn render_page(
                &mut self,
                _viewer: crate::context::ViewerId,
                _surface: crate::host::Surface,
                _contents: &[Option<()>],
            ) {
            }
        }

        let mut ticker: Ticker<()> = Ticker::new();
        let menu = Rc::new(RefCell::new(Noop));
        ticker.register(&menu);
        let mut host = NullHost;
        ticker.advance(&mut host);
        assert_eq!(ticker.tick(), 1);
        drop(menu);
        ticker.advance(&mut host);
        assert!(ticker.menus.is_empty());
    }
}
