use std::time::Duration;

use tracing::debug;

use crate::config::RevealConfig;

// how a revealed element moves
#[derive(Clone, Debug, PartialEq)]
pub struct Motion {
    pub stagger: Duration,
    pub duration: Duration,
    pub ease: String,
    pub offset_px: u32,
}

impl From<&RevealConfig> for Motion {
    fn from(config: &RevealConfig) -> Self {
        Motion {
            stagger: Duration::from_millis(config.stagger_ms.into()),
            duration: Duration::from_millis(config.duration_ms.into()),
            ease: config.ease.clone(),
            offset_px: config.offset_px,
        }
    }
}

impl Motion {
    pub fn delay(&self, index: usize) -> Duration {
        self.stagger * u32::try_from(index).unwrap_or(u32::MAX)
    }
}

// an element carrying the fade marker
//
// the revealed flag lives on the element itself, so that the stagger path, the
// visibility path and the fallback can all fire without revealing anything twice
pub trait FadeTarget {
    fn revealed(&self) -> bool;

    fn mark_revealed(&self);

    // hidden and offset downward, with the css transition installed
    fn prepare(&self, motion: &Motion);

    // full opacity and zero offset, right now
    fn show(&self);
}

// the capability that turns a hidden element into a visible one after a delay
pub trait Animator<T> {
    fn animate(&self, target: &T, delay: Duration, motion: &Motion);
}

// eager policy: every unrevealed element in document order, delayed by its index
pub fn reveal_staggered<T, A>(targets: &[T], animator: &A, motion: &Motion) -> usize
where
    T: FadeTarget,
    A: Animator<T>,
{
    let mut revealed = 0;

    for (idx, target) in targets.iter().enumerate() {
        if target.revealed() {
            continue;
        }

        target.mark_revealed();
        animator.animate(target, motion.delay(idx), motion);
        revealed += 1;
    }

    debug!(total = targets.len(), revealed, "staggered reveal");

    revealed
}

// lazy policy, part one: hide whatever is still waiting for its reveal
pub fn prepare_for_visibility<T: FadeTarget>(targets: &[T], motion: &Motion) -> usize {
    let mut prepared = 0;

    for target in targets.iter().filter(|t| !t.revealed()) {
        target.prepare(motion);
        prepared += 1;
    }

    prepared
}

// lazy policy, part two: called from the intersection callback.  returns true once the
// element no longer needs observing
pub fn reveal_on_visible<T: FadeTarget>(target: &T, intersecting: bool) -> bool {
    if !intersecting {
        return false;
    }

    if !target.revealed() {
        target.mark_revealed();
        target.show();
    }

    true
}

// without an intersection observer nothing would ever fire, so show everything
pub fn reveal_all_now<T: FadeTarget>(targets: &[T]) -> usize {
    let mut revealed = 0;

    for target in targets.iter().filter(|t| !t.revealed()) {
        target.mark_revealed();
        target.show();
        revealed += 1;
    }

    revealed
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    #[derive(Default)]
    struct Fade {
        revealed: Cell<bool>,
        prepared: Cell<usize>,
        shown: Cell<usize>,
    }

    impl FadeTarget for Fade {
        fn revealed(&self) -> bool {
            self.revealed.get()
        }

        fn mark_revealed(&self) {
            self.revealed.set(true);
        }

        fn prepare(&self, _motion: &Motion) {
            self.prepared.set(self.prepared.get() + 1);
        }

        fn show(&self) {
            self.shown.set(self.shown.get() + 1);
        }
    }

    // shows the target immediately and records the requested delay
    #[derive(Default)]
    struct Recorder {
        delays: RefCell<Vec<Duration>>,
    }

    impl Animator<Fade> for Recorder {
        fn animate(&self, target: &Fade, delay: Duration, _motion: &Motion) {
            self.delays.borrow_mut().push(delay);
            target.show();
        }
    }

    fn motion() -> Motion {
        Motion::from(&RevealConfig::default())
    }

    fn fades(n: usize) -> Vec<Fade> {
        (0..n).map(|_| Fade::default()).collect()
    }

    #[test]
    fn motion_from_config() {
        let m = motion();

        assert_eq!(m.stagger, Duration::from_millis(150));
        assert_eq!(m.duration, Duration::from_millis(800));
        assert_eq!(m.ease, "power3.out");
        assert_eq!(m.delay(3), Duration::from_millis(450));
    }

    #[test]
    fn stagger_delays_follow_document_order() {
        let targets = fades(3);
        let animator = Recorder::default();

        assert_eq!(reveal_staggered(&targets, &animator, &motion()), 3);
        assert_eq!(
            *animator.delays.borrow(),
            vec![
                Duration::ZERO,
                Duration::from_millis(150),
                Duration::from_millis(300),
            ]
        );
    }

    #[test]
    fn stagger_skips_revealed_but_keeps_positions() {
        let targets = fades(3);
        targets[0].revealed.set(true);
        let animator = Recorder::default();

        assert_eq!(reveal_staggered(&targets, &animator, &motion()), 2);
        assert_eq!(
            *animator.delays.borrow(),
            vec![Duration::from_millis(150), Duration::from_millis(300)]
        );
    }

    #[test]
    fn visibility_fires_once_per_element() {
        let target = Fade::default();

        assert!(!reveal_on_visible(&target, false));
        assert_eq!(target.shown.get(), 0);

        assert!(reveal_on_visible(&target, true));
        assert!(reveal_on_visible(&target, true));
        assert_eq!(target.shown.get(), 1);
    }

    #[test]
    fn prepare_leaves_revealed_elements_alone() {
        let targets = fades(2);
        targets[1].revealed.set(true);

        assert_eq!(prepare_for_visibility(&targets, &motion()), 1);
        assert_eq!(targets[0].prepared.get(), 1);
        assert_eq!(targets[1].prepared.get(), 0);
    }

    #[test]
    fn fallback_shows_everything_once() {
        let targets = fades(3);

        assert_eq!(reveal_all_now(&targets), 3);
        assert_eq!(reveal_all_now(&targets), 0);
        assert!(targets.iter().all(|t| t.shown.get() == 1));
    }

    #[test]
    fn every_path_together_reveals_each_element_exactly_once() {
        let targets = fades(4);
        let animator = Recorder::default();
        let m = motion();

        // footer load, page content, intersection callbacks, then the hero's last stage
        reveal_staggered(&targets[..2], &animator, &m);
        prepare_for_visibility(&targets, &m);
        reveal_on_visible(&targets[1], true);
        reveal_on_visible(&targets[2], true);
        reveal_staggered(&targets, &animator, &m);
        reveal_all_now(&targets);

        assert!(targets.iter().all(|t| t.revealed.get()));
        assert!(targets.iter().all(|t| t.shown.get() == 1));
    }
}
