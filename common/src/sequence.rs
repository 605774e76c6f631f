use std::future::Future;
use std::time::Duration;

// an ordered list of (offset, action) steps, each offset measured from the start
//
// the sequence itself never touches a clock: play() is handed a sleep function, which
// is a real timer in the browser and a virtual one in the tests
#[derive(Clone, Debug, PartialEq)]
pub struct Step<A> {
    pub at: Duration,
    pub action: A,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sequence<A> {
    steps: Vec<Step<A>>,
}

impl<A> Default for Sequence<A> {
    fn default() -> Self {
        Sequence { steps: Vec::new() }
    }
}

impl<A> Sequence<A> {
    pub fn new() -> Self {
        Sequence::default()
    }

    // steps stay sorted by offset; steps sharing an offset keep insertion order
    pub fn step(mut self, at: Duration, action: A) -> Self {
        let idx = self.steps.partition_point(|step| step.at <= at);
        self.steps.insert(idx, Step { at, action });
        self
    }

    pub fn steps(&self) -> &[Step<A>] {
        &self.steps
    }

    // the pause before each step, relative to the previous one
    pub fn gaps(&self) -> impl Iterator<Item = Duration> + '_ {
        let mut elapsed = Duration::ZERO;

        self.steps.iter().map(move |step| {
            let gap = step.at.saturating_sub(elapsed);
            elapsed = step.at;
            gap
        })
    }

    pub async fn play<S, Fut, F>(self, mut sleep: S, mut run: F)
    where
        S: FnMut(Duration) -> Fut,
        Fut: Future<Output = ()>,
        F: FnMut(A),
    {
        let gaps: Vec<Duration> = self.gaps().collect();

        for (gap, step) in gaps.into_iter().zip(self.steps) {
            if !gap.is_zero() {
                sleep(gap).await;
            }

            run(step.action);
        }
    }
}
